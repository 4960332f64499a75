//! Fuzz target for the door state machine and its reference model
//!
//! # Strategy
//!
//! - Operation sequences: Arbitrary interleavings of lock, unlock, and time
//!   advances
//! - Boundary deadlines: advances that land exactly on a check's deadline
//!
//! # Invariants
//!
//! - Open flag is last-call-wins: model and plain door always agree
//! - A fault is only ever attributable to one unlock (faults <= unlocks)
//! - Fault count is monotonic
//! - Pending checks never exceed unlocks issued so far
//! - NEVER panic on any operation sequence

#![no_main]

use std::time::Duration;

use doorwatch_core::{Door, SimpleDoor};
use doorwatch_harness::{ModelDoor, Operation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|ops: Vec<Operation>| {
    let mut model = ModelDoor::new(Duration::from_secs(2));
    let plain = SimpleDoor::new();

    let mut unlocks: u64 = 0;
    let mut last_faults: u64 = 0;

    for op in &ops {
        match op {
            Operation::Lock => plain.lock(),
            Operation::Unlock => {
                plain.unlock();
                unlocks += 1;
            },
            Operation::AdvanceTime { .. } => {},
        }

        model.apply(op);

        assert_eq!(
            model.is_opened(),
            plain.is_opened(),
            "model and plain door disagree on the open flag after {:?}",
            op
        );

        assert!(
            model.faults() <= unlocks,
            "faults ({}) exceed unlocks ({})",
            model.faults(),
            unlocks
        );

        assert!(
            model.faults() >= last_faults,
            "fault count went backwards: {} -> {}",
            last_faults,
            model.faults()
        );
        last_faults = model.faults();

        assert!(
            model.pending_checks() as u64 <= unlocks,
            "pending checks ({}) exceed unlocks ({})",
            model.pending_checks(),
            unlocks
        );
    }
});
