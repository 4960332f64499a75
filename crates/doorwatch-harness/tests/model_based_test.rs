//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! implementation behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelDoor      TimedDoor       Compare
//!      (reference)   (paused clock)   open flag + fault count
//! ```

use std::time::Duration;

use doorwatch_core::{Door, SystemEnv, TimedDoor};
use doorwatch_harness::{ModelDoor, Operation, advance_and_settle, settle};
use proptest::prelude::*;

/// Strategy for generating operations.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        // Weight towards the operations that move time and stack checks
        2 => Just(Operation::Lock),
        3 => Just(Operation::Unlock),
        4 => (0u16..8000).prop_map(|millis| Operation::AdvanceTime { millis }),
    ]
}

/// Drive the real door through the operations under a paused clock and
/// return its observable state: the open flag and total faults delivered.
fn run_real(timeout: Duration, ops: &[Operation]) -> (bool, u64) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("current-thread runtime");

    rt.block_on(async {
        tokio::time::pause();

        let (door, mut faults) =
            TimedDoor::new(SystemEnv::new(), timeout).expect("positive timeout");

        for op in ops {
            match op {
                Operation::Lock => door.lock(),
                Operation::Unlock => {
                    door.unlock();
                    // Anchor the check's deadline at the current instant
                    // before time moves again.
                    settle().await;
                },
                Operation::AdvanceTime { millis } => {
                    advance_and_settle(Duration::from_millis(u64::from(*millis))).await;
                },
            }
        }

        let mut fault_count = 0u64;
        while faults.try_recv().is_ok() {
            fault_count += 1;
        }

        (door.is_opened(), fault_count)
    })
}

proptest! {
    /// The real door and the model agree on the open flag and on how many
    /// faults any operation sequence produces.
    #[test]
    fn prop_model_matches_real(
        timeout_secs in 1u64..8,
        ops in prop::collection::vec(operation_strategy(), 0..40),
    ) {
        let timeout = Duration::from_secs(timeout_secs);

        let mut model = ModelDoor::new(timeout);
        for op in &ops {
            model.apply(op);
        }

        let (real_open, real_faults) = run_real(timeout, &ops);

        prop_assert_eq!(
            real_open,
            model.is_opened(),
            "open flag diverged for ops {:?}",
            ops
        );
        prop_assert_eq!(
            real_faults,
            model.faults(),
            "fault count diverged for ops {:?}",
            ops
        );
    }

    /// A check can only fault for an unlock that scheduled it.
    #[test]
    fn prop_faults_never_exceed_unlocks(
        ops in prop::collection::vec(operation_strategy(), 0..80),
    ) {
        let unlocks = ops.iter().filter(|op| matches!(op, Operation::Unlock)).count() as u64;

        let mut model = ModelDoor::new(Duration::from_secs(2));
        for op in &ops {
            model.apply(op);
        }

        prop_assert!(model.faults() <= unlocks);
    }

    /// The model's open flag is exactly "last lock/unlock call was unlock".
    #[test]
    fn prop_open_iff_last_call_was_unlock(
        ops in prop::collection::vec(operation_strategy(), 0..80),
    ) {
        let mut model = ModelDoor::new(Duration::from_secs(2));
        for op in &ops {
            model.apply(op);
        }

        let expected = ops
            .iter()
            .rev()
            .find_map(|op| match op {
                Operation::Unlock => Some(true),
                Operation::Lock => Some(false),
                Operation::AdvanceTime { .. } => None,
            })
            .unwrap_or(false);

        prop_assert_eq!(model.is_opened(), expected);
    }
}

mod smoke_tests {
    use super::*;

    /// Basic smoke test pinning the model against a known sequence.
    #[test]
    fn model_basic_sequence() {
        let mut model = ModelDoor::new(Duration::from_secs(5));

        model.apply(&Operation::Unlock);
        model.apply(&Operation::AdvanceTime { millis: 1000 });
        model.apply(&Operation::Lock);
        model.apply(&Operation::AdvanceTime { millis: 5000 });
        assert_eq!(model.faults(), 0);

        model.apply(&Operation::Unlock);
        model.apply(&Operation::AdvanceTime { millis: 6000 });
        assert_eq!(model.faults(), 1);
        assert!(model.is_opened());
    }

    /// The real door matches the model on the same known sequence.
    #[test]
    fn real_door_matches_basic_sequence() {
        let ops = [
            Operation::Unlock,
            Operation::AdvanceTime { millis: 1000 },
            Operation::Lock,
            Operation::AdvanceTime { millis: 5000 },
            Operation::Unlock,
            Operation::AdvanceTime { millis: 6000 },
        ];

        let (open, faults) = run_real(Duration::from_secs(5), &ops);

        assert!(open);
        assert_eq!(faults, 1);
    }
}
