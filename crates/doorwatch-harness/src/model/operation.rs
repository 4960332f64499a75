//! Operations for model-based testing.
//!
//! Operations represent all possible actions on a supervised door. They are
//! generated randomly (by proptest or the fuzzer) and applied to both the
//! model and the real implementation.

use arbitrary::Arbitrary;

/// Operations that can be applied to a door.
///
/// Operations are small and composable so random exploration hits the
/// interesting interleavings: unlocks stacking pending checks, locks racing
/// deadlines, and long idle stretches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Close the door.
    Lock,

    /// Open the door, scheduling one more pending check.
    Unlock,

    /// Advance virtual time.
    ///
    /// Fires every pending check whose deadline falls within the advance.
    AdvanceTime {
        /// Milliseconds to advance.
        millis: u16,
    },
}
