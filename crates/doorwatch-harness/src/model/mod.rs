//! Reference model for model-based testing.
//!
//! The model is a simplified implementation that captures the SPECIFICATION
//! of the supervised door without tasks, channels, or a scheduler. It serves
//! as the oracle against which the real implementation is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Specification not implementation: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

mod door;
pub mod operation;

pub use door::ModelDoor;
pub use operation::Operation;
