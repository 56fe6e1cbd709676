//! Stress testing a target solution against a trusted standard solution.
//!
//! A configured [`Checker`] compiles both programs once, then repeatedly
//! generates an input, runs the standard solution without a time limit, runs
//! the target with one, and compares their outputs. The first failure stops
//! the loop and is saved to disk so it can be replayed.

#![warn(missing_docs)]

pub mod artifacts;
pub mod checker;
pub mod error;
pub mod options;
pub mod report;

pub use artifacts::{FailureArtifacts, INPUT_FILE, STD_OUTPUT_FILE, TARGET_OUTPUT_FILE};
pub use checker::{create_checker, Checker, CheckerConfig};
pub use error::{CheckerError, Role};
pub use options::CheckerOptions;
pub use report::{CheckOutcome, CheckReport, Failure, FailureKind};
