//! Batch generation of `.in`/`.out` test-data pairs.
//!
//! A [`Maker`] holds an ordered queue of cases. [`Maker::generate`] wipes and
//! recreates the output directory after checking that doing so is safe,
//! compiles the reference solution once, then runs the cases in CPU-sized
//! parallel batches. Case failures are recorded in the
//! [`GenerationReport`]; only setup problems return [`MakerError`].

#![warn(missing_docs)]

pub mod environment;
pub mod error;
pub mod maker;
pub mod options;
pub mod report;

pub use environment::{prepare_environment, FORBIDDEN_OUTPUT_NAMES};
pub use error::MakerError;
pub use maker::{create_maker, Case, Maker};
pub use options::{resolve_solution, MakerOptions, SOLUTION_FALLBACKS};
pub use report::{GenerationReport, GenerationResult};
