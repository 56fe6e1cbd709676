//! Shared foundational types used across the duet stress-testing toolchain.
//!
//! This crate provides the [`Fingerprint`] content digest used to key compiled
//! artifacts, plus small path helpers shared by the orchestrators.

#![warn(missing_docs)]

pub mod hash;
pub mod path;

pub use hash::{Fingerprint, ParseFingerprintError};
pub use path::normalize_lexically;
