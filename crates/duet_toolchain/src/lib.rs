//! Language detection and host toolchain discovery.
//!
//! Maps source file extensions to a static [`LanguageDescriptor`] table and
//! probes the host for the first runnable compiler or interpreter among a
//! language's ordered candidates. Probing is never cached: every call to
//! [`locate`] asks the host again.

#![warn(missing_docs)]

pub mod error;
pub mod flags;
pub mod hint;
pub mod language;
pub mod locator;

pub use error::ToolchainError;
pub use flags::default_flags_for;
pub use hint::{install_hint, HostPlatform};
pub use language::{resolve, BuildStyle, LanguageDescriptor, LanguageId, LanguageKind, LANGUAGES};
pub use locator::{locate, locate_with, locate_for, Probe, SystemProbe};
