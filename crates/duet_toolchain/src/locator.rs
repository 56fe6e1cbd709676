//! Probing the host for a runnable compiler or interpreter.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::ToolchainError;
use crate::hint::{install_hint, HostPlatform};
use crate::language::LanguageDescriptor;

/// Checks whether a command can be run with a given argument list.
///
/// The seam exists so tests can fake the host instead of spawning processes.
pub trait Probe {
    /// Returns `true` if `command args...` starts and exits successfully.
    fn succeeds(&self, command: &str, args: &[&str]) -> bool;
}

/// Probe that actually spawns the command with all stdio discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn succeeds(&self, command: &str, args: &[&str]) -> bool {
        Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

const GO_PROBES: &[&[&str]] = &[&["version"]];
const DEFAULT_PROBES: &[&[&str]] = &[&["--version"], &["-version"]];

/// Returns the probe invocations to try for `candidate`, in order.
///
/// Most toolchains answer `--version`, with `-version` as the fallback for
/// older JDKs. Go only understands a `version` subcommand.
fn probe_forms(candidate: &str) -> &'static [&'static [&'static str]] {
    let base = Path::new(candidate)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(candidate);
    match base {
        "go" => GO_PROBES,
        _ => DEFAULT_PROBES,
    }
}

/// Returns the first candidate that responds to a version probe.
///
/// Order encodes preference. Results are not cached across calls.
pub fn locate_with<P: Probe>(probe: &P, candidates: &[&str]) -> Option<String> {
    for candidate in candidates {
        for args in probe_forms(candidate) {
            tracing::trace!(candidate, ?args, "probing toolchain");
            if probe.succeeds(candidate, args) {
                tracing::debug!(candidate, "toolchain found");
                return Some((*candidate).to_string());
            }
        }
    }
    tracing::debug!(?candidates, "no toolchain candidate is runnable");
    None
}

/// Probes the real host for the first runnable candidate.
pub fn locate(candidates: &[&str]) -> Option<String> {
    locate_with(&SystemProbe, candidates)
}

/// Locates a toolchain from a list of candidates on behalf of `language`,
/// turning a miss into [`ToolchainError::NotFound`] with an install hint.
pub fn locate_for<P: Probe>(
    probe: &P,
    language: &LanguageDescriptor,
    candidates: &[&str],
) -> Result<String, ToolchainError> {
    locate_with(probe, candidates).ok_or_else(|| ToolchainError::NotFound {
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
        hint: install_hint(language.id, HostPlatform::current()),
    })
}
