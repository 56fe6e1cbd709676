//! Output comparison between the standard and target solutions.

#![warn(missing_docs)]

use std::fmt;

use serde::Deserialize;

/// How two outputs are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Byte-for-byte equality.
    Exact,
    /// Line-based equality after [`normalize`].
    #[default]
    Normalized,
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompareMode::Exact => "exact",
            CompareMode::Normalized => "normalized",
        })
    }
}

/// Splits `text` into the lines a normalized comparison sees.
///
/// CRLF becomes LF, every empty line is dropped (not only trailing ones), and
/// each remaining line is right-trimmed. A whitespace-only line is trimmed to
/// empty but kept, since it was not empty before trimming.
pub fn normalize(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::trim_end)
        .collect()
}

/// Returns `true` if `actual` matches `expected` under `mode`.
pub fn compare(expected: &str, actual: &str, mode: CompareMode) -> bool {
    match mode {
        CompareMode::Exact => expected == actual,
        CompareMode::Normalized => normalize(expected) == normalize(actual),
    }
}

/// The first point where two outputs disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// 1-based line in the compared view (normalized lines, or raw lines in
    /// exact mode).
    pub line: usize,
    /// Expected line, or `None` past the end of the expected output.
    pub expected: Option<String>,
    /// Actual line, or `None` past the end of the actual output.
    pub actual: Option<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |s: &Option<String>| match s {
            Some(line) => format!("{line:?}"),
            None => "<end of output>".to_string(),
        };
        write!(
            f,
            "line {}: expected {}, found {}",
            self.line,
            show(&self.expected),
            show(&self.actual)
        )
    }
}

/// Locates the first differing line, or `None` if the outputs match.
pub fn first_mismatch(expected: &str, actual: &str, mode: CompareMode) -> Option<Mismatch> {
    if compare(expected, actual, mode) {
        return None;
    }
    let (left, right): (Vec<&str>, Vec<&str>) = match mode {
        CompareMode::Exact => (expected.split('\n').collect(), actual.split('\n').collect()),
        CompareMode::Normalized => (normalize(expected), normalize(actual)),
    };
    let len = left.len().max(right.len());
    for i in 0..len {
        let (l, r) = (left.get(i), right.get(i));
        if l != r {
            return Some(Mismatch {
                line: i + 1,
                expected: l.map(|s| s.to_string()),
                actual: r.map(|s| s.to_string()),
            });
        }
    }
    // Exact mode can differ only in a way invisible to line splitting.
    Some(Mismatch {
        line: len.max(1),
        expected: left.last().map(|s| s.to_string()),
        actual: right.last().map(|s| s.to_string()),
    })
}
