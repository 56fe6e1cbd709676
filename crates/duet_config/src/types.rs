//! Configuration types deserialized from `duet.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

pub use duet_diff::CompareMode;

/// Default directory for generated `.in`/`.out` pairs.
pub const DEFAULT_OUTPUT_DIR: &str = "data";
/// Default first case number.
pub const DEFAULT_START: u32 = 1;
/// Default target time limit in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
/// Default stress-test iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100;
/// Default compile cache directory, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".duet";

/// The top-level configuration parsed from `duet.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DuetConfig {
    /// Test-data generation settings.
    #[serde(default)]
    pub maker: MakerSection,
    /// Stress-test settings.
    #[serde(default)]
    pub checker: CheckerSection,
    /// Compile cache settings.
    #[serde(default)]
    pub cache: CacheSection,
}

/// `[maker]`: where the reference solution lives and where cases go.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MakerSection {
    /// Reference solution. When unset, conventional `std.*` names are tried.
    pub solution: Option<PathBuf>,
    /// Output directory, wiped and recreated on every run.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Number of the first generated case.
    #[serde(default = "default_start")]
    pub start: u32,
    /// Compiler or interpreter override.
    pub compiler: Option<String>,
    /// Extra compiler flags, appended after the language defaults.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub flags: Vec<String>,
}

impl Default for MakerSection {
    fn default() -> Self {
        Self {
            solution: None,
            output_dir: default_output_dir(),
            start: DEFAULT_START,
            compiler: None,
            flags: Vec::new(),
        }
    }
}

/// `[checker]`: the two solutions under comparison and the loop budget.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CheckerSection {
    /// The trusted reference solution.
    pub std: Option<PathBuf>,
    /// The solution under test.
    pub target: Option<PathBuf>,
    /// Compiler or interpreter override, applied to both.
    pub compiler: Option<String>,
    /// Extra compiler flags, applied to both.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub flags: Vec<String>,
    /// Output comparison mode.
    #[serde(default)]
    pub compare: CompareMode,
    /// Time limit for each target run, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Number of generate/run/compare rounds.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

impl Default for CheckerSection {
    fn default() -> Self {
        Self {
            std: None,
            target: None,
            compiler: None,
            flags: Vec::new(),
            compare: CompareMode::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// `[cache]`: location of the compile cache.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    /// Cache directory, relative to the project root.
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_start() -> u32 {
    DEFAULT_START
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `flags = "-g"` as shorthand for `flags = ["-g"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config: DuetConfig = toml::from_str("").unwrap();
        assert_eq!(config, DuetConfig::default());
        assert_eq!(config.maker.output_dir, PathBuf::from("data"));
        assert_eq!(config.maker.start, 1);
        assert_eq!(config.checker.compare, CompareMode::Normalized);
        assert_eq!(config.checker.timeout_ms, 1000);
        assert_eq!(config.checker.iterations, 100);
        assert_eq!(config.cache.dir, PathBuf::from(".duet"));
    }

    #[test]
    fn flags_single_string() {
        let config: DuetConfig = toml::from_str("[maker]\nflags = \"-g\"\n").unwrap();
        assert_eq!(config.maker.flags, vec!["-g"]);
    }

    #[test]
    fn flags_list() {
        let config: DuetConfig = toml::from_str("[checker]\nflags = [\"-g\", \"-DLOCAL\"]\n").unwrap();
        assert_eq!(config.checker.flags, vec!["-g", "-DLOCAL"]);
    }

    #[test]
    fn compare_mode_lowercase() {
        let config: DuetConfig = toml::from_str("[checker]\ncompare = \"exact\"\n").unwrap();
        assert_eq!(config.checker.compare, CompareMode::Exact);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(toml::from_str::<DuetConfig>("[maker]\nsolutoin = \"a.cpp\"\n").is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: DuetConfig = toml::from_str("[maker]\nstart = 5\n").unwrap();
        assert_eq!(config.maker.start, 5);
        assert_eq!(config.maker.output_dir, PathBuf::from("data"));
        assert!(config.maker.solution.is_none());
    }
}
