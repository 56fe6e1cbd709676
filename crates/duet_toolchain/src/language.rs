//! Static language table and extension-based resolution.

use std::fmt;
use std::path::Path;

/// Identifier of a supported source language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LanguageId {
    /// C++ (`.cpp`, `.cc`, `.cxx`).
    Cpp,
    /// C (`.c`).
    C,
    /// Go (`.go`).
    Go,
    /// Rust (`.rs`).
    Rust,
    /// Java (`.java`).
    Java,
    /// Python (`.py`).
    Python,
    /// JavaScript (`.js`).
    JavaScript,
    /// TypeScript (`.ts`).
    TypeScript,
}

impl LanguageId {
    /// Short lowercase name, used in log lines and cache directory names.
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageId::Cpp => "cpp",
            LanguageId::C => "c",
            LanguageId::Go => "go",
            LanguageId::Rust => "rust",
            LanguageId::Java => "java",
            LanguageId::Python => "python",
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a language produces an artifact before running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LanguageKind {
    /// Built once into an artifact, then executed.
    Compiled,
    /// Executed directly by an interpreter.
    Interpreted,
}

/// How a compiled language's build command line is shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStyle {
    /// `compiler source -o output <flags>`.
    Generic,
    /// `compiler build -o output source` (Go-style build verb).
    BuildSubcommand,
    /// Compile into a class directory, run through a launcher with a classpath.
    ClassDirectory,
    /// No build step; `[interpreter, source]`.
    Interpreted,
}

/// Static description of one supported language.
#[derive(Debug)]
pub struct LanguageDescriptor {
    /// Language identifier.
    pub id: LanguageId,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Recognized file extensions, without the leading dot.
    pub extensions: &'static [&'static str],
    /// Compiled or interpreted.
    pub kind: LanguageKind,
    /// Build command shape.
    pub build_style: BuildStyle,
    /// Compiler (or interpreter) candidates, most preferred first.
    pub toolchains: &'static [&'static str],
    /// Launcher candidates for [`BuildStyle::ClassDirectory`] artifacts.
    pub launchers: &'static [&'static str],
}

impl LanguageDescriptor {
    /// Returns `true` for languages that go through the compile cache.
    pub fn is_compiled(&self) -> bool {
        self.kind == LanguageKind::Compiled
    }
}

/// Every language duet knows how to build or run.
pub static LANGUAGES: &[LanguageDescriptor] = &[
    LanguageDescriptor {
        id: LanguageId::Cpp,
        display_name: "C++",
        extensions: &["cpp", "cc", "cxx"],
        kind: LanguageKind::Compiled,
        build_style: BuildStyle::Generic,
        toolchains: &["g++", "clang++"],
        launchers: &[],
    },
    LanguageDescriptor {
        id: LanguageId::C,
        display_name: "C",
        extensions: &["c"],
        kind: LanguageKind::Compiled,
        build_style: BuildStyle::Generic,
        toolchains: &["gcc", "clang", "cc"],
        launchers: &[],
    },
    LanguageDescriptor {
        id: LanguageId::Go,
        display_name: "Go",
        extensions: &["go"],
        kind: LanguageKind::Compiled,
        build_style: BuildStyle::BuildSubcommand,
        toolchains: &["go"],
        launchers: &[],
    },
    LanguageDescriptor {
        id: LanguageId::Rust,
        display_name: "Rust",
        extensions: &["rs"],
        kind: LanguageKind::Compiled,
        build_style: BuildStyle::Generic,
        toolchains: &["rustc"],
        launchers: &[],
    },
    LanguageDescriptor {
        id: LanguageId::Java,
        display_name: "Java",
        extensions: &["java"],
        kind: LanguageKind::Compiled,
        build_style: BuildStyle::ClassDirectory,
        toolchains: &["javac"],
        launchers: &["java"],
    },
    LanguageDescriptor {
        id: LanguageId::Python,
        display_name: "Python",
        extensions: &["py"],
        kind: LanguageKind::Interpreted,
        build_style: BuildStyle::Interpreted,
        toolchains: &["python3", "python"],
        launchers: &[],
    },
    LanguageDescriptor {
        id: LanguageId::JavaScript,
        display_name: "JavaScript",
        extensions: &["js"],
        kind: LanguageKind::Interpreted,
        build_style: BuildStyle::Interpreted,
        toolchains: &["node"],
        launchers: &[],
    },
    LanguageDescriptor {
        id: LanguageId::TypeScript,
        display_name: "TypeScript",
        extensions: &["ts"],
        kind: LanguageKind::Interpreted,
        build_style: BuildStyle::Interpreted,
        toolchains: &["tsx", "ts-node"],
        launchers: &[],
    },
];

/// Resolves the language of a source file from its extension.
///
/// Returns `None` when the extension is missing or unrecognized. Matching is
/// case-sensitive, like the toolchains themselves.
pub fn resolve(path: &Path) -> Option<&'static LanguageDescriptor> {
    let ext = path.extension()?.to_str()?;
    LANGUAGES.iter().find(|lang| lang.extensions.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_cpp_variants() {
        for name in ["a.cpp", "a.cc", "dir/a.cxx"] {
            let lang = resolve(Path::new(name)).unwrap();
            assert_eq!(lang.id, LanguageId::Cpp);
            assert!(lang.is_compiled());
        }
    }

    #[test]
    fn resolve_table() {
        for (name, id, kind) in [
            ("x.c", LanguageId::C, LanguageKind::Compiled),
            ("x.go", LanguageId::Go, LanguageKind::Compiled),
            ("x.rs", LanguageId::Rust, LanguageKind::Compiled),
            ("x.java", LanguageId::Java, LanguageKind::Compiled),
            ("x.py", LanguageId::Python, LanguageKind::Interpreted),
            ("x.js", LanguageId::JavaScript, LanguageKind::Interpreted),
            ("x.ts", LanguageId::TypeScript, LanguageKind::Interpreted),
        ] {
            let lang = resolve(Path::new(name)).unwrap();
            assert_eq!(lang.id, id, "{name}");
            assert_eq!(lang.kind, kind, "{name}");
        }
    }

    #[test]
    fn resolve_unknown_extension() {
        assert!(resolve(Path::new("notes.txt")).is_none());
    }

    #[test]
    fn resolve_missing_extension() {
        assert!(resolve(Path::new("Makefile")).is_none());
    }

    #[test]
    fn build_styles() {
        assert_eq!(
            resolve(Path::new("m.go")).unwrap().build_style,
            BuildStyle::BuildSubcommand
        );
        let java = resolve(Path::new("Main.java")).unwrap();
        assert_eq!(java.build_style, BuildStyle::ClassDirectory);
        assert_eq!(java.launchers, &["java"]);
    }

    #[test]
    fn extensions_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for lang in LANGUAGES {
            for ext in lang.extensions {
                assert!(seen.insert(*ext), "duplicate extension {ext}");
            }
        }
    }

    #[test]
    fn python3_preferred_over_python() {
        let py = resolve(Path::new("s.py")).unwrap();
        assert_eq!(py.toolchains, &["python3", "python"]);
    }
}
