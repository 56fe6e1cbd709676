//! Default compiler flags per language.

use crate::language::LanguageId;

/// Flags used when a language has no dedicated entry.
pub const DEFAULT_FLAGS: &[&str] = &[];

/// Returns the flags prepended to user flags when compiling `language`.
pub fn default_flags_for(language: LanguageId) -> &'static [&'static str] {
    match language {
        LanguageId::Cpp => &["-O2", "-std=c++17"],
        LanguageId::C => &["-O2"],
        LanguageId::Rust => &["-O"],
        _ => DEFAULT_FLAGS,
    }
}
