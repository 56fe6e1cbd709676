//! Installation guidance shown when no toolchain candidate is runnable.

use crate::language::LanguageId;

/// Host operating system family, for picking installation instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostPlatform {
    /// Linux distributions.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
    /// Anything else.
    Other,
}

impl HostPlatform {
    /// Detects the platform this process runs on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => HostPlatform::Linux,
            "macos" => HostPlatform::MacOs,
            "windows" => HostPlatform::Windows,
            _ => HostPlatform::Other,
        }
    }
}

/// Returns a one-line suggestion for installing a toolchain for `language`.
pub fn install_hint(language: LanguageId, platform: HostPlatform) -> String {
    use HostPlatform::*;
    use LanguageId::*;

    let how = match (language, platform) {
        (Cpp | C, Linux) => "install gcc/g++ with your package manager (e.g. `apt install build-essential`)",
        (Cpp | C, MacOs) => "run `xcode-select --install` or `brew install gcc`",
        (Cpp | C, Windows) => "install MSYS2 and add its mingw64 `bin` directory to PATH",
        (Go, MacOs) => "run `brew install go`",
        (Go, _) => "download Go from https://go.dev/dl/",
        (Rust, _) => "install rustup from https://rustup.rs/",
        (Java, Linux) => "install a JDK (e.g. `apt install default-jdk`)",
        (Java, MacOs) => "run `brew install openjdk`",
        (Java, _) => "install a JDK from https://adoptium.net/",
        (Python, Linux) => "install python3 with your package manager",
        (Python, MacOs) => "run `brew install python`",
        (Python, _) => "install Python from https://www.python.org/downloads/",
        (JavaScript, _) => "install Node.js from https://nodejs.org/",
        (TypeScript, _) => "install Node.js, then run `npm install -g tsx`",
        (Cpp | C, Other) => "install a C/C++ compiler and add it to PATH",
    };
    format!("no {} toolchain found on PATH: {how}", language_label(language))
}

fn language_label(language: LanguageId) -> &'static str {
    crate::language::LANGUAGES
        .iter()
        .find(|l| l.id == language)
        .map(|l| l.display_name)
        .unwrap_or("matching")
}
