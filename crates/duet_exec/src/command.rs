//! Language-specific command lines.

use std::fmt;
use std::path::Path;

use duet_toolchain::BuildStyle;

/// A program plus its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    /// Executable name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl RunCommand {
    /// Creates a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Builds the compile command for `source`.
///
/// `output` is the executable for [`BuildStyle::Generic`] and
/// [`BuildStyle::BuildSubcommand`], and the class directory for
/// [`BuildStyle::ClassDirectory`]. Returns `None` for interpreted languages.
pub fn build_command(
    style: BuildStyle,
    compiler: &str,
    source: &Path,
    output: &Path,
    flags: &[String],
) -> Option<RunCommand> {
    let cmd = RunCommand::new(compiler);
    match style {
        BuildStyle::Generic => Some(
            cmd.arg(path_arg(source))
                .arg("-o")
                .arg(path_arg(output))
                .args(flags.iter().cloned()),
        ),
        // Go takes build flags between the verb and the package list.
        BuildStyle::BuildSubcommand => Some(
            cmd.arg("build")
                .args(flags.iter().cloned())
                .arg("-o")
                .arg(path_arg(output))
                .arg(path_arg(source)),
        ),
        BuildStyle::ClassDirectory => Some(
            cmd.arg("-d")
                .arg(path_arg(output))
                .args(flags.iter().cloned())
                .arg(path_arg(source)),
        ),
        BuildStyle::Interpreted => None,
    }
}

/// Command that launches a class-directory artifact: `launcher -cp dir Class`.
pub fn class_launch_command(launcher: &str, class_dir: &Path, source: &Path) -> RunCommand {
    let class = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    RunCommand::new(launcher)
        .arg("-cp")
        .arg(path_arg(class_dir))
        .arg(class)
}

/// Command that runs `source` directly under `interpreter`.
pub fn interpreter_command(interpreter: &str, source: &Path) -> RunCommand {
    RunCommand::new(interpreter).arg(path_arg(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(f: &[&str]) -> Vec<String> {
        f.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn generic_shape() {
        let cmd = build_command(
            BuildStyle::Generic,
            "g++",
            Path::new("std.cpp"),
            Path::new(".duet/bin/std-1234abcd"),
            &flags(&["-O2", "-std=c++17"]),
        )
        .unwrap();
        assert_eq!(
            cmd.to_string(),
            "g++ std.cpp -o .duet/bin/std-1234abcd -O2 -std=c++17"
        );
    }

    #[test]
    fn build_subcommand_shape() {
        let cmd = build_command(
            BuildStyle::BuildSubcommand,
            "go",
            Path::new("main.go"),
            Path::new("out/main-1"),
            &[],
        )
        .unwrap();
        assert_eq!(cmd.to_string(), "go build -o out/main-1 main.go");
    }

    #[test]
    fn class_directory_shape() {
        let cmd = build_command(
            BuildStyle::ClassDirectory,
            "javac",
            Path::new("src/Main.java"),
            Path::new(".duet/classes/Main-1"),
            &[],
        )
        .unwrap();
        assert_eq!(cmd.to_string(), "javac -d .duet/classes/Main-1 src/Main.java");
    }

    #[test]
    fn interpreted_has_no_build() {
        assert!(build_command(
            BuildStyle::Interpreted,
            "python3",
            Path::new("a.py"),
            Path::new("x"),
            &[]
        )
        .is_none());
    }

    #[test]
    fn class_launch_uses_source_stem() {
        let cmd = class_launch_command("java", Path::new(".duet/classes/Main-1"), Path::new("src/Main.java"));
        assert_eq!(cmd.to_string(), "java -cp .duet/classes/Main-1 Main");
    }

    #[test]
    fn interpreter_shape() {
        let cmd = interpreter_command("python3", Path::new("gen.py"));
        assert_eq!(cmd.program, "python3");
        assert_eq!(cmd.args, vec!["gen.py"]);
    }
}
