//! Turning source files into runnable programs through the compile cache.

use std::path::{Path, PathBuf};
use std::time::Duration;

use duet_cache::{ArtifactKind, CompilationProfile, CompileCache};
use duet_toolchain::{
    default_flags_for, locate_for, resolve, BuildStyle, LanguageDescriptor, LanguageId,
    SystemProbe, ToolchainError,
};

use crate::command::{build_command, class_launch_command, interpreter_command, RunCommand};
use crate::error::ExecError;
use crate::runner::{run, RunOutput};

/// User-controlled knobs for one compile request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Compiler or interpreter to use instead of probing the host.
    pub compiler: Option<String>,
    /// Flags appended after the language defaults.
    pub flags: Vec<String>,
}

/// A source file ready to execute.
#[derive(Debug, Clone)]
pub struct Program {
    /// The source this program was built from.
    pub source: PathBuf,
    /// Detected language.
    pub language: LanguageId,
    /// Compiler or interpreter that was resolved for it.
    pub toolchain: String,
    /// How to start it.
    pub command: RunCommand,
    /// Built artifact, for compiled languages.
    pub artifact: Option<PathBuf>,
    /// Whether the artifact came from the cache without compiling.
    pub cached: bool,
}

impl Program {
    /// Runs the program with `input` on stdin.
    pub fn run(&self, input: &str, timeout: Option<Duration>) -> Result<RunOutput, ExecError> {
        run(&self.command, input, timeout)
    }
}

/// Builds programs, reusing cached artifacts when their fingerprint matches.
pub struct Compiler {
    cache: CompileCache,
}

impl Compiler {
    /// Creates a compiler backed by the cache in `cache_dir`.
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache: CompileCache::load_or_create(cache_dir),
        }
    }

    /// Returns the underlying cache.
    pub fn cache(&self) -> &CompileCache {
        &self.cache
    }

    /// Resolves, fingerprints, and if needed compiles `source`.
    ///
    /// Interpreted languages skip the cache entirely. For compiled languages
    /// the fingerprint is recomputed from the file on every call; a cache hit
    /// returns the stored artifact without invoking the compiler.
    pub fn prepare(&mut self, source: &Path, options: &BuildOptions) -> Result<Program, ExecError> {
        if !source.is_file() {
            return Err(ExecError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        let language = resolve(source).ok_or_else(|| ToolchainError::UnsupportedLanguage {
            path: source.display().to_string(),
        })?;
        let toolchain = match &options.compiler {
            Some(explicit) => explicit.clone(),
            None => locate_for(&SystemProbe, language, language.toolchains)?,
        };

        if !language.is_compiled() {
            tracing::debug!(source = %source.display(), interpreter = %toolchain, "interpreted program");
            return Ok(Program {
                source: source.to_path_buf(),
                language: language.id,
                command: interpreter_command(&toolchain, source),
                toolchain,
                artifact: None,
                cached: false,
            });
        }

        let profile = CompilationProfile::for_file(
            source,
            &toolchain,
            default_flags_for(language.id),
            &options.flags,
        )?;

        let (artifact, cached) = match self.cache.lookup(source, &toolchain, &profile) {
            Some(hit) => (hit, true),
            None => (self.compile(language, source, &toolchain, &profile)?, false),
        };

        let command = match language.build_style {
            BuildStyle::ClassDirectory => {
                let launcher = locate_for(&SystemProbe, language, language.launchers)?;
                class_launch_command(&launcher, &artifact, source)
            }
            _ => RunCommand::new(artifact.to_string_lossy().into_owned()),
        };

        Ok(Program {
            source: source.to_path_buf(),
            language: language.id,
            toolchain,
            command,
            artifact: Some(artifact),
            cached,
        })
    }

    fn compile(
        &mut self,
        language: &LanguageDescriptor,
        source: &Path,
        compiler: &str,
        profile: &CompilationProfile,
    ) -> Result<PathBuf, ExecError> {
        let kind = match language.build_style {
            BuildStyle::ClassDirectory => ArtifactKind::ClassDirectory,
            _ => ArtifactKind::Executable,
        };
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "program".to_string());
        let artifact = self.cache.artifact_path(&stem, profile, kind);
        self.cache.prepare(&artifact, kind)?;

        let Some(cmd) = build_command(language.build_style, compiler, source, &artifact, &profile.flags)
        else {
            return Err(ExecError::CompileFailed {
                source_path: source.to_path_buf(),
                message: format!("{} sources have no build step", language.display_name),
            });
        };
        tracing::info!(command = %cmd, "compiling");

        let out = run(&cmd, "", None)?;
        if !out.success() {
            let message = [out.stderr.trim(), out.stdout.trim()]
                .into_iter()
                .find(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("`{cmd}` {}", out.describe_failure()));
            return Err(ExecError::CompileFailed {
                source_path: source.to_path_buf(),
                message,
            });
        }
        if !artifact.exists() {
            return Err(ExecError::CompileFailed {
                source_path: source.to_path_buf(),
                message: format!("`{cmd}` succeeded but produced no {}", artifact.display()),
            });
        }

        self.cache.record(source, compiler, profile, &artifact)?;
        Ok(artifact)
    }
}
