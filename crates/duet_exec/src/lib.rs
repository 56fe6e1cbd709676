//! Building and running candidate programs.
//!
//! [`Compiler`] turns a source file into a runnable [`Program`]: it resolves
//! the toolchain, consults the compile cache, and invokes the language's build
//! command on a miss. [`run`] executes any [`RunCommand`] with a prepared
//! stdin, capturing output, exit status, and wall time, with an optional
//! timeout that kills the child.

#![warn(missing_docs)]

pub mod command;
pub mod compiler;
pub mod error;
pub mod runner;

pub use command::{build_command, RunCommand};
pub use compiler::{BuildOptions, Compiler, Program};
pub use error::ExecError;
pub use runner::{run, RunOutput, RunStatus};
