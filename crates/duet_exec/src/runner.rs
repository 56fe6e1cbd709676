//! Executing a program with prepared stdin and an optional wall-clock limit.

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::command::RunCommand;
use crate::error::ExecError;

/// Poll interval while waiting on a time-limited child.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The process exited on its own with this code.
    Exited(i32),
    /// The process was terminated by this signal (Unix only).
    Signaled(i32),
    /// The process exceeded its time limit and was killed.
    TimedOut,
}

/// Everything observed about one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Captured standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Captured standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Exit classification.
    pub status: RunStatus,
    /// Wall time from spawn to exit (or kill).
    pub elapsed: Duration,
}

impl RunOutput {
    /// Returns `true` if the process exited with code 0.
    pub fn success(&self) -> bool {
        self.status == RunStatus::Exited(0)
    }

    /// Returns `true` if the time limit fired.
    pub fn timed_out(&self) -> bool {
        self.status == RunStatus::TimedOut
    }

    /// One-line description of a non-successful run.
    pub fn describe_failure(&self) -> String {
        match self.status {
            RunStatus::Exited(code) => format!("exited with code {code}"),
            RunStatus::Signaled(sig) => format!("killed by signal {sig}"),
            RunStatus::TimedOut => format!("timed out after {} ms", self.elapsed.as_millis()),
        }
    }
}

/// Runs `command`, feeding `input` on stdin.
///
/// When `timeout` is set and the process is still alive once it elapses, the
/// process and every descendant in its process group are killed and the
/// result is [`RunStatus::TimedOut`] regardless of the exit code the kill
/// produces. A timed run whose descendants keep the output pipes open past
/// the deadline is treated the same way.
pub fn run(command: &RunCommand, input: &str, timeout: Option<Duration>) -> Result<RunOutput, ExecError> {
    let shown = command.to_string();
    tracing::trace!(command = %shown, ?timeout, "spawning");

    let start = Instant::now();
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt as _;
        cmd.process_group(0);
    }
    let mut child = cmd.spawn().map_err(|e| ExecError::Spawn {
        command: shown.clone(),
        source: e,
    })?;

    let io_err = |e| ExecError::Io {
        command: shown.clone(),
        source: e,
    };

    let mut stdin = child.stdin.take().ok_or_else(|| io_err(missing_pipe("stdin")))?;
    let stdout = child.stdout.take().ok_or_else(|| io_err(missing_pipe("stdout")))?;
    let stderr = child.stderr.take().ok_or_else(|| io_err(missing_pipe("stderr")))?;

    let input = input.as_bytes().to_vec();
    // A program may exit without draining stdin; a broken pipe is not an error.
    // The writer is detached: it ends once every holder of the pipe is gone.
    std::thread::spawn(move || {
        let _ = stdin.write_all(&input);
    });
    let stdout = Capture::spawn(stdout);
    let stderr = Capture::spawn(stderr);

    let (status, mut timed_out) = match timeout {
        Some(limit) => wait_with_timeout(&mut child, start, limit).map_err(io_err)?,
        None => (child.wait().map_err(io_err)?, false),
    };

    let drain_until = match timeout {
        None => None,
        Some(_) if timed_out => Instant::now().checked_add(DRAIN_GRACE),
        Some(limit) => start
            .checked_add(limit)
            .and_then(|deadline| deadline.checked_add(DRAIN_GRACE)),
    };
    let stdout_closed = stdout.wait_closed(drain_until);
    let stderr_closed = stderr.wait_closed(drain_until);
    if !(stdout_closed && stderr_closed) {
        tracing::debug!(command = %shown, "descendants still hold the output pipes, killing group");
        kill_group(&mut child);
        timed_out = true;
    }
    let elapsed = start.elapsed();

    let status = if timed_out {
        RunStatus::TimedOut
    } else {
        classify(status)
    };
    tracing::trace!(command = %shown, ?status, ms = elapsed.as_millis() as u64, "finished");

    Ok(RunOutput {
        stdout: String::from_utf8_lossy(&stdout.take()).into_owned(),
        stderr: String::from_utf8_lossy(&stderr.take()).into_owned(),
        status,
        elapsed,
    })
}

/// How long output is still collected after a kill, or after the deadline
/// of a timed run whose process already exited.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

fn missing_pipe(name: &str) -> std::io::Error {
    std::io::Error::other(format!("child {name} was not captured"))
}

/// An output pipe drained on a background thread into a shared buffer.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    closed: Receiver<()>,
}

impl Capture {
    fn spawn<R: Read + Send + 'static>(mut reader: R) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let (tx, closed) = mpsc::channel();
        let sink = Arc::clone(&buf);
        std::thread::spawn(move || {
            let mut chunk = [0u8; 8192];
            loop {
                match reader.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => match sink.lock() {
                        Ok(mut buf) => buf.extend_from_slice(&chunk[..n]),
                        Err(_) => break,
                    },
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                    Err(_) => break,
                }
            }
            let _ = tx.send(());
        });
        Self { buf, closed }
    }

    /// Waits for end of file, giving up at `until`. Returns `false` if the
    /// pipe was still open then.
    fn wait_closed(&self, until: Option<Instant>) -> bool {
        match until {
            None => {
                let _ = self.closed.recv();
                true
            }
            Some(until) => !matches!(
                self.closed
                    .recv_timeout(until.saturating_duration_since(Instant::now())),
                Err(RecvTimeoutError::Timeout)
            ),
        }
    }

    /// Whatever has been read so far.
    fn take(&self) -> Vec<u8> {
        self.buf
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .unwrap_or_default()
    }
}

fn wait_with_timeout(
    child: &mut Child,
    start: Instant,
    limit: Duration,
) -> std::io::Result<(ExitStatus, bool)> {
    let deadline = start.checked_add(limit);
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((status, false));
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            kill_group(child);
            let status = child.wait()?;
            return Ok((status, true));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Kills `child` and, on Unix, the process group it leads.
fn kill_group(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = i32::try_from(child.id()) {
            // SAFETY: kill(2) takes no pointers; a negative pid targets the
            // group created for this child at spawn.
            unsafe {
                let _ = libc::kill(-pid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
}

fn classify(status: ExitStatus) -> RunStatus {
    if let Some(code) = status.code() {
        return RunStatus::Exited(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(sig) = status.signal() {
            return RunStatus::Signaled(sig);
        }
    }
    RunStatus::Exited(1)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> RunCommand {
        RunCommand::new("sh").arg("-c").arg(script)
    }

    #[test]
    fn captures_stdout_from_stdin() {
        let out = run(&sh("cat"), "3 4\n", None).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "3 4\n");
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn captures_stderr_and_exit_code() {
        let out = run(&sh("echo oops >&2; exit 3"), "", None).unwrap();
        assert_eq!(out.status, RunStatus::Exited(3));
        assert_eq!(out.stderr, "oops\n");
        assert!(!out.success());
        assert_eq!(out.describe_failure(), "exited with code 3");
    }

    #[test]
    fn timeout_kills_and_is_distinct() {
        let out = run(&sh("exec sleep 5"), "", Some(Duration::from_millis(100))).unwrap();
        assert!(out.timed_out());
        assert!(out.elapsed < Duration::from_secs(5));
        assert!(out.describe_failure().starts_with("timed out"));
    }

    #[test]
    fn timeout_kills_the_whole_process_group() {
        let wall = Instant::now();
        let out = run(&sh("sleep 3; echo done"), "", Some(Duration::from_millis(100))).unwrap();
        assert!(out.timed_out());
        assert!(wall.elapsed() < Duration::from_secs(2), "{:?}", wall.elapsed());
        assert!(out.elapsed < Duration::from_secs(2));
        assert!(!out.stdout.contains("done"));
    }

    #[test]
    fn background_child_holding_output_is_timed_out() {
        let wall = Instant::now();
        let out = run(&sh("echo hi; sleep 3 &"), "", Some(Duration::from_millis(200))).unwrap();
        assert!(out.timed_out());
        assert!(wall.elapsed() < Duration::from_secs(2), "{:?}", wall.elapsed());
        assert_eq!(out.stdout, "hi\n");
    }

    #[test]
    fn fast_program_under_timeout_completes() {
        let out = run(&sh("echo hi"), "", Some(Duration::from_secs(10))).unwrap();
        assert_eq!(out.status, RunStatus::Exited(0));
        assert_eq!(out.stdout, "hi\n");
    }

    #[test]
    fn signal_is_reported() {
        let out = run(&sh("kill -9 $$"), "", None).unwrap();
        assert_eq!(out.status, RunStatus::Signaled(9));
    }

    #[test]
    fn program_ignoring_stdin_is_fine() {
        let big = "x".repeat(1 << 20);
        let out = run(&sh("true"), &big, None).unwrap();
        assert!(out.success());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = run(&RunCommand::new("duet-no-such-program"), "", None).unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
