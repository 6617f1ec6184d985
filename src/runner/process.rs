//! Child process with a line-oriented stdout queue

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::{PiMenuError, Result};

/// Termination status of a launched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    Exited(i32),
    /// Ended by a signal (including our own terminate request)
    Killed,
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::Exited(code),
            None => Self::Killed,
        }
    }
}

/// A running (or finished) command and its output queue
#[derive(Debug)]
pub struct ProcessHandle {
    program: String,
    child: Child,
    lines: mpsc::UnboundedReceiver<String>,
    reader: JoinHandle<()>,
    status: ProcessStatus,
    stop_requested: bool,
}

/// Spawn `argv` with stdout captured line by line
///
/// Must be called from within a Tokio runtime. The reader task is only
/// started once the spawn succeeded, so a failed launch leaves nothing
/// running behind.
#[instrument(skip_all, fields(program = argv.first().map(String::as_str).unwrap_or("")))]
pub fn run(argv: &[String]) -> Result<ProcessHandle> {
    let (program, args) = argv.split_first().ok_or_else(|| PiMenuError::Spawn {
        program: String::new(),
        reason: "empty command".to_string(),
    })?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| PiMenuError::Spawn {
            program: program.clone(),
            reason: e.to_string(),
        })?;

    let (tx, lines) = mpsc::unbounded_channel();
    let reader = match child.stdout.take() {
        Some(stdout) => tokio::spawn(forward_lines(stdout, tx)),
        None => tokio::spawn(async {}),
    };

    info!(pid = ?child.id(), "Command started");
    Ok(ProcessHandle {
        program: program.clone(),
        child,
        lines,
        reader,
        status: ProcessStatus::Running,
        stop_requested: false,
    })
}

/// Push every completed line (newline included) in emission order
async fn forward_lines(stdout: ChildStdout, tx: mpsc::UnboundedSender<String>) {
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to read command output");
                break;
            }
        }
    }
    debug!("Command output closed");
}

/// SIGTERM, so the child can clean up and exit on its own terms
#[cfg(unix)]
fn request_stop(child: &mut Child) -> std::io::Result<()> {
    let Some(pid) = child.id() else {
        // Already reaped
        return Ok(());
    };
    // SAFETY: `pid` is our own child and has not been reaped yet
    let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
    if rc == 0 {
        return Ok(());
    }
    match std::io::Error::last_os_error() {
        e if e.raw_os_error() == Some(libc::ESRCH) => Ok(()),
        e => Err(e),
    }
}

#[cfg(not(unix))]
fn request_stop(child: &mut Child) -> std::io::Result<()> {
    child.start_kill()
}

impl ProcessHandle {
    /// Next queued line, or `None` if nothing is queued right now
    ///
    /// `None` does not mean the process is done.
    pub fn poll_line(&mut self) -> Option<String> {
        self.lines.try_recv().ok()
    }

    /// Wait at most `timeout` for the next line
    ///
    /// Returns `None` on timeout or once the output is closed and drained.
    pub async fn next_line(&mut self, timeout: Duration) -> Option<String> {
        tokio::time::timeout(timeout, self.lines.recv())
            .await
            .ok()
            .flatten()
    }

    /// True once the output hit EOF and every line was handed out
    pub fn output_closed(&self) -> bool {
        self.reader.is_finished() && self.lines.is_empty()
    }

    /// Current status, refreshed without blocking
    pub fn status(&mut self) -> ProcessStatus {
        if self.status == ProcessStatus::Running {
            match self.child.try_wait() {
                Ok(Some(exit)) => {
                    self.status = exit.into();
                    info!(program = %self.program, status = ?self.status, "Command exited");
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Failed to query command status"),
            }
        }
        self.status
    }

    pub fn is_alive(&mut self) -> bool {
        self.status() == ProcessStatus::Running
    }

    /// Exit code once exited normally
    pub fn exit_code(&mut self) -> Option<i32> {
        match self.status() {
            ProcessStatus::Exited(code) => Some(code),
            _ => None,
        }
    }

    /// Request the process to stop
    ///
    /// Only issues the request; poll [`Self::is_alive`] to observe the exit.
    /// The first request lets the process wind down on its own; a repeated
    /// one kills it. A no-op once the process has exited.
    pub fn terminate(&mut self) -> Result<()> {
        if !self.is_alive() {
            return Ok(());
        }
        let result = if self.stop_requested {
            info!(program = %self.program, "Kill requested");
            self.child.start_kill()
        } else {
            info!(program = %self.program, "Terminate requested");
            request_stop(&mut self.child)
        };
        self.stop_requested = true;

        match result {
            Ok(()) => Ok(()),
            // Raced with a natural exit
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Stop the reader task and discard anything still queued
    pub async fn shutdown(mut self) {
        self.lines.close();
        while self.lines.try_recv().is_ok() {}
        self.reader.abort();
        let _ = (&mut self.reader).await;
        if self.status == ProcessStatus::Running {
            let _ = self.child.start_kill();
            let _ = self.child.wait().await;
        }
        debug!(program = %self.program, "Command resources released");
    }
}
