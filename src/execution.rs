//! Execution Screen Controller
//!
//! Drives one leaf action from launch to dismissal:
//!
//! ```text
//! Starting ──spawn ok──► Running ──exit observed──► Finished ──ack──► Dismissed
//!    │                                                                  ▲
//!    └──── MalformedCommand / Spawn error (reported once) ──────────────┘
//! ```
//!
//! The controller holds no UI; the TUI calls [`ExecutionController::tick`]
//! on its poll cadence and renders what the controller exposes.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::PiMenuError;
use crate::runner::{parse_command, run, ProcessHandle, ProcessStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPhase {
    Starting,
    Running,
    Finished,
    Dismissed,
}

impl std::fmt::Display for ExecutionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Starting => write!(f, "STARTING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Finished => write!(f, "FINISHED"),
            Self::Dismissed => write!(f, "DISMISSED"),
        }
    }
}

#[derive(Debug)]
pub struct ExecutionController {
    command: String,
    phase: ExecutionPhase,
    process: Option<ProcessHandle>,
    output: Vec<String>,
    outcome: Option<ProcessStatus>,
    error: Option<PiMenuError>,
    terminate_requested: bool,
}

impl ExecutionController {
    /// New controller in `Starting`; nothing is spawned yet
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            phase: ExecutionPhase::Starting,
            process: None,
            output: Vec::new(),
            outcome: None,
            error: None,
            terminate_requested: false,
        }
    }

    /// Parse and spawn in one go
    pub fn launch(command: impl Into<String>) -> Self {
        let mut controller = Self::new(command);
        controller.start();
        controller
    }

    /// `Starting` → `Running`, or → `Dismissed` with a pending error
    pub fn start(&mut self) {
        if self.phase != ExecutionPhase::Starting {
            return;
        }
        match parse_command(&self.command).and_then(|argv| run(&argv)) {
            Ok(process) => {
                self.process = Some(process);
                self.phase = ExecutionPhase::Running;
                debug!(command = %self.command, phase = %self.phase, "Execution started");
            }
            Err(e) => {
                warn!(command = %self.command, error = %e, "Command could not be started");
                self.error = Some(e);
                self.phase = ExecutionPhase::Dismissed;
            }
        }
    }

    /// Move every queued line into the output buffer and look for exit
    ///
    /// Returns the number of lines appended.
    pub fn tick(&mut self) -> usize {
        let Some(process) = self.process.as_mut() else {
            return 0;
        };

        let mut appended = drain(process, &mut self.output);
        if self.phase == ExecutionPhase::Running {
            let status = process.status();
            if status != ProcessStatus::Running {
                // Lines written just before exit may have landed meanwhile
                appended += drain(process, &mut self.output);
                self.outcome = Some(status);
                self.phase = ExecutionPhase::Finished;
                info!(command = %self.command, phase = %self.phase, status = ?status, "Execution finished");
            }
        }
        appended
    }

    /// Wait up to `timeout` for output, then [`Self::tick`]
    pub async fn tick_timeout(&mut self, timeout: Duration) -> usize {
        let mut appended = 0;
        if let Some(process) = self.process.as_mut() {
            if let Some(line) = process.next_line(timeout).await {
                self.output.push(line);
                appended += 1;
            }
        }
        appended + self.tick()
    }

    /// Ask the process to stop; stays `Running` until the exit is seen
    pub fn request_terminate(&mut self) {
        if self.phase != ExecutionPhase::Running {
            return;
        }
        let Some(process) = self.process.as_mut() else {
            return;
        };
        match process.terminate() {
            Ok(()) => self.terminate_requested = true,
            Err(e) => {
                warn!(error = %e, "Terminate request failed");
                self.output.push(format!("[terminate failed: {e}]\n"));
            }
        }
    }

    /// Release the process and its reader, ending in `Dismissed`
    ///
    /// Only acknowledges a finished run; a running command is left alone.
    pub async fn dismiss(&mut self) {
        if self.phase == ExecutionPhase::Running {
            return;
        }
        if let Some(process) = self.process.take() {
            process.shutdown().await;
        }
        self.phase = ExecutionPhase::Dismissed;
        debug!(command = %self.command, phase = %self.phase, "Execution dismissed");
    }

    /// True once no more output can arrive
    pub fn output_closed(&self) -> bool {
        self.process.as_ref().map_or(true, ProcessHandle::output_closed)
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    /// True while launching another command must be refused
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, ExecutionPhase::Starting | ExecutionPhase::Running)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn lines(&self) -> &[String] {
        &self.output
    }

    pub fn output_text(&self) -> String {
        self.output.concat()
    }

    pub fn outcome(&self) -> Option<ProcessStatus> {
        self.outcome
    }

    pub fn terminate_requested(&self) -> bool {
        self.terminate_requested
    }

    /// Launch error, handed over once
    pub fn take_error(&mut self) -> Option<PiMenuError> {
        self.error.take()
    }

    /// Text of the exit notification
    pub fn exit_message(&self) -> Option<String> {
        self.outcome.map(|status| match status {
            ProcessStatus::Exited(code) => format!("Process finished (exit code {code})"),
            ProcessStatus::Killed => "Process terminated".to_string(),
            ProcessStatus::Running => "Process running".to_string(),
        })
    }
}

fn drain(process: &mut ProcessHandle, output: &mut Vec<String>) -> usize {
    let mut count = 0;
    while let Some(line) = process.poll_line() {
        output.push(line);
        count += 1;
    }
    count
}
