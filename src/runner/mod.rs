//! # Command Runner
//!
//! Turns a leaf item's command line into a running child process whose
//! standard output is exposed as a non-blocking queue of lines.
//!
//! ## Data flow
//!
//! ```text
//! +--------------------+      +--------------------------+
//! |  parse_command     | ---> |  run(argv)               |
//! |  "a \"b c\" d"     |      |  spawn + reader task     |
//! +--------------------+      +--------------------------+
//!                                        |
//!                        stdout lines    | unbounded mpsc
//!                                        v
//!                             +--------------------------+
//!                             |  ProcessHandle           |
//!                             |  poll_line / is_alive    |
//!                             |  exit_code / terminate   |
//!                             +--------------------------+
//! ```
//!
//! The reader task is the only thing touching the pipe; the UI thread
//! only ever calls [`ProcessHandle::poll_line`], which never blocks.

mod command;
mod process;

pub use command::parse_command;
pub use process::{run, ProcessHandle, ProcessStatus};
