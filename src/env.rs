use std::env as stdenv;
use std::path::PathBuf;

/// Mutable, interpreter-level view of the process state.
///
/// The environment carries the two pieces of state that survive a loop
/// iteration:
/// - `current_dir`: the working directory that launched commands run in,
///   kept in sync with the real process working directory by `cd`.
/// - `should_exit`: the flag the REPL checks to know when to terminate.
///   Only the `exit` builtin sets it.
///
/// Environment variables are deliberately not tracked: children inherit the
/// interpreter's environment unchanged.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, indicates that the interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    ///
    /// `current_dir` is initialized from `std::env::current_dir()` and the
    /// `should_exit` flag starts out `false`.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
