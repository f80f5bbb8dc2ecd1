use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use anyhow::Result;
use std::ffi::{OsStr, OsString};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use crate::interpreter::Factory;

/// Exit code reported when the named program cannot be found.
pub const NOT_FOUND: ExitCode = 127;

/// Exit code reported when the OS refuses to create a new process.
pub const SPAWN_FAILED: ExitCode = 2;

/// Command that is not a builtin: resolved against PATH, spawned as a child
/// process and waited for synchronously.
pub struct ExternalCommand {
    name: String,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: String, args: Vec<OsString>) -> Self {
        Self { name, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Matches every name. Installed last in the interpreter's factory list,
    /// this is the fallthrough for anything that is not a builtin; resolution
    /// failures are reported at execution time, not here.
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand::new(
            name.to_owned(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let search_paths = std::env::var_os("PATH").unwrap_or_default();
        let Some(executable) = resolve_program(&search_paths, Path::new(&self.name)) else {
            eprintln!("minish: command not found: {}", self.name);
            return Ok(NOT_FOUND);
        };

        // Child inherits the interpreter's environment and stdio unchanged.
        let spawned = std::process::Command::new(&executable)
            .args(&self.args)
            .current_dir(&env.current_dir)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                eprintln!("minish: command not found: {}", self.name);
                return Ok(NOT_FOUND);
            }
            Err(e) => {
                eprintln!("minish: can't launch {}: {}", self.name, e);
                return Ok(SPAWN_FAILED);
            }
        };

        // Blocks until the child exits or is killed; std never wakes us for a
        // merely stopped child, so a single wait() observes the terminal state.
        let exit_status = child.wait()?;
        match exit_status.code() {
            Some(code) => Ok(code),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a program path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returned if it exists.
/// - `./foo` on Unix, or any path relative to the current directory on other
///   platforms: returned if it exists.
/// - Relative path with multiple components (e.g. `bin/tool`): returned if it
///   exists relative to the current directory.
/// - Single component (a bare name): searched through each directory of
///   `search_paths` (PATH), first existing match wins.
/// - Empty path: `None`.
pub fn resolve_program(search_paths: &OsStr, path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return existing(path);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(path.to_path_buf());
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, None) => None,
        (Some(name), None) => search_paths_for(search_paths, name.as_os_str()),
        _ => existing(path),
    }
}

fn search_paths_for(search_paths: &OsStr, name: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

fn existing(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        None
    }
}
