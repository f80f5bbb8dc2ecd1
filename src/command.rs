use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// The interpreter never derives control flow from this value — it is shown
/// in the next prompt and becomes the interpreter's own exit code when the
/// session ends. Loop termination is signalled separately through
/// [`Environment::should_exit`].
pub type ExitCode = i32;

/// Object-safe trait for any command the interpreter can execute.
///
/// Implemented by built-ins via a blanket impl and by the external launcher.
/// `stdout` receives the command's normal output; diagnostics go to the
/// process standard error stream.
pub trait ExecutableCommand {
    /// Executes the command and returns its exit code.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. The
/// interpreter queries its factories in order, so a factory that matches any
/// name (the external launcher) acts as the fallthrough when installed last.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
