use crate::command::{CommandFactory, ExitCode};
use crate::env::Environment;
use crate::tokenizer;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interpreter proper: dispatches token sequences and drives the REPL.
///
/// The interpreter maintains an [`Environment`] and an ordered list of
/// [`CommandFactory`] objects queried in turn to create commands by name.
/// The first factory that recognizes the name wins, so the list doubles as
/// the dispatch table; [`Default`] installs the builtins followed by the
/// external launcher as the fallthrough.
///
/// Example
/// ```
/// use minish::Interpreter;
/// let mut sh = Interpreter::default();
/// let code = sh.execute(&["help"]).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Whether a previously executed command asked the session to end.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Dispatch one token sequence: `tokens[0]` is the command name, the
    /// rest are its arguments.
    ///
    /// An empty sequence is not an error; nothing runs and the reported
    /// status is 0. Returns the executed command's exit code.
    pub fn execute(&mut self, tokens: &[&str]) -> Result<ExitCode> {
        let Some((name, args)) = tokens.split_first() else {
            return Ok(0);
        };
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(&mut std::io::stdout(), &mut self.env);
            }
        }
        // Only reachable when constructed without the fallthrough factory.
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// The Read-Eval-Print Loop.
    ///
    /// Each cycle shows a prompt carrying the previous cycle's status, reads
    /// one line, tokenizes it and dispatches. The loop ends when the `exit`
    /// builtin sets the exit flag or the input stream is exhausted; the
    /// returned status is the one the session ended with, suitable for use
    /// as the process exit code.
    pub fn repl(&mut self) -> Result<ExitCode> {
        let mut rl = DefaultEditor::new()?;
        let mut status: ExitCode = 0;

        loop {
            let readline = rl.readline(&format!("{{{}}} > ", status));
            match readline {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    let tokens = tokenizer::split_line(&line);
                    status = match self.execute(&tokens) {
                        Ok(code) => code,
                        Err(e) => {
                            eprintln!("minish: {e:#}");
                            1
                        }
                    };
                    if self.env.should_exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(status)
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default dispatch table:
    /// built-ins `cd`, `help`, `exit`, then the external command launcher.
    fn default() -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
