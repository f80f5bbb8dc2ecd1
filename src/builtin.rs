use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the interpreter at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command against the provided output stream and environment.
    ///
    /// Return value follows shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode>;
}

/// Names of every builtin, in dispatch-table order.
pub(crate) fn builtin_names() -> [&'static str; 3] {
    [Cd::name(), Help::name(), Exit::name()]
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match T::execute(*self, stdout, env) {
            Ok(code) => Ok(code),
            Err(e) => {
                eprintln!("minish: {e:#}");
                Ok(1)
            }
        }
    }
}

/// Stand-in command produced when `argh` rejects the arguments (or the user
/// asked for `--help`): prints the generated usage text instead of running.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let target = match self.target {
            Some(t) if !t.is_empty() => PathBuf::from(t),
            _ => return Err(anyhow::anyhow!("expected argument to \"cd\"")),
        };

        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical = fs::canonicalize(&new_dir)
            .with_context(|| format!("cd: {}", new_dir.display()))?;

        env::set_current_dir(&canonical)
            .with_context(|| format!("cd: can't chdir to {}", canonical.display()))?;
        env.current_dir = canonical;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print usage information and the list of built-in commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// any arguments are accepted and ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, stdout: &mut dyn Write, _env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "minish")?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in builtin_names() {
            writeln!(stdout, "  {}", name)?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the interpreter.
pub struct Exit {
    #[argh(positional, greedy)]
    /// any arguments are accepted and ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lock_current_dir;
    use std::env as stdenv;
    use std::io;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_unique_temp_dir() -> io::Result<PathBuf> {
        let mut p = stdenv::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("minish_test_cd_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&p)?;
        Ok(p)
    }

    #[test]
    fn test_cd_to_absolute_path() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(&temp).expect("canonicalize failed");

        // save original cwd to restore later
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment {
            current_dir: orig.clone(),
            should_exit: false,
        };

        let target = Some(canonical_temp.to_string_lossy().to_string());
        let cmd = Cd { target };
        let res = cmd.execute(&mut Vec::new(), &mut env);

        assert!(res.is_ok());

        let new_cwd = stdenv::current_dir().unwrap();
        assert_eq!(fs::canonicalize(&new_cwd).unwrap(), canonical_temp);
        assert_eq!(env.current_dir, canonical_temp);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");

        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_relative_path_joins_current_dir() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let sub = temp.join("sub");
        fs::create_dir_all(&sub).expect("create subdir");
        let canonical_sub = fs::canonicalize(&sub).expect("canonicalize failed");

        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment {
            current_dir: fs::canonicalize(&temp).unwrap(),
            should_exit: false,
        };

        let cmd = Cd {
            target: Some("sub".to_string()),
        };
        let res = cmd.execute(&mut Vec::new(), &mut env);

        assert!(res.is_ok());
        assert_eq!(env.current_dir, canonical_sub);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");

        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_missing_argument_errors_and_keeps_cwd() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment {
            current_dir: orig.clone(),
            should_exit: false,
        };

        let cmd = Cd { target: None };
        let res = cmd.execute(&mut Vec::new(), &mut env);

        assert!(res.is_err());
        assert!(res.unwrap_err().to_string().contains("expected argument"));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, orig);
    }

    #[test]
    fn test_cd_nonexistent_path_errors() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment {
            current_dir: orig.clone(),
            should_exit: false,
        };

        let name = format!("nonexistent_dir_for_minish_test_{}", std::process::id());
        let cmd = Cd { target: Some(name) };
        let res = cmd.execute(&mut Vec::new(), &mut env);

        assert!(res.is_err());
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_help_lists_every_builtin() {
        let mut env = Environment::new();
        let mut out = Vec::new();

        let cmd = Help { _args: Vec::new() };
        let code = cmd.execute(&mut out, &mut env).unwrap();
        assert_eq!(code, 0);

        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("minish\n"));
        for name in builtin_names() {
            assert!(s.contains(&format!("  {}\n", name)), "missing {}", name);
        }
    }

    #[test]
    fn test_exit_sets_flag_only() {
        let mut env = Environment::new();
        let mut out = Vec::new();

        let cmd = Exit {
            _args: vec!["now".to_string()],
        };
        let code = cmd.execute(&mut out, &mut env).unwrap();

        assert_eq!(code, 0);
        assert!(env.should_exit);
        assert!(out.is_empty());
    }

    #[test]
    fn test_factory_matches_exact_name_only() {
        let env = Environment::new();
        let factory = Factory::<Cd>::default();

        assert!(factory.try_create(&env, "cd", &["/tmp"]).is_some());
        assert!(factory.try_create(&env, "CD", &[]).is_none());
        assert!(factory.try_create(&env, "cdx", &[]).is_none());
    }
}
