//! A minimal interactive command interpreter.
//!
//! `minish` reads one line at a time, splits it on whitespace, and either runs
//! a built-in command in-process (`cd`, `help`, `exit`) or launches an
//! external program and waits for it to finish. The previous command's status
//! is embedded in the next prompt. There are no pipelines, redirections, jobs
//! or quoting rules: exactly one command per line.
//!
//! The main entry point is [`Interpreter`], which dispatches a token sequence
//! to an ordered list of pluggable command factories and drives the
//! read-eval-print loop. The public modules [`command`] and [`env`] expose the
//! traits and types needed to implement additional commands.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
pub mod tokenizer;

pub use interpreter::Interpreter;
