//! Whitespace tokenization of a command line.
//!
//! One line holds at most one command: the first token is the command name,
//! the rest are its arguments. There is no quoting or escaping, so splitting
//! is a plain scan over a fixed delimiter set.

/// Characters that separate tokens.
///
/// Space, tab, carriage return and newline, plus BEL so a stray terminal
/// bell pasted into the line never becomes part of a token.
pub const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\u{7}'];

/// Split a line into tokens, borrowing slices of the input.
///
/// Any maximal run of delimiter characters acts as a single separator, so
/// consecutive delimiters never produce empty tokens. Leading and trailing
/// delimiters are ignored. An empty or all-delimiter line yields an empty
/// vector.
pub fn split_line(line: &str) -> Vec<&str> {
    line.split(DELIMITERS)
        .filter(|token| !token.is_empty())
        .collect()
}
