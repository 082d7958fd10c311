//! Diagnostics produced while parsing and errors raised while running.
use std::error::Error;
use std::fmt;
use std::io;

use super::lexer::Token;

/// A malformed statement. The parser reports it and keeps going.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    /// The token at `found` does not fit the statement being parsed.
    Unexpected {
        expected: String,
        found:    Token,
    },
    /// A label with this name was already defined earlier in the program.
    DuplicateLabel {
        name:   String,
        line:   usize,
        column: usize,
    },
    /// A label named like a keyword, which no jump can name.
    ReservedLabel {
        name:   String,
        line:   usize,
        column: usize,
    },
}

impl ParseError {
    pub fn unexpected<S: Into<String>>(expected: S, found: Token) -> Self {
        ParseError::Unexpected { expected: expected.into(), found }
    }

    /// Where the problem starts in the source, as (line, column).
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Unexpected { found, .. } => (found.line, found.column),
            ParseError::DuplicateLabel { line, column, .. }
            | ParseError::ReservedLabel { line, column, .. } => (*line, *column),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (line, column) = self.position();
        match self {
            ParseError::Unexpected { expected, found } => {
                write!(f, "{}:{}: expected {}, found {}", line, column, expected, found)
            }
            ParseError::DuplicateLabel { name, .. } => {
                write!(f, "{}:{}: label `{}` is already defined", line, column, name)
            }
            ParseError::ReservedLabel { name, .. } => {
                write!(f, "{}:{}: `{}` is a keyword and cannot name a label", line, column, name)
            }
        }
    }
}

impl Error for ParseError {}

#[derive(Debug)]
pub enum RuntimeErrorKind {
    /// An operand named a register that was never assigned.
    UnknownRegister(String),
    /// A literal does not fit in a register.
    InvalidInteger(String),
    /// Writing `print` output failed.
    Output(io::Error),
}

/// A fatal error that stopped the run at statement `ip`.
#[derive(Debug)]
pub struct RuntimeError {
    pub ip:   usize,
    pub kind: RuntimeErrorKind,
}

impl RuntimeError {
    pub fn new(ip: usize, kind: RuntimeErrorKind) -> Self {
        RuntimeError { ip, kind }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            RuntimeErrorKind::UnknownRegister(name) => {
                write!(f, "statement {}: unknown register `{}`", self.ip, name)
            }
            RuntimeErrorKind::InvalidInteger(text) => {
                write!(f, "statement {}: `{}` is not a valid integer", self.ip, text)
            }
            RuntimeErrorKind::Output(err) => {
                write!(f, "statement {}: unable to write output: {}", self.ip, err)
            }
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RuntimeErrorKind::Output(err) => Some(err),
            _ => None,
        }
    }
}
