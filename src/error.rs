//! Errors reported while building, loading or normalizing grammars.

use std::error;
use std::fmt;

use crate::load::Token;

/// Represents a grammar that breaks the invariants of symbol declarations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GrammarError {
    /// The start symbol is not a declared nonterminal.
    UndeclaredStart {
        /// Name of the start symbol.
        start: String,
    },
    /// A name is declared both as a terminal and as a nonterminal.
    ConflictingDeclaration {
        /// The ambiguous name.
        name: String,
    },
    /// The empty marker was declared as a symbol.
    ReservedEpsilon,
    /// A terminal appears on the left-hand side of a rule.
    TerminalOnLhs {
        /// Name of the terminal.
        lhs: String,
    },
    /// A rule mentions a symbol that is declared neither as a terminal nor as a nonterminal.
    MalformedReference {
        /// The left-hand side of the offending rule.
        lhs: String,
        /// The undeclared symbol.
        symbol: String,
    },
    /// The empty marker appears next to other symbols.
    MisplacedEpsilon {
        /// The left-hand side of the offending rule.
        lhs: String,
    },
    /// A right-hand side has no symbols at all, not even the empty marker.
    EmptyRhs {
        /// The left-hand side of the offending rule.
        lhs: String,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::UndeclaredStart { start } => {
                write!(f, "start symbol `{}` is not a declared nonterminal", start)
            }
            GrammarError::ConflictingDeclaration { name } => {
                write!(f, "`{}` is declared both as a terminal and a nonterminal", name)
            }
            GrammarError::ReservedEpsilon => {
                write!(f, "`{}` is reserved for empty productions", crate::EPSILON)
            }
            GrammarError::TerminalOnLhs { lhs } => {
                write!(f, "terminal `{}` on the left-hand side of a rule", lhs)
            }
            GrammarError::MalformedReference { lhs, symbol } => {
                write!(f, "rule for `{}` refers to undeclared symbol `{}`", lhs, symbol)
            }
            GrammarError::MisplacedEpsilon { lhs } => write!(
                f,
                "rule for `{}` has `{}` next to other symbols",
                lhs,
                crate::EPSILON
            ),
            GrammarError::EmptyRhs { lhs } => {
                write!(f, "rule for `{}` has an empty right-hand side", lhs)
            }
        }
    }
}

impl error::Error for GrammarError {}

/// Represents an error when loading a grammar from text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadError {
    /// Human-readable reason for the error.
    pub reason: String,
    /// Line where the error happened.
    ///
    /// One-indexed.
    pub line: u32,
    /// Column where the error happened.
    ///
    /// One-indexed.
    pub col: u32,
    /// Optionally, the token at which the error happened.
    pub token: Option<Token>,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {} column {}: reason: {} token: {:?}",
            self.line, self.col, self.reason, self.token
        )
    }
}

impl error::Error for LoadError {}

/// Any error of this crate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The grammar text could not be parsed.
    Load(LoadError),
    /// The grammar is malformed.
    Grammar(GrammarError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load(err) => fmt::Display::fmt(err, f),
            Error::Grammar(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Load(err) => Some(err),
            Error::Grammar(err) => Some(err),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Error::Load(err)
    }
}

impl From<GrammarError> for Error {
    fn from(err: GrammarError) -> Self {
        Error::Grammar(err)
    }
}
