//! Structured error reporting for assembler passes.
//!
//! Every failure aborts the whole assembly. Errors raised while parsing a line
//! carry the 1-based line number; errors from label resolution do not, since
//! they concern the program as a whole.
//!
//! ```text
//! line 3: unknown mnemonic 'jmp'
//! unknown label 'missing'
//! ```

use std::fmt;

use thiserror::Error;

use crate::encoder::EncodeError;

/// Classification of assembly errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyErrorKind {
    /// A label was declared more than once.
    #[error("duplicate label '{0}'")]
    DuplicateLabel(String),
    /// A label definition with an empty name or embedded whitespace.
    #[error("invalid label name '{0}'")]
    InvalidLabel(String),
    /// First token of an instruction line is not a known mnemonic.
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),
    /// Wrong number of arguments for an opcode.
    #[error("{mnemonic} expects {expected} argument(s), got {got}")]
    WrongArity {
        /// Mnemonic as written in the source.
        mnemonic: String,
        /// Number of arguments the opcode takes.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },
    /// A numeric operand does not fit its opcode's field.
    #[error("value {value} out of range (max {max})")]
    ValueOutOfRange {
        /// The offending value as written or resolved.
        value: String,
        /// Largest value the field accepts.
        max: u32,
    },
    /// A label reference that no definition in the program satisfies.
    #[error("unknown label '{0}'")]
    UnknownLabel(String),
    /// Encoding a resolved program failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// An assembly error with optional source line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyError {
    /// The kind of error.
    pub kind: AssemblyErrorKind,
    /// 1-based source line, for errors raised while parsing a line.
    pub line: Option<usize>,
}

impl AssemblyError {
    /// Creates an error with no line context.
    #[must_use]
    pub const fn new(kind: AssemblyErrorKind) -> Self {
        Self { kind, line: None }
    }

    /// Attaches a 1-based source line number.
    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<AssemblyErrorKind> for AssemblyError {
    fn from(kind: AssemblyErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<EncodeError> for AssemblyError {
    fn from(e: EncodeError) -> Self {
        Self::new(AssemblyErrorKind::Encode(e))
    }
}
