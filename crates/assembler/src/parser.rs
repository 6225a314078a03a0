//! Assembly source line parser.
//!
//! This module implements the pass-1 frontend: turning one raw source line
//! into at most one [`Instruction`], binding label definitions in the shared
//! [`LabelTable`] as they are seen. Arguments that are not well-formed numbers
//! are kept as label references for pass 2.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::AssemblyErrorKind;
use crate::literal::{parse_number, LiteralError};
use crate::opcode::{Opcode, OperandField};
use crate::symbols::LabelTable;

/// Instruction operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operand {
    /// The opcode takes no argument.
    None,
    /// Resolved numeric value.
    Value(u32),
    /// Label reference awaiting pass 2.
    Label(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("no operand"),
            Self::Value(v) => write!(f, "value {v}"),
            Self::Label(name) => write!(f, "label '{name}'"),
        }
    }
}

/// Intermediate representation of one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instruction {
    /// Word index in the program (0-based).
    pub address: u32,
    /// Operation.
    pub opcode: Opcode,
    /// Mnemonic as written in the source.
    pub mnemonic: String,
    /// Source line with the comment stripped and whitespace trimmed.
    pub raw_line: String,
    /// Argument, if the opcode takes one.
    pub operand: Operand,
}

impl Instruction {
    /// Resolved numeric operand, if any.
    #[must_use]
    pub const fn value(&self) -> Option<u32> {
        match self.operand {
            Operand::Value(v) => Some(v),
            Operand::None | Operand::Label(_) => None,
        }
    }

    /// Returns true while the operand is still a label reference.
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self.operand, Operand::Label(_))
    }
}

/// Parses one source line.
///
/// Returns `Ok(None)` for blank, comment-only, and label-definition lines.
/// A label definition binds the label to `current_address`; the caller
/// advances `current_address` by one for every instruction returned.
///
/// # Errors
///
/// Returns an [`AssemblyErrorKind`] if:
/// - The label is already defined or its name is malformed
/// - The mnemonic is unknown
/// - The argument count does not match the opcode
/// - A numeric argument does not fit the opcode's field
pub fn parse_line(
    line: &str,
    current_address: u32,
    labels: &mut LabelTable,
) -> Result<Option<Instruction>, AssemblyErrorKind> {
    let trimmed = strip_comment(line).trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Some(name) = trimmed.strip_suffix(':') {
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(AssemblyErrorKind::InvalidLabel(name.to_string()));
        }
        labels.define(name, current_address)?;
        return Ok(None);
    }

    let mut tokens = trimmed.split_whitespace();
    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();

    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| AssemblyErrorKind::UnknownMnemonic(mnemonic.to_string()))?;

    let field = opcode.operand_field();
    if args.len() != field.arity() {
        return Err(AssemblyErrorKind::WrongArity {
            mnemonic: mnemonic.to_string(),
            expected: field.arity(),
            got: args.len(),
        });
    }

    let operand = match args.first() {
        Some(arg) => parse_argument(arg, field)?,
        None => Operand::None,
    };

    trace!(address = current_address, %opcode, %operand, "instruction parsed");

    Ok(Some(Instruction {
        address: current_address,
        opcode,
        mnemonic: mnemonic.to_string(),
        raw_line: trimmed.to_string(),
        operand,
    }))
}

fn strip_comment(line: &str) -> &str {
    line.find(';').map_or(line, |pos| &line[..pos])
}

fn parse_argument(token: &str, field: OperandField) -> Result<Operand, AssemblyErrorKind> {
    match parse_number(token) {
        Ok(value) => field
            .fit(value)
            .map(Operand::Value)
            .ok_or_else(|| AssemblyErrorKind::ValueOutOfRange {
                value: value.to_string(),
                max: field.max(),
            }),
        Err(LiteralError::Overflow) => Err(AssemblyErrorKind::ValueOutOfRange {
            value: token.to_string(),
            max: field.max(),
        }),
        Err(LiteralError::Empty | LiteralError::InvalidDigit { .. }) => {
            Ok(Operand::Label(token.to_string()))
        }
    }
}
