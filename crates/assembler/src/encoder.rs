//! Instruction encoding (final stage).
//!
//! Each instruction becomes one little-endian 32-bit word:
//!
//! ```text
//!  31        30 29                      6 5       0
//! [ unused 0  ][ operand (16 or 24 bits) ][ opcode ]
//! ```
//!
//! CONST packs its value into bits 6..=21, LOAD its address into bits 6..=29.
//! STORE and BITREV carry only the opcode.

use thiserror::Error;

use crate::opcode::{Opcode, OperandField, OPCODE_MASK, OPERAND_SHIFT};
use crate::parser::{Instruction, Operand};

/// Size of one encoded instruction in bytes.
pub const WORD_BYTES: usize = 4;

/// A record that cannot be encoded.
///
/// Programs returned by [`crate::assembler::assemble`] never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Operand shape does not match what the opcode carries.
    #[error("{opcode} cannot encode {operand}")]
    OperandMismatch {
        /// The instruction's opcode.
        opcode: Opcode,
        /// The operand found on the record.
        operand: Operand,
    },
    /// Operand value wider than the opcode's field.
    #[error("{opcode} {field} {value} exceeds field maximum {max}")]
    FieldOverflow {
        /// The instruction's opcode.
        opcode: Opcode,
        /// Field name.
        field: &'static str,
        /// The operand value.
        value: u32,
        /// Largest value the field accepts.
        max: u32,
    },
}

/// Packs an opcode and operand into a 32-bit word.
#[must_use]
pub fn pack_word(opcode: Opcode, operand: u32) -> u32 {
    (operand << OPERAND_SHIFT) | (u32::from(opcode.id()) & OPCODE_MASK)
}

/// Encodes an instruction as its raw 32-bit word.
///
/// # Errors
///
/// Returns [`EncodeError`] if the operand shape does not match the opcode
/// (such as a label that was never resolved) or the value overflows its field.
pub fn encode_word(instruction: &Instruction) -> Result<u32, EncodeError> {
    let opcode = instruction.opcode;
    let field = opcode.operand_field();

    match (field, &instruction.operand) {
        (OperandField::None, Operand::None) => Ok(pack_word(opcode, 0)),
        (OperandField::Value | OperandField::Address, Operand::Value(value)) => {
            if *value > field.max() {
                return Err(EncodeError::FieldOverflow {
                    opcode,
                    field: field.name(),
                    value: *value,
                    max: field.max(),
                });
            }
            Ok(pack_word(opcode, *value))
        }
        (_, operand) => Err(EncodeError::OperandMismatch {
            opcode,
            operand: operand.clone(),
        }),
    }
}

/// Encodes an instruction as four little-endian bytes.
///
/// # Errors
///
/// See [`encode_word`].
pub fn encode(instruction: &Instruction) -> Result<[u8; WORD_BYTES], EncodeError> {
    encode_word(instruction).map(u32::to_le_bytes)
}

/// Encodes a program into its binary image, one word per instruction.
///
/// # Errors
///
/// Returns the first [`EncodeError`] encountered.
pub fn encode_program(instructions: &[Instruction]) -> Result<Vec<u8>, EncodeError> {
    let mut binary = Vec::with_capacity(instructions.len() * WORD_BYTES);
    for instruction in instructions {
        binary.extend_from_slice(&encode(instruction)?);
    }
    Ok(binary)
}
