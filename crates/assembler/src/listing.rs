//! Human-readable dumps of an assembled program.
//!
//! Used by the CLI's `--test` mode. Everything here is derived from the
//! resolved instruction sequence or the binary image.

use std::fmt;

use crate::encoder::{encode, EncodeError, WORD_BYTES};
use crate::opcode::{Opcode, OPCODE_BITS, OPERAND_SHIFT};
use crate::parser::Instruction;

/// One instruction in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Word index of the instruction.
    pub address: u32,
    /// Operation.
    pub opcode: Opcode,
    /// Resolved operand, for opcodes that take one.
    pub operand: Option<u32>,
    /// Encoded little-endian word.
    pub word: [u8; WORD_BYTES],
    /// Source text the instruction came from.
    pub source: String,
}

impl ListingEntry {
    /// Builds the entry for a resolved instruction.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if the instruction cannot be encoded.
    pub fn new(instruction: &Instruction) -> Result<Self, EncodeError> {
        Ok(Self {
            address: instruction.address,
            opcode: instruction.opcode,
            operand: instruction.value(),
            word: encode(instruction)?,
            source: instruction.raw_line.clone(),
        })
    }
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opcode_id = self.opcode.id();

        match self.operand {
            Some(value) => writeln!(
                f,
                "[{:04}] {} {value} (0x{value:X})",
                self.address, self.opcode
            )?,
            None => writeln!(f, "[{:04}] {}", self.address, self.opcode)?,
        }

        writeln!(
            f,
            "  opcode bits 0-{}: {opcode_id:0width$b} = {opcode_id}",
            OPCODE_BITS - 1,
            width = OPCODE_BITS as usize
        )?;

        if let Some(value) = self.operand {
            let field = self.opcode.operand_field();
            let bits = field.bits();
            writeln!(
                f,
                "  {} bits {}-{}: {value:0width$b} = {value}",
                field.name(),
                OPERAND_SHIFT,
                OPERAND_SHIFT + bits - 1,
                width = bits as usize
            )?;
        }

        Ok(())
    }
}

/// Builds listing entries for a resolved program.
///
/// # Errors
///
/// Returns the first [`EncodeError`] encountered.
pub fn build_listing(program: &[Instruction]) -> Result<Vec<ListingEntry>, EncodeError> {
    program.iter().map(ListingEntry::new).collect()
}

/// Renders the intermediate representation dump, one block per instruction
/// followed by a blank line.
///
/// # Errors
///
/// Returns the first [`EncodeError`] encountered.
pub fn format_listing(program: &[Instruction]) -> Result<String, EncodeError> {
    let mut out = String::new();
    for entry in build_listing(program)? {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    Ok(out)
}

/// Renders a binary image as one `Word i: [0x.., ..]` line per word.
///
/// A trailing partial word, if any, is printed as its own line.
#[must_use]
pub fn format_words(binary: &[u8]) -> String {
    binary
        .chunks(WORD_BYTES)
        .enumerate()
        .map(|(index, chunk)| {
            let bytes = chunk
                .iter()
                .map(|b| format!("0x{b:02X}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Word {index}: [{bytes}]")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
