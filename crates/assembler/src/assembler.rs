//! Top-level assembler pipeline.
//!
//! 1. **Pass 1**: parse each line, bind labels, collect instructions
//! 2. **Pass 2**: resolve label references in place
//! 3. **Encode**: turn resolved instructions into words (see [`crate::encoder`])
//!
//! The main entry point is [`assemble`]. An [`Assembler`] can be reused for
//! several programs; its state is reset at the start of each call, so each
//! concurrent assembly needs its own instance.

use tracing::debug;

use crate::encoder::encode_program;
use crate::errors::AssemblyError;
use crate::parser::{parse_line, Instruction};
use crate::symbols::{resolve, LabelTable};

/// Two-pass assembler state for one program at a time.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    program: Vec<Instruction>,
    labels: LabelTable,
    current_address: u32,
}

impl Assembler {
    /// Creates an assembler with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles `source` into a fully resolved instruction sequence.
    ///
    /// Lines are split on `\n`; a trailing `\r` is treated as whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first [`AssemblyError`] encountered. Pass-1 errors carry
    /// the 1-based line number; an unknown label is reported only after every
    /// line has been parsed, without a line number.
    pub fn assemble(&mut self, source: &str) -> Result<Vec<Instruction>, AssemblyError> {
        self.reset();

        for (index, line) in source.split('\n').enumerate() {
            let parsed = parse_line(line, self.current_address, &mut self.labels)
                .map_err(|kind| AssemblyError::new(kind).at_line(index + 1))?;

            if let Some(instruction) = parsed {
                self.program.push(instruction);
                self.current_address += 1;
            }
        }

        debug!(
            instructions = self.program.len(),
            labels = self.labels.len(),
            "pass 1 complete"
        );

        resolve(&mut self.program, &self.labels)?;

        Ok(self.program.clone())
    }

    /// Labels bound by the most recent call to [`Assembler::assemble`].
    #[must_use]
    pub const fn labels(&self) -> &LabelTable {
        &self.labels
    }

    fn reset(&mut self) {
        self.program.clear();
        self.labels = LabelTable::new();
        self.current_address = 0;
    }
}

/// Assembles `source` with a fresh [`Assembler`].
///
/// # Errors
///
/// See [`Assembler::assemble`].
pub fn assemble(source: &str) -> Result<Vec<Instruction>, AssemblyError> {
    Assembler::new().assemble(source)
}

/// Assembles `source` straight to its binary image.
///
/// # Errors
///
/// See [`Assembler::assemble`].
pub fn assemble_to_binary(source: &str) -> Result<Vec<u8>, AssemblyError> {
    let program = assemble(source)?;
    Ok(encode_program(&program)?)
}
