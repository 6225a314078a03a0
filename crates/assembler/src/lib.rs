//! Two-pass assembler for the UVM 32-bit instruction set.
//!
//! ```
//! use uvm_assembler::assembler::assemble_to_binary;
//!
//! let binary = assemble_to_binary("const 125\nstore").unwrap();
//! assert_eq!(binary, [0x6A, 0x1F, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
//! ```

/// Top-level two-pass assembler pipeline.
pub mod assembler;
/// Instruction word encoding.
pub mod encoder;
/// Structured assembly error types.
pub mod errors;
/// Numeric literal parsing.
pub mod literal;
/// Human-readable program dumps.
pub mod listing;
/// Opcode table and operand field layout.
pub mod opcode;
/// Source line parser and intermediate representation.
pub mod parser;
/// Label table and pass-2 resolution.
pub mod symbols;

pub use assembler::{assemble, assemble_to_binary, Assembler};
pub use encoder::{encode, encode_program, EncodeError};
pub use errors::{AssemblyError, AssemblyErrorKind};
pub use opcode::Opcode;
pub use parser::{Instruction, Operand};
pub use symbols::LabelTable;
