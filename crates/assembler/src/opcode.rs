//! Opcode table for the UVM instruction set.
//!
//! Every instruction is one 32-bit word. The low six bits always carry the
//! opcode id; the operand field, when the opcode has one, sits directly above.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of the opcode field in bits.
pub const OPCODE_BITS: u32 = 6;

/// Mask selecting the opcode field of a word.
pub const OPCODE_MASK: u32 = (1 << OPCODE_BITS) - 1;

/// Bit position where the operand field starts.
pub const OPERAND_SHIFT: u32 = OPCODE_BITS;

/// Operation codes with their assigned numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Opcode {
    /// Write a value to memory.
    Store = 1,
    /// Read a value from memory at a 24-bit address.
    Load = 23,
    /// Load a 16-bit constant.
    Const = 42,
    /// Unary bit reversal.
    Bitrev = 60,
}

/// Operand slot carried by an opcode's word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandField {
    /// The opcode takes no argument.
    None,
    /// 16-bit constant value (bits 6..=21).
    Value,
    /// 24-bit memory address (bits 6..=29).
    Address,
}

impl OperandField {
    /// Width of the field in bits (0 for [`OperandField::None`]).
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Value => 16,
            Self::Address => 24,
        }
    }

    /// Largest value the field can hold.
    #[must_use]
    pub const fn max(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Value | Self::Address => (1 << self.bits()) - 1,
        }
    }

    /// Number of arguments an instruction with this field takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::None => 0,
            Self::Value | Self::Address => 1,
        }
    }

    /// Returns `value` narrowed to `u32` if it fits in the field.
    #[must_use]
    pub fn fit(self, value: u64) -> Option<u32> {
        u32::try_from(value).ok().filter(|v| *v <= self.max())
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Value => "value",
            Self::Address => "address",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpcodeEntry {
    name: &'static str,
    opcode: Opcode,
}

const OPCODE_ENTRIES: &[OpcodeEntry] = &[
    OpcodeEntry {
        name: "STORE",
        opcode: Opcode::Store,
    },
    OpcodeEntry {
        name: "LOAD",
        opcode: Opcode::Load,
    },
    OpcodeEntry {
        name: "CONST",
        opcode: Opcode::Const,
    },
    OpcodeEntry {
        name: "BITREV",
        opcode: Opcode::Bitrev,
    },
];

impl Opcode {
    /// All opcodes in table order.
    pub const ALL: [Self; 4] = [Self::Store, Self::Load, Self::Const, Self::Bitrev];

    /// Looks up a mnemonic, ignoring ASCII case.
    #[must_use]
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        OPCODE_ENTRIES
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(mnemonic))
            .map(|entry| entry.opcode)
    }

    /// Converts a 6-bit opcode id back into an opcode.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Store),
            23 => Some(Self::Load),
            42 => Some(Self::Const),
            60 => Some(Self::Bitrev),
            _ => None,
        }
    }

    /// Numeric opcode id stored in bits 0..=5.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Canonical upper-case mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Store => "STORE",
            Self::Load => "LOAD",
            Self::Const => "CONST",
            Self::Bitrev => "BITREV",
        }
    }

    /// Operand field layout for this opcode.
    #[must_use]
    pub const fn operand_field(self) -> OperandField {
        match self {
            Self::Const => OperandField::Value,
            Self::Load => OperandField::Address,
            Self::Store | Self::Bitrev => OperandField::None,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
