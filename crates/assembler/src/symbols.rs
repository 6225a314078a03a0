//! Label table and pass-2 label resolution.
//!
//! Pass 1 binds each label to the address of the instruction that follows its
//! definition. Pass 2 walks the instruction sequence once and rewrites every
//! label reference into the bound address, so references may appear before or
//! after the definition.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{AssemblyError, AssemblyErrorKind};
use crate::opcode::OperandField;
use crate::parser::{Instruction, Operand};

/// Mapping from label name to the address it was bound to.
///
/// Names are case-sensitive and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<String, u32>,
}

impl LabelTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyErrorKind::DuplicateLabel`] if `name` is already bound.
    pub fn define(&mut self, name: &str, address: u32) -> Result<(), AssemblyErrorKind> {
        if self.labels.contains_key(name) {
            return Err(AssemblyErrorKind::DuplicateLabel(name.to_string()));
        }
        debug!(label = name, address, "label defined");
        self.labels.insert(name.to_string(), address);
        Ok(())
    }

    /// Address bound to `name`, if any.
    #[must_use]
    pub fn address_of(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    /// Returns true if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    /// Number of bound labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no label is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels ordered by address, then name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .labels
            .iter()
            .map(|(name, address)| (name.as_str(), *address))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Replaces every label reference with the address bound to it.
///
/// The address lands in the same slot an immediate would: CONST's value
/// field or LOAD's address field, and must fit that field's width.
///
/// # Errors
///
/// Returns an error without line context if:
/// - A referenced label was never defined (`UnknownLabel`)
/// - The bound address does not fit the opcode's field (`ValueOutOfRange`)
pub fn resolve(instructions: &mut [Instruction], labels: &LabelTable) -> Result<(), AssemblyError> {
    let mut resolved = 0usize;

    for instruction in instructions.iter_mut() {
        let Operand::Label(name) = &instruction.operand else {
            continue;
        };

        let field = instruction.opcode.operand_field();
        if field == OperandField::None {
            continue;
        }

        let address = labels
            .address_of(name)
            .ok_or_else(|| AssemblyErrorKind::UnknownLabel(name.clone()))?;

        let value = field
            .fit(u64::from(address))
            .ok_or_else(|| AssemblyErrorKind::ValueOutOfRange {
                value: address.to_string(),
                max: field.max(),
            })?;

        instruction.operand = Operand::Value(value);
        resolved += 1;
    }

    debug!(references = resolved, "labels resolved");
    Ok(())
}
