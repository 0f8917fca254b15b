use crate::model::{Record, ValueKind};
use std::collections::HashMap;

/// Property name to value kind, fixed by the first record that carries the
/// property. Built once and passed to the validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeRegistry {
    kinds: HashMap<String, ValueKind>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[Record]) -> Self {
        let mut registry = Self::new();
        for record in records {
            for property in &record.properties {
                if !property.name.is_empty() {
                    registry.observe(&property.name, property.value.kind());
                }
            }
        }
        registry
    }

    /// Record `kind` for `name` unless the name is already known. Returns the
    /// registered kind.
    pub fn observe(&mut self, name: &str, kind: ValueKind) -> ValueKind {
        *self.kinds.entry(name.to_string()).or_insert(kind)
    }

    pub fn kind_of(&self, name: &str) -> Option<ValueKind> {
        self.kinds.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
