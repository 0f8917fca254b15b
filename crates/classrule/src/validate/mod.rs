//! Well-formedness checks run before classification.
//!
//! Both validators collect every violation instead of stopping at the first
//! one. They never fail themselves: what to do with a reported entity (abort
//! the run or skip it) is up to the caller, see [`crate::session`].

pub mod registry;

pub use registry::TypeRegistry;

use crate::error::ValidationError;
use crate::model::{ClassRule, Operator, Record, Rule, Value, ValueKind};
use std::collections::HashSet;

/// Check records for identifiers, property sets and stable property kinds.
pub fn validate_records(records: &[Record]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut registry = TypeRegistry::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let id = record.id.trim();
        if id.is_empty() {
            errors.push(ValidationError::EmptyRecordId { index });
        } else if !seen_ids.insert(id) {
            errors.push(ValidationError::DuplicateRecordId {
                index,
                id: id.to_string(),
            });
        }

        if record.properties.is_empty() {
            errors.push(ValidationError::NoProperties {
                index,
                id: record.id.clone(),
            });
            continue;
        }

        let mut names: HashSet<&str> = HashSet::new();
        let mut reported_empty = false;
        for property in &record.properties {
            if property.name.trim().is_empty() {
                if !reported_empty {
                    errors.push(ValidationError::EmptyPropertyName {
                        index,
                        id: record.id.clone(),
                    });
                    reported_empty = true;
                }
                continue;
            }

            if !names.insert(property.name.as_str()) {
                errors.push(ValidationError::DuplicatePropertyName {
                    index,
                    id: record.id.clone(),
                    property: property.name.clone(),
                });
                continue;
            }

            let found = property.value.kind();
            let expected = registry.observe(&property.name, found);
            if expected != found {
                errors.push(ValidationError::InconsistentType {
                    index,
                    id: record.id.clone(),
                    property: property.name.clone(),
                    expected,
                    found,
                });
            }
        }
    }

    errors
}

/// Check class names and every rule's arity and operand types. Rules are
/// cross-checked against `registry`; properties it does not know are
/// optional and only have their operands checked.
pub fn validate_classes(classes: &[ClassRule], registry: &TypeRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();

    for (index, class) in classes.iter().enumerate() {
        let name = class.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyClassName { index });
        } else if !seen_names.insert(name) {
            errors.push(ValidationError::DuplicateClassName {
                index,
                class: name.to_string(),
            });
        }

        for (position, rule) in class.rules.iter().enumerate() {
            check_rule(index, &class.name, position + 1, rule, registry, &mut errors);
        }
    }

    errors
}

fn check_rule(
    index: usize,
    class: &str,
    position: usize,
    rule: &Rule,
    registry: &TypeRegistry,
    errors: &mut Vec<ValidationError>,
) {
    if rule.property.trim().is_empty() {
        errors.push(ValidationError::EmptyRuleProperty {
            index,
            class: class.to_string(),
            rule: position,
        });
        return;
    }

    let arity = rule.operator.arity();
    if !arity.accepts(rule.operands.len()) {
        errors.push(ValidationError::OperandCount {
            index,
            class: class.to_string(),
            property: rule.property.clone(),
            operator: rule.operator,
            expected: arity.describe(),
            found: rule.operands.len(),
        });
        return;
    }

    let known = registry.kind_of(&rule.property);

    if rule.operator.is_numeric() {
        if let Some(text) = rule.operands.iter().find(|o| o.kind() == ValueKind::Text) {
            errors.push(ValidationError::OperandType {
                index,
                class: class.to_string(),
                property: rule.property.clone(),
                operator: rule.operator,
                expected: ValueKind::Number,
                found: text.kind(),
            });
        }
        if known == Some(ValueKind::Text) {
            errors.push(ValidationError::PropertyType {
                index,
                class: class.to_string(),
                property: rule.property.clone(),
                operator: rule.operator,
                kind: ValueKind::Text,
            });
        }
        if rule.operator == Operator::Range {
            if let [Value::Number(lower), Value::Number(upper)] = rule.operands.as_slice() {
                if lower > upper {
                    errors.push(ValidationError::InvalidRange {
                        index,
                        class: class.to_string(),
                        property: rule.property.clone(),
                        lower: *lower,
                        upper: *upper,
                    });
                }
            }
        }
        return;
    }

    if matches!(rule.operator, Operator::Eq | Operator::Neq) {
        if let (Some(expected), Some(operand)) = (known, rule.operands.first()) {
            if operand.kind() != expected {
                errors.push(ValidationError::OperandType {
                    index,
                    class: class.to_string(),
                    property: rule.property.clone(),
                    operator: rule.operator,
                    expected,
                    found: operand.kind(),
                });
            }
        }
    }

    if known.is_none() {
        log::debug!(
            "class '{}': no record carries '{}', rule only matches records that do",
            class,
            rule.property
        );
    }
}
