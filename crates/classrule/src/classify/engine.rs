//! Rule evaluation.
//!
//! A class matches a record when every one of its rules holds. A rule whose
//! property is missing from the record is false whatever its operator, so
//! optional properties simply keep a record out of the class.

use super::{Classification, RecordClasses};
use crate::error::EvalError;
use crate::model::{ClassRule, Operator, Record, Rule, Value};
use std::cmp::Ordering;

/// Evaluates records against an ordered set of classes.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    classes: &'a [ClassRule],
}

impl<'a> RuleEngine<'a> {
    pub fn new(classes: &'a [ClassRule]) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &'a [ClassRule] {
        self.classes
    }

    /// Names of every class the record belongs to, in class order.
    pub fn classify(&self, record: &Record) -> Result<Vec<String>, EvalError> {
        let mut matched = Vec::new();
        for class in self.classes {
            if matches_class(class, record)? {
                matched.push(class.name.clone());
            }
        }
        Ok(matched)
    }

    pub fn classify_record(&self, record: &Record) -> Result<RecordClasses, EvalError> {
        Ok(RecordClasses {
            record: record.id.clone(),
            classes: self.classify(record)?,
        })
    }

    /// Classify records in order. One entry per record.
    pub fn classify_batch(&self, records: &[Record]) -> Result<Classification, EvalError> {
        records
            .iter()
            .map(|record| self.classify_record(record))
            .collect()
    }
}

/// Classify every record against every class.
pub fn classify(records: &[Record], classes: &[ClassRule]) -> Result<Classification, EvalError> {
    log::debug!(
        "classifying {} record(s) against {} class(es)",
        records.len(),
        classes.len()
    );
    RuleEngine::new(classes).classify_batch(records)
}

/// True when all rules of `class` hold for `record`. No rules: always true.
pub fn matches_class(class: &ClassRule, record: &Record) -> Result<bool, EvalError> {
    for rule in &class.rules {
        if !evaluate_rule(rule, record)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Evaluate one rule against a record.
pub fn evaluate_rule(rule: &Rule, record: &Record) -> Result<bool, EvalError> {
    if rule.property.is_empty() {
        return Err(EvalError::UnknownProperty {
            operator: rule.operator,
        });
    }
    if !rule.operator.arity().accepts(rule.operands.len()) {
        return Err(EvalError::OperandCount {
            property: rule.property.clone(),
            operator: rule.operator,
            found: rule.operands.len(),
        });
    }

    let value = match record.get(&rule.property) {
        Some(value) => value,
        None => return Ok(false),
    };
    let ops = &rule.operands;

    let result = match rule.operator {
        Operator::Eq => value == &ops[0],
        Operator::Neq => value != &ops[0],
        Operator::Lt => compare(rule, value, &ops[0])? == Ordering::Less,
        Operator::Gt => compare(rule, value, &ops[0])? == Ordering::Greater,
        Operator::Le => compare(rule, value, &ops[0])? != Ordering::Greater,
        Operator::Ge => compare(rule, value, &ops[0])? != Ordering::Less,
        Operator::Range => {
            compare(rule, value, &ops[0])? != Ordering::Less
                && compare(rule, value, &ops[1])? != Ordering::Greater
        }
        Operator::In => ops.contains(value),
        Operator::Has => true,
    };
    Ok(result)
}

/// Numeric comparison of `value` against `operand`.
fn compare(rule: &Rule, value: &Value, operand: &Value) -> Result<Ordering, EvalError> {
    let mismatch = |found: &Value| EvalError::TypeMismatch {
        property: rule.property.clone(),
        operator: rule.operator,
        found: found.kind(),
    };
    let lhs = value.as_number().ok_or_else(|| mismatch(value))?;
    let rhs = operand.as_number().ok_or_else(|| mismatch(operand))?;
    // Values are finite, so partial_cmp only fails on NaN built by hand.
    lhs.partial_cmp(&rhs).ok_or_else(|| mismatch(value))
}
