use crate::model::{Operator, ValueKind};
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one input line into a model value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed line: {0}")]
    MalformedLine(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Duplicate property: {0}")]
    DuplicateProperty(String),

    #[error("Missing closing quote in token: {0}")]
    MissingQuote(String),
}

/// A well-formedness violation found by the validator.
///
/// `index` is the position of the offending record or class in the slice
/// handed to the validator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Record #{index} has an empty identifier")]
    EmptyRecordId { index: usize },

    #[error("Record '{id}' is defined more than once")]
    DuplicateRecordId { index: usize, id: String },

    #[error("Record '{id}' has no properties")]
    NoProperties { index: usize, id: String },

    #[error("Record '{id}' has a property with an empty name")]
    EmptyPropertyName { index: usize, id: String },

    #[error("Record '{id}' repeats property '{property}'")]
    DuplicatePropertyName {
        index: usize,
        id: String,
        property: String,
    },

    #[error("Record '{id}': property '{property}' is {found}, but earlier records use {expected}")]
    InconsistentType {
        index: usize,
        id: String,
        property: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Class #{index} has an empty name")]
    EmptyClassName { index: usize },

    #[error("Class '{class}' is defined more than once")]
    DuplicateClassName { index: usize, class: String },

    #[error("Class '{class}': rule #{rule} has an empty property name")]
    EmptyRuleProperty {
        index: usize,
        class: String,
        rule: usize,
    },

    #[error("Class '{class}': '{operator}' on '{property}' takes {expected} operand(s), got {found}")]
    OperandCount {
        index: usize,
        class: String,
        property: String,
        operator: Operator,
        expected: &'static str,
        found: usize,
    },

    #[error("Class '{class}': '{operator}' on '{property}' needs {expected} operands, got {found}")]
    OperandType {
        index: usize,
        class: String,
        property: String,
        operator: Operator,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Class '{class}': '{operator}' cannot be applied to {kind} property '{property}'")]
    PropertyType {
        index: usize,
        class: String,
        property: String,
        operator: Operator,
        kind: ValueKind,
    },

    #[error("Class '{class}': range on '{property}' has lower bound {lower} above upper bound {upper}")]
    InvalidRange {
        index: usize,
        class: String,
        property: String,
        lower: f64,
        upper: f64,
    },
}

/// Which collection a validation error points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Record(usize),
    Class(usize),
}

impl ValidationError {
    pub fn subject(&self) -> Subject {
        use ValidationError::*;
        match self {
            EmptyRecordId { index }
            | DuplicateRecordId { index, .. }
            | NoProperties { index, .. }
            | EmptyPropertyName { index, .. }
            | DuplicatePropertyName { index, .. }
            | InconsistentType { index, .. } => Subject::Record(*index),
            EmptyClassName { index }
            | DuplicateClassName { index, .. }
            | EmptyRuleProperty { index, .. }
            | OperandCount { index, .. }
            | OperandType { index, .. }
            | PropertyType { index, .. }
            | InvalidRange { index, .. } => Subject::Class(*index),
        }
    }
}

/// Evaluation fault. Unreachable for validated input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Type mismatch: '{operator}' on '{property}' needs numbers, found {found}")]
    TypeMismatch {
        property: String,
        operator: Operator,
        found: ValueKind,
    },

    #[error("Rule with operator '{operator}' does not name a property")]
    UnknownProperty { operator: Operator },

    #[error("'{operator}' on '{property}' got {found} operand(s)")]
    OperandCount {
        property: String,
        operator: Operator,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum ClassruleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Input rejected: {count} problem(s) found")]
    InvalidInput { count: usize },

    #[error("Internal consistency fault during classification: {0}")]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, ClassruleError>;
