pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod parse;
pub mod report;
pub mod session;
pub mod validate;

pub use classify::{
    classify, classify_parallel, classify_with_threads, evaluate_rule, matches_class,
    Classification, RecordClasses, RuleEngine,
};
pub use config::{Config, OutputFormat};
pub use diagnostics::{Diagnostic, Diagnostics, Source, Stage};
pub use error::{ClassruleError, EvalError, ParseError, Result, Subject, ValidationError};
pub use model::{ClassRule, Operator, Property, Record, Rule, Value, ValueKind};
pub use parse::{
    parse_class_line, parse_classes, parse_combined, parse_record_line, parse_records, LineError,
    Parsed,
};
pub use session::{InvalidPolicy, Outcome, RunOptions, Session};
pub use validate::{validate_classes, validate_records, TypeRegistry};
