use crate::error::ValidationError;
use crate::parse::LineError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Parse,
    Validate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Validate => "validate",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Records,
    Classes,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Records => "records",
            Source::Classes => "classes",
        }
    }
}

/// One reported problem with the input.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub source: Source,
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: ", self.source.as_str(), line)?,
            None => write!(f, "{}: ", self.source.as_str())?,
        }
        write!(f, "{} error: {}", self.stage.as_str(), self.message)
    }
}

/// Every parse and validation failure, in the order it was found.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_parse_errors(&mut self, source: Source, errors: &[LineError]) {
        self.items.extend(errors.iter().map(|e| Diagnostic {
            stage: Stage::Parse,
            source,
            line: Some(e.line),
            message: e.error.to_string(),
        }));
    }

    pub fn push_validation(&mut self, source: Source, error: &ValidationError, line: Option<usize>) {
        self.items.push(Diagnostic {
            stage: Stage::Validate,
            source,
            line,
            message: error.to_string(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
