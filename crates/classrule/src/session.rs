//! Parse → validate → classify, with the caller's policy for invalid input.

use crate::classify::{classify, classify_with_threads, Classification};
use crate::diagnostics::{Diagnostics, Source};
use crate::error::{ClassruleError, Result, Subject};
use crate::model::{ClassRule, Record};
use crate::parse::{parse_classes, parse_combined, parse_records, Parsed};
use crate::validate::{validate_classes, validate_records, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What to do when some records or classes fail to parse or validate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPolicy {
    /// Refuse to classify anything.
    #[default]
    Abort,
    /// Leave out the offending entities and classify the rest.
    Skip,
}

impl InvalidPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidPolicy::Abort => "abort",
            InvalidPolicy::Skip => "skip",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "abort" => Ok(InvalidPolicy::Abort),
            "skip" => Ok(InvalidPolicy::Skip),
            _ => Err(ClassruleError::Config(format!(
                "Invalid on_invalid policy: {} (valid: abort, skip)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub on_invalid: InvalidPolicy,
    pub parallel: bool,
    /// Worker threads for parallel runs; 0 uses the rayon default.
    pub threads: usize,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub classification: Classification,
    /// Classes that took part, in input order.
    pub classes: Vec<ClassRule>,
    pub skipped_records: usize,
    pub skipped_classes: usize,
}

/// Parsed and validated input, ready to classify.
#[derive(Debug, Clone)]
pub struct Session {
    records: Parsed<Record>,
    classes: Parsed<ClassRule>,
    registry: TypeRegistry,
    diagnostics: Diagnostics,
    rejected_records: BTreeSet<usize>,
    rejected_classes: BTreeSet<usize>,
    warnings: Vec<String>,
}

impl Session {
    /// Build from the text of a records file and a rules file.
    pub fn from_sources(records: &str, rules: &str) -> Self {
        Self::new(parse_records(records), parse_classes(rules))
    }

    /// Build from a single file with both sections.
    pub fn from_combined(text: &str) -> Self {
        let (records, classes) = parse_combined(text);
        Self::new(records, classes)
    }

    /// Validate already-parsed input. Parse errors are reported first, records
    /// before classes, followed by validation errors.
    pub fn new(records: Parsed<Record>, classes: Parsed<ClassRule>) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push_parse_errors(Source::Records, &records.errors);
        diagnostics.push_parse_errors(Source::Classes, &classes.errors);

        let registry = TypeRegistry::from_records(&records.items);
        let mut rejected_records = BTreeSet::new();
        let mut rejected_classes = BTreeSet::new();

        let errors = validate_records(&records.items)
            .into_iter()
            .chain(validate_classes(&classes.items, &registry));
        for error in errors {
            match error.subject() {
                Subject::Record(index) => {
                    diagnostics.push_validation(Source::Records, &error, records.line_of(index));
                    rejected_records.insert(index);
                }
                Subject::Class(index) => {
                    diagnostics.push_validation(Source::Classes, &error, classes.line_of(index));
                    rejected_classes.insert(index);
                }
            }
        }

        let mut warnings = Vec::new();
        if records.items.is_empty() && records.errors.is_empty() {
            warnings.push("no records found in input".to_string());
        }
        if classes.items.is_empty() && classes.errors.is_empty() {
            warnings.push("no classes found in input".to_string());
        }

        log::debug!(
            "session: {} record(s), {} class(es), {} diagnostic(s)",
            records.items.len(),
            classes.items.len(),
            diagnostics.len()
        );

        Self {
            records,
            classes,
            registry,
            diagnostics,
            rejected_records,
            rejected_classes,
            warnings,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn records(&self) -> &[Record] {
        &self.records.items
    }

    pub fn classes(&self) -> &[ClassRule] {
        &self.classes.items
    }

    /// Notes that do not block a run, such as an input with no records.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Classify under `options`. With [`InvalidPolicy::Abort`] any diagnostic
    /// fails the run; with [`InvalidPolicy::Skip`] only valid entities are
    /// classified.
    pub fn run(&self, options: &RunOptions) -> Result<Outcome> {
        if options.on_invalid == InvalidPolicy::Abort && !self.is_clean() {
            return Err(ClassruleError::InvalidInput {
                count: self.diagnostics.len(),
            });
        }

        for warning in &self.warnings {
            log::warn!("{}", warning);
        }

        let records = accepted(&self.records.items, &self.rejected_records, |r| {
            log::warn!("skipping invalid record '{}'", r.id)
        });
        let classes = accepted(&self.classes.items, &self.rejected_classes, |c| {
            log::warn!("skipping invalid class '{}'", c.name)
        });

        let classification = if options.parallel {
            classify_with_threads(&records, &classes, options.threads)?
        } else {
            classify(&records, &classes)?
        };

        log::info!(
            "classified {} record(s): {} matched at least one of {} class(es)",
            classification.len(),
            classification.matched(),
            classes.len()
        );

        Ok(Outcome {
            classification,
            classes,
            skipped_records: self.rejected_records.len(),
            skipped_classes: self.rejected_classes.len(),
        })
    }
}

fn accepted<T: Clone>(items: &[T], rejected: &BTreeSet<usize>, on_skip: impl Fn(&T)) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if rejected.contains(&index) {
                on_skip(item);
                None
            } else {
                Some(item.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Stage;

    const RECORDS: &str = "R1: speed=120, wheels=4\nR2: speed=slow, wheels=2\nR3 wheels=2\n";
    const RULES: &str = "Car: speed > 60; wheels == 4\nBike: wheels == 2\nBike: wheels == 3\n";

    #[test]
    fn test_clean_run() {
        let session = Session::from_sources("R1: speed=120, wheels=4\n", "Car: speed > 60\n");
        assert!(session.is_clean());
        let outcome = session.run(&RunOptions::default()).unwrap();
        assert_eq!(outcome.classification.get("R1"), Some(&["Car".to_string()][..]));
        assert_eq!(outcome.skipped_records, 0);
    }

    #[test]
    fn test_diagnostics_are_ordered() {
        let session = Session::from_sources(RECORDS, RULES);
        let diagnostics: Vec<_> = session.diagnostics().iter().collect();
        assert_eq!(diagnostics.len(), 3);

        assert_eq!(diagnostics[0].stage, Stage::Parse);
        assert_eq!(diagnostics[0].source, Source::Records);
        assert_eq!(diagnostics[0].line, Some(3));

        assert_eq!(diagnostics[1].stage, Stage::Validate);
        assert_eq!(diagnostics[1].source, Source::Records);
        assert_eq!(diagnostics[1].line, Some(2));

        assert_eq!(diagnostics[2].source, Source::Classes);
        assert_eq!(diagnostics[2].line, Some(3));
    }

    #[test]
    fn test_abort_policy_refuses_to_run() {
        let session = Session::from_sources(RECORDS, RULES);
        let err = session.run(&RunOptions::default()).unwrap_err();
        assert!(matches!(err, ClassruleError::InvalidInput { count: 3 }));
    }

    #[test]
    fn test_skip_policy_drops_only_invalid_entities() {
        let session = Session::from_sources(RECORDS, RULES);
        let options = RunOptions {
            on_invalid: InvalidPolicy::Skip,
            ..RunOptions::default()
        };
        let outcome = session.run(&options).unwrap();
        assert_eq!(outcome.skipped_records, 1);
        assert_eq!(outcome.skipped_classes, 1);
        assert_eq!(outcome.classification.len(), 1);
        assert_eq!(outcome.classification.get("R1"), Some(&["Car".to_string()][..]));
        let names: Vec<_> = outcome.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Car", "Bike"]);
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let session = Session::from_combined(
            "R1: speed=120, wheels=4\nR2: speed=20, wheels=2\n\nCar: speed > 60\nBike: wheels == 2\n",
        );
        let sequential = session.run(&RunOptions::default()).unwrap();
        let parallel = session
            .run(&RunOptions {
                parallel: true,
                threads: 2,
                ..RunOptions::default()
            })
            .unwrap();
        assert_eq!(parallel.classification, sequential.classification);
    }

    #[test]
    fn test_empty_inputs_warn_without_diagnostics() {
        let session = Session::from_sources("", "Car: speed > 1\n");
        assert!(session.is_clean());
        assert_eq!(session.warnings(), ["no records found in input".to_string()]);

        let session = Session::from_sources("# nothing yet\n\n", "\n");
        assert_eq!(session.warnings().len(), 2);
        assert!(session.warnings()[1].contains("no classes"));
        let outcome = session.run(&RunOptions::default()).unwrap();
        assert!(outcome.classification.is_empty());

        let session = Session::from_sources("R1: speed=2\n", "Car: speed > 1\n");
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(InvalidPolicy::from_str("skip").unwrap(), InvalidPolicy::Skip);
        assert!(InvalidPolicy::from_str("merge").is_err());
    }
}
