pub mod engine;
pub mod parallel;

pub use engine::{classify, evaluate_rule, matches_class, RuleEngine};
pub use parallel::{classify_parallel, classify_with_threads};

use crate::model::ClassRule;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Classes matched by one record, in class input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordClasses {
    pub record: String,
    pub classes: Vec<String>,
}

impl RecordClasses {
    pub fn is_match(&self) -> bool {
        !self.classes.is_empty()
    }
}

/// Record identifier to matched class names, in record input order.
///
/// Holds exactly one entry per classified record; an empty class list means
/// the record matched nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    entries: Vec<RecordClasses>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, record: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.record == record)
            .map(|e| e.classes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordClasses> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records that matched at least one class.
    pub fn matched(&self) -> usize {
        self.entries.iter().filter(|e| e.is_match()).count()
    }

    /// Append another partition. Record identifiers must be disjoint.
    pub fn append(&mut self, other: Classification) {
        self.entries.extend(other.entries);
    }

    /// Inverse view: each class with the records it holds, in class order.
    /// Classes with no members are included.
    pub fn by_class(&self, classes: &[ClassRule]) -> Vec<(String, Vec<String>)> {
        classes
            .iter()
            .map(|class| {
                let members = self
                    .entries
                    .iter()
                    .filter(|e| e.classes.iter().any(|c| c == &class.name))
                    .map(|e| e.record.clone())
                    .collect();
                (class.name.clone(), members)
            })
            .collect()
    }
}

impl FromIterator<RecordClasses> for Classification {
    fn from_iter<I: IntoIterator<Item = RecordClasses>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Classification {
    type Item = RecordClasses;
    type IntoIter = std::vec::IntoIter<RecordClasses>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.record, &entry.classes)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(record: &str, classes: &[&str]) -> RecordClasses {
        RecordClasses {
            record: record.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_lookup_and_counts() {
        let result: Classification = vec![entry("R1", &["Car"]), entry("R2", &[])].into_iter().collect();
        assert_eq!(result.len(), 2);
        assert_eq!(result.matched(), 1);
        assert_eq!(result.get("R1"), Some(&["Car".to_string()][..]));
        assert_eq!(result.get("R2"), Some(&[][..]));
        assert_eq!(result.get("R3"), None);
    }

    #[test]
    fn test_by_class_lists_empty_classes() {
        let result: Classification =
            vec![entry("R1", &["Car"]), entry("R2", &["Car", "Red"])].into_iter().collect();
        let classes = vec![
            ClassRule::new("Car", vec![]),
            ClassRule::new("Bike", vec![]),
            ClassRule::new("Red", vec![]),
        ];
        assert_eq!(
            result.by_class(&classes),
            vec![
                ("Car".to_string(), vec!["R1".to_string(), "R2".to_string()]),
                ("Bike".to_string(), vec![]),
                ("Red".to_string(), vec!["R2".to_string()]),
            ]
        );
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let result: Classification = vec![entry("R2", &[]), entry("R1", &["Car"])].into_iter().collect();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"R2":[],"R1":["Car"]}"#);
    }
}
