#![allow(dead_code)]

use classrule_lib::{ClassRule, Operator, Property, Record, Rule, Value};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Write `content` to `name` inside the fixture directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

pub fn record(id: &str, properties: &[(&str, Value)]) -> Record {
    Record::new(
        id,
        properties
            .iter()
            .map(|(name, value)| Property::new(*name, value.clone()))
            .collect(),
    )
}

pub fn rule(property: &str, operator: Operator, operands: &[Value]) -> Rule {
    Rule::new(property, operator, operands.to_vec())
}

pub fn class(name: &str, rules: Vec<Rule>) -> ClassRule {
    ClassRule::new(name, rules)
}

pub fn num(n: f64) -> Value {
    Value::Number(n)
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub fn names(classes: &[String]) -> Vec<&str> {
    classes.iter().map(String::as_str).collect()
}
