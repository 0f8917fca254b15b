use super::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a [`Rule`] to one property value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    Range,
    In,
    Has,
}

/// How many operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Arity::Exactly(0) => "no",
            Arity::Exactly(1) => "exactly 1",
            Arity::Exactly(2) => "exactly 2",
            Arity::Exactly(_) => "a fixed number of",
            Arity::AtLeast(_) => "at least 1",
        }
    }
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Neq => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Range => "range",
            Operator::In => "in",
            Operator::Has => "has",
        }
    }

    /// Resolve an operator symbol or keyword. Keywords are case-insensitive.
    pub fn from_symbol(s: &str) -> Option<Self> {
        let op = match s.to_ascii_lowercase().as_str() {
            "==" | "=" | "eq" => Operator::Eq,
            "!=" | "<>" | "ne" | "neq" => Operator::Neq,
            "<" | "lt" => Operator::Lt,
            ">" | "gt" => Operator::Gt,
            "<=" | "le" => Operator::Le,
            ">=" | "ge" => Operator::Ge,
            "range" | "between" => Operator::Range,
            "in" => Operator::In,
            "has" => Operator::Has,
            _ => return None,
        };
        Some(op)
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::Has => Arity::Exactly(0),
            Operator::Range => Arity::Exactly(2),
            Operator::In => Arity::AtLeast(1),
            _ => Arity::Exactly(1),
        }
    }

    /// Operators that only make sense on numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge | Operator::Range
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single predicate over one property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub property: String,
    pub operator: Operator,
    #[serde(default)]
    pub operands: Vec<Value>,
}

impl Rule {
    pub fn new(property: impl Into<String>, operator: Operator, operands: Vec<Value>) -> Self {
        Self {
            property: property.into(),
            operator,
            operands,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.operator)?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, operand)?;
        }
        Ok(())
    }
}

/// A named class: a record belongs to it when every rule holds.
///
/// A class with no rules matches every record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRule {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl ClassRule {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::from_symbol(">="), Some(Operator::Ge));
        assert_eq!(Operator::from_symbol("="), Some(Operator::Eq));
        assert_eq!(Operator::from_symbol("IN"), Some(Operator::In));
        assert_eq!(Operator::from_symbol("Between"), Some(Operator::Range));
        assert_eq!(Operator::from_symbol("~="), None);
    }

    #[test]
    fn test_operator_arity() {
        assert!(Operator::Eq.arity().accepts(1));
        assert!(!Operator::Eq.arity().accepts(2));
        assert!(Operator::Range.arity().accepts(2));
        assert!(!Operator::Range.arity().accepts(1));
        assert!(Operator::In.arity().accepts(3));
        assert!(!Operator::In.arity().accepts(0));
        assert!(Operator::Has.arity().accepts(0));
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::new("weight", Operator::Range, vec![Value::from(0), Value::from(10)]);
        assert_eq!(rule.to_string(), "weight range 0, 10");

        let rule = Rule::new("coating", Operator::Has, vec![]);
        assert_eq!(rule.to_string(), "coating has");
    }
}
