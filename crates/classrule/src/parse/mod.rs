//! Line parser for record and class definitions.
//!
//! Record lines:
//!
//! ```text
//! R1: speed=120, wheels=4, color=red
//! ```
//!
//! Class lines (rules separated by `;`, operands by `,`):
//!
//! ```text
//! Car: speed > 60; wheels == 4
//! Light: weight range 0, 10
//! Primary: color in (red, blue)
//! Coated: coating has
//! Anything:
//! ```
//!
//! Values are typed per token: numbers become [`Value::Number`], anything
//! else [`Value::Text`]. Wrap a token in double quotes to force text.

pub mod document;

pub use document::{parse_classes, parse_combined, parse_records, LineError, Parsed};

use crate::error::ParseError;
use crate::model::{ClassRule, Operator, Property, Record, Rule, Value};

const OPERATOR_CHARS: &[char] = &['=', '!', '<', '>'];

/// Characters allowed in a property name, so rules can always address it.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Parse one record line. The caller trims and skips blank lines.
pub fn parse_record_line(line: &str) -> Result<Record, ParseError> {
    let (id, body) = split_header(line, "record identifier")?;
    if body.is_empty() {
        return Err(ParseError::MalformedLine(format!(
            "record '{}' has no properties",
            id
        )));
    }

    let mut properties: Vec<Property> = Vec::new();
    for chunk in split_top_level(body, ',')? {
        let (name, raw) = chunk.split_once('=').ok_or_else(|| {
            ParseError::MalformedLine(format!("expected name=value, got '{}'", chunk))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::MalformedLine(format!(
                "property without a name in '{}'",
                chunk
            )));
        }
        if !name.chars().all(is_name_char) {
            return Err(ParseError::MalformedLine(format!(
                "property name '{}' may only contain letters, digits, '_', '-' and '.'",
                name
            )));
        }
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::MalformedLine(format!(
                "property '{}' has no value",
                name
            )));
        }
        if properties.iter().any(|p| p.name == name) {
            return Err(ParseError::DuplicateProperty(name.to_string()));
        }
        properties.push(Property {
            name: name.to_string(),
            value: parse_value(raw)?,
        });
    }

    Ok(Record {
        id: id.to_string(),
        properties,
    })
}

/// Parse one class line. A class with nothing after the colon has no rules.
pub fn parse_class_line(line: &str) -> Result<ClassRule, ParseError> {
    let (name, body) = split_header(line, "class name")?;

    let rules = if body.is_empty() {
        Vec::new()
    } else {
        split_top_level(body, ';')?
            .into_iter()
            .map(parse_rule)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(ClassRule {
        name: name.to_string(),
        rules,
    })
}

/// Parse a single `property operator operand[, operand]` triple.
pub fn parse_rule(text: &str) -> Result<Rule, ParseError> {
    let text = text.trim();

    let name_end = text
        .find(|c: char| !is_name_char(c))
        .unwrap_or(text.len());
    let property = &text[..name_end];
    if property.is_empty() {
        return Err(ParseError::MalformedLine(format!(
            "rule '{}' does not start with a property name",
            text
        )));
    }

    let rest = text[name_end..].trim_start();
    let op_end = if rest.starts_with(OPERATOR_CHARS) {
        rest.find(|c: char| !OPERATOR_CHARS.contains(&c))
    } else if rest.starts_with(char::is_alphabetic) {
        rest.find(|c: char| !c.is_alphabetic())
    } else {
        // Any other symbol run is an operator token too, just not a known one.
        rest.find(|c: char| c.is_whitespace() || c.is_alphanumeric() || matches!(c, '"' | '[' | '('))
    }
    .unwrap_or(rest.len());
    let symbol = &rest[..op_end];
    if symbol.is_empty() {
        return Err(ParseError::MalformedLine(format!(
            "rule '{}' has no operator",
            text
        )));
    }
    let operator =
        Operator::from_symbol(symbol).ok_or_else(|| ParseError::UnknownOperator(symbol.to_string()))?;

    let operands = parse_operands(&rest[op_end..])?;
    if !operator.arity().accepts(operands.len()) {
        return Err(ParseError::MalformedLine(format!(
            "'{}' on '{}' takes {} operand(s), got {}",
            operator,
            property,
            operator.arity().describe(),
            operands.len()
        )));
    }

    Ok(Rule {
        property: property.to_string(),
        operator,
        operands,
    })
}

/// Parse one value token, honouring double quotes.
pub fn parse_value(token: &str) -> Result<Value, ParseError> {
    let token = token.trim();
    match token.strip_prefix('"') {
        Some(inner) => match inner.strip_suffix('"') {
            Some(text) => Ok(Value::Text(text.to_string())),
            None => Err(ParseError::MissingQuote(token.to_string())),
        },
        None => Ok(Value::infer(token)),
    }
}

fn parse_operands(text: &str) -> Result<Vec<Value>, ParseError> {
    let mut text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    for (open, close) in [('[', ']'), ('(', ')')] {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            text = inner.trim();
            break;
        }
    }

    split_top_level(text, ',')?
        .into_iter()
        .map(parse_value)
        .collect()
}

/// Split `id: body` into its trimmed halves.
fn split_header<'a>(line: &'a str, what: &str) -> Result<(&'a str, &'a str), ParseError> {
    let (head, body) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MalformedLine(format!("missing ':' after {}", what)))?;
    let head = head.trim();
    if head.is_empty() {
        return Err(ParseError::MalformedLine(format!("empty {}", what)));
    }
    Ok((head, body.trim()))
}

/// Split on `sep` outside of double quotes and brackets. Every piece is
/// trimmed and must be non-empty.
fn split_top_level(text: &str, sep: char) -> Result<Vec<&str>, ParseError> {
    let mut pieces = Vec::new();
    let mut in_quotes = false;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' if !in_quotes => depth += 1,
            ']' | ')' if !in_quotes => depth = depth.saturating_sub(1),
            c if c == sep && !in_quotes && depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if in_quotes {
        return Err(ParseError::MissingQuote(text[start..].trim().to_string()));
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(|piece| {
            let piece = piece.trim();
            if piece.is_empty() {
                Err(ParseError::MalformedLine(format!(
                    "empty entry between '{}' separators in '{}'",
                    sep, text
                )))
            } else {
                Ok(piece)
            }
        })
        .collect()
}
