use super::{parse_class_line, parse_record_line};
use crate::error::ParseError;
use crate::model::{ClassRule, Record};

/// A parse error attached to its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineError {
    pub line: usize,
    pub error: ParseError,
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Result of parsing a whole document: the lines that parsed, where each came
/// from, and every line that did not.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub items: Vec<T>,
    pub lines: Vec<usize>,
    pub errors: Vec<LineError>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            lines: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> Parsed<T> {
    /// Source line of the item at `index`, if it came from text.
    pub fn line_of(&self, index: usize) -> Option<usize> {
        self.lines.get(index).copied()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn push_line(&mut self, line: usize, parsed: Result<T, ParseError>) {
        match parsed {
            Ok(item) => {
                self.items.push(item);
                self.lines.push(line);
            }
            Err(error) => {
                log::debug!("line {} rejected: {}", line, error);
                self.errors.push(LineError { line, error });
            }
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

fn parse_lines<'a, T>(
    lines: impl Iterator<Item = (usize, &'a str)>,
    parse: impl Fn(&str) -> Result<T, ParseError>,
) -> Parsed<T> {
    let mut parsed = Parsed::default();
    for (line_no, raw) in lines {
        let line = raw.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        parsed.push_line(line_no, parse(line));
    }
    parsed
}

/// Parse a records file. Blank and `#` comment lines are skipped; a bad line
/// is reported and the rest of the file is still parsed.
pub fn parse_records(text: &str) -> Parsed<Record> {
    parse_lines(numbered(text), parse_record_line)
}

/// Parse a rules file, one class per line.
pub fn parse_classes(text: &str) -> Parsed<ClassRule> {
    parse_lines(numbered(text), parse_class_line)
}

/// Parse a single file holding records, a blank line, then class definitions.
pub fn parse_combined(text: &str) -> (Parsed<Record>, Parsed<ClassRule>) {
    let mut records = Parsed::default();
    let mut classes = Parsed::default();
    let mut in_records = true;
    let mut seen_record_line = false;

    for (line_no, raw) in numbered(text) {
        let line = raw.trim();
        if line.is_empty() {
            if seen_record_line {
                in_records = false;
            }
            continue;
        }
        if is_comment(line) {
            continue;
        }
        if in_records {
            seen_record_line = true;
            records.push_line(line_no, parse_record_line(line));
        } else {
            classes.push_line(line_no, parse_class_line(line));
        }
    }

    (records, classes)
}

fn numbered(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, line)| (i + 1, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_collects_errors_and_keeps_going() {
        let text = "\
# fleet
R1: speed=120, wheels=4

R2 speed=10
R3: wheels=2, wheels=3
R4: wheels=2
";
        let parsed = parse_records(text);
        let ids: Vec<_> = parsed.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R1", "R4"]);
        assert_eq!(parsed.lines, vec![2, 6]);
        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(parsed.errors[0].line, 4);
        assert!(matches!(parsed.errors[0].error, ParseError::MalformedLine(_)));
        assert_eq!(parsed.errors[1].line, 5);
        assert_eq!(
            parsed.errors[1].error,
            ParseError::DuplicateProperty("wheels".to_string())
        );
    }

    #[test]
    fn test_parse_classes_document() {
        let parsed = parse_classes("Car: speed > 60; wheels == 4\nBike: wheels == 2\n");
        assert!(parsed.is_clean());
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.line_of(1), Some(2));
    }

    #[test]
    fn test_parse_combined_sections() {
        let text = "\nR1: speed=120, wheels=4\nR2: weight=15\n\nCar: speed > 60; wheels == 4\n\nLight: weight range 0, 10\n";
        let (records, classes) = parse_combined(text);
        assert_eq!(records.items.len(), 2);
        assert_eq!(records.lines, vec![2, 3]);
        assert_eq!(classes.items.len(), 2);
        assert_eq!(classes.lines, vec![5, 7]);
    }

    #[test]
    fn test_line_error_display() {
        let err = LineError {
            line: 3,
            error: ParseError::UnknownOperator("~".to_string()),
        };
        assert_eq!(err.to_string(), "line 3: Unknown operator: ~");
    }
}
