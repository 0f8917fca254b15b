use crate::classify::Classification;
use crate::config::OutputFormat;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::session::Outcome;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde_json::json;

/// Render an outcome in the requested format.
pub fn render(outcome: &Outcome, format: OutputFormat, no_match: &str) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&outcome.classification, no_match)),
        OutputFormat::Table => Ok(render_table(outcome, no_match)),
        OutputFormat::Json => render_json(outcome),
    }
}

/// One line per record: `R1: Car, Red`, or `R2: -` for no match.
pub fn render_text(classification: &Classification, no_match: &str) -> String {
    let mut out = String::new();
    for entry in classification.iter() {
        out.push_str(&entry.record);
        out.push_str(": ");
        if entry.is_match() {
            out.push_str(&entry.classes.join(", "));
        } else {
            out.push_str(no_match);
        }
        out.push('\n');
    }
    out
}

pub fn render_table(outcome: &Outcome, no_match: &str) -> String {
    let mut records = Table::new();
    records.load_preset(UTF8_FULL);
    records.set_header(vec![
        Cell::new("Record").fg(Color::Cyan),
        Cell::new("Classes").fg(Color::Cyan),
    ]);
    for entry in outcome.classification.iter() {
        let classes = if entry.is_match() {
            Cell::new(entry.classes.join(", "))
        } else {
            Cell::new(no_match).fg(Color::DarkGrey)
        };
        records.add_row(vec![Cell::new(&entry.record), classes]);
    }

    let mut classes = Table::new();
    classes.load_preset(UTF8_FULL);
    classes.set_header(vec![
        Cell::new("Class").fg(Color::Cyan),
        Cell::new("Rules").fg(Color::Cyan),
        Cell::new("Records").fg(Color::Cyan),
    ]);
    let members = outcome.classification.by_class(&outcome.classes);
    for (class, (_, records_in_class)) in outcome.classes.iter().zip(members) {
        classes.add_row(vec![
            Cell::new(&class.name),
            Cell::new(class.rules.len()),
            Cell::new(records_in_class.len()),
        ]);
    }

    format!("{}\n\n{}\n", records, classes)
}

pub fn render_json(outcome: &Outcome) -> Result<String> {
    let by_class: serde_json::Map<String, serde_json::Value> = outcome
        .classification
        .by_class(&outcome.classes)
        .into_iter()
        .map(|(class, records)| (class, json!(records)))
        .collect();

    let document = json!({
        "records": outcome.classification,
        "classes": by_class,
        "skipped": {
            "records": outcome.skipped_records,
            "classes": outcome.skipped_classes,
        },
    });
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Diagnostics, one per line, in the order they were found.
pub fn render_diagnostics(diagnostics: &Diagnostics) -> String {
    diagnostics
        .iter()
        .map(|d| format!("{}\n", d))
        .collect()
}
