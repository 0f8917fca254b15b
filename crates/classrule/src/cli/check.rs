use super::InputArgs;
use anyhow::Result;
use classrule_lib::report::render_diagnostics;
use console::style;

/// Parse and validate only. Returns whether the input is clean.
pub fn handle_check_command(input: InputArgs, json: bool, quiet: bool) -> Result<bool> {
    let session = input.load()?;
    let diagnostics = session.diagnostics();

    if json {
        println!("{}", serde_json::to_string_pretty(diagnostics)?);
        return Ok(diagnostics.is_empty());
    }

    if diagnostics.is_empty() {
        for warning in session.warnings() {
            eprintln!("{} {}", style("!").yellow(), warning);
        }
        if !quiet {
            println!(
                "{} {} record(s) and {} class(es) are valid",
                style("✓").green(),
                style(session.records().len()).bold(),
                style(session.classes().len()).bold()
            );
        }
        return Ok(true);
    }

    eprint!("{}", render_diagnostics(diagnostics));
    if !quiet {
        eprintln!(
            "\n{} {} problem(s) found",
            style("✗").red(),
            style(diagnostics.len()).bold()
        );
    }
    Ok(false)
}
