use super::{InputArgs, OutputArgs};
use anyhow::{Context, Result};
use classrule_lib::{report, ClassruleError, Config, InvalidPolicy, OutputFormat};
use console::style;

pub fn handle_classify_command(
    config: &Config,
    input: InputArgs,
    output: OutputArgs,
    quiet: bool,
) -> Result<()> {
    let session = input.load()?;
    if !session.diagnostics().is_empty() {
        super::print_diagnostics(session.diagnostics());
    }

    let mut options = config.run_options();
    if output.skip_invalid {
        options.on_invalid = InvalidPolicy::Skip;
    }
    if output.parallel {
        options.parallel = true;
    }
    if let Some(threads) = output.threads {
        options.threads = threads;
    }

    let format = match output.format.as_deref() {
        Some(name) => OutputFormat::from_str(name)?,
        None => config.format,
    };

    let outcome = match session.run(&options) {
        Err(ClassruleError::InvalidInput { count }) => {
            anyhow::bail!(
                "{} problem(s) in input; fix them or rerun with --skip-invalid",
                count
            )
        }
        other => other?,
    };

    let rendered = report::render(&outcome, format, &config.no_match_marker)?;

    match output.output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                println!(
                    "{} Wrote classification of {} record(s) to {}",
                    style("✓").green(),
                    style(outcome.classification.len()).bold(),
                    path.display()
                );
            }
        }
        None => print!("{}", rendered),
    }

    if !quiet && (outcome.skipped_records > 0 || outcome.skipped_classes > 0) {
        eprintln!(
            "{} Skipped {} record(s) and {} class(es)",
            style("!").yellow(),
            outcome.skipped_records,
            outcome.skipped_classes
        );
    }

    Ok(())
}
