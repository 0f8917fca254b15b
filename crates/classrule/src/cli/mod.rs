pub mod check;
pub mod classify;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use classrule_lib::Session;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "classrule")]
#[command(about = "Classify records against rule-defined classes", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Classify records and print the classes each one matched")]
    Classify {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    #[command(about = "Parse and validate input without classifying")]
    Check {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, help = "Print diagnostics as JSON")]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    #[arg(long, help = "Records file, one record per line")]
    pub records: Option<PathBuf>,

    #[arg(long, help = "Rules file, one class per line")]
    pub rules: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with_all = ["records", "rules"],
        help = "Single file with records, a blank line, then classes"
    )]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(long, help = "Output format (text, table, json)")]
    pub format: Option<String>,

    #[arg(long, short = 'o', help = "Output file path")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Skip invalid records and classes instead of aborting")]
    pub skip_invalid: bool,

    #[arg(long, help = "Classify records in parallel")]
    pub parallel: bool,

    #[arg(long, help = "Worker threads for --parallel (0 = one per core)")]
    pub threads: Option<usize>,
}

impl InputArgs {
    pub fn load(&self) -> Result<Session> {
        if let Some(path) = &self.input {
            return Ok(Session::from_combined(&read_input(path)?));
        }
        match (&self.records, &self.rules) {
            (Some(records), Some(rules)) => {
                Ok(Session::from_sources(&read_input(records)?, &read_input(rules)?))
            }
            _ => bail!("either --input, or both --records and --rules, must be given"),
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    log::debug!("reading {}", path.display());
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &classrule_lib::Diagnostics) {
    use console::style;

    for diagnostic in diagnostics.iter() {
        eprintln!("{} {}", style("✗").red(), diagnostic);
    }
}
