mod cli;

use anyhow::Result;
use clap::Parser;
use classrule_lib::Config;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config)?;

    match cli.command {
        cli::Commands::Classify { input, output } => {
            cli::classify::handle_classify_command(&config, input, output, cli.quiet)
        }

        cli::Commands::Check { input, json } => {
            let clean = cli::check::handle_check_command(input, json, cli.quiet)?;
            if !clean {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
