use chartsmith_core::cli::{self, Cli};
use chartsmith_core::exit::ChartsmithExit;
use chartsmith_core::logging;
use clap::Parser;
use colored::Colorize;

fn main() -> ChartsmithExit {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd, cli.config.as_deref())
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(ChartsmithExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            ChartsmithExit::Error
        }
    }
}
