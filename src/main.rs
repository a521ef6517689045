//! `homemaker` binary: parse arguments and dispatch to a command.
use anyhow::Result;
use clap::{CommandFactory, Parser};

use homemaker::cli::{Cli, Command};
use homemaker::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let Some(command) = args.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Run(opts) => {
            logging::init_subscriber(args.verbose, "run");
            let log = logging::Logger::new("run");
            commands::run::run(&args.global, &opts, args.verbose, &log)
        }
        Command::Check => {
            logging::init_subscriber(args.verbose, "check");
            let log = logging::Logger::new("check");
            commands::check::run(&args.global, &log)
        }
        Command::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
        Command::Version => commands::version::run(),
    }
}
