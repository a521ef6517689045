//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Top-level CLI entry point for homemaker.
#[derive(Parser, Debug)]
#[command(
    name = "homemaker",
    about = "Declarative symlink provisioner for your home directory",
    version
)]
pub struct Cli {
    /// The command to execute; help is printed when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Paths shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration root directory (default: $HOMEMAKER_ROOT or the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file (default: homemaker.toml or homemaker.json in the root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory relative link targets are placed in (default: $HOME)
    #[arg(long, global = true)]
    pub dest: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create (or remove) the links of one or more tasks
    Run(RunOpts),
    /// Validate the configuration and check that every source exists
    Check,
    /// Print shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print version information
    Version,
}

/// Options for the `run` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct RunOpts {
    /// Remove links instead of creating them
    #[arg(short, long)]
    pub unlink: bool,

    /// Abort on the first conflict instead of prompting
    #[arg(long)]
    pub no_interactive: bool,

    /// Replace conflicting targets without prompting
    #[arg(long, conflicts_with = "no_interactive")]
    pub clobber: bool,

    /// Tasks to run in order (default: the default task)
    pub tasks: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_command() {
        let cli = Cli::parse_from(["homemaker"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::parse_from(["homemaker", "run"]);
        assert!(
            matches!(&cli.command, Some(Command::Run(_))),
            "Expected Run command"
        );
        if let Some(Command::Run(opts)) = cli.command {
            assert!(!opts.unlink);
            assert!(!opts.no_interactive);
            assert!(!opts.clobber);
            assert!(opts.tasks.is_empty());
        }
    }

    #[test]
    fn parse_run_tasks_in_order() {
        let cli = Cli::parse_from(["homemaker", "run", "vim", "default"]);
        assert!(
            matches!(&cli.command, Some(Command::Run(o)) if o.tasks == ["vim", "default"]),
            "Expected Run command with tasks in order"
        );
    }

    #[test]
    fn parse_run_unlink_short() {
        let cli = Cli::parse_from(["homemaker", "run", "-u"]);
        assert!(matches!(cli.command, Some(Command::Run(ref o)) if o.unlink));
    }

    #[test]
    fn clobber_conflicts_with_no_interactive() {
        let result =
            Cli::try_parse_from(["homemaker", "run", "--clobber", "--no-interactive"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["homemaker", "run", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_global_paths() {
        let cli = Cli::parse_from([
            "homemaker",
            "--root",
            "/repo",
            "check",
            "--dest",
            "/tmp/home",
            "-c",
            "/repo/alt.toml",
        ]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/repo")));
        assert_eq!(cli.global.dest, Some(PathBuf::from("/tmp/home")));
        assert_eq!(cli.global.config, Some(PathBuf::from("/repo/alt.toml")));
        assert!(matches!(cli.command, Some(Command::Check)));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["homemaker", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Command::Completions { shell: Shell::Bash })
        ));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["homemaker", "version"]);
        assert!(matches!(cli.command, Some(Command::Version)));
    }

    #[test]
    fn subcommand_listing() {
        let names: Vec<String> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
        insta::assert_snapshot!(names.join("\n"), @r"
        run
        check
        completions
        version
        ");
    }
}
