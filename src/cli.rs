//! Command-line argument parsing
//!
//! The bot itself runs with no arguments; flags only override paths and
//! verbosity, and the `doctor` subcommand runs connectivity checks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ContentBuddy - Telegram content assistant for nonprofits
#[derive(Parser, Debug)]
#[command(name = "contentbuddy")]
#[command(version)]
#[command(about = "Telegram content assistant for nonprofit organizations", long_about = None)]
pub struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for per-user JSON records
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Welcome image sent on /start
    #[arg(long)]
    pub welcome_image: Option<PathBuf>,

    /// Verbosity level: default (info), -v (debug), -vv (trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run connectivity and configuration checks
    Doctor,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> Args {
        Args {
            config: None,
            data_dir: None,
            welcome_image: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_verbosity_quiet_wins() {
        assert_eq!(args_with(2, true).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(args_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(args_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(args_with(2, false).verbosity(), Verbosity::VeryVerbose);
        assert_eq!(args_with(5, false).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_no_arguments_parse() {
        // The container runs the bot with no arguments at all
        let args = Args::try_parse_from(["contentbuddy"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_doctor_subcommand() {
        let args = Args::try_parse_from(["contentbuddy", "doctor"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Doctor)));
    }
}
