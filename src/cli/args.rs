//! CLI argument definitions
//!
//! All Clap derive structs for `roulette-bot` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::Overrides;
use crate::engine::DayBoundary;
use crate::observability::LogFormat;
use crate::render::ResponseFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Russian roulette game service for chat bots.
#[derive(Parser, Debug)]
#[command(name = "roulette-bot", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "ROULETTE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(
        long,
        default_value = "human",
        global = true,
        env = "ROULETTE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Path to YAML settings file.
    #[arg(short, long, global = true, env = "ROULETTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON game documents.
    #[arg(long, global = true, env = "ROULETTE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Timezone used to decide when a new day starts.
    #[arg(long, global = true, env = "ROULETTE_DAY_BOUNDARY")]
    pub day_boundary: Option<DayBoundary>,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service.
    Serve(ServeArgs),

    /// Print the record of a channel.
    Record(ChannelArgs),

    /// Print everything stored for a channel.
    Status(ChannelArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `serve`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Listen on `[host:]port`.
    #[arg(long, env = "ROULETTE_BIND")]
    pub bind: Option<String>,

    /// Listen port on all interfaces; ignored when `--bind` is given.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Start a Prometheus endpoint on `127.0.0.1:<port>`.
    #[arg(long, env = "ROULETTE_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for the read-only channel queries.
#[derive(Args, Debug)]
pub struct ChannelArgs {
    /// Channel name.
    pub channel: String,

    /// Output format.
    #[arg(short, long, default_value = "text")]
    pub format: ResponseFormat,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "text")]
    pub format: ResponseFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

impl Cli {
    /// Collects the settings overrides given on the command line.
    ///
    /// `serve` contributes its listener flags; other commands only the
    /// global ones.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            data_dir: self.data_dir.clone(),
            day_boundary: self.day_boundary,
            ..Overrides::default()
        };
        if let Commands::Serve(args) = &self.command {
            overrides.bind.clone_from(&args.bind);
            overrides.port = args.port;
            overrides.metrics_port = args.metrics_port;
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_with_bind() {
        let cli = Cli::try_parse_from(["roulette-bot", "serve", "--bind", ":8080"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.bind.as_deref(), Some(":8080"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "roulette-bot",
            "record",
            "chan",
            "--data-dir",
            "/tmp/x",
            "--day-boundary",
            "utc",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let overrides = cli.overrides();
        assert_eq!(overrides.data_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(overrides.day_boundary, Some(DayBoundary::Utc));
        assert!(overrides.bind.is_none());
    }

    #[test]
    fn status_json_format() {
        let cli = Cli::try_parse_from(["roulette-bot", "status", "c", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Status(args) => {
                assert_eq!(args.channel, "c");
                assert_eq!(args.format, ResponseFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn record_requires_channel() {
        assert!(Cli::try_parse_from(["roulette-bot", "record"]).is_err());
    }

    #[test]
    fn help_output() {
        let err = Cli::try_parse_from(["roulette-bot", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn version_output() {
        let err = Cli::try_parse_from(["roulette-bot", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
