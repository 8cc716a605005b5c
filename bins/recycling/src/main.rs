//! recycling - find nearby collection points and track discards
//!
//! Ranks collection points by distance from the user's location, links out
//! to map directions, and talks to the tracker backend for users, discards
//! and community statistics.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use recycling_core::config::Config;
use recycling_core::error::exit_codes;
use std::process::ExitCode;

mod commands;
mod context;

use commands::{discard, link, materials, nearby, stats, user};
use context::Context;

/// Find recycling collection points near you
#[derive(Parser)]
#[command(name = "recycling")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file (default: .recycling.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, colored
    Text,
    /// One JSON document on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List collection points, nearest first when a location is known
    Nearby(nearby::NearbyArgs),

    /// Map and directions links for a collection point
    Link(link::LinkArgs),

    /// List material types
    Materials,

    /// Register or look up users
    User {
        #[command(subcommand)]
        action: user::UserAction,
    },

    /// Log or list discards
    Discard {
        #[command(subcommand)]
        action: discard::DiscardAction,
    },

    /// Community (or per-user) recycling statistics
    Stats(stats::StatsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&anyhow::Error::new(e), cli.format),
    };

    let level = if cli.verbose {
        "recycling=debug,recycling_geo=debug,recycling_api_client=debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    let telemetry = recycling_telemetry::TelemetryConfig::with_level(level)
        .json(config.schema.logging.json);
    if let Err(e) = recycling_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    let ctx = Context::new(config, cli.format);

    let result = match cli.command {
        Commands::Nearby(args) => nearby::run(&ctx, args).await,
        Commands::Link(args) => link::run(&ctx, args).await,
        Commands::Materials => materials::run(&ctx),
        Commands::User { action } => user::run(&ctx, action).await,
        Commands::Discard { action } => discard::run(&ctx, action).await,
        Commands::Stats(args) => stats::run(&ctx, args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, ctx.format),
    }
}

/// Print an error and pick the exit code for its category
///
/// With `--format json` the error goes to stdout as `{"error": ...}` so
/// scripts read one document either way.
fn report(error: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let core = error.downcast_ref::<recycling_core::Error>();

    if format == OutputFormat::Json {
        let body = match core {
            Some(e) => serde_json::json!({ "error": e.to_report() }),
            None => serde_json::json!({ "error": { "message": error.to_string() } }),
        };
        match serde_json::to_string_pretty(&body) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("{} {}", "Error:".red().bold(), error),
        }
    } else {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    let code = core.map_or(exit_codes::FAILURE, recycling_core::Error::exit_code);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nearby() {
        let cli = Cli::try_parse_from([
            "recycling", "nearby", "--lat", "-23.55", "--lng", "-46.63", "--limit", "2",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Nearby(_)));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_lat_requires_lng() {
        assert!(Cli::try_parse_from(["recycling", "nearby", "--lat", "-23.55"]).is_err());
    }

    #[test]
    fn test_global_format() {
        let cli = Cli::try_parse_from(["recycling", "materials", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_exit_code_from_core_error() {
        let err = anyhow::Error::new(recycling_core::Error::location_denied("no"));
        assert_eq!(report(&err, OutputFormat::Text), ExitCode::from(4));
        assert_eq!(report(&err, OutputFormat::Json), ExitCode::from(4));
        assert_eq!(report(&anyhow::anyhow!("plain"), OutputFormat::Json), ExitCode::from(1));
    }
}
