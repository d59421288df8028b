//! Peek - local telemetry relay for development
//!
//! # Usage
//!
//! ```bash
//! # Run the relay (default)
//! peek
//! peek --config peek.toml
//!
//! # Stream formatted events from a running relay
//! peek tail --session 01J8ZK3V4N
//! peek tail --session 01J8ZK3V4N error trace
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use peek_config::{Config, LogFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Peek - local telemetry relay for development
#[derive(Parser, Debug)]
#[command(name = "peek")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Global args that apply to serve when no subcommand given
    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the relay server
    Serve(cmd::serve::ServeArgs),

    /// Stream formatted events from a running relay
    Tail(cmd::tail::TailArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(mut args)) => {
            // CLI global --config overrides subcommand config if both specified
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            let (log_level, log_format) =
                resolve_log_settings(cli.log_level.as_deref(), args.config.as_deref());
            let log_level = if args.debug {
                "debug".to_string()
            } else {
                log_level
            };
            init_logging(&log_level, log_format)?;
            cmd::serve::run(args).await
        }
        Some(Command::Tail(args)) => {
            // Tail initializes its own logging
            cmd::tail::run(args).await
        }
        // No subcommand = run the relay (default behavior)
        None => {
            let (log_level, log_format) =
                resolve_log_settings(cli.log_level.as_deref(), cli.config.as_deref());
            init_logging(&log_level, log_format)?;
            let args = cmd::serve::ServeArgs {
                config: cli.config,
                port: None,
                debug: false,
            };
            cmd::serve::run(args).await
        }
    }
}

/// Resolve log level and output format
///
/// Level: CLI flag > config file > default "info". Format always comes from
/// the config file (console when absent).
fn resolve_log_settings(
    cli_level: Option<&str>,
    config_path: Option<&std::path::Path>,
) -> (String, LogFormat) {
    let mut level = cli_level.map(str::to_string);
    let mut format = LogFormat::Console;

    if let Some(path) = config_path {
        if path.exists() {
            if let Ok(config) = Config::from_file(path) {
                if level.is_none() {
                    level = Some(config.log.level.as_str().to_string());
                }
                format = config.log.format;
            }
        }
    }

    (level.unwrap_or_else(|| "info".to_string()), format)
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    // ========================================================================
    // CLI parsing
    // ========================================================================

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["peek"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["peek", "--config", "custom.toml"]).unwrap();
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("custom.toml"))
        );
    }

    #[test]
    fn test_serve_with_port_override() {
        let cli = Cli::try_parse_from(["peek", "serve", "--port", "9000", "--debug"]).unwrap();
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.debug);
            }
            other => panic!("expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_tail_with_kinds_and_format() {
        let cli = Cli::try_parse_from([
            "peek", "tail", "--session", "s1", "--format", "logfmt", "error", "trace",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Tail(args)) => {
                assert_eq!(args.session, "s1");
                assert_eq!(args.format, "logfmt");
                assert_eq!(args.kinds, vec!["error", "trace"]);
            }
            other => panic!("expected tail command, got {:?}", other),
        }
    }

    #[test]
    fn test_tail_debug_flag() {
        let cli = Cli::try_parse_from(["peek", "tail", "--session", "s1", "--debug"]).unwrap();
        match cli.command {
            Some(Command::Tail(args)) => assert!(args.debug),
            other => panic!("expected tail command, got {:?}", other),
        }
    }

    #[test]
    fn test_help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["peek", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        // DisplayHelp exits with status 0
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["peek", "--bogus"]).is_err());
    }

    // ========================================================================
    // Log settings resolution
    // ========================================================================

    #[test]
    fn test_cli_flag_wins() {
        let (level, _) = resolve_log_settings(Some("trace"), None);
        assert_eq!(level, "trace");
    }

    #[test]
    fn test_default_is_info_console() {
        let (level, format) = resolve_log_settings(None, None);
        assert_eq!(level, "info");
        assert_eq!(format, LogFormat::Console);
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let path = std::path::Path::new("/definitely/not/here.toml");
        let (level, format) = resolve_log_settings(None, Some(path));
        assert_eq!(level, "info");
        assert_eq!(format, LogFormat::Console);
    }

    #[test]
    fn test_config_file_sets_level_and_format() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[log]\nlevel = \"debug\"\nformat = \"json\"").unwrap();

        let (level, format) = resolve_log_settings(None, Some(file.path()));
        assert_eq!(level, "debug");
        assert_eq!(format, LogFormat::Json);

        // CLI level still wins, format stays from the file
        let (level, format) = resolve_log_settings(Some("warn"), Some(file.path()));
        assert_eq!(level, "warn");
        assert_eq!(format, LogFormat::Json);
    }
}
