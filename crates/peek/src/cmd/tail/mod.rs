//! Tail command - live streaming CLI for Peek
//!
//! Connect to a running relay and print formatted events as they arrive.

mod client;
mod filter;
mod output;

use anyhow::{Context, Result};
use clap::Args;
use tracing_subscriber::EnvFilter;

use peek_config::DEFAULT_PORT;
use peek_format::FormatFamily;

use filter::KindFilter;

/// Tail command arguments
#[derive(Args, Debug)]
pub struct TailArgs {
    /// Event kinds to show: error, trace, log, or all
    #[arg(value_name = "KIND")]
    pub kinds: Vec<String>,

    /// Session to stream from
    #[arg(short, long, value_name = "ID")]
    pub session: String,

    /// Relay host to connect to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Relay port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Output format: human, logfmt, json, markdown
    #[arg(short = 'o', long = "format", default_value = "human")]
    pub format: String,

    /// Print the last N buffered containers before streaming
    #[arg(short = 'n', long = "history", value_name = "N", default_value = "0")]
    pub history: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output (show debug info)
    #[arg(short, long)]
    pub verbose: bool,

    /// Force debug logging (same as --verbose)
    #[arg(long)]
    pub debug: bool,

    /// Quiet mode (suppress connection messages)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the tail command
pub async fn run(args: TailArgs) -> Result<()> {
    // Set up logging for tail command
    let log_filter = if args.verbose || args.debug {
        EnvFilter::new("debug")
    } else if args.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();

    let family: FormatFamily = args
        .format
        .parse()
        .context("invalid --format")?;

    let kind_filter = KindFilter::parse(&args.kinds);

    // Enable color only if: stdout is TTY AND --no-color not set
    let use_color = atty::is(atty::Stream::Stdout) && !args.no_color;
    let printer = output::Printer::new(use_color);

    let url = format!("http://{}:{}/api/stream", args.host, args.port);

    if !args.quiet {
        tracing::info!(url = %url, session = %args.session, "connecting to relay");
    }

    let mut client =
        client::SseClient::connect(&url, &args.session, family.as_str(), args.history).await?;

    if !args.quiet {
        tracing::info!("streaming events (Ctrl+C to stop)");
    }

    // Main loop with signal handling
    loop {
        tokio::select! {
            result = client.recv() => {
                match result {
                    Ok(Some(event)) => {
                        if !kind_filter.matches(&event.event) {
                            continue;
                        }
                        printer.print(&event.event, &event.data);
                    }
                    Ok(None) => {
                        if !args.quiet {
                            tracing::info!("stream closed by relay");
                        }
                        break;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "receive error");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if !args.quiet {
                    tracing::info!("interrupted, shutting down");
                }
                break;
            }
        }
    }

    Ok(())
}
