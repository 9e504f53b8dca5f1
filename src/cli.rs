//! Shared command-line plumbing for the bundled tools.

use clap::{Args, ValueEnum};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging flags every tool accepts.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

/// Install the global tracing subscriber. `RUST_LOG` overrides `-v`.
pub fn init_tracing(args: &LogArgs) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match args.verbose {
        0 => "storymode=warn",
        1 => "storymode=debug",
        _ => "storymode=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match args.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
