use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use durconv::calendar::{to_hh_mm, to_interval, to_seconds};
use durconv::config::AppConfig;
use durconv::format::{parse_unit_selection, Style};
use durconv::models::CalendarInterval;
use durconv::parse::ParseOptions;

#[derive(Parser)]
#[command(name = "durconv")]
#[command(about = "Convert between human-readable durations and seconds")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./durconv.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a duration string into seconds
    Parse {
        /// Input such as "02:30:45", "150" or "2h 30m"
        input: String,

        /// Reject unknown units and unrecognized input
        #[arg(long)]
        strict: bool,
    },

    /// Format seconds as a duration string
    Format {
        seconds: u64,

        /// Use full unit names ("2 hours 30 minutes")
        #[arg(long)]
        long: bool,

        /// Units to use, comma-separated (e.g. "hour,minute")
        #[arg(long)]
        units: Option<String>,
    },

    /// Format seconds as HH:MM
    Hhmm { seconds: u64 },

    /// Break seconds into a calendar interval (JSON)
    Interval { seconds: u64 },

    /// Convert a calendar interval (JSON) back into seconds
    Seconds {
        /// e.g. '{"days": 1, "hours": 2}'
        interval: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let json_layer = cli.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!cli.json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::debug!("Starting durconv v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Parse { input, strict } => {
            let mut parser = config.parser();
            if strict {
                parser = parser.with_options(ParseOptions::strict());
            }
            let seconds = parser
                .parse(&input)
                .with_context(|| format!("Failed to parse '{input}'"))?;
            println!("{seconds}");
        }

        Commands::Format {
            seconds,
            long,
            units,
        } => {
            let mut formatter = config.formatter()?;
            if long {
                formatter = formatter.style(Style::Long);
            }
            if let Some(list) = units {
                formatter = formatter.units(&parse_unit_selection(&list)?);
            }
            println!("{}", formatter.format(Some(seconds)));
        }

        Commands::Hhmm { seconds } => {
            println!("{}", to_hh_mm(seconds));
        }

        Commands::Interval { seconds } => {
            let interval = to_interval(seconds)?;
            println!("{}", serde_json::to_string_pretty(&interval)?);
        }

        Commands::Seconds { interval } => {
            let interval: CalendarInterval =
                serde_json::from_str(&interval).context("Invalid interval JSON")?;
            println!("{}", to_seconds(&interval)?);
        }
    }

    Ok(())
}
