// src/main.rs
//! alpaca-util - Sexagesimal conversions and Alpaca response records

use alpaca_standard::{
    config::UtilConfig,
    responses::{ErrorCode, ServerTransactionIds, TransactionResponse},
    utilities::{self, Culture},
};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "alpaca-util", version, about = "Sexagesimal conversions and Alpaca response records")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Client transaction ID echoed in error responses
    #[arg(long, global = true, default_value_t = 0)]
    client_id: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert D:M:S text to decimal degrees
    Dms {
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Culture of the text, e.g. de-DE (defaults to the configured culture)
        #[arg(short, long)]
        culture: Option<String>,
    },
    /// Convert H:M:S text to decimal hours
    Hms {
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[arg(short, long)]
        culture: Option<String>,
        /// Print degrees instead of hours
        #[arg(long)]
        degrees: bool,
    },
    /// Format decimal degrees as D:M:S
    ToDms {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        #[arg(short, long)]
        culture: Option<String>,
        /// Fractional digits on the seconds field
        #[arg(short, long)]
        places: Option<u8>,
    },
    /// Format decimal hours as H:M:S
    ToHms {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        #[arg(short, long)]
        culture: Option<String>,
        #[arg(short, long)]
        places: Option<u8>,
        /// Treat the value as degrees of right ascension
        #[arg(long)]
        from_degrees: bool,
    },
    /// Print a validated Alpaca response record as JSON
    Response {
        #[arg(long, default_value_t = 1)]
        server_id: u32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        error_number: i32,
        #[arg(long, default_value = "")]
        error_message: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = UtilConfig::load().unwrap_or_else(|e| {
        warn!("{}, using default configuration", e);
        UtilConfig::default()
    });

    match run(&cli, &config) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            let ids = ServerTransactionIds::new();
            let response = ids.failure(cli.client_id, &e);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Err(anyhow::Error::new(e).context("Command failed"))
        }
    }
}

fn run(cli: &Cli, config: &UtilConfig) -> alpaca_standard::Result<String> {
    let places = |requested: &Option<u8>| requested.unwrap_or(config.places);

    match &cli.command {
        Command::Dms { text, culture } => {
            let culture = resolve_culture(culture, config)?;
            Ok(utilities::dms_to_degrees_in(text, &culture)?.to_string())
        }
        Command::Hms { text, culture, degrees } => {
            let culture = resolve_culture(culture, config)?;
            let value = if *degrees {
                utilities::hms_to_degrees(text, &culture)?
            } else {
                utilities::hms_to_hours(text, &culture)?
            };
            Ok(value.to_string())
        }
        Command::ToDms { value, culture, places: requested } => {
            let culture = resolve_culture(culture, config)?;
            utilities::degrees_to_dms(*value, &culture, places(requested))
        }
        Command::ToHms { value, culture, places: requested, from_degrees } => {
            let culture = resolve_culture(culture, config)?;
            if *from_degrees {
                utilities::degrees_to_hms(*value, &culture, places(requested))
            } else {
                utilities::hours_to_hms(*value, &culture, places(requested))
            }
        }
        Command::Response { server_id, error_number, error_message } => {
            let response = TransactionResponse {
                client_transaction_id: cli.client_id,
                server_transaction_id: *server_id,
                error_number: ErrorCode(*error_number),
                error_message: error_message.clone(),
            };
            response.validate()?;
            Ok(serde_json::to_string_pretty(&response)?)
        }
    }
}

/// Command-line culture wins over the configured one
fn resolve_culture(requested: &Option<String>, config: &UtilConfig) -> alpaca_standard::Result<Culture> {
    match requested {
        Some(name) => Culture::from_name(name),
        None => config.culture(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
