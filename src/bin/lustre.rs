//! lustre: lustred CLI client
//!
//! Query a running lustred, or list the accepted category labels offline.

use clap::{Parser, Subcommand};
use lustre::client::ServiceClient;
use lustre::{CategoryField, PredictionForm};

/// Lustre CLI client
#[derive(Parser)]
#[command(name = "lustre")]
#[command(version = lustre::PKG_VERSION)]
#[command(about = "Lustre diamond price prediction client")]
struct Args {
    /// Server address
    #[arg(
        short,
        long,
        env = "LUSTRED_ADDRESS",
        default_value = "http://127.0.0.1:5000"
    )]
    address: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check service health
    Health,

    /// Request a price prediction
    Predict {
        /// Weight in carats
        #[arg(long)]
        carat: String,
        /// Cut quality (see `lustre labels`)
        #[arg(long)]
        cut: String,
        /// Color grade
        #[arg(long)]
        color: String,
        /// Clarity grade
        #[arg(long)]
        clarity: String,
        /// Total depth percentage
        #[arg(long)]
        depth: String,
        /// Table width percentage
        #[arg(long)]
        table: String,
        /// Length in mm
        #[arg(short)]
        x: String,
        /// Width in mm
        #[arg(short)]
        y: String,
        /// Depth in mm
        #[arg(short)]
        z: String,
    },

    /// List accepted category labels and their codes
    Labels,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Health => {
            let client = ServiceClient::new(&args.address)?;
            let health = client.health().await?;
            println!("status:  {}", health.status);
            println!("version: {}", health.version);
            println!("scaler:  {}", health.scaler);
            println!("model:   {}", health.model);
        }
        Command::Predict {
            carat,
            cut,
            color,
            clarity,
            depth,
            table,
            x,
            y,
            z,
        } => {
            let client = ServiceClient::new(&args.address)?;
            // Values are sent verbatim; the server does all parsing
            let form = PredictionForm {
                carat,
                cut,
                color,
                clarity,
                depth,
                table,
                x,
                y,
                z,
            };
            println!("{}", client.predict(&form).await?);
        }
        Command::Labels => {
            for field in CategoryField::ALL {
                println!("{field}:");
                for (label, code) in field.mapping().entries() {
                    println!("  {code}  {label}");
                }
            }
        }
    }

    Ok(())
}
