pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::rate::RateService;

#[derive(Debug, Parser)]
#[command(
    name = "freightdesk",
    about = "FreightDesk broker CLI",
    long_about = "Generate freight quotes, run the quote acceptance workflow, and inspect contract progress.",
    after_help = "Examples:\n  freightdesk rate ltl --weight 1000 --freight-class 150 --liftgate --origin \"Atlanta, GA\" --destination \"Dallas, TX\"\n  freightdesk accept --automated\n  freightdesk contract-status --sample"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Price a shipment against the rate cards and print the quote")]
    Rate {
        #[command(subcommand)]
        service: RateService,
    },
    #[command(about = "Run the quote acceptance workflow end to end and print the step transcript")]
    Accept {
        #[arg(long, help = "Include the shipper information-collection and verification steps")]
        automated: bool,
    },
    #[command(about = "Derive the 6-milestone progress view for a contract")]
    ContractStatus {
        #[arg(long, help = "Path to a contract JSON file", conflicts_with = "sample")]
        file: Option<PathBuf>,
        #[arg(long, help = "Use a built-in sample contract")]
        sample: bool,
    },
    #[command(about = "Inspect effective configuration values")]
    Config,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).compact().try_init();
}

pub fn run() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Rate { service } => commands::rate::run(&service),
        Command::Accept { automated } => commands::accept::run(automated),
        Command::ContractStatus { file, sample } => {
            commands::contract_status::run(file.as_deref(), sample)
        }
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
