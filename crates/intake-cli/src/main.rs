//! Intake CLI: fill in and submit an intake form from the command line.
//!
//! Set INTAKE_API_URL (or API_URL). Prints the outcome as JSON and exits 1 on failure.

use anyhow::Context;
use clap::{Parser, Subcommand};
use intake_cli::{init_tracing, ConsoleNotifier};
use intake_client::{IntakeClient, IntakeFormHandler};
use intake_core::models::{CaseType, IntakeForm, Urgency};

#[derive(Parser)]
#[command(name = "intake", about = "Legal intake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an intake form
    Submit(SubmitArgs),
}

#[derive(clap::Args)]
struct SubmitArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// personal_injury, consumer_protection or other
    #[arg(long)]
    case_type: CaseType,
    /// What happened (at least 10 characters)
    #[arg(long)]
    description: String,
    /// Free-form, e.g. "2025-01-03" or "last spring"
    #[arg(long)]
    incident_date: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// low, medium or high
    #[arg(long)]
    urgency: Urgency,
}

impl From<SubmitArgs> for IntakeForm {
    fn from(args: SubmitArgs) -> Self {
        IntakeForm {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            case_type: args.case_type,
            case_description: args.description,
            incident_date: args.incident_date,
            location: args.location,
            urgency: args.urgency,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = IntakeClient::from_env()
        .context("Failed to create API client. Check INTAKE_API_URL (or API_URL)")?;
    let handler = IntakeFormHandler::new(client, ConsoleNotifier);

    match cli.command {
        Commands::Submit(args) => {
            let outcome = handler.submit(&IntakeForm::from(args)).await;
            let out =
                serde_json::to_string_pretty(&outcome.to_json()).context("Serialize outcome")?;
            println!("{}", out);
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
