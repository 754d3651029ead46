//! actreport: fill in and submit SDG activity reports from the command line.
//!
//! Backends and folders come from the environment (see `.env`). With no
//! configuration, files go to `./data/uploads` and records to
//! `./data/records.jsonl`.

use std::sync::Arc;

use actreport_cli::{build_controller, fill_form, init_tracing, offline_controller, ReportArgs};
use actreport_core::models::Coordinator;
use actreport_core::{Config, TracingNotifier};
use actreport_form::format_submission;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "actreport", about = "SDG activity report form")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the faculty coordinators that can be selected
    Coordinators,
    /// Check a report without uploading or recording anything
    Validate {
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Upload attachments and record the report
    Submit {
        #[command(flatten)]
        report: ReportArgs,
        /// Print the stored record as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize record")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Coordinators => {
            for (position, coordinator) in Coordinator::ALL.iter().enumerate() {
                println!("{:>2}. {}", position + 1, coordinator);
            }
        }
        Commands::Validate { report } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let variant = report.variant.unwrap_or(config.form_variant);
            let form = offline_controller(&config, variant, Arc::new(TracingNotifier));

            fill_form(&form, &report).await?;
            form.validate()?;
            println!("Report is complete and ready to submit.");
        }
        Commands::Submit { report, json } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let variant = report.variant.unwrap_or(config.form_variant);
            let form = build_controller(&config, variant, Arc::new(TracingNotifier)).await?;

            fill_form(&form, &report).await?;
            let record = form.submit().await?;

            if json {
                print_json(&record)?;
            } else {
                print!("{}", format_submission(&record));
            }
        }
    }

    Ok(())
}
