use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::backend;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::services::{schedule_auto_appointment, ScheduleOutcome};

#[derive(Subcommand)]
pub enum AppointmentCommands {
    #[command(about = "Book the next free slot with the least busy doctor")]
    Auto,
}

pub async fn handle(cmd: AppointmentCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AppointmentCommands::Auto => {
            let transport = backend()?;
            let mut surface = TerminalSurface::new(output_format.clone());

            let outcome = schedule_auto_appointment(&transport, &mut surface).await;

            if !matches!(output_format, OutputFormat::Text) {
                output_structured(&output_format, &json!({ "appointment": outcome }))?;
            }

            match outcome {
                ScheduleOutcome::Scheduled { .. } => Ok(()),
                other => Err(anyhow::anyhow!(other.message())),
            }
        }
    }
}
