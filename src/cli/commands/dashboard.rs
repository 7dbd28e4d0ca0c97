use serde_json::json;

use crate::cli::commands::backend;
use crate::cli::config::FileSessionStore;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::{GuardOutcome, SessionGuard};
use crate::types::Role;

pub async fn handle(role: String, output_format: OutputFormat) -> anyhow::Result<()> {
    let role: Role = role.parse()?;
    let config = crate::config::config();
    let store = FileSessionStore::open_default()?;
    let transport = backend()?;
    let mut surface = TerminalSurface::new(output_format.clone());

    let guard = SessionGuard::new(&transport, &config.pages);
    let outcome = guard.guard_page(&store, role, &mut surface).await;

    if !matches!(output_format, OutputFormat::Text) {
        let status = match &outcome {
            GuardOutcome::Redirected { .. } => "redirected",
            GuardOutcome::Welcomed { .. } => "welcomed",
            GuardOutcome::Degraded => "degraded",
        };
        output_structured(
            &output_format,
            &json!({ "role": role, "status": status, "events": surface.events() }),
        )?;
    }

    match outcome {
        GuardOutcome::Redirected { .. } => Err(anyhow::anyhow!("Not authorized for the {} dashboard", role)),
        GuardOutcome::Welcomed { .. } | GuardOutcome::Degraded => Ok(()),
    }
}
