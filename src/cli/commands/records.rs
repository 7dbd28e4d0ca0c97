use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::backend;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::console::registry::type_names;
use crate::console::{Console, Form, RecordsView, SubmitOutcome, ViewState, RECORD_TYPES};

#[derive(Subcommand)]
pub enum RecordsCommands {
    #[command(about = "List the record types the console administers")]
    Types,

    #[command(about = "Show a record type's table and its add/edit form")]
    Show {
        #[arg(help = "Record type (e.g. Patients, Bills)")]
        record_type: String,
    },

    #[command(about = "Show the add/edit form for a record type")]
    Form {
        #[arg(help = "Record type")]
        record_type: String,
    },

    #[command(about = "Create or update a record, then show the refreshed table")]
    Submit {
        #[arg(help = "Record type")]
        record_type: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", help = "Field value; repeat for each field (unset fields are sent empty)")]
        values: Vec<String>,
    },
}

pub async fn handle(cmd: RecordsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut view = ViewState::new();
    let mut surface = TerminalSurface::new(output_format.clone());

    match cmd {
        RecordsCommands::Types => {
            match output_format {
                OutputFormat::Text => {
                    println!("{:<16} {:<20} {}", "TYPE", "ENDPOINT", "FIELDS");
                    println!("{}", "-".repeat(60));
                    for config in RECORD_TYPES {
                        let fields: Vec<&str> = config.fields.iter().map(|f| f.key).collect();
                        println!("{:<16} {:<20} {}", config.type_name, config.collection_path(), fields.join(", "));
                    }
                }
                _ => output_structured(&output_format, &json!({ "record_types": RECORD_TYPES }))?,
            }
            Ok(())
        }
        RecordsCommands::Show { record_type } => {
            let transport = backend()?;
            let console = Console::new(&transport);
            let shown = console.display_records(&mut view, &record_type, &mut surface).await;

            match output_format {
                OutputFormat::Text => print_view(&shown),
                _ => output_structured(&output_format, &json!({ "view": shown, "events": surface.events() }))?,
            }
            Ok(())
        }
        RecordsCommands::Form { record_type } => {
            let transport = backend()?;
            let console = Console::new(&transport);
            let form = console.render_form(&mut view, &record_type);

            match output_format {
                OutputFormat::Text => print_form(&form),
                _ => output_structured(&output_format, &json!({ "form": form }))?,
            }
            Ok(())
        }
        RecordsCommands::Submit { record_type, values } => {
            let transport = backend()?;
            let console = Console::new(&transport);
            let mut form = console.render_form(&mut view, &record_type);

            if view.selected().is_none() {
                let known: Vec<&str> = type_names().collect();
                return Err(anyhow::anyhow!(
                    "Unknown record type '{}' (expected one of: {})",
                    record_type,
                    known.join(", ")
                ));
            }
            for raw in &values {
                let (name, value) = parse_assignment(raw)?;
                if !form.set(&name, value) {
                    return Err(anyhow::anyhow!("{} has no field '{}'", record_type, name));
                }
            }

            let result = console
                .submit_record(&mut view, &form, &mut surface)
                .await
                .ok_or_else(|| anyhow::anyhow!("No record type selected"))?;

            match output_format {
                OutputFormat::Text => {
                    match &result.outcome {
                        SubmitOutcome::Created { id } => output_success(
                            &output_format,
                            &format!("{} record created (id {})", record_type, id.as_deref().unwrap_or("?")),
                            None,
                        )?,
                        SubmitOutcome::Updated { id } => output_success(
                            &output_format,
                            &format!("{} record updated (id {})", record_type, id.as_deref().unwrap_or("?")),
                            None,
                        )?,
                        SubmitOutcome::Rejected { .. } | SubmitOutcome::Failed { .. } => {}
                    }
                    if let Some(refreshed) = &result.refreshed {
                        print_view(refreshed);
                    }
                }
                _ => output_structured(&output_format, &json!({ "result": result, "events": surface.events() }))?,
            }

            if result.outcome.is_success() {
                Ok(())
            } else {
                Err(anyhow::anyhow!("{} record was not saved", record_type))
            }
        }
    }
}

fn print_view(view: &RecordsView) {
    match &view.table {
        Some(table) if table.is_empty() => {
            print!("{}", table.render_text());
            println!("(no {} records)", view.type_name);
        }
        Some(table) => print!("{}", table.render_text()),
        None => {}
    }
    println!();
    print_form(&view.form);
}

fn print_form(form: &Form) {
    println!("{}", form.title);
    for input in &form.inputs {
        println!("  {:<16} {:<8} {}", input.name, format!("{:?}", input.kind).to_lowercase(), input.label);
    }
}
