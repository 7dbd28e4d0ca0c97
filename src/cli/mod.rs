pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital CLI - dashboards, record console and scheduling for the hospital backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Output in YAML format")]
    pub yaml: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, signup and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Open a role dashboard (checks the stored session first)")]
    Dashboard {
        #[arg(help = "Role whose dashboard to open (patient, doctor, administrator)")]
        role: String,
    },

    #[command(about = "Administer records: list, show forms, submit")]
    Records {
        #[command(subcommand)]
        cmd: commands::records::RecordsCommands,
    },

    #[command(about = "Filter a list of items with the search-box rules")]
    Search {
        #[arg(help = "Search query")]
        query: String,
        #[arg(help = "Items to filter (reads lines from stdin when omitted)")]
        items: Vec<String>,
    },

    #[command(about = "Appointment scheduling")]
    Appointment {
        #[command(subcommand)]
        cmd: commands::appointment::AppointmentCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else if cli.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Dashboard { role } => commands::dashboard::handle(role, output_format).await,
        Commands::Records { cmd } => commands::records::handle(cmd, output_format).await,
        Commands::Search { query, items } => commands::search::handle(query, items, output_format).await,
        Commands::Appointment { cmd } => commands::appointment::handle(cmd, output_format).await,
    }
}
