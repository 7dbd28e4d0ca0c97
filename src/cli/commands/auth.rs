use clap::Subcommand;
use serde_json::json;

use crate::auth::{AuthFlow, Credentials, LoginOutcome, SignupForm, SignupOutcome};
use crate::cli::commands::backend;
use crate::cli::config::FileSessionStore;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::SessionStore;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the backend")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Create a patient account")]
    Signup {
        #[arg(long, help = "First name")]
        first_name: String,
        #[arg(long, help = "Last name")]
        last_name: String,
        #[arg(long, default_value = "", help = "Postal address")]
        address: String,
        #[arg(long, default_value = "", help = "Phone number")]
        phone: String,
        #[arg(long, help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget the stored session")]
    Logout,

    #[command(about = "Show the stored session")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = crate::config::config();
    let mut store = FileSessionStore::open_default()?;
    let mut surface = TerminalSurface::new(output_format.clone());

    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt("Password")?,
            };
            let transport = backend()?;
            let auth = AuthFlow::new(&transport, &config.pages);

            let outcome = auth
                .login(&mut store, &Credentials { email, password }, &mut surface)
                .await?;

            match (&outcome, &output_format) {
                (LoginOutcome::Dashboard { role, .. }, OutputFormat::Text) => {
                    output_success(&output_format, &format!("Logged in as {}", role), None)?;
                }
                (LoginOutcome::UnknownRole { user_type }, OutputFormat::Text) => {
                    output_error(
                        &output_format,
                        &format!("Logged in, but account type '{}' has no dashboard", user_type),
                        None,
                    )?;
                }
                (_, OutputFormat::Text) => {}
                _ => output_structured(&output_format, &json!({ "login": outcome, "events": surface.events() }))?,
            }

            match outcome {
                LoginOutcome::Dashboard { .. } | LoginOutcome::UnknownRole { .. } => Ok(()),
                LoginOutcome::WrongCredentials => Err(anyhow::anyhow!("Login failed")),
                LoginOutcome::Unreachable => Err(anyhow::anyhow!("Backend unreachable")),
            }
        }
        AuthCommands::Signup { first_name, last_name, address, phone, email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt("Password")?,
            };
            let form = SignupForm { first_name, last_name, address, phone, email, password };
            let transport = backend()?;
            let auth = AuthFlow::new(&transport, &config.pages);

            let outcome = auth.signup(&form, &mut surface).await;

            if !matches!(output_format, OutputFormat::Text) {
                output_structured(&output_format, &json!({ "signup": outcome, "events": surface.events() }))?;
            }

            match outcome {
                SignupOutcome::Created => Ok(()),
                SignupOutcome::Refused { message } => Err(anyhow::anyhow!("Signup refused: {}", message)),
                SignupOutcome::Unreachable => Err(anyhow::anyhow!("Backend unreachable")),
            }
        }
        AuthCommands::Logout => {
            let transport = backend()?;
            let auth = AuthFlow::new(&transport, &config.pages);
            auth.logout(&mut store, &mut surface).await?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = store.load()?;

            match output_format {
                OutputFormat::Text => {
                    if !session.has_token() && session.user_name.is_none() {
                        println!("Not logged in");
                    } else {
                        println!("User: {}", session.user_name.as_deref().unwrap_or("-"));
                        println!("Role: {}", session.role().map(|r| r.to_string()).unwrap_or_else(|| "-".into()));
                        println!("User ID: {}", session.user_id.as_deref().unwrap_or("-"));
                        println!("Token: {}", if session.has_token() { "present" } else { "absent" });
                        if let Some(at) = session.logged_in_at {
                            println!("Logged in: {}", at.format("%Y-%m-%d %H:%M"));
                        }
                    }
                }
                _ => output_structured(
                    &output_format,
                    &json!({
                        "user_name": session.user_name,
                        "role": session.role(),
                        "user_id": session.user_id,
                        "has_token": session.has_token(),
                        "logged_in_at": session.logged_in_at,
                    }),
                )?,
            }

            Ok(())
        }
    }
}
