use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings_from, Settings, DEFAULT_SETTINGS_FILE},
    gateway_from_settings, RosterSession, RosterState,
};
use shared::domain::{DraftField, Student, StudentId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Manage student records on a GraphQL roster service")]
struct Cli {
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Overrides the configured GraphQL endpoint.
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mark1: String,
        #[arg(long)]
        mark2: String,
    },
    /// Edits a listed record; omitted fields keep their current value.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        mark1: Option<String>,
        #[arg(long)]
        mark2: Option<String>,
    },
    Delete {
        id: String,
    },
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = load_settings_from(&cli.config)?;
    if let Some(endpoint) = &cli.endpoint {
        settings.graphql_endpoint = endpoint.clone();
    }
    if let Some(api_key) = &cli.api_key {
        settings.api_key = Some(api_key.clone());
    }
    debug!(
        endpoint = %settings.graphql_endpoint,
        api_key = settings.api_key.is_some(),
        "resolved roster settings"
    );
    Ok(settings)
}

fn render_student(student: &Student) -> String {
    format!(
        "[{}]\n  Name : {}\n  Mark 1 : {}\n  Mark 2 : {}",
        student.id, student.name, student.mark1, student.mark2
    )
}

fn render_roster(state: &RosterState) -> String {
    if state.students.is_empty() {
        return "No students yet.".to_string();
    }
    state
        .students
        .iter()
        .map(render_student)
        .collect::<Vec<_>>()
        .join("\n")
}

async fn run(cli: Cli) -> Result<()> {
    let settings = resolve_settings(&cli)?;
    let gateway = gateway_from_settings(&settings)?;
    let mut session = RosterSession::new(gateway);
    session.load().await;
    if !session.state().validation.is_empty() {
        bail!("{}", session.state().validation);
    }

    match cli.command {
        Command::List => {}
        Command::Create { name, mark1, mark2 } => {
            session.edit_field(DraftField::Name, name).await;
            session.edit_field(DraftField::Mark1, mark1).await;
            session.edit_field(DraftField::Mark2, mark2).await;
            session.submit().await;
        }
        Command::Update {
            id,
            name,
            mark1,
            mark2,
        } => {
            session.start_edit(&StudentId(id)).await?;
            for (field, value) in [
                (DraftField::Name, name),
                (DraftField::Mark1, mark1),
                (DraftField::Mark2, mark2),
            ] {
                if let Some(value) = value {
                    session.edit_field(field, value).await;
                }
            }
            session.submit().await;
        }
        Command::Delete { id } => {
            session.delete(StudentId(id)).await;
        }
    }

    let state = session.state();
    println!("{}", render_roster(state));
    if !state.validation.is_empty() {
        bail!("{}", state.validation);
    }
    if !state.status.is_empty() {
        println!("{}", state.status);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}
