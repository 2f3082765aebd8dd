use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use loopbook::{
    config::Config,
    error::{AppError, StorageError},
    export::{Exporter, HtmlFileRenderer, ReportFormat},
    listing::{filter_and_sort, PhaseFilter, SortDirection, SortKey},
    model::{Phase, Profile, Project},
    storage::{ProjectStore, SqliteKv},
};

#[derive(Parser)]
#[command(name = "loopbook", version, about = "Journal for design exploration loops")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new project
    Create {
        /// Project title
        title: String,
        /// Starting phase (defaults to framing)
        #[arg(long)]
        phase: Option<Phase>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Free-text purpose
        #[arg(long)]
        purpose: Option<String>,
    },
    /// List projects, optionally filtered by phase
    List {
        /// Keep only these phases (repeatable); empty keeps everything
        #[arg(long = "phase")]
        phases: Vec<Phase>,
        /// Sort key: start-date, updated-date, or phase-name
        #[arg(long, default_value = "updated-date")]
        sort: SortKey,
        /// Sort largest first
        #[arg(long)]
        descending: bool,
    },
    /// Print one project as JSON
    Show {
        /// Project identifier
        id: String,
    },
    /// Move a project to a phase
    SetPhase {
        /// Project identifier
        id: String,
        /// Target phase
        phase: Phase,
    },
    /// Delete a project permanently
    Delete {
        /// Project identifier
        id: String,
    },
    /// Export a report document
    Export {
        /// Project identifier
        id: String,
        /// Report format: executive, process, timeline, or costs
        #[arg(long, default_value = "executive")]
        format: ReportFormat,
    },
    /// Show or update the personal-info record
    Profile {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Contact details
        #[arg(long)]
        contact: Option<String>,
        /// Business or organization name
        #[arg(long)]
        business: Option<String>,
    },
    /// Show or set the currency preference
    Currency {
        /// Currency code to store; omit to print the current one
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    // Initialize storage
    let kv = SqliteKv::new(&config.database).await?;
    info!(path = %config.database.path.display(), "Store opened");
    let store = Arc::new(ProjectStore::new(Arc::new(kv)));

    run(cli.command, &config, &store).await?;
    Ok(())
}

async fn run(command: Command, config: &Config, store: &Arc<ProjectStore>) -> Result<(), AppError> {
    match command {
        Command::Create {
            title,
            phase,
            description,
            purpose,
        } => {
            let mut project = Project::new(title);
            if let Some(phase) = phase {
                project = project.with_phase(phase);
            }
            if let Some(description) = description {
                project = project.with_description(description);
            }
            if let Some(purpose) = purpose {
                project = project.with_purpose(purpose);
            }
            let project = store.save(project).await?;
            println!("{}", project.id);
        }
        Command::List {
            phases,
            sort,
            descending,
        } => {
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let projects = store.get_all().await?;
            let filter = PhaseFilter::only(phases);
            for project in filter_and_sort(&projects, &filter, sort, direction) {
                println!(
                    "{}  {:12}  {}  {}",
                    project.id,
                    project.phase.to_string(),
                    project.updated_at.format("%Y-%m-%d %H:%M"),
                    project.title
                );
            }
        }
        Command::Show { id } => {
            let project = require(store, &id).await?;
            let json = serde_json::to_string_pretty(&project).map_err(StorageError::Serialize)?;
            println!("{}", json);
        }
        Command::SetPhase { id, phase } => {
            let mut project = require(store, &id).await?;
            project.set_phase(phase);
            let project = store.update(project).await?;
            println!("{} → {}", project.id, project.phase);
        }
        Command::Delete { id } => {
            store.delete(&id).await?;
            println!("deleted {}", id);
        }
        Command::Export { id, format } => {
            let project = require(store, &id).await?;
            let renderer = HtmlFileRenderer::new(config.export.output_dir.clone());
            let exporter = Exporter::new(Box::new(renderer));
            let path = exporter.export(&project, format)?;
            println!("{}", path.display());
        }
        Command::Profile {
            name,
            contact,
            business,
        } => {
            if name.is_none() && contact.is_none() && business.is_none() {
                match store.profile().await? {
                    Some(profile) => {
                        let json =
                            serde_json::to_string_pretty(&profile).map_err(StorageError::Serialize)?;
                        println!("{}", json);
                    }
                    None => println!("no profile saved"),
                }
            } else {
                let mut profile = store.profile().await?.unwrap_or_else(Profile::default);
                if name.is_some() {
                    profile.name = name;
                }
                if contact.is_some() {
                    profile.contact = contact;
                }
                if business.is_some() {
                    profile.business = business;
                }
                store.set_profile(&profile).await?;
                println!("profile saved");
            }
        }
        Command::Currency { code } => match code {
            Some(code) => {
                store.set_currency(&code).await?;
                println!("currency set to {}", code);
            }
            None => match store.currency().await? {
                Some(code) => println!("{}", code),
                None => println!("no currency preference saved"),
            },
        },
    }
    Ok(())
}

async fn require(store: &ProjectStore, id: &str) -> Result<Project, AppError> {
    store
        .get(id)
        .await?
        .ok_or_else(|| {
            AppError::Storage(StorageError::ProjectNotFound {
                project_id: id.to_string(),
            })
        })
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        loopbook::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        loopbook::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
