use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use docflow::catalog::TaskCatalog;
use docflow::client::{DefinitionStore, HttpDefinitionStore};
use docflow::graph::WorkflowGraph;
use docflow::template::{WorkflowTemplate, load_template_from_yaml};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the task catalog grouped by category
    Tasks,

    /// Build a workflow definition from a template and write it as JSON
    Export {
        /// Path to the template YAML file (omit to use the built-in
        /// document-approval template)
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Output path for the definition JSON (stdout if omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Check a template's edges against the connection rules
    Validate {
        /// Path to the template YAML file
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Export a template and submit the definition to a persistence endpoint
    Submit {
        /// Path to the template YAML file
        #[arg(long, short)]
        file: PathBuf,

        /// Persistence service URL
        #[arg(long, default_value = "http://127.0.0.1:8080/api/workflows")]
        endpoint: String,
    },
}

fn load_template(file: Option<&PathBuf>) -> Result<WorkflowTemplate> {
    match file {
        Some(path) => load_template_from_yaml(path),
        None => Ok(WorkflowTemplate::document_approval()),
    }
}

/// File-sourced templates are untrusted: replay their edges through the
/// connection rules before installing.
fn checked_graph(template: &WorkflowTemplate, catalog: Arc<TaskCatalog>) -> Result<WorkflowGraph> {
    let violations = template.validate_against(catalog.clone());
    for violation in &violations {
        error!(
            edge = %violation.edge_id,
            source = %violation.source,
            target = %violation.target,
            "Template edge rejected: {}",
            violation.reason
        );
    }
    if !violations.is_empty() {
        return Err(anyhow!("Template '{}' failed validation with {} bad edge(s)", template.name, violations.len()));
    }

    let mut graph = WorkflowGraph::new(catalog);
    template.install(&mut graph);
    Ok(graph)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let catalog = Arc::new(TaskCatalog::builtin());

    match cli.command {
        Commands::Tasks => {
            for (_, group) in catalog.tasks_by_category() {
                println!("{} ({})", group.name, group.color);
                for task_type in &group.tasks {
                    if let Some(cfg) = catalog.get(task_type) {
                        println!("  {:<22} {}", task_type, cfg.description);
                    }
                }
            }
        }

        Commands::Export { file, out } => {
            let template = load_template(file.as_ref())?;
            let graph = checked_graph(&template, catalog)?;
            let definition = graph.serialize();
            let json = serde_json::to_string_pretty(&definition)?;

            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    info!("Definition written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Validate { file } => {
            let template = load_template_from_yaml(&file)?;
            checked_graph(&template, catalog)?;
            info!("Template '{}' is valid", template.name);
        }

        Commands::Submit { file, endpoint } => {
            let template = load_template_from_yaml(&file)?;
            let graph = checked_graph(&template, catalog)?;
            let definition = graph.serialize();

            let store = HttpDefinitionStore::new(&endpoint);
            let stored_id = store.submit(&definition).await?;
            info!("Workflow submitted successfully! Stored ID: {}", stored_id);
        }
    }

    Ok(())
}
