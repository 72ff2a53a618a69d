//! Projector CLI entry point

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use projector::commands;
use projector::tools::Tool;
use projector_sdk::TaskStatus;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "projector")]
#[command(about = "Scaffold and drive declarative multi-agent workflows", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the workflows directory with example workflows
    Init {
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// List available workflows
    List {
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Show a workflow's waves and tasks
    Show {
        name: String,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Print execution instructions for the next actionable wave
    Run {
        name: String,
        #[arg(long, value_enum, default_value_t = Tool::Claude)]
        tool: Tool,
        /// Workflow variables as key=value (repeatable)
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Print the machine-readable execution plan as JSON
    Plan {
        name: String,
        #[arg(long, value_enum, default_value_t = Tool::Claude)]
        tool: Tool,
        /// Workflow variables as key=value (repeatable)
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Report persisted execution progress
    Status {
        name: String,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Generate the agent prompt template files
    Prompts {
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Write slash command files for a tool
    Slash {
        #[arg(value_enum)]
        tool: Tool,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Record an externally-reported task status
    Mark {
        name: String,
        wave: String,
        task: String,
        #[arg(value_enum)]
        status: MarkStatus,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Confirm a completed checkpoint wave
    Advance {
        name: String,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Record an unrecoverable workflow failure
    Fail {
        name: String,
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
}

/// Statuses an external executor may report; tasks start as pending and
/// never move backwards.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum MarkStatus {
    Running,
    Complete,
}

impl From<MarkStatus> for TaskStatus {
    fn from(status: MarkStatus) -> Self {
        match status {
            MarkStatus::Running => TaskStatus::Running,
            MarkStatus::Complete => TaskStatus::Complete,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init { project } => commands::init(&project).await,
        Command::List { project } => commands::list(&project).await,
        Command::Show { name, project } => commands::show(&name, &project).await,
        Command::Run {
            name,
            tool,
            vars,
            project,
        } => {
            let variables: HashMap<String, String> = vars.into_iter().collect();
            commands::run(&name, tool, &project, variables).await
        }
        Command::Plan {
            name,
            tool,
            vars,
            project,
        } => {
            let variables: HashMap<String, String> = vars.into_iter().collect();
            commands::plan(&name, tool, &project, variables).await
        }
        Command::Status { name, project } => commands::status(&name, &project).await,
        Command::Prompts { project } => commands::generate_prompts(&project).await,
        Command::Slash { tool, project } => commands::write_slash_commands(tool, &project).await,
        Command::Mark {
            name,
            wave,
            task,
            status,
            project,
        } => commands::mark(&name, &wave, &task, status.into(), &project).await,
        Command::Advance { name, project } => commands::advance(&name, &project).await,
        Command::Fail { name, project } => commands::fail(&name, &project).await,
    }
}
