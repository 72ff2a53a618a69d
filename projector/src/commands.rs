//! CLI command handlers
//!
//! Thin console wrappers over the workflow core: each handler parses
//! nothing itself, calls one core operation, and formats the result.

use crate::config;
use crate::templates::{prompts, slash, workflows};
use crate::tools::Tool;
use crate::workflow::{self, orchestrator};
use anyhow::{Context, Result};
use projector_sdk::{log_file_saved, log_info, log_section, log_warning, TaskStatus};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Create the projector directories and write the example workflows.
pub async fn init(project_root: &Path) -> Result<()> {
    let workflows_dir = config::workflows_dir(project_root);
    fs::create_dir_all(&workflows_dir)
        .await
        .with_context(|| format!("failed to create {}", workflows_dir.display()))?;
    fs::create_dir_all(config::state_dir(project_root))
        .await
        .context("failed to create state directory")?;
    fs::create_dir_all(config::commands_dir(project_root))
        .await
        .context("failed to create commands directory")?;

    for (name, document) in workflows::example_workflows() {
        let path = workflows_dir.join(format!("{}.yaml", name));
        fs::write(&path, document)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        log_file_saved!(path.display());
    }

    log_info!("Run `projector prompts` to generate prompt templates.");
    Ok(())
}

/// List available workflows with a one-line summary each.
pub async fn list(project_root: &Path) -> Result<()> {
    let names = workflow::list_workflows(project_root).await;
    if names.is_empty() {
        log_info!("No workflows found. Run `projector init` to create examples.");
        return Ok(());
    }

    println!("Available workflows:\n");
    for name in names {
        match workflow::parse_by_name(&name, project_root).await {
            Ok(definition) => {
                println!("  {}", name);
                if !definition.description.is_empty() {
                    println!("    {}", definition.description);
                }
                println!(
                    "    Waves: {}, Tasks: {}",
                    definition.waves.len(),
                    definition.task_count()
                );
                println!();
            }
            Err(e) => {
                log_warning!("{} (invalid: {})", name, e);
            }
        }
    }
    Ok(())
}

/// Show the full structure of one workflow.
pub async fn show(name: &str, project_root: &Path) -> Result<()> {
    let definition = workflow::parse_by_name(name, project_root).await?;

    println!("# Workflow: {}", definition.name);
    println!("ID: {}", definition.id);
    if !definition.description.is_empty() {
        println!("Description: {}", definition.description);
    }
    println!();

    if let Some(requires) = &definition.requires {
        println!("## Requirements");
        if !requires.files.is_empty() {
            println!("Files: {}", requires.files.join(", "));
        }
        if !requires.variables.is_empty() {
            println!("Variables: {}", requires.variables.join(", "));
        }
        println!();
    }

    println!("## Waves\n");
    for (index, wave) in definition.waves.iter().enumerate() {
        println!(
            "### Wave {}: {}{}",
            index + 1,
            wave.id,
            if wave.checkpoint { " (checkpoint)" } else { "" }
        );
        println!();
        for task in &wave.tasks {
            println!("  - [{}] {}", task.agent, task.name);
            println!("    Prompt: {}", task.prompt);
            if let Some(output) = &task.output {
                println!("    Output: {}", output);
            }
        }
        println!();
    }
    Ok(())
}

/// Print execution instructions for the next actionable wave.
pub async fn run(
    name: &str,
    tool: Tool,
    project_root: &Path,
    variables: HashMap<String, String>,
) -> Result<()> {
    let instructions =
        orchestrator::generate_instructions(name, tool, project_root, &variables).await?;
    println!("{}", instructions);
    Ok(())
}

/// Print the machine-readable execution plan as JSON.
pub async fn plan(
    name: &str,
    tool: Tool,
    project_root: &Path,
    variables: HashMap<String, String>,
) -> Result<()> {
    let plan = orchestrator::generate_plan(name, tool, project_root, &variables).await?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

/// Report persisted execution progress.
pub async fn status(name: &str, project_root: &Path) -> Result<()> {
    let Some(execution) = orchestrator::load_execution_state(name, project_root).await? else {
        log_info!("No execution state found for workflow: {}", name);
        return Ok(());
    };

    println!("# Workflow Status: {}", execution.workflow.name);
    println!("Status: {}", execution.status);
    println!("Started: {}", execution.started_at.to_rfc3339());
    if let Some(completed) = execution.completed_at {
        println!("Completed: {}", completed.to_rfc3339());
    }
    println!(
        "Current Wave: {} of {}",
        execution.current_wave_index + 1,
        execution.waves.len()
    );
    println!();

    for wave in &execution.waves {
        println!(
            "Wave {}: {} ({}/{} tasks)",
            wave.wave.id,
            wave.status,
            wave.completed_task_count(),
            wave.tasks.len()
        );
        for task in &wave.tasks {
            let icon = match task.status {
                TaskStatus::Complete => "✓",
                TaskStatus::Running => "→",
                TaskStatus::Pending => "○",
            };
            println!("  {} {}: {}", icon, task.task.name, task.status);
        }
    }
    Ok(())
}

/// Write the agent prompt bodies under `.projector/commands/`.
pub async fn generate_prompts(project_root: &Path) -> Result<()> {
    let commands_dir = config::commands_dir(project_root);
    fs::create_dir_all(&commands_dir)
        .await
        .with_context(|| format!("failed to create {}", commands_dir.display()))?;

    log_section!("Prompt Templates");
    for (file, body) in prompts::prompt_files() {
        let path = commands_dir.join(file);
        fs::write(&path, body)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        log_file_saved!(path.display());
    }
    Ok(())
}

/// Write the slash command files for one tool.
pub async fn write_slash_commands(tool: Tool, project_root: &Path) -> Result<()> {
    log_section!(format!("Slash Commands: {}", tool.label()));
    for (relative, content) in slash::command_files(tool) {
        let path = project_root.join(&relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        log_file_saved!(relative);
    }
    Ok(())
}

/// Record an externally-reported task transition.
pub async fn mark(
    name: &str,
    wave_id: &str,
    task_id: &str,
    status: TaskStatus,
    project_root: &Path,
) -> Result<()> {
    let state =
        orchestrator::update_task_status(name, project_root, wave_id, task_id, status).await?;

    if let Some(wave) = state.waves.iter().find(|w| w.wave.id == wave_id) {
        log_info!(
            "{} / {} / {} -> {} ({}/{} tasks complete)",
            name,
            wave_id,
            task_id,
            status,
            wave.completed_task_count(),
            wave.tasks.len()
        );
    }
    if state.status == projector_sdk::WorkflowStatus::Complete {
        log_info!("Workflow '{}' is complete.", name);
    }
    Ok(())
}

/// Confirm a completed checkpoint wave, releasing the waves behind it.
pub async fn advance(name: &str, project_root: &Path) -> Result<()> {
    let state = orchestrator::advance_checkpoint(name, project_root).await?;
    match state.status {
        projector_sdk::WorkflowStatus::Complete => {
            log_info!("Checkpoint confirmed; workflow '{}' is complete.", name);
        }
        _ => {
            log_info!(
                "Checkpoint confirmed; wave {} of {} is now active.",
                state.current_wave_index + 1,
                state.waves.len()
            );
        }
    }
    Ok(())
}

/// Record an externally-reported unrecoverable failure.
pub async fn fail(name: &str, project_root: &Path) -> Result<()> {
    orchestrator::mark_failed(name, project_root).await?;
    log_warning!("Workflow '{}' marked as failed.", name);
    Ok(())
}
