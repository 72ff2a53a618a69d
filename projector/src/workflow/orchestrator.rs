//! Workflow orchestration
//!
//! Composes the parser, resolver, and state store into the operations the
//! CLI exposes: render instructions or a plan for the next actionable
//! wave, report status, and record externally-observed task transitions.
//!
//! The orchestrator never executes agent work. Task statuses only change
//! when an external executor reports them, and waves only advance in
//! declaration order — a checkpoint wave additionally holds the cursor
//! until an explicit advance signal arrives.

use crate::templates;
use crate::tools::Tool;
use crate::workflow::error::WorkflowError;
use crate::workflow::{parser, resolver, state};
use chrono::Local;
use projector_sdk::{
    ExecutionState, TaskStatus, WaveStatus, WorkflowDefinition, WorkflowStatus,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// A task with every path template resolved against its merged scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTask {
    pub id: String,
    pub name: String,
    pub agent: projector_sdk::AgentRole,
    pub prompt: String,
    pub inputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub context: HashMap<String, String>,
}

/// The next actionable wave with its tasks resolved, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedWave {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub checkpoint: bool,
    pub tasks: Vec<ResolvedTask>,
}

/// What the workflow needs next.
#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
    /// Offer this wave's tasks to the agent layer.
    Wave(ResolvedWave),
    /// A completed checkpoint wave awaits an explicit advance signal;
    /// later waves are withheld.
    CheckpointPending {
        index: usize,
        id: String,
        name: String,
    },
    /// Every wave is complete.
    Complete,
    /// An external executor reported unrecoverable failure; nothing is
    /// actionable until the execution is re-initialized.
    Failed,
}

/// One resolution result; instructions and plans are both rendered from
/// this, never computed independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub workflow: WorkflowDefinition,
    pub context_files: Vec<String>,
    pub next: NextAction,
}

/// Resolve a workflow against the supplied variables and the persisted
/// execution state, producing the next actionable step.
///
/// Order of checks: parse → declared requirements (variables supplied,
/// files present) → state reconciliation → template resolution. A missing
/// requirement therefore fails before any prompt-path is resolved. On the
/// first successful resolution with no prior state, the initial execution
/// record is created and persisted.
pub async fn resolve_next(
    workflow_name: &str,
    project_root: &Path,
    variables: &HashMap<String, String>,
) -> Result<Resolution, WorkflowError> {
    let definition = parser::parse_by_name(workflow_name, project_root).await?;

    let mut workflow_scope = variables.clone();
    workflow_scope.insert("workflow".to_string(), definition.id.clone());

    if let Some(requires) = &definition.requires {
        for variable in &requires.variables {
            if !variables.contains_key(variable) {
                return Err(WorkflowError::MissingRequirement {
                    workflow: workflow_name.to_string(),
                    requirement: format!("variable '{}'", variable),
                });
            }
        }
        for file in &requires.files {
            let resolved = resolver::resolve(file, &workflow_scope)?;
            let exists = fs::try_exists(project_root.join(&resolved))
                .await
                .unwrap_or(false);
            if !exists {
                return Err(WorkflowError::MissingRequirement {
                    workflow: workflow_name.to_string(),
                    requirement: format!("file '{}'", resolved),
                });
            }
        }
    }

    let prior = state::load(workflow_name, project_root).await?;
    if let Some(existing) = &prior {
        if existing.workflow.waves.len() != definition.waves.len() {
            return Err(WorkflowError::StateIo {
                path: state::state_file(workflow_name, project_root),
                reason: format!(
                    "state snapshot has {} waves but the document now has {}; \
                     re-initialize the execution instead of guessing",
                    existing.workflow.waves.len(),
                    definition.waves.len()
                ),
            });
        }
    }

    let context_files = definition
        .context_files
        .iter()
        .map(|file| resolver::resolve(file, &workflow_scope))
        .collect::<Result<Vec<_>, _>>()?;

    let cursor = match &prior {
        Some(existing) if existing.status == WorkflowStatus::Failed => Cursor::Failed,
        Some(existing) => walk_to_next(existing),
        None if definition.waves.is_empty() => Cursor::Complete,
        None => Cursor::Wave(0),
    };

    let next = match cursor {
        Cursor::Complete => NextAction::Complete,
        Cursor::Failed => NextAction::Failed,
        Cursor::CheckpointPending(index) => {
            let wave = &definition.waves[index];
            NextAction::CheckpointPending {
                index,
                id: wave.id.clone(),
                name: wave.name.clone(),
            }
        }
        Cursor::Wave(index) => {
            let resolved = resolve_wave(&definition, index, variables)?;
            if prior.is_none() {
                let initial = ExecutionState::new(&definition);
                state::save(workflow_name, project_root, &initial).await?;
            }
            NextAction::Wave(resolved)
        }
    };

    Ok(Resolution {
        workflow: definition,
        context_files,
        next,
    })
}

/// Render the next actionable step as a tool-addressed instruction
/// document.
pub async fn generate_instructions(
    workflow_name: &str,
    tool: Tool,
    project_root: &Path,
    variables: &HashMap<String, String>,
) -> Result<String, WorkflowError> {
    let resolution = resolve_next(workflow_name, project_root, variables).await?;
    Ok(templates::instructions::render(&resolution, tool))
}

/// Render the next actionable step as a machine-readable plan. Always
/// describes the same task set `generate_instructions` would for
/// identical inputs.
pub async fn generate_plan(
    workflow_name: &str,
    tool: Tool,
    project_root: &Path,
    variables: &HashMap<String, String>,
) -> Result<templates::plan::ExecutionPlan, WorkflowError> {
    let resolution = resolve_next(workflow_name, project_root, variables).await?;
    Ok(templates::plan::build(&resolution, tool))
}

/// Read-only pass-through to the state store, for status reporting.
pub async fn load_execution_state(
    workflow_name: &str,
    project_root: &Path,
) -> Result<Option<ExecutionState>, WorkflowError> {
    state::load(workflow_name, project_root).await
}

/// Record an externally-reported task transition and advance the wave
/// cursor as far as the completion rules allow.
pub async fn update_task_status(
    workflow_name: &str,
    project_root: &Path,
    wave_id: &str,
    task_id: &str,
    new_status: TaskStatus,
) -> Result<ExecutionState, WorkflowError> {
    let mut state = load_required(workflow_name, project_root).await?;
    ensure_live(workflow_name, &state)?;

    let wave = state
        .waves
        .iter_mut()
        .find(|w| w.wave.id == wave_id)
        .ok_or_else(|| WorkflowError::UnknownWave {
            workflow: workflow_name.to_string(),
            wave: wave_id.to_string(),
        })?;
    let task = wave
        .tasks
        .iter_mut()
        .find(|t| t.task.id == task_id)
        .ok_or_else(|| WorkflowError::UnknownTask {
            workflow: workflow_name.to_string(),
            wave: wave_id.to_string(),
            task: task_id.to_string(),
        })?;

    if new_status.rank() <= task.status.rank() {
        return Err(WorkflowError::InvalidTransition {
            task: task_id.to_string(),
            from: task.status,
            to: new_status,
        });
    }
    task.status = new_status;

    if wave.is_complete() {
        wave.status = WaveStatus::Complete;
    } else if wave.status == WaveStatus::Pending {
        wave.status = WaveStatus::Running;
    }

    advance_cursor(&mut state);
    state::save(workflow_name, project_root, &state).await?;
    Ok(state)
}

/// The explicit external signal that confirms a completed checkpoint
/// wave, releasing the waves behind it.
pub async fn advance_checkpoint(
    workflow_name: &str,
    project_root: &Path,
) -> Result<ExecutionState, WorkflowError> {
    let mut state = load_required(workflow_name, project_root).await?;
    ensure_live(workflow_name, &state)?;

    let index = state.current_wave_index;
    let holds = state
        .waves
        .get(index)
        .map(|w| w.wave.checkpoint && w.is_complete())
        .unwrap_or(false);
    if !holds {
        return Err(WorkflowError::NoPendingCheckpoint(
            workflow_name.to_string(),
        ));
    }

    state.waves[index].status = WaveStatus::Complete;
    if index + 1 == state.waves.len() {
        finish(&mut state);
    } else {
        state.current_wave_index = index + 1;
        advance_cursor(&mut state);
    }

    state::save(workflow_name, project_root, &state).await?;
    Ok(state)
}

/// Record an externally-reported unrecoverable failure.
pub async fn mark_failed(
    workflow_name: &str,
    project_root: &Path,
) -> Result<ExecutionState, WorkflowError> {
    let mut state = load_required(workflow_name, project_root).await?;
    ensure_live(workflow_name, &state)?;

    state.status = WorkflowStatus::Failed;
    state.completed_at = Some(Local::now());
    state::save(workflow_name, project_root, &state).await?;
    Ok(state)
}

async fn load_required(
    workflow_name: &str,
    project_root: &Path,
) -> Result<ExecutionState, WorkflowError> {
    state::load(workflow_name, project_root)
        .await?
        .ok_or_else(|| WorkflowError::StateIo {
            path: state::state_file(workflow_name, project_root),
            reason: "no execution state recorded for this workflow".to_string(),
        })
}

fn ensure_live(workflow_name: &str, state: &ExecutionState) -> Result<(), WorkflowError> {
    match state.status {
        WorkflowStatus::Complete | WorkflowStatus::Failed => {
            Err(WorkflowError::AlreadyTerminal {
                workflow: workflow_name.to_string(),
                status: state.status,
            })
        }
        WorkflowStatus::Pending | WorkflowStatus::Running => Ok(()),
    }
}

enum Cursor {
    Wave(usize),
    CheckpointPending(usize),
    Complete,
    Failed,
}

/// Walk forward from the persisted cursor to the first wave that still
/// needs work. A completed checkpoint the cursor has not been advanced
/// past stops the walk.
fn walk_to_next(state: &ExecutionState) -> Cursor {
    if state.status == WorkflowStatus::Complete {
        return Cursor::Complete;
    }
    let mut index = state.current_wave_index;
    loop {
        let Some(wave) = state.waves.get(index) else {
            return Cursor::Complete;
        };
        if !wave.is_complete() {
            return Cursor::Wave(index);
        }
        if wave.wave.checkpoint {
            return Cursor::CheckpointPending(index);
        }
        index += 1;
    }
}

/// Move the cursor past completed non-checkpoint waves, waking the next
/// wave or finishing the workflow.
fn advance_cursor(state: &mut ExecutionState) {
    loop {
        let index = state.current_wave_index;
        let Some(wave) = state.waves.get_mut(index) else {
            return;
        };
        if !wave.is_complete() {
            if wave.status == WaveStatus::Pending {
                wave.status = WaveStatus::Running;
            }
            return;
        }
        wave.status = WaveStatus::Complete;
        if wave.wave.checkpoint {
            // Hard barrier: only advance_checkpoint moves past this.
            return;
        }
        if index + 1 == state.waves.len() {
            finish(state);
            return;
        }
        state.current_wave_index = index + 1;
    }
}

fn finish(state: &mut ExecutionState) {
    state.status = WorkflowStatus::Complete;
    state.completed_at = Some(Local::now());
}

/// Resolve one wave's tasks against the merged scope: supplied variables,
/// the reserved `workflow`/`wave` built-ins, then per-task context
/// (context values themselves may reference workflow-level variables).
fn resolve_wave(
    definition: &WorkflowDefinition,
    index: usize,
    variables: &HashMap<String, String>,
) -> Result<ResolvedWave, WorkflowError> {
    let wave = &definition.waves[index];
    let mut base = variables.clone();
    base.insert("workflow".to_string(), definition.id.clone());
    base.insert("wave".to_string(), wave.id.clone());

    let mut tasks = Vec::with_capacity(wave.tasks.len());
    for task in &wave.tasks {
        let mut context = HashMap::new();
        for (key, value) in &task.context {
            context.insert(key.clone(), resolver::resolve(value, &base)?);
        }
        let scope = resolver::merge_scope(&base, &context);

        tasks.push(ResolvedTask {
            id: task.id.clone(),
            name: task.name.clone(),
            agent: task.agent,
            prompt: resolver::resolve(&task.prompt, &scope)?,
            inputs: task
                .inputs
                .iter()
                .map(|input| resolver::resolve(input, &scope))
                .collect::<Result<Vec<_>, _>>()?,
            output: task
                .output
                .as_ref()
                .map(|output| resolver::resolve(output, &scope))
                .transpose()?,
            context,
        });
    }

    Ok(ResolvedWave {
        index,
        id: wave.id.clone(),
        name: wave.name.clone(),
        checkpoint: wave.checkpoint,
        tasks,
    })
}
