//! Error taxonomy for the workflow core
//!
//! Every variant carries the offending identifier (workflow, wave, task,
//! variable, or file name); nothing is silently defaulted. Parse and
//! resolution failures abort the whole call — instructions are never
//! partially rendered for an invalid definition.

use projector_sdk::{TaskStatus, WorkflowStatus};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No workflow document matches the requested name.
    #[error("workflow '{0}' not found")]
    NotFound(String),

    /// The document exists but is malformed or structurally invalid.
    #[error("invalid workflow '{workflow}': {reason}")]
    Parse { workflow: String, reason: String },

    /// A `{{placeholder}}` has no entry in the active scope.
    #[error("unresolved variable '{name}' in template '{template}'")]
    UnresolvedVariable { name: String, template: String },

    /// A declared required variable was not supplied, or a declared
    /// required file is absent from the project.
    #[error("workflow '{workflow}' is missing required {requirement}")]
    MissingRequirement {
        workflow: String,
        requirement: String,
    },

    /// The state record is present but unreadable, unwritable, or
    /// inconsistent with the definition. Distinct from "no prior state",
    /// which is not an error.
    #[error("execution state at {path}: {reason}")]
    StateIo { path: PathBuf, reason: String },

    /// A tool identifier outside the supported set.
    #[error("unknown tool '{0}' (expected one of: claude, codex, github-copilot, opencode)")]
    UnknownTool(String),

    /// A status report referenced a wave id the execution does not have.
    #[error("workflow '{workflow}' has no wave '{wave}'")]
    UnknownWave { workflow: String, wave: String },

    /// A status report referenced a task id its wave does not have.
    #[error("wave '{wave}' of workflow '{workflow}' has no task '{task}'")]
    UnknownTask {
        workflow: String,
        wave: String,
        task: String,
    },

    /// Task statuses only move forward through pending → running →
    /// complete.
    #[error("task '{task}' cannot move from {from} to {to}")]
    InvalidTransition {
        task: String,
        from: TaskStatus,
        to: TaskStatus,
    },

    /// An advance signal arrived while no completed checkpoint wave was
    /// waiting for one.
    #[error("workflow '{0}' has no checkpoint awaiting confirmation")]
    NoPendingCheckpoint(String),

    /// A mutation was attempted on a finished execution.
    #[error("workflow '{workflow}' is already {status}")]
    AlreadyTerminal {
        workflow: String,
        status: WorkflowStatus,
    },
}
