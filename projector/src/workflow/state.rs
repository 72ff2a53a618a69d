//! Execution state persistence
//!
//! One pretty-printed JSON record per workflow per project, under
//! `.projector/workflows/.state/<name>.json`. This is the only mutable
//! on-disk artifact the core owns. Writes go through a temp file and a
//! rename so a concurrent reader never observes a partial record.
//!
//! "File missing" and "file present but unreadable" are deliberately
//! distinct: the former is `Ok(None)` (no prior state), the latter is a
//! `StateIo` error.

use crate::config;
use crate::workflow::error::WorkflowError;
use projector_sdk::ExecutionState;
use std::path::{Path, PathBuf};
use tokio::fs;

pub fn state_file(name: &str, project_root: &Path) -> PathBuf {
    config::state_dir(project_root).join(format!("{}.json", name))
}

/// Load the persisted execution state for a workflow, if any exists.
pub async fn load(
    name: &str,
    project_root: &Path,
) -> Result<Option<ExecutionState>, WorkflowError> {
    let path = state_file(name, project_root);
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(WorkflowError::StateIo {
                path,
                reason: e.to_string(),
            })
        }
    };

    serde_json::from_str(&content).map(Some).map_err(|e| {
        WorkflowError::StateIo {
            path,
            reason: format!("corrupt state record: {}", e),
        }
    })
}

/// Persist an execution state record, replacing any prior one.
pub async fn save(
    name: &str,
    project_root: &Path,
    state: &ExecutionState,
) -> Result<(), WorkflowError> {
    let path = state_file(name, project_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| WorkflowError::StateIo {
                path: path.clone(),
                reason: e.to_string(),
            })?;
    }

    let content = serde_json::to_string_pretty(state).map_err(|e| WorkflowError::StateIo {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)
        .await
        .map_err(|e| WorkflowError::StateIo {
            path: tmp.clone(),
            reason: e.to_string(),
        })?;
    fs::rename(&tmp, &path)
        .await
        .map_err(|e| WorkflowError::StateIo {
            path,
            reason: e.to_string(),
        })
}
