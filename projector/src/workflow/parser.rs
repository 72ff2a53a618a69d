//! Workflow document discovery and parsing
//!
//! Workflows live as one YAML file per workflow under
//! `.projector/workflows/`; the filename stem is the workflow name.
//! Parsing only reads — it has no side effects — and is deterministic:
//! the same file content always yields a structurally identical
//! definition, with wave and task order preserved exactly as written.

use crate::config;
use crate::workflow::error::WorkflowError;
use projector_sdk::WorkflowDefinition;
use std::path::{Path, PathBuf};
use tokio::fs;

const EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// List the workflow names available in a project, sorted.
///
/// Non-workflow files in the directory are skipped via a cheap shape
/// check (a YAML mapping carrying `id` and `waves`). An absent or empty
/// workflows directory yields an empty list, never an error.
pub async fn list_workflows(project_root: &Path) -> Vec<String> {
    let dir = config::workflows_dir(project_root);
    let Ok(mut entries) = fs::read_dir(&dir).await else {
        return Vec::new();
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let has_workflow_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| EXTENSIONS.contains(&ext));
        if !has_workflow_ext {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path).await else {
            continue;
        };
        if !looks_like_workflow(&content) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    names
}

/// Cheap shape check: a YAML mapping with `id` and `waves` keys.
fn looks_like_workflow(content: &str) -> bool {
    match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(serde_yaml::Value::Mapping(mapping)) => {
            mapping.contains_key(&serde_yaml::Value::from("id"))
                && mapping.contains_key(&serde_yaml::Value::from("waves"))
        }
        _ => false,
    }
}

/// Parse the named workflow from a project.
///
/// Fails with [`WorkflowError::NotFound`] when no matching file exists
/// and [`WorkflowError::Parse`] when the document is malformed or breaks
/// a structural invariant (missing `id`/`waves`, duplicate wave or task
/// ids, a wave with zero tasks).
pub async fn parse_by_name(
    name: &str,
    project_root: &Path,
) -> Result<WorkflowDefinition, WorkflowError> {
    let path = find_document(name, project_root)
        .await
        .ok_or_else(|| WorkflowError::NotFound(name.to_string()))?;

    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| WorkflowError::Parse {
            workflow: name.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

    parse_document(name, &content)
}

/// Parse a workflow document from its raw YAML content.
pub fn parse_document(name: &str, content: &str) -> Result<WorkflowDefinition, WorkflowError> {
    let mut definition: WorkflowDefinition =
        serde_yaml::from_str(content).map_err(|e| WorkflowError::Parse {
            workflow: name.to_string(),
            reason: e.to_string(),
        })?;

    // Display names fall back to ids when the document omits them.
    if definition.name.is_empty() {
        definition.name = definition.id.clone();
    }
    for wave in &mut definition.waves {
        if wave.name.is_empty() {
            wave.name = wave.id.clone();
        }
    }

    definition.validate().map_err(|reason| WorkflowError::Parse {
        workflow: name.to_string(),
        reason,
    })?;

    Ok(definition)
}

async fn find_document(name: &str, project_root: &Path) -> Option<PathBuf> {
    let dir = config::workflows_dir(project_root);
    for ext in EXTENSIONS {
        let candidate = dir.join(format!("{}.{}", name, ext));
        if fs::try_exists(&candidate).await.unwrap_or(false) {
            return Some(candidate);
        }
    }
    None
}
