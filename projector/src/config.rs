//! Project directory layout owned by projector

use std::path::{Path, PathBuf};

/// Per-project root of everything projector owns.
pub const PROJECTOR_DIR: &str = ".projector";

/// Markers delimiting the managed block inside generated command files,
/// so regeneration can rewrite our section without touching user edits.
pub const MARKER_START: &str = "<!-- PROJECTOR:START -->";
pub const MARKER_END: &str = "<!-- PROJECTOR:END -->";

pub fn projector_dir(project_root: &Path) -> PathBuf {
    project_root.join(PROJECTOR_DIR)
}

/// Directory holding the workflow documents (one YAML file per workflow).
pub fn workflows_dir(project_root: &Path) -> PathBuf {
    projector_dir(project_root).join("workflows")
}

/// Directory holding persisted execution state records.
pub fn state_dir(project_root: &Path) -> PathBuf {
    workflows_dir(project_root).join(".state")
}

/// Directory holding the generated agent prompt bodies.
pub fn commands_dir(project_root: &Path) -> PathBuf {
    projector_dir(project_root).join("commands")
}
