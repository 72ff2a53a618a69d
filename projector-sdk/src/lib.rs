//! Shared data model for projector workflows
//!
//! This crate holds the types both the CLI and external consumers need:
//! the workflow document model (what a workflow YAML deserializes into),
//! the execution model (what the state store persists between runs), and
//! the console logging macros used by command handlers.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ============================================================================
// Workflow document model
// ============================================================================

/// A parsed workflow document: ordered waves of agent tasks plus the
/// preconditions and completion hooks around them.
///
/// Immutable once parsed; field order inside `waves`/`tasks` is execution
/// order and is preserved exactly as written in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Unique within a workflow directory; doubles as the filename stem
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// Preconditions checked before instructions or a plan are produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Requires>,
    /// Path templates always made available to agents
    #[serde(default)]
    pub context_files: Vec<String>,
    pub waves: Vec<Wave>,
    /// Side-effect flags consumed by an external collaborator after the
    /// final wave completes; never executed here
    #[serde(default)]
    pub on_complete: OnComplete,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Declared preconditions for running a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Requires {
    /// Path templates that must exist relative to the project root
    #[serde(default)]
    pub files: Vec<String>,
    /// Variable names the caller must supply
    #[serde(default)]
    pub variables: Vec<String>,
}

/// Post-completion side-effect flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OnComplete {
    #[serde(default)]
    pub update_state: bool,
    #[serde(default)]
    pub update_roadmap: bool,
}

/// An ordered group of tasks considered together. A checkpoint wave is a
/// hard barrier: later waves are withheld until it is explicitly confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Unique within a definition
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub checkpoint: bool,
    pub tasks: Vec<Task>,
}

/// A single unit of work assigned to an agent role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within its wave
    pub id: String,
    pub name: String,
    pub agent: AgentRole,
    /// Path template to the prompt body the agent should follow
    pub prompt: String,
    /// Path templates to read before acting
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Path template the task is expected to produce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Extra variables merged into the resolution scope for this task only
    #[serde(default)]
    pub context: HashMap<String, String>,
}

/// The closed set of agent roles a task can be assigned to. An unknown
/// role in a document is a parse failure, not a silent pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Research,
    Planning,
    Execution,
    Review,
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgentRole::Research => "research",
            AgentRole::Planning => "planning",
            AgentRole::Execution => "execution",
            AgentRole::Review => "review",
        };
        write!(f, "{}", label)
    }
}

impl WorkflowDefinition {
    /// Structural validation: wave ids unique within the definition, task
    /// ids unique within their wave, no wave without tasks.
    ///
    /// Returns the reason on failure so the parser can wrap it with the
    /// workflow name.
    pub fn validate(&self) -> Result<(), String> {
        let mut wave_ids = HashSet::new();
        for wave in &self.waves {
            if !wave_ids.insert(wave.id.as_str()) {
                return Err(format!("duplicate wave id '{}'", wave.id));
            }
            if wave.tasks.is_empty() {
                return Err(format!("wave '{}' has no tasks", wave.id));
            }
            let mut task_ids = HashSet::new();
            for task in &wave.tasks {
                if !task_ids.insert(task.id.as_str()) {
                    return Err(format!(
                        "duplicate task id '{}' in wave '{}'",
                        task.id, wave.id
                    ));
                }
            }
        }
        Ok(())
    }

    /// Total task count across all waves.
    pub fn task_count(&self) -> usize {
        self.waves.iter().map(|w| w.tasks.len()).sum()
    }
}

// ============================================================================
// Execution model (persisted between runs)
// ============================================================================

/// Status of a workflow execution as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Pending,
    Running,
    Complete,
    Failed,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkflowStatus::Pending => "pending",
            WorkflowStatus::Running => "running",
            WorkflowStatus::Complete => "complete",
            WorkflowStatus::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Status of a single wave within an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveStatus {
    Pending,
    Running,
    Complete,
}

impl fmt::Display for WaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WaveStatus::Pending => "pending",
            WaveStatus::Running => "running",
            WaveStatus::Complete => "complete",
        };
        write!(f, "{}", label)
    }
}

/// Status of a single task within an execution. Transitions are linear and
/// forward-only; there is no task-level failure state — a failed
/// verification simply leaves the task where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Complete,
}

impl TaskStatus {
    /// Position in the pending → running → complete sequence.
    pub fn rank(self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::Running => 1,
            TaskStatus::Complete => 2,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Complete => "complete",
        };
        write!(f, "{}", label)
    }
}

/// Persisted progress record for one workflow in one project.
///
/// Holds a full structural snapshot of the definition taken when execution
/// began, so an in-flight run is unaffected by concurrent edits to the
/// workflow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
    pub workflow: WorkflowDefinition,
    pub status: WorkflowStatus,
    pub started_at: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Local>>,
    pub current_wave_index: usize,
    pub waves: Vec<WaveExecution>,
}

/// Progress of one wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveExecution {
    pub wave: Wave,
    pub status: WaveStatus,
    pub tasks: Vec<TaskExecution>,
}

/// Progress of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskExecution {
    pub task: Task,
    pub status: TaskStatus,
}

impl WaveExecution {
    /// A wave is complete iff every task in it is complete.
    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(|t| t.status == TaskStatus::Complete)
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Complete)
            .count()
    }
}

impl ExecutionState {
    /// Fresh record for a definition whose first wave just resolved: the
    /// run is live, the first wave is the active one, every task pending.
    pub fn new(definition: &WorkflowDefinition) -> Self {
        let waves = definition
            .waves
            .iter()
            .enumerate()
            .map(|(index, wave)| WaveExecution {
                wave: wave.clone(),
                status: if index == 0 {
                    WaveStatus::Running
                } else {
                    WaveStatus::Pending
                },
                tasks: wave
                    .tasks
                    .iter()
                    .map(|task| TaskExecution {
                        task: task.clone(),
                        status: TaskStatus::Pending,
                    })
                    .collect(),
            })
            .collect();

        Self {
            workflow: definition.clone(),
            status: WorkflowStatus::Running,
            started_at: Local::now(),
            completed_at: None,
            current_wave_index: 0,
            waves,
        }
    }
}

// ============================================================================
// Console logging macros
// ============================================================================

/// Logs an informational message.
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        println!("\x1b[33m⚠ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[33m⚠ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a file has been written.
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}

/// Logs a bold section header.
#[macro_export]
macro_rules! log_section {
    ($title:expr) => {
        println!("\x1b[1;36m═══ {} ═══\x1b[0m", $title);
    };
}
