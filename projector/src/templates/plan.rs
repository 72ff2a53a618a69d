//! Machine-readable execution plans
//!
//! The structured twin of the instruction document: same resolution
//! result, serialized instead of prose.

use crate::tools::Tool;
use crate::workflow::{NextAction, ResolvedTask, Resolution};
use projector_sdk::OnComplete;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
    pub workflow: PlanWorkflow,
    pub tool: String,
    pub context_files: Vec<String>,
    pub on_complete: OnComplete,
    pub next: PlanNext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanWorkflow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_waves: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanNext {
    Wave {
        index: usize,
        id: String,
        name: String,
        checkpoint: bool,
        tasks: Vec<ResolvedTask>,
    },
    CheckpointPending {
        index: usize,
        id: String,
        name: String,
    },
    Complete,
    Failed,
}

pub fn build(resolution: &Resolution, tool: Tool) -> ExecutionPlan {
    let workflow = &resolution.workflow;
    let next = match &resolution.next {
        NextAction::Wave(wave) => PlanNext::Wave {
            index: wave.index,
            id: wave.id.clone(),
            name: wave.name.clone(),
            checkpoint: wave.checkpoint,
            tasks: wave.tasks.clone(),
        },
        NextAction::CheckpointPending { index, id, name } => PlanNext::CheckpointPending {
            index: *index,
            id: id.clone(),
            name: name.clone(),
        },
        NextAction::Complete => PlanNext::Complete,
        NextAction::Failed => PlanNext::Failed,
    };

    ExecutionPlan {
        workflow: PlanWorkflow {
            id: workflow.id.clone(),
            name: workflow.name.clone(),
            description: workflow.description.clone(),
            total_waves: workflow.waves.len(),
        },
        tool: tool.id().to_string(),
        context_files: resolution.context_files.clone(),
        on_complete: workflow.on_complete,
        next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::parser::parse_document;
    use crate::workflow::ResolvedWave;
    use projector_sdk::AgentRole;
    use std::collections::HashMap;

    #[test]
    fn plan_serializes_with_a_tagged_next_step() {
        let definition = parse_document(
            "demo",
            r#"
id: demo
name: Demo
waves:
  - id: only
    tasks:
      - { id: t, name: T, agent: execution, prompt: commands/t.md }
"#,
        )
        .unwrap();

        let resolution = Resolution {
            context_files: vec![],
            next: NextAction::Wave(ResolvedWave {
                index: 0,
                id: "only".to_string(),
                name: "only".to_string(),
                checkpoint: false,
                tasks: vec![ResolvedTask {
                    id: "t".to_string(),
                    name: "T".to_string(),
                    agent: AgentRole::Execution,
                    prompt: "commands/t.md".to_string(),
                    inputs: vec![],
                    output: None,
                    context: HashMap::new(),
                }],
            }),
            workflow: definition,
        };

        let plan = build(&resolution, Tool::Opencode);
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["tool"], "opencode");
        assert_eq!(json["workflow"]["id"], "demo");
        assert_eq!(json["next"]["status"], "wave");
        assert_eq!(json["next"]["tasks"][0]["agent"], "execution");
        assert_eq!(json["on_complete"]["update_state"], false);
    }
}
