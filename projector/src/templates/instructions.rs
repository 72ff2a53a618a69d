//! Instruction document rendering
//!
//! Turns one resolution result into the markdown handed to an agent
//! tool. The tool argument selects wording only; the task set is
//! whatever the orchestrator resolved.

use crate::tools::Tool;
use crate::workflow::{NextAction, ResolvedWave, Resolution};

pub fn render(resolution: &Resolution, tool: Tool) -> String {
    let workflow = &resolution.workflow;
    match &resolution.next {
        NextAction::Wave(wave) => render_wave(resolution, wave, tool),
        NextAction::CheckpointPending { name, id, .. } => format!(
            "# Workflow: {}\n\n\
             Checkpoint wave **{}** (`{}`) is complete and awaiting confirmation.\n\
             No further waves will be offered until it is confirmed:\n\n\
             ```\nprojector advance {}\n```\n",
            workflow.name, name, id, workflow.id
        ),
        NextAction::Complete => {
            let mut doc = format!(
                "# Workflow: {}\n\nAll waves are complete.\n",
                workflow.name
            );
            if workflow.on_complete.update_state {
                doc.push_str("- Post-completion: update planning/STATE.md\n");
            }
            if workflow.on_complete.update_roadmap {
                doc.push_str("- Post-completion: update planning/ROADMAP.md\n");
            }
            doc
        }
        NextAction::Failed => format!(
            "# Workflow: {}\n\n\
             This execution was marked failed and cannot continue.\n\
             Re-initialize the workflow state to start over.\n",
            workflow.name
        ),
    }
}

fn render_wave(resolution: &Resolution, wave: &ResolvedWave, tool: Tool) -> String {
    let workflow = &resolution.workflow;
    let mut doc = String::new();

    doc.push_str(&format!(
        "# Workflow: {} — Wave {}/{}: {}\n\n",
        workflow.name,
        wave.index + 1,
        workflow.waves.len(),
        wave.name
    ));
    if !workflow.description.is_empty() {
        doc.push_str(&format!("{}\n\n", workflow.description));
    }

    doc.push_str(preamble(tool));
    doc.push_str("\n\n");

    if !resolution.context_files.is_empty() {
        doc.push_str("## Context Files\n\nRead these before starting any task:\n\n");
        for file in &resolution.context_files {
            doc.push_str(&format!("- `{}`\n", file));
        }
        doc.push('\n');
    }

    doc.push_str("## Tasks\n\n");
    doc.push_str(
        "Tasks in this wave are independent and may run in parallel. \
         The wave is complete only when every task is complete.\n\n",
    );
    for (number, task) in wave.tasks.iter().enumerate() {
        doc.push_str(&format!(
            "### {}. {} [{}]\n\n",
            number + 1,
            task.name,
            task.agent
        ));
        doc.push_str(&format!("- Prompt: `{}`\n", task.prompt));
        for input in &task.inputs {
            doc.push_str(&format!("- Input: `{}`\n", input));
        }
        if let Some(output) = &task.output {
            doc.push_str(&format!("- Output: `{}`\n", output));
        }
        let mut context: Vec<_> = task.context.iter().collect();
        context.sort();
        for (key, value) in context {
            doc.push_str(&format!("- Context: {} = {}\n", key, value));
        }
        doc.push('\n');
    }

    if wave.checkpoint {
        doc.push_str(
            "> This is a checkpoint wave. After its tasks complete, the workflow \
             halts until the checkpoint is explicitly confirmed.\n\n",
        );
    }

    doc.push_str("## Reporting\n\nReport each task as it progresses:\n\n```\n");
    for task in &wave.tasks {
        doc.push_str(&format!(
            "projector mark {} {} {} complete\n",
            workflow.id, wave.id, task.id
        ));
    }
    doc.push_str("```\n");

    doc
}

fn preamble(tool: Tool) -> &'static str {
    match tool {
        Tool::Claude => {
            "Dispatch one subagent per task below (the Task tool works well); \
             give each subagent its prompt file, inputs, and context verbatim."
        }
        Tool::Codex => {
            "Work through the tasks below, one conversation per task; \
             open each prompt file and follow it with the listed inputs and context."
        }
        Tool::GithubCopilot => {
            "For each task below, open the prompt file in the editor and let \
             Copilot work against the listed inputs; write results to the task output."
        }
        Tool::Opencode => {
            "Run each task below as a separate OpenCode session, passing the \
             prompt file and context shown."
        }
    }
}
