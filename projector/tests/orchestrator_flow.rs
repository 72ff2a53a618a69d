//! End-to-end orchestrator scenarios over a real project directory

use projector::tools::Tool;
use projector::workflow::{self, orchestrator, NextAction, WorkflowError};
use projector_sdk::TaskStatus;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;
use tokio::fs;

const TWO_WAVES: &str = r#"
id: pipeline
name: Pipeline
description: Two plain waves.
waves:
  - id: first
    name: First
    tasks:
      - { id: a, name: Task A, agent: research, prompt: commands/a.md }
      - { id: b, name: Task B, agent: research, prompt: commands/b.md }
  - id: second
    name: Second
    tasks:
      - { id: c, name: Task C, agent: execution, prompt: commands/c.md }
"#;

const GATED: &str = r#"
id: gated
name: Gated
waves:
  - id: review
    name: Review
    checkpoint: true
    tasks:
      - { id: check, name: Check, agent: review, prompt: commands/check.md }
  - id: ship
    name: Ship
    tasks:
      - { id: deploy, name: Deploy, agent: execution, prompt: commands/deploy.md }
"#;

const NEEDS_TOPIC: &str = r#"
id: research
name: Research
requires:
  variables:
    - topic
waves:
  - id: only
    name: Only
    tasks:
      - id: t
        name: T
        agent: research
        prompt: "commands/{{topic}}.md"
        context:
          topic: "{{topic}}"
"#;

const NEEDS_FILE: &str = r#"
id: execute
name: Execute
requires:
  variables:
    - change_id
  files:
    - "changes/{{change_id}}/tasks.md"
waves:
  - id: only
    name: Only
    tasks:
      - { id: t, name: T, agent: execution, prompt: commands/execute.md }
"#;

async fn project_with(documents: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let workflows = dir.path().join(".projector").join("workflows");
    fs::create_dir_all(&workflows).await.unwrap();
    for (name, doc) in documents {
        fs::write(workflows.join(format!("{}.yaml", name)), doc)
            .await
            .unwrap();
    }
    dir
}

fn no_vars() -> HashMap<String, String> {
    HashMap::new()
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn offered_wave(name: &str, root: &Path, variables: &HashMap<String, String>) -> NextAction {
    orchestrator::resolve_next(name, root, variables)
        .await
        .unwrap()
        .next
}

#[tokio::test]
async fn fresh_project_offers_the_first_wave_in_order() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;

    match offered_wave("pipeline", project.path(), &no_vars()).await {
        NextAction::Wave(wave) => {
            assert_eq!(wave.index, 0);
            assert_eq!(wave.id, "first");
            let ids: Vec<_> = wave.tasks.iter().map(|t| t.id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b"]);
        }
        other => panic!("expected first wave, got {other:?}"),
    }

    // First successful resolution created the execution record.
    let state = orchestrator::load_execution_state("pipeline", project.path())
        .await
        .unwrap()
        .expect("state created on first resolution");
    assert_eq!(state.current_wave_index, 0);
    assert_eq!(state.workflow.id, "pipeline");
}

#[tokio::test]
async fn completing_a_wave_moves_to_the_next() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;
    let root = project.path();

    // Resolve once to create state, then report both tasks complete.
    offered_wave("pipeline", root, &no_vars()).await;
    orchestrator::update_task_status("pipeline", root, "first", "a", TaskStatus::Complete)
        .await
        .unwrap();
    let state =
        orchestrator::update_task_status("pipeline", root, "first", "b", TaskStatus::Complete)
            .await
            .unwrap();
    assert_eq!(state.current_wave_index, 1);

    match offered_wave("pipeline", root, &no_vars()).await {
        NextAction::Wave(wave) => assert_eq!(wave.id, "second"),
        other => panic!("expected second wave, got {other:?}"),
    }
}

#[tokio::test]
async fn completing_every_wave_completes_the_workflow() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;
    let root = project.path();

    offered_wave("pipeline", root, &no_vars()).await;
    for (wave, task) in [("first", "a"), ("first", "b"), ("second", "c")] {
        orchestrator::update_task_status("pipeline", root, wave, task, TaskStatus::Complete)
            .await
            .unwrap();
    }

    let state = orchestrator::load_execution_state("pipeline", root)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.status, projector_sdk::WorkflowStatus::Complete);
    assert!(state.completed_at.is_some());

    assert!(matches!(
        offered_wave("pipeline", root, &no_vars()).await,
        NextAction::Complete
    ));
}

#[tokio::test]
async fn missing_declared_variable_fails_before_resolution() {
    let project = project_with(&[("research", NEEDS_TOPIC)]).await;

    let err = orchestrator::resolve_next("research", project.path(), &no_vars())
        .await
        .unwrap_err();
    match err {
        WorkflowError::MissingRequirement {
            workflow,
            requirement,
        } => {
            assert_eq!(workflow, "research");
            assert!(requirement.contains("topic"));
        }
        other => panic!("expected MissingRequirement, got {other:?}"),
    }

    // The failed call must not have created state.
    assert!(orchestrator::load_execution_state("research", project.path())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn supplied_variable_flows_into_task_scope() {
    let project = project_with(&[("research", NEEDS_TOPIC)]).await;

    match offered_wave("research", project.path(), &vars(&[("topic", "caching")])).await {
        NextAction::Wave(wave) => {
            assert_eq!(wave.tasks[0].prompt, "commands/caching.md");
            assert_eq!(wave.tasks[0].context.get("topic").unwrap(), "caching");
        }
        other => panic!("expected wave, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_required_file_is_reported_by_resolved_path() {
    let project = project_with(&[("execute", NEEDS_FILE)]).await;
    let variables = vars(&[("change_id", "42")]);

    let err = orchestrator::resolve_next("execute", project.path(), &variables)
        .await
        .unwrap_err();
    match err {
        WorkflowError::MissingRequirement { requirement, .. } => {
            assert!(requirement.contains("changes/42/tasks.md"));
        }
        other => panic!("expected MissingRequirement, got {other:?}"),
    }

    // Once the file exists the same call succeeds.
    let change_dir = project.path().join("changes/42");
    fs::create_dir_all(&change_dir).await.unwrap();
    fs::write(change_dir.join("tasks.md"), "- [ ] do it\n")
        .await
        .unwrap();
    assert!(orchestrator::resolve_next("execute", project.path(), &variables)
        .await
        .is_ok());
}

#[tokio::test]
async fn checkpoint_blocks_until_explicitly_advanced() {
    let project = project_with(&[("gated", GATED)]).await;
    let root = project.path();

    offered_wave("gated", root, &no_vars()).await;
    let state = orchestrator::update_task_status("gated", root, "review", "check", TaskStatus::Complete)
        .await
        .unwrap();

    // All checkpoint tasks complete, but the cursor must not move.
    assert_eq!(state.current_wave_index, 0);
    assert!(state.waves[0].is_complete());

    match offered_wave("gated", root, &no_vars()).await {
        NextAction::CheckpointPending { id, .. } => assert_eq!(id, "review"),
        other => panic!("expected pending checkpoint, got {other:?}"),
    }

    let state = orchestrator::advance_checkpoint("gated", root).await.unwrap();
    assert_eq!(state.current_wave_index, 1);

    match offered_wave("gated", root, &no_vars()).await {
        NextAction::Wave(wave) => assert_eq!(wave.id, "ship"),
        other => panic!("expected ship wave, got {other:?}"),
    }
}

#[tokio::test]
async fn advance_without_a_completed_checkpoint_is_rejected() {
    let project = project_with(&[("gated", GATED)]).await;
    let root = project.path();

    offered_wave("gated", root, &no_vars()).await;
    let err = orchestrator::advance_checkpoint("gated", root).await.unwrap_err();
    assert!(matches!(err, WorkflowError::NoPendingCheckpoint(name) if name == "gated"));
}

#[tokio::test]
async fn instructions_and_plan_describe_the_same_task_set() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;

    let instructions = orchestrator::generate_instructions(
        "pipeline",
        Tool::Claude,
        project.path(),
        &no_vars(),
    )
    .await
    .unwrap();
    let plan = orchestrator::generate_plan("pipeline", Tool::Claude, project.path(), &no_vars())
        .await
        .unwrap();

    let plan_json = serde_json::to_value(&plan).unwrap();
    assert_eq!(plan_json["next"]["status"], "wave");
    for task in plan_json["next"]["tasks"].as_array().unwrap() {
        let name = task["name"].as_str().unwrap();
        let prompt = task["prompt"].as_str().unwrap();
        assert!(instructions.contains(name));
        assert!(instructions.contains(prompt));
    }
}

#[tokio::test]
async fn task_transitions_are_forward_only() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;
    let root = project.path();

    offered_wave("pipeline", root, &no_vars()).await;
    orchestrator::update_task_status("pipeline", root, "first", "a", TaskStatus::Running)
        .await
        .unwrap();
    orchestrator::update_task_status("pipeline", root, "first", "a", TaskStatus::Complete)
        .await
        .unwrap();

    let err =
        orchestrator::update_task_status("pipeline", root, "first", "a", TaskStatus::Running)
            .await
            .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
}

#[tokio::test]
async fn unknown_wave_and_task_are_named_in_errors() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;
    let root = project.path();
    offered_wave("pipeline", root, &no_vars()).await;

    let err = orchestrator::update_task_status("pipeline", root, "nope", "a", TaskStatus::Running)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownWave { wave, .. } if wave == "nope"));

    let err = orchestrator::update_task_status("pipeline", root, "first", "zz", TaskStatus::Running)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownTask { task, .. } if task == "zz"));
}

#[tokio::test]
async fn failed_workflows_accept_no_further_transitions() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;
    let root = project.path();

    offered_wave("pipeline", root, &no_vars()).await;
    orchestrator::mark_failed("pipeline", root).await.unwrap();

    let err = orchestrator::update_task_status("pipeline", root, "first", "a", TaskStatus::Running)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::AlreadyTerminal { .. }));

    assert!(matches!(
        offered_wave("pipeline", root, &no_vars()).await,
        NextAction::Failed
    ));
}

#[tokio::test]
async fn edited_definition_with_different_wave_count_is_fatal() {
    let project = project_with(&[("pipeline", TWO_WAVES)]).await;
    let root = project.path();
    offered_wave("pipeline", root, &no_vars()).await;

    // Rewrite the document with an extra wave while state exists.
    let edited = format!(
        "{}  - id: extra\n    name: Extra\n    tasks:\n      - {{ id: x, name: X, agent: review, prompt: commands/x.md }}\n",
        TWO_WAVES
    );
    let doc = root.join(".projector/workflows/pipeline.yaml");
    fs::write(&doc, edited).await.unwrap();

    let err = orchestrator::resolve_next("pipeline", root, &no_vars())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::StateIo { .. }));
}

#[tokio::test]
async fn listing_respects_missing_directory_and_sorting() {
    let empty = TempDir::new().unwrap();
    assert!(workflow::list_workflows(empty.path()).await.is_empty());

    let project = project_with(&[("pipeline", TWO_WAVES), ("gated", GATED)]).await;
    assert_eq!(
        workflow::list_workflows(project.path()).await,
        vec!["gated".to_string(), "pipeline".to_string()]
    );
}
