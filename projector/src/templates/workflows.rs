//! Example workflow documents written by `projector init`

pub const RESEARCH_WORKFLOW: &str = r#"# Research Workflow
# Parallel domain investigation before proposal creation

version: "1.0"
id: research
name: Domain Research
description: Investigate domain knowledge, stack options, architecture patterns, and pitfalls before creating a proposal.

requires:
  variables:
    - topic

context_files:
  - planning/PROJECT.md
  - planning/STATE.md

waves:
  - id: investigate
    name: Parallel Investigation
    tasks:
      - id: stack-analysis
        name: Stack Analysis
        agent: research
        prompt: commands/research-stack.md
        output: research/investigations/stack-analysis.md
        context:
          topic: "{{topic}}"

      - id: feature-landscape
        name: Feature Landscape
        agent: research
        prompt: commands/research-features.md
        output: research/investigations/feature-landscape.md
        context:
          topic: "{{topic}}"

      - id: architecture
        name: Architecture Patterns
        agent: research
        prompt: commands/research-architecture.md
        output: research/investigations/architecture.md
        context:
          topic: "{{topic}}"

      - id: pitfalls
        name: Pitfall Research
        agent: research
        prompt: commands/research-pitfalls.md
        output: research/investigations/pitfalls.md
        context:
          topic: "{{topic}}"

  - id: synthesize
    name: Synthesize Findings
    tasks:
      - id: summary
        name: Create Research Summary
        agent: planning
        prompt: commands/research-synthesize.md
        inputs:
          - research/investigations/stack-analysis.md
          - research/investigations/feature-landscape.md
          - research/investigations/architecture.md
          - research/investigations/pitfalls.md
        output: research/SUMMARY.md

on_complete:
  update_state: true
"#;

pub const EXECUTE_WORKFLOW: &str = r#"# Execute Workflow
# Execute tasks from a change proposal

version: "1.0"
id: execute
name: Task Execution
description: Execute tasks from an approved change proposal, wave by wave.

requires:
  variables:
    - change_id
  files:
    - changes/{{change_id}}/tasks.md

context_files:
  - planning/STATE.md
  - planning/PROJECT.md

waves:
  - id: execute-tasks
    name: Execute Change Tasks
    tasks:
      - id: executor
        name: Task Executor
        agent: execution
        prompt: commands/execute-task.md
        inputs:
          - changes/{{change_id}}/tasks.md
          - changes/{{change_id}}/proposal.md
        context:
          change_id: "{{change_id}}"

on_complete:
  update_state: true
  update_roadmap: true
"#;

pub const REVIEW_WORKFLOW: &str = r#"# Review Workflow
# Adversarial review of a change proposal

version: "1.0"
id: review
name: Adversarial Review
description: Stress-test a proposal from security, scale, and edge case perspectives.

requires:
  variables:
    - change_id
  files:
    - changes/{{change_id}}/proposal.md

context_files:
  - planning/PROJECT.md

waves:
  - id: parallel-review
    name: Parallel Reviews
    tasks:
      - id: security-review
        name: Security Review
        agent: review
        prompt: commands/review-security.md
        inputs:
          - changes/{{change_id}}/proposal.md
        output: changes/{{change_id}}/reviews/security.md
        context:
          change_id: "{{change_id}}"

      - id: scale-review
        name: Scale Review
        agent: review
        prompt: commands/review-scale.md
        inputs:
          - changes/{{change_id}}/proposal.md
        output: changes/{{change_id}}/reviews/scale.md
        context:
          change_id: "{{change_id}}"

      - id: edge-review
        name: Edge Case Review
        agent: review
        prompt: commands/review-edge.md
        inputs:
          - changes/{{change_id}}/proposal.md
        output: changes/{{change_id}}/reviews/edge-cases.md
        context:
          change_id: "{{change_id}}"

  - id: review-checkpoint
    name: Review Checkpoint
    checkpoint: true
    tasks:
      - id: compile-review
        name: Compile Review Summary
        agent: planning
        prompt: commands/review-compile.md
        inputs:
          - changes/{{change_id}}/reviews/security.md
          - changes/{{change_id}}/reviews/scale.md
          - changes/{{change_id}}/reviews/edge-cases.md
        output: changes/{{change_id}}/REVIEW.md

on_complete:
  update_state: true
"#;

/// (workflow id, document) pairs written by `init`.
pub fn example_workflows() -> [(&'static str, &'static str); 3] {
    [
        ("research", RESEARCH_WORKFLOW),
        ("execute", EXECUTE_WORKFLOW),
        ("review", REVIEW_WORKFLOW),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::parser::parse_document;

    #[test]
    fn shipped_examples_parse_and_validate() {
        for (name, doc) in example_workflows() {
            let definition = parse_document(name, doc)
                .unwrap_or_else(|e| panic!("example '{}' failed to parse: {e}", name));
            assert_eq!(definition.id, name);
            assert!(!definition.waves.is_empty());
        }
    }

    #[test]
    fn review_example_ends_in_a_checkpoint() {
        let definition = parse_document("review", REVIEW_WORKFLOW).unwrap();
        assert!(definition.waves.last().unwrap().checkpoint);
    }
}
