//! Agent prompt bodies written by `projector prompts`
//!
//! Plain markdown consumed verbatim by agents; the core never interprets
//! these beyond resolving the paths that point at them.

pub const RESEARCH_STACK: &str = r#"# Stack Analysis Research

## Objective
Evaluate technology choices and stack options for: **{{topic}}**

## Process
1. Identify the domain and key technical requirements
2. Research current best practices and industry standards
3. Evaluate library/framework ecosystem and maturity
4. Document trade-offs between options

## Output Format
Write your findings as markdown with sections for Requirements, Options
Evaluated (table with pros/cons/maturity), a Recommendation with clear
rationale, Alternatives, and References.
"#;

pub const RESEARCH_FEATURES: &str = r#"# Feature Landscape Research

## Objective
Map the feature landscape for: **{{topic}}**

## Process
1. Research what competitors/similar projects offer
2. Identify table-stakes features (must have)
3. Identify differentiators (competitive advantage)
4. Prioritize based on user value and effort

## Output Format
Sections: Market Analysis, Table Stakes, Differentiators, Nice to Have,
and a prioritization matrix (feature / user value / effort / priority).
"#;

pub const RESEARCH_ARCHITECTURE: &str = r#"# Architecture Research

## Objective
Research architecture patterns and design considerations for: **{{topic}}**

## Process
1. Identify architectural requirements (scale, latency, consistency)
2. Research relevant architecture patterns
3. Evaluate trade-offs for this specific use case
4. Document key design decisions

## Output Format
Sections: Requirements, Architecture Patterns Considered (description,
when to use, trade-offs), Recommended Architecture, Key Design Decisions,
Integration Points.
"#;

pub const RESEARCH_PITFALLS: &str = r#"# Pitfalls Research

## Objective
Identify common mistakes and pitfalls for: **{{topic}}**

## Process
1. Research common failures in this domain
2. Look for post-mortems and lessons learned
3. Identify anti-patterns to avoid
4. Document mitigation strategies

## Output Format
For each pitfall: what goes wrong, why it happens, impact, mitigation,
detection. Close with anti-patterns to avoid and success patterns.
"#;

pub const RESEARCH_SYNTHESIZE: &str = r#"# Synthesize Research Findings

## Objective
Combine all investigation files into actionable recommendations.

## Inputs
Read every investigation file listed for this task: stack analysis,
feature landscape, architecture patterns, and pitfalls research.

## Output Format

# Research Summary: {{topic}}

Sections: Executive Summary (2-3 sentences), Stack Recommendation,
Feature Prioritization (phase 1 / phase 2 / future), Architecture
Decision, Risk Mitigation (top pitfalls and how we avoid them),
Implications for Roadmap, Open Questions.
"#;

pub const REVIEW_SECURITY: &str = r#"# Security Review

## Objective
Find security vulnerabilities in the proposed changes for: **{{change_id}}**

## Perspective
You are a security researcher. Assume attackers are sophisticated and
motivated. Find ways to exploit, bypass, or abuse the proposed system.

## Process
1. Read the proposal and affected specs
2. Map the attack surface
3. Identify vulnerabilities: auth bypasses, injection points, data
   exposure, CSRF/SSRF, cryptographic weaknesses, race conditions

## Output Format
Attack Surface, then findings as
`[CRITICAL/HIGH/MEDIUM/LOW]: title` with location, attack vector,
impact, and required fix. Close with a verdict: approved, requires
changes, or needs redesign.
"#;

pub const REVIEW_SCALE: &str = r#"# Scale Review

## Objective
Identify performance bottlenecks and scaling issues in: **{{change_id}}**

## Perspective
What breaks at 10x, 100x, 1000x scale? Think about request volume, data
volume, user concurrency, and geographic distribution.

## Process
1. Review data access patterns and N+1 queries
2. Find memory-intensive operations and blocking calls in hot paths
3. Evaluate caching opportunities and horizontal scaling implications

## Output Format
Findings as `[HIGH/MEDIUM/LOW]: title` with component, current behavior,
what breaks at scale, and mitigation. Close with a verdict.
"#;

pub const REVIEW_EDGE: &str = r#"# Edge Case Review

## Objective
Find edge cases and unexpected behaviors in: **{{change_id}}**

## Perspective
Think like a chaos monkey. What happens when inputs are at boundaries
(empty, null, huge, unicode), operations fail partway through, or timing
is unexpected (slow, fast, concurrent)?

## Process
1. Map all inputs and their valid ranges
2. Test boundary conditions and partial failures
3. Check error handling paths and concurrency scenarios

## Output Format
Input boundary table, findings as `[HIGH/MEDIUM/LOW]: title` with
trigger, current behavior, expected behavior, and fix. Close with a
verdict.
"#;

pub const EXECUTE_TASK: &str = r#"# Task Executor

## Objective
Execute the next pending task from the change proposal: **{{change_id}}**

## Process
1. Read the tasks.md file for this change
2. Find the first task with status `pending`
3. Read any files listed in the task's "Files" field
4. Perform the action described
5. Run the verification command if specified
6. If verification passes, mark the task `complete` in tasks.md and
   commit with message: `feat({{change_id}}): [task name]`
7. If verification fails, report the failure and do not mark complete
8. Update STATE.md with progress notes

## Important
- Only execute ONE task per invocation
- Always verify before marking complete
- Stop if verification fails
"#;

/// (file name, body) pairs written into `.projector/commands/`.
pub fn prompt_files() -> [(&'static str, &'static str); 9] {
    [
        ("research-stack.md", RESEARCH_STACK),
        ("research-features.md", RESEARCH_FEATURES),
        ("research-architecture.md", RESEARCH_ARCHITECTURE),
        ("research-pitfalls.md", RESEARCH_PITFALLS),
        ("research-synthesize.md", RESEARCH_SYNTHESIZE),
        ("review-security.md", REVIEW_SECURITY),
        ("review-scale.md", REVIEW_SCALE),
        ("review-edge.md", REVIEW_EDGE),
        ("execute-task.md", EXECUTE_TASK),
    ]
}
