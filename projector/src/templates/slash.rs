//! Per-tool slash command files
//!
//! Each supported tool gets the same skill-driven command bodies under
//! its own directory convention, wrapped in managed-block markers so
//! regeneration can rewrite our section without touching user edits.

use crate::config::{MARKER_END, MARKER_START};
use crate::tools::Tool;

pub const COMMAND_IDS: [&str; 5] = ["proposal", "apply", "archive", "research", "review"];

/// Relative file path for a command under the given tool's convention.
pub fn command_path(tool: Tool, id: &str) -> String {
    match tool {
        Tool::Claude => format!(".claude/commands/projector/{}.md", id),
        Tool::Codex => format!(".codex/prompts/projector-{}.md", id),
        Tool::GithubCopilot => format!(".github/prompts/projector-{}.prompt.md", id),
        Tool::Opencode => format!(".opencode/command/projector-{}.md", id),
    }
}

fn description(id: &str) -> &'static str {
    match id {
        "proposal" => "Scaffold a new Projector change and validate strictly.",
        "apply" => "Implement an approved Projector change and keep tasks in sync.",
        "archive" => "Archive a deployed Projector change and update specs.",
        "research" => "Conduct research via Projector skills (stack, architecture, features, pitfalls).",
        "review" => "Conduct adversarial review via the Projector review skill.",
        _ => "",
    }
}

fn frontmatter(tool: Tool, id: &str) -> String {
    match tool {
        Tool::Claude => format!(
            "---\nname: Projector: {}\ndescription: {}\ncategory: Projector\ntags: [projector, {}]\n---",
            title_case(id),
            description(id),
            id
        ),
        _ => format!("---\ndescription: {}\n---", description(id)),
    }
}

fn body(id: &str) -> String {
    let input = match id {
        "proposal" => "The change request is provided in the prompt arguments. Use it to scope the change and name the change ID.",
        "apply" => "The change ID or implementation request is provided in the prompt arguments.",
        "archive" => "The change ID is provided in the prompt arguments.",
        "research" => "The research topic is provided in the prompt arguments, optionally with a focus (stack, architecture, features, pitfalls).",
        "review" => "The change ID or review target is provided in the prompt arguments.",
        _ => "",
    };

    format!(
        "Use the Projector agent skill `projector-{id}` as the source of truth for this workflow.\n\n\
         **Input**\n{input}\n\n\
         **Instructions**\n\
         1. Open the Projector skill file for `projector-{id}` in your agent skills directory.\n\
         2. Follow the skill instructions exactly, using any supplied arguments or context.\n\n\
         **Guardrails**\n\
         - If the skill file is missing, ask the user to run `projector init`, then stop.\n\
         - Do not duplicate the full workflow here; defer to the skill guidance.",
    )
}

/// All (relative path, file content) pairs to write for a tool.
pub fn command_files(tool: Tool) -> Vec<(String, String)> {
    COMMAND_IDS
        .iter()
        .map(|id| {
            let content = format!(
                "{}\n{}\n{}\n{}\n",
                frontmatter(tool, id),
                MARKER_START,
                body(id),
                MARKER_END
            );
            (command_path(tool, id), content)
        })
        .collect()
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_gets_all_commands() {
        for tool in Tool::ALL {
            let files = command_files(tool);
            assert_eq!(files.len(), COMMAND_IDS.len());
            for (path, content) in files {
                assert!(path.ends_with(".md"));
                assert!(content.contains(MARKER_START));
                assert!(content.contains(MARKER_END));
                assert!(content.contains("projector-"));
            }
        }
    }

    #[test]
    fn paths_follow_each_tools_convention() {
        assert_eq!(
            command_path(Tool::Claude, "proposal"),
            ".claude/commands/projector/proposal.md"
        );
        assert_eq!(
            command_path(Tool::Opencode, "review"),
            ".opencode/command/projector-review.md"
        );
    }
}
