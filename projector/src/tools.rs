//! The closed set of supported agent tools
//!
//! A tool selects presentation only — every tool receives the same
//! resolved task set. Strings entering from outside the CLI go through
//! [`Tool::from_str`], which rejects anything outside the set instead of
//! passing it through.

use crate::workflow::WorkflowError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tool {
    Claude,
    Codex,
    GithubCopilot,
    Opencode,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Claude, Tool::Codex, Tool::GithubCopilot, Tool::Opencode];

    /// Stable identifier used in file paths and plan output.
    pub fn id(self) -> &'static str {
        match self {
            Tool::Claude => "claude",
            Tool::Codex => "codex",
            Tool::GithubCopilot => "github-copilot",
            Tool::Opencode => "opencode",
        }
    }

    /// Human-readable name for console output.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Claude => "Claude Code",
            Tool::Codex => "Codex",
            Tool::GithubCopilot => "GitHub Copilot",
            Tool::Opencode => "OpenCode",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Tool {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| WorkflowError::UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(tool.id().parse::<Tool>().unwrap(), tool);
        }
    }

    #[test]
    fn unknown_tool_is_an_explicit_error() {
        let err = "cursor".parse::<Tool>().unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownTool(name) if name == "cursor"));
    }
}
