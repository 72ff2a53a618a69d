//! Presentation and static content
//!
//! Everything here consumes fully-resolved data from the orchestrator or
//! is static text written out by the scaffolding commands:
//! - **instructions**: markdown rendering of a resolution, per tool
//! - **plan**: structured (JSON-serializable) rendering of the same
//! - **workflows**: example workflow documents for `init`
//! - **prompts**: agent prompt bodies for `prompts`
//! - **slash**: per-tool slash command files

pub mod instructions;
pub mod plan;
pub mod prompts;
pub mod slash;
pub mod workflows;
