//! Projector: scaffold and drive declarative multi-agent workflows
//!
//! A workflow is a YAML document of ordered waves, each wave an ordered
//! group of tasks assigned to agent roles. This crate parses those
//! documents, resolves `{{variable}}` templates, renders per-tool
//! instruction documents and machine-readable plans, and tracks execution
//! progress on disk so a run can be inspected, resumed, or audited.

pub mod commands;
pub mod config;
pub mod templates;
pub mod tools;
pub mod workflow;
