//! Shared domain types for credpoints.
//!
//! This crate contains the core domain types used across the workspace:
//! certification tiers and point values, badge snapshots, query results,
//! conversation state, LLM request shapes, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod badge;
pub mod catalog;
pub mod config;
pub mod error;
pub mod llm;
pub mod query;
pub mod session;
