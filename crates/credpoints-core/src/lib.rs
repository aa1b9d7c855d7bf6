//! Business logic and repository trait definitions for credpoints.
//!
//! This crate defines the "ports" (catalog, fetcher, repository and LLM
//! provider traits) that the infrastructure layer implements, plus the
//! decision engine, response composer and session orchestrator built on top
//! of them. It depends only on `credpoints-types` -- never on
//! `credpoints-infra` or any database/IO crate.

pub mod badge;
pub mod catalog;
pub mod compose;
pub mod engine;
pub mod llm;
pub mod repository;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
