//! Infrastructure adapters for credpoints.
//!
//! Implements the ports defined in `credpoints-core`: the SQLite tier rule
//! repository, the Credly badge fetcher and the OpenAI-compatible LLM
//! provider, plus config loading and data directory layout.

pub mod config;
pub mod credly;
pub mod filesystem;
pub mod llm;
pub mod sqlite;
