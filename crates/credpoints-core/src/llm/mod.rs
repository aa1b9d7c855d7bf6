//! LLM provider abstractions for credpoints.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `PhrasingBackend`: provider + model settings shared by the name
//!   extractor and the response composer

pub mod box_provider;
pub mod phrasing;
pub mod provider;
