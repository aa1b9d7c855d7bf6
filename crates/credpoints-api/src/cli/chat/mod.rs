//! Interactive chat session.
//!
//! Each line the user types is one turn through the session orchestrator;
//! the conversation keeps a running credit point total until the session
//! ends. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
