// src/client/mod.rs

//! Consumer side of the gateway: an HTTP fetch client with its own shape
//! validation, and the UI state model driven by it.

pub mod fetch;
pub mod shell;

pub use fetch::{ClientError, QuestionClient, QuestionSource};
pub use shell::{RevealState, Shell, ShellState};
