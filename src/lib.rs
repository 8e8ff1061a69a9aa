//! `carbon-audit` library crate.
//!
//! The binary (`caudit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future multi-meter runs, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod aggregate;
pub mod app;
pub mod data;
pub mod domain;
pub mod error;
pub mod report;
