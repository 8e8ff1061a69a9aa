//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - runs the fetch/aggregate pipeline for the fixed report month
//! - prints the report

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `caudit` binary.
///
/// Per-block failures inside the pipeline are logged and reflected in the
/// report as unavailable answers; a completed run always prints the report
/// and returns `Ok`.
pub fn run() -> Result<(), AppError> {
    init_tracing();

    let challenges = pipeline::run_report();
    println!("{}", crate::report::format::format_report(&challenges));

    Ok(())
}

/// Route diagnostics to stderr via tracing, leaving stdout to the report.
/// `RUST_LOG` overrides the default level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carbon_audit=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
