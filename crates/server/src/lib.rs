//! Server crate for the Madrasa learning-path backend.
//!
//! Contains the orchestrator that runs the agent pipeline, the runtime
//! configuration, and the HTTP surface that exposes both.

pub mod api;
pub mod config;
pub mod context;
pub mod orchestrator;

pub use api::{ApiError, GeneratePathResponse, build_app, routes, serve};
pub use config::Settings;
pub use context::AppContext;
pub use orchestrator::{
    LearningPathOrchestrator, OrchestrationError, PathOutcome, PathRun, Stage, StageOutcome, StageReport,
};

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
