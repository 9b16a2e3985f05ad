//! ClauseWatch runtime — the compliance analysis pipeline.
//!
//! All collaborators (loader, sentiment scorer, cache, LLM orchestrator) are
//! built once at startup and injected into [`ComplianceCoordinator`].

pub mod coordinator;
pub mod types;

pub use coordinator::ComplianceCoordinator;
pub use types::*;
