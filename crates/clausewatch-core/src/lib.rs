//! ClauseWatch Core — report data model, error taxonomy, configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClauseWatchConfig, DataPaths, PipelineSettings};
pub use error::{Error, ErrorKind, Result};
pub use types::*;
