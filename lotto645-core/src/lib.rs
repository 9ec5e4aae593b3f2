pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod import;
pub mod models;
pub mod sampler;

pub use engine::AnalysisEngine;
pub use error::{EngineError, Result};
