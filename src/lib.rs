pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::EnvConfig;
pub use core::{engine::ReportEngine, pipeline::StatsPipeline};
pub use utils::error::{ReportError, Result};
