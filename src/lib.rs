pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalWorkspace, CliConfig};

pub use core::{engine::RunnerEngine, pipeline::SamplePipeline};
pub use utils::error::{Result, RunnerError};
