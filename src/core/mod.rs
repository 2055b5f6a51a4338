pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{EnvReport, ExtractReport, FetchReport, LaunchReport, RunReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Workspace};
pub use crate::utils::error::Result;
