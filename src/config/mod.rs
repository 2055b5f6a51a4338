pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::validation::{
    validate_archive_name, validate_non_empty_string, validate_path, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/phillipjohnson/text-adventure-tut/archive/master.zip";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "small-runner"))]
#[cfg_attr(
    feature = "cli",
    command(about = "A small tool that fetches and runs a bundled sample program")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_ARCHIVE_URL))]
    pub archive_url: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "text-adventure-tut.zip"))]
    pub archive_name: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub work_dir: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "python"))]
    pub program: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "adventuretutorial/game.py"))]
    pub script: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable system monitoring"))]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn archive_url(&self) -> &str {
        &self.archive_url
    }

    fn archive_name(&self) -> &str {
        &self.archive_name
    }

    fn work_dir(&self) -> &str {
        &self.work_dir
    }

    fn program(&self) -> &str {
        &self.program
    }

    fn script(&self) -> &str {
        &self.script
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("archive_url", &self.archive_url)?;
        validate_archive_name("archive_name", &self.archive_name)?;
        validate_path("work_dir", &self.work_dir)?;
        validate_non_empty_string("program", &self.program)?;
        validate_non_empty_string("script", &self.script)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            archive_name: "text-adventure-tut.zip".to_string(),
            work_dir: ".".to_string(),
            program: "python".to_string(),
            script: "adventuretutorial/game.py".to_string(),
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = base_config();
        config.archive_url = "ftp://example.com/a.zip".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_archive_name_without_zip_suffix() {
        let mut config = base_config();
        config.archive_name = "sample.tar.gz".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_program() {
        let mut config = base_config();
        config.program = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
