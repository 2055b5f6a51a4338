use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Archive download failed: {0}")]
    DownloadError(#[from] reqwest::Error),

    #[error("Archive download failed: HTTP {status} from {url}")]
    DownloadStatusError { url: String, status: u16 },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Archive entry has an unsafe path: {name}")]
    UnsafeEntryError { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to launch '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Quitting at user request")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Archive,
    Process,
    Config,
    System,
    Cancellation,
}

impl RunnerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DownloadError(_) | Self::DownloadStatusError { .. } => ErrorCategory::Network,
            Self::ZipError(_) | Self::UnsafeEntryError { .. } => ErrorCategory::Archive,
            Self::SpawnError { .. } => ErrorCategory::Process,
            Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
            Self::Cancelled => ErrorCategory::Cancellation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cancelled => ErrorSeverity::Low,
            Self::DownloadError(_) | Self::DownloadStatusError { .. } => ErrorSeverity::Medium,
            Self::ZipError(_)
            | Self::UnsafeEntryError { .. }
            | Self::SpawnError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DownloadError(e) => format!("Could not reach the archive server: {}", e),
            Self::DownloadStatusError { url, status } => {
                format!("The server at {} answered with HTTP {}", url, status)
            }
            Self::ZipError(e) => format!("The downloaded archive could not be read: {}", e),
            Self::UnsafeEntryError { name } => format!(
                "The archive contains an entry that escapes the target directory: {}",
                name
            ),
            Self::SpawnError { program, source } => {
                format!("Could not start '{}': {}", program, source)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::IoError(e) => format!("Filesystem operation failed: {}", e),
            Self::SerializationError(e) => format!("Report serialization failed: {}", e),
            Self::Cancelled => "Quitting at user request".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DownloadError(_) | Self::DownloadStatusError { .. } => {
                "Check the network connection and the --archive-url value, then run again"
                    .to_string()
            }
            Self::ZipError(_) | Self::UnsafeEntryError { .. } => {
                "Verify that the URL points to a valid zip archive".to_string()
            }
            Self::SpawnError { program, .. } => {
                format!("Make sure '{}' is installed and on PATH", program)
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Correct the value passed via --{}", field.replace('_', "-"))
            }
            Self::IoError(_) => {
                "Check permissions and free space in the working directory".to_string()
            }
            Self::SerializationError(_) => "Re-run with --verbose and report the issue".to_string(),
            Self::Cancelled => "No action needed".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_low_severity() {
        let err = RunnerError::Cancelled;
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Cancellation);
    }

    #[test]
    fn test_download_status_is_retryable() {
        let err = RunnerError::DownloadStatusError {
            url: "http://example.com/a.zip".to_string(),
            status: 503,
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.user_friendly_message().contains("503"));
    }

    #[test]
    fn test_spawn_error_names_program() {
        let err = RunnerError::SpawnError {
            program: "python".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.recovery_suggestion().contains("python"));
        assert_eq!(err.category(), ErrorCategory::Process);
    }
}
