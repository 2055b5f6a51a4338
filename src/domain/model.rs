use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Suffix the archive publisher appends to the top-level directory
/// inside branch archives.
pub const EXTRACT_DIR_SUFFIX: &str = "-master";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvReport {
    pub exe_path: String,
    pub version: String,
    pub path_entries: Vec<String>,
    pub host: Option<String>,
}

impl EnvReport {
    pub fn capture(path_var: &str, host: Option<String>) -> Self {
        let exe_path = std::env::current_exe()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());

        Self {
            exe_path,
            version: env!("CARGO_PKG_VERSION").to_string(),
            path_entries: split_path_entries(path_var),
            host,
        }
    }
}

/// Splits a PATH value into its colon-separated segments, preserving order.
/// Empty segments are kept as-is so the listing mirrors the raw variable.
pub fn split_path_entries(path_var: &str) -> Vec<String> {
    path_var.split(':').map(str::to_string).collect()
}

/// Directory name the archive extracts into: the archive file name with its
/// `.zip` suffix removed and the branch suffix appended.
pub fn extract_dir_name(archive_name: &str) -> String {
    let stem = archive_name.strip_suffix(".zip").unwrap_or(archive_name);
    format!("{}{}", stem, EXTRACT_DIR_SUFFIX)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchReport {
    pub archive_name: String,
    pub bytes_written: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractReport {
    pub dir_name: String,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchReport {
    pub exit_code: Option<i32>,
    pub stderr_log: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub env: EnvReport,
    pub fetch: FetchReport,
    pub extract: ExtractReport,
    pub launch: LaunchReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_entries_preserves_order() {
        let entries = split_path_entries("/usr/local/bin:/usr/bin:/bin");
        assert_eq!(entries, vec!["/usr/local/bin", "/usr/bin", "/bin"]);
    }

    #[test]
    fn test_split_path_entries_keeps_empty_segments() {
        let entries = split_path_entries("/usr/bin::/bin");
        assert_eq!(entries, vec!["/usr/bin", "", "/bin"]);
    }

    #[test]
    fn test_split_path_entries_single_segment() {
        assert_eq!(split_path_entries("/bin"), vec!["/bin"]);
    }

    #[test]
    fn test_extract_dir_name_strips_zip_suffix() {
        assert_eq!(extract_dir_name("text-adventure-tut.zip"), "text-adventure-tut-master");
    }

    #[test]
    fn test_extract_dir_name_without_zip_suffix() {
        assert_eq!(extract_dir_name("sample"), "sample-master");
    }

    #[test]
    fn test_extract_dir_name_only_strips_full_suffix() {
        // 只移除結尾的 .zip，不能像字元集合一樣亂剝
        assert_eq!(extract_dir_name("zip.zip"), "zip-master");
        assert_eq!(extract_dir_name("a.zip.zip"), "a.zip-master");
    }
}
