use crate::core::{
    ConfigProvider, EnvReport, ExtractReport, FetchReport, LaunchReport, Pipeline, Workspace,
};
use crate::domain::model::extract_dir_name;
use crate::utils::error::{Result, RunnerError};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::fs::{self, File};
use std::io::{self, Write};
use std::process::Stdio;
use tokio::process::Command;

/// Hidden file the child's stderr is piped into, inside the extracted directory.
pub const STDERR_LOG_NAME: &str = ".small-runner.stderr";

pub struct SamplePipeline<W: Workspace, C: ConfigProvider> {
    workspace: W,
    config: C,
    client: Client,
}

impl<W: Workspace, C: ConfigProvider> SamplePipeline<W, C> {
    pub fn new(workspace: W, config: C) -> Self {
        Self {
            workspace,
            config,
            client: Client::new(),
        }
    }

    fn stderr_log_rel(&self) -> String {
        format!(
            "{}/{}",
            extract_dir_name(self.config.archive_name()),
            STDERR_LOG_NAME
        )
    }
}

#[async_trait]
impl<W: Workspace, C: ConfigProvider> Pipeline for SamplePipeline<W, C> {
    fn describe(&self, path_var: &str, host: Option<String>) -> EnvReport {
        EnvReport::capture(path_var, host)
    }

    async fn fetch(&self) -> Result<FetchReport> {
        tracing::debug!("Requesting archive from: {}", self.config.archive_url());
        let response = self.client.get(self.config.archive_url()).send().await?;

        tracing::debug!("Archive response status: {}", response.status());
        if !response.status().is_success() {
            return Err(RunnerError::DownloadStatusError {
                url: self.config.archive_url().to_string(),
                status: response.status().as_u16(),
            });
        }

        // 逐塊寫入，避免把整個壓縮檔留在記憶體裡
        let archive_path = self.workspace.resolve(self.config.archive_name());
        let mut file = File::create(&archive_path)?;
        let mut bytes_written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)?;
            bytes_written += chunk.len() as u64;
        }

        tracing::debug!("Archive saved: {} ({} bytes)", archive_path.display(), bytes_written);
        Ok(FetchReport {
            archive_name: self.config.archive_name().to_string(),
            bytes_written,
        })
    }

    async fn extract(&self, fetched: &FetchReport) -> Result<ExtractReport> {
        let archive_path = self.workspace.resolve(&fetched.archive_name);
        let dir_name = extract_dir_name(&fetched.archive_name);

        let file = File::open(&archive_path)?;
        let mut archive = zip::ZipArchive::new(file)?;

        tracing::debug!("Extracting {} entries from {}", archive.len(), fetched.archive_name);

        let mut entries = 0;
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;

            // enclosed_name 擋掉帶 .. 或絕對路徑的項目
            let Some(rel_path) = entry.enclosed_name() else {
                return Err(RunnerError::UnsafeEntryError {
                    name: entry.name().to_string(),
                });
            };
            let dest_path = self.workspace.root().join(rel_path);

            if entry.is_dir() {
                fs::create_dir_all(&dest_path)?;
                continue;
            }

            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&dest_path)?;
            io::copy(&mut entry, &mut out)?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode))?;
            }

            entries += 1;
        }

        Ok(ExtractReport { dir_name, entries })
    }

    async fn launch(&self, extracted: &ExtractReport) -> Result<LaunchReport> {
        let run_dir = self.workspace.resolve(&extracted.dir_name);
        let stderr_path = run_dir.join(STDERR_LOG_NAME);
        let stderr_file = File::create(&stderr_path)?;

        tracing::debug!(
            "Launching '{} {}' in {}",
            self.config.program(),
            self.config.script(),
            run_dir.display()
        );

        // stdin/stdout 保持繼承，讓子行程維持互動；stderr 導到記錄檔
        let mut child = Command::new(self.config.program())
            .arg(self.config.script())
            .current_dir(&run_dir)
            .stderr(Stdio::from(stderr_file))
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::SpawnError {
                program: self.config.program().to_string(),
                source,
            })?;

        let status = child.wait().await?;
        tracing::debug!("Child exited with status: {}", status);

        Ok(LaunchReport {
            exit_code: status.code(),
            stderr_log: STDERR_LOG_NAME.to_string(),
        })
    }

    async fn cleanup(&self) {
        // 無論執行到哪個階段中止，都盡力移除暫存產物，容忍不存在
        let stderr_log = self.stderr_log_rel();
        for name in [self.config.archive_name(), stderr_log.as_str()] {
            match self.workspace.remove_file(name).await {
                Ok(true) => tracing::debug!("Removed {}", name),
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to remove {}: {}", name, e),
            }
        }

        let dir_name = extract_dir_name(self.config.archive_name());
        match self.workspace.remove_dir(&dir_name).await {
            Ok(true) => tracing::debug!("Removed {}/", dir_name),
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to remove {}/: {}", dir_name, e),
        }
    }
}
