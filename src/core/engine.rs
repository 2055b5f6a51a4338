use crate::core::{Pipeline, RunReport};
use crate::utils::error::{Result, RunnerError};
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;
use tokio::signal;
use tokio_util::sync::CancellationToken;

pub struct RunnerEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    cancel_token: CancellationToken,
}

impl<P: Pipeline> RunnerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Token that cancels the run from outside, same as a Ctrl-C.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Runs the whole sequence, racing it against cancellation, then cleans
    /// up the workspace no matter how the race ended.
    pub async fn run(&self, path_var: &str) -> Result<RunReport> {
        let result = tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => Err(RunnerError::Cancelled),
            _ = signal::ctrl_c() => Err(RunnerError::Cancelled),
            res = self.sequence(path_var) => res,
        };

        // 清理一定要執行，不管上面哪個分支先結束
        self.pipeline.cleanup().await;

        result
    }

    async fn sequence(&self, path_var: &str) -> Result<RunReport> {
        let started_at = Utc::now();

        println!("small-runner -> running");

        let env = self.pipeline.describe(path_var, self.monitor.host_summary());
        println!("\nFile path:\n{}", env.exe_path);
        println!("\nVersion:\n{}", env.version);
        if let Some(host) = &env.host {
            println!("\nHost:\n{}", host);
        }
        println!("\nCurrent value of PATH environment variable:");
        for entry in &env.path_entries {
            println!("    {}", entry);
        }
        println!();

        println!("Downloading sample program archive...");
        let fetch = self.pipeline.fetch().await?;
        println!("Downloaded {} ({} bytes)", fetch.archive_name, fetch.bytes_written);
        self.monitor.log_stage_stats("fetch");

        println!("Extracting archive...");
        let extract = self.pipeline.extract(&fetch).await?;
        println!("Extracted {} entries into {}", extract.entries, extract.dir_name);
        self.monitor.log_stage_stats("extract");

        let banner = "=".repeat(79);
        println!("\n{}\nBEGIN SAMPLE PROGRAM\n{}", banner, banner);
        let launch = self.pipeline.launch(&extract).await?;
        self.monitor.log_stage_stats("launch");

        let report = RunReport {
            started_at,
            env,
            fetch,
            extract,
            launch,
        };
        tracing::debug!("Run report: {}", serde_json::to_string(&report)?);

        Ok(report)
    }
}
