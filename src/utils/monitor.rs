#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());

        // 初始刷新
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid: sysinfo::get_current_pid().ok(),
            start_time: Instant::now(),
            enabled,
        }
    }

    /// One-line host description for the diagnostics banner.
    pub fn host_summary(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let system = self.system.lock().ok()?;
        let os = System::name().unwrap_or_else(|| "unknown".to_string());
        let kernel = System::kernel_version().unwrap_or_else(|| "unknown".to_string());
        let total_mb = system.total_memory() / 1024 / 1024;

        Some(format!("{} (kernel {}), {}MB memory", os, kernel, total_mb))
    }

    pub fn log_stage_stats(&self, stage: &str) {
        if !self.enabled {
            return;
        }

        let Ok(mut system) = self.system.lock() else {
            return;
        };
        system.refresh_all();

        let memory_mb = self
            .pid
            .and_then(|pid| system.process(pid))
            .map(|p| p.memory() / 1024 / 1024)
            .unwrap_or(0);

        tracing::info!(
            "📊 {} - Memory: {}MB, Time: {:?}",
            stage,
            memory_mb,
            self.start_time.elapsed()
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn host_summary(&self) -> Option<String> {
        None
    }

    pub fn log_stage_stats(&self, _stage: &str) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
