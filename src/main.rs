use clap::Parser;
use small_runner::utils::error::ErrorSeverity;
use small_runner::utils::{logger, validation::Validate};
use small_runner::{CliConfig, LocalWorkspace, RunnerEngine, RunnerError, SamplePipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting small-runner CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 環境狀態只在進入點讀取一次，其後以參數傳遞
    let path_var = std::env::var("PATH").unwrap_or_default();

    // 創建工作區和管道
    let workspace = LocalWorkspace::new(config.work_dir.clone());
    let pipeline = SamplePipeline::new(workspace, config);

    // 創建引擎並運行
    let engine = RunnerEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run(&path_var).await {
        Ok(report) => {
            tracing::info!("✅ Sample program run completed");
            if let Some(code) = report.launch.exit_code {
                tracing::info!("📁 Child exit code: {}", code);
            }
            println!("\n✅ Sample program run completed");
        }
        Err(RunnerError::Cancelled) => {
            // 使用者中斷是唯一特別處理的狀況，清理已經做完
            println!("\n\nQuitting at user request");
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
