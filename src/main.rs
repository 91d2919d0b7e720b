use clap::Parser;
use hebtv_live::utils::{logger, validation::Validate};
use hebtv_live::{CliConfig, LocalStorage, ScrapeEngine, ScrapePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting hebtv-live");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.load().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = match ScrapePipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ HTTP client setup failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let engine = ScrapeEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Playlist written to {} (stream: {}, source: {}, candidates: {})",
                report.output_path,
                report.stream_url,
                report.source,
                report.candidates_found
            );
            println!("任务完成！");
        }
        Err(e) => {
            tracing::error!("❌ Playlist write failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            println!("创建文件失败");
            std::process::exit(1);
        }
    }

    Ok(())
}
