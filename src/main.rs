use anyhow::Context;
use cinema_export::core::ExtractionService;
use cinema_export::utils::error::ErrorSeverity;
use cinema_export::utils::{logger, validation::Validate};
use cinema_export::{
    CliConfig, DisabledExtractionService, ExportConfig, ExportEngine, ExportPipeline,
    GeminiClient, LocalStorage,
};
use clap::Parser;

fn load_config(cli: &CliConfig) -> anyhow::Result<ExportConfig> {
    let config = ExportConfig::from_cli(cli).with_context(|| match &cli.config {
        Some(path) => format!("failed to load settings from '{}'", path),
        None => "failed to load settings".to_string(),
    })?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cinema-export with {} input files", cli.files.len());

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let service: Box<dyn ExtractionService> = match GeminiClient::from_config(&config) {
        Some(client) => {
            tracing::debug!("AI fallback enabled with model {}", config.ai_model);
            Box::new(client)
        }
        None => {
            tracing::info!("No API key configured; AI fallback is disabled");
            Box::new(DisabledExtractionService)
        }
    };

    let input = LocalStorage::new(".");
    let output = LocalStorage::new(config.output_path.clone());
    let pipeline = ExportPipeline::new(input, output, config, service);
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Export completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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
