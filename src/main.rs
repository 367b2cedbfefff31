use clap::Parser;
use poolish_dough::core::Storage;
use poolish_dough::utils::error::DoughError;
use poolish_dough::utils::{logger, validation::Validate};
use poolish_dough::{CliConfig, LocalStorage, RecipeEngine};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting poolish-dough");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證輸入
    if let Err(e) = config.validate() {
        tracing::error!("❌ Input validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let format = config.format;
    let output = config.output.clone();
    let engine = RecipeEngine::new(config);

    let result = engine.run().and_then(|run| {
        let rendered = run.render(format)?;
        if let Some(path) = &output {
            let storage = LocalStorage::new(".".to_string());
            let written = storage.write_file(path, rendered.as_bytes())?;
            tracing::info!("📁 Report saved to: {}", written);
        }
        Ok(rendered)
    });

    match result {
        Ok(rendered) => {
            print!("{}", rendered);
        }
        Err(e) => report_failure(&e),
    }
}

fn report_failure(e: &DoughError) -> ! {
    tracing::error!(
        "❌ Recipe computation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code().max(1));
}
