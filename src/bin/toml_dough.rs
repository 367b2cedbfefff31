use anyhow::Context;
use clap::Parser;
use poolish_dough::core::RecipeSource;
use poolish_dough::utils::{logger, validation::Validate};
use poolish_dough::{LocalStorage, OutputFormat, PoolishPolicy, RecipeEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-dough")]
#[command(about = "Poolish dough calculator driven by a TOML recipe file")]
struct Args {
    /// Path to TOML recipe file
    #[arg(short, long, default_value = "dough.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Override the poolish policy from the recipe file
    #[arg(long, value_enum)]
    policy: Option<PoolishPolicy>,

    /// Override the output format from the recipe file
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Override the output path from the recipe file
    #[arg(short, long)]
    output: Option<String>,

    /// Validate and show the inputs without computing the recipe
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based dough calculator");
    tracing::info!("📁 Loading recipe from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load recipe file '{}'", args.config))?;

    // 應用命令列覆蓋設定
    if let Some(policy) = args.policy {
        config.set_policy(policy);
        tracing::info!("🔧 Poolish policy overridden to: {}", policy);
    }
    if let Some(format) = args.format {
        config.set_output_format(format);
        tracing::info!("🔧 Output format overridden to: {}", format);
    }
    if let Some(output) = args.output.clone() {
        tracing::info!("🔧 Output path overridden to: {}", output);
        config.set_output_path(output);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Recipe validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    tracing::info!("✅ Recipe loaded and validated successfully");
    display_config_summary(&config)?;

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - recipe not computed");
        return Ok(());
    }

    let format = config.output_format();
    let output_path = config.output_path().map(str::to_string);
    let engine = RecipeEngine::new(config);

    let result = match &output_path {
        Some(path) => engine
            .run_to_storage(format, &LocalStorage::new(".".to_string()), path)
            .map(|written| format!("📁 Report saved to: {}\n", written)),
        None => engine.run().and_then(|run| run.render(format)),
    };

    match result {
        Ok(rendered) => print!("{}", rendered),
        Err(e) => {
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
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) -> anyhow::Result<()> {
    let inputs = config.inputs()?;

    tracing::info!("📋 Recipe Summary:");
    tracing::info!(
        "  Dough balls: {} × {}g",
        inputs.pizza_count,
        inputs.pizza_weight
    );
    tracing::info!("  Hydration: {}%", inputs.hydration);
    tracing::info!(
        "  Flour: {}% bread / {}% whole wheat",
        inputs.flour.bread_flour_pct(),
        inputs.flour.whole_wheat_pct()
    );
    tracing::info!("  Poolish: {}% ({} split)", inputs.poolish_pct, config.policy());
    tracing::info!("  Output: {}", config.output_format());
    if let Some(path) = config.output_path() {
        tracing::info!("  Output path: {}", path);
    }

    Ok(())
}
