use anyhow::Context;
use clap::Parser;
use courier_estimate::domain::model::BatchSummary;
use courier_estimate::utils::error::ErrorSeverity;
use courier_estimate::utils::{logger, validation::Validate};
use courier_estimate::{
    CliConfig, CourierError, CourierPipeline, EstimationEngine, LocalStorage, TariffConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting courier estimator");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let tariff = match &config.tariff {
        Some(path) => {
            tracing::info!("📁 Loading tariff from: {}", path);
            TariffConfig::from_file(path)
                .with_context(|| format!("failed to load tariff file '{}'", path))?
        }
        None => TariffConfig::default(),
    };
    if let Err(e) = tariff.validate() {
        exit_with(&e);
    }

    let storage = LocalStorage::new(".".to_string());
    let dry_run = config.dry_run;

    let pipeline = CourierPipeline::with_tariff(
        storage,
        config,
        tariff.cost_calculator(),
        tariff.offer_table(),
    );

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be computed");
        match pipeline.dry_run().await {
            Ok(summary) => print_summary(&summary),
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    let engine = EstimationEngine::new(pipeline);

    if let Err(e) = engine.run().await {
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &CourierError) -> ! {
    tracing::error!(
        "❌ Estimation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn print_summary(summary: &BatchSummary) {
    eprintln!("📋 Batch Summary:");
    eprintln!("  Base cost: {}", summary.base_cost);
    eprintln!("  Packages: {}", summary.package_count);
    eprintln!(
        "  Fleet: {} vehicle(s), max speed {}, max load {}",
        summary.fleet.vehicle_count, summary.fleet.max_speed, summary.fleet.max_carriable_weight
    );
    eprintln!(
        "  Rates: {} per weight unit, {} per distance unit",
        summary.weight_rate, summary.distance_rate
    );
    eprintln!("  Offer codes: {}", summary.offer_codes.join(", "));
    if !summary.overweight.is_empty() {
        eprintln!("  ⚠️ Never schedulable: {}", summary.overweight.join(", "));
    }
}
