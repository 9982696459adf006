use clap::Parser;
use rab_estimator::core::render;
use rab_estimator::domain::model::NOTE_SUGGESTIONS;
use rab_estimator::utils::validation::Validate;
use rab_estimator::utils::{error::ErrorSeverity, logger};
use rab_estimator::{
    ApiCredential, CliConfig, EstimateEngine, EstimationClient, GeminiGenerator, LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    if config.list_note_suggestions {
        println!("Saran catatan teknis:");
        for suggestion in NOTE_SUGGESTIONS {
            println!("  - {}", suggestion);
        }
        return Ok(());
    }

    tracing::info!("Starting rab-estimator");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let details = config.project_details();
    if let Err(e) = details.validate() {
        tracing::error!("❌ Input validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    let app_config = match config.resolve() {
        Ok(app_config) => app_config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let credential = ApiCredential::resolve(config.api_key.as_deref());
    let generator = GeminiGenerator::new(&app_config);
    let client = EstimationClient::new(generator, credential);
    let storage = LocalStorage::new(app_config.output_path.clone());
    let engine = EstimateEngine::new(client, storage);

    println!("Sedang menghitung estimasi RAB...");
    match engine.run(&details).await {
        Ok(estimate) => {
            println!();
            println!("Hasil Estimasi RAB — {}", details.project_name);
            println!("Mengacu pada SNI 2835:2023 & Harga Pasar Bali");
            println!();
            println!("{}", render::render_summary(&estimate));
            println!();
            println!("{}", render::render_chart(&estimate));
            println!();
            println!("{}", render::render_table(&estimate));
            println!();
            println!("{}", render::DISCLAIMER);

            match engine.export(&estimate, &details.project_name).await {
                Ok(path) => {
                    tracing::info!("✅ Export saved to: {}", path);
                    println!();
                    println!("📁 Berkas ekspor tersimpan di: {}", path);
                }
                Err(e) => {
                    tracing::error!("❌ Export failed: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            tracing::error!("❌ Estimation failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
