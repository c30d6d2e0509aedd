use anyhow::Context;
use clap::Parser;
use lts_etl::utils::logger;
use lts_etl::{CliConfig, EtlEngine, EtlError, LocalStorage, SupportPipeline};

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(reported) => tracing::info!("✅ Reported {} operating systems", reported),
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            let exit_code = match e.downcast_ref::<EtlError>() {
                Some(etl) => {
                    tracing::error!(
                        "Category: {:?}, Severity: {:?}",
                        etl.category(),
                        etl.severity()
                    );
                    eprintln!("❌ {}", etl.user_friendly_message());
                    eprintln!("💡 {}", etl.recovery_suggestion());
                    etl.exit_code()
                }
                None => {
                    eprintln!("❌ {:#}", e);
                    1
                }
            };
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<usize> {
    let settings = config
        .resolve()
        .context("failed to resolve configuration")?;
    let catalog_path = settings.catalog_path.clone();

    let pipeline = SupportPipeline::new(LocalStorage::default(), settings);
    let reported = EtlEngine::new(pipeline)
        .run()
        .with_context(|| format!("failed to rank catalog '{}'", catalog_path))?;

    Ok(reported)
}
