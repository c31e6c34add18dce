use clap::Parser;
use election_scraper::core::ConfigProvider;
use election_scraper::utils::{logger, validation::Validate};
use election_scraper::{
    CliConfig, EtlEngine, HttpFetcher, LocalStorage, RunReport, ScrapeError, ScraperConfig,
    SimplePipeline,
};

#[tokio::main]
async fn main() {
    let cli = match CliConfig::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures
            let exit_code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(exit_code);
        }
    };

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting election-scraper");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("Error: {}", e.user_friendly_message());
            eprintln!("Usage: election-scraper <LISTING_URL> <OUTPUT_PATH>");
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!(
        "Link policy: {:?}, column policy: {:?}, party strategy: {:?}, delimiter: {:?}",
        config.link_policy(),
        config.column_policy(),
        config.party_strategy(),
        char::from(config.delimiter())
    );

    match run(config).await {
        Ok(report) => {
            println!(
                "Done: {} municipalities -> {}",
                report.municipalities, report.output_path
            );
        }
        Err(e) => {
            tracing::error!("Scrape failed: {} (Category: {:?})", e, e.category());
            eprintln!("Error: {}", e.user_friendly_message());
            eprintln!("Hint: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(config: ScraperConfig) -> Result<RunReport, ScrapeError> {
    let fetcher = HttpFetcher::new(config.user_agent(), config.timeout())?;
    let storage = LocalStorage::new(".".to_string());
    let pipeline = SimplePipeline::new(fetcher, storage, config);

    EtlEngine::new(pipeline).run().await
}
