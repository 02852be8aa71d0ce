use anyhow::Result;
use futures::future::join_all;
use polybets::config::{AssetConfig, Config, EnvConfig};
use polybets::data::cache::SearchCache;
use polybets::data::gamma_api::{EventSource, GammaApiClient};
use polybets::data::types::ParsedMarket;
use polybets::monitoring::display::render_market;
use polybets::monitoring::logger::CsvLogger;
use polybets::search::pipeline::MarketSearch;
use polybets::search::terms::build_search_terms;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Polybets starting...");

    // Load configuration
    let env_config = EnvConfig::load()?;
    tracing::info!("Loading configuration from {}", env_config.config_path);
    let mut config = Config::load(&env_config.config_path)?;
    config.apply_env(&env_config);

    tracing::info!("Gamma API: {}", config.gamma.base_url);
    tracing::info!("Assets: {}", config.assets.len());

    let client = GammaApiClient::new(
        config.gamma.base_url.clone(),
        Duration::from_secs(config.gamma.timeout_secs),
    )?;

    let search = MarketSearch::new(client)
        .with_query(config.gamma.event_query())
        .with_max_results(config.search.max_results)
        .with_cache(SearchCache::new(Duration::from_secs(config.search.cache_ttl_secs)));

    let csv_logger = if config.monitoring.csv_logging {
        tracing::info!("CSV logging to {}", config.monitoring.csv_log_path);
        Some(CsvLogger::new(config.monitoring.csv_log_path.clone())?)
    } else {
        None
    };

    if config.search.refresh_secs == 0 {
        run_once(&config, &search, csv_logger.as_ref()).await;
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_secs(config.search.refresh_secs));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                run_once(&config, &search, csv_logger.as_ref()).await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    Ok(())
}

/// Search every configured asset concurrently and print the results.
async fn run_once<S: EventSource>(config: &Config, search: &MarketSearch<S>, csv_logger: Option<&CsvLogger>) {
    let lookups = config.assets.iter().filter_map(|asset| {
        let terms = build_search_terms(&asset.descriptor);
        if terms.is_empty() {
            // Nothing to match against; don't fetch at all
            tracing::info!("No search terms for {}, skipping", asset.label());
            return None;
        }

        tracing::debug!("Terms for {}: [{}]", asset.label(), terms.join(", "));
        Some(async move { (asset, search.search_events(&terms).await) })
    });

    for (asset, markets) in join_all(lookups).await {
        print_asset(asset, &markets, config.search.display_limit);

        if let Some(logger) = csv_logger {
            if let Err(e) = logger.log_results(&asset.label(), &markets) {
                tracing::warn!("Failed to write CSV rows for {}: {}", asset.label(), e);
            }
        }
    }
}

fn print_asset(asset: &AssetConfig, markets: &[ParsedMarket], display_limit: usize) {
    // Nothing relevant found: render nothing
    if markets.is_empty() {
        tracing::info!("No Polymarket predictions for {}", asset.label());
        return;
    }

    println!("== Polymarket Predictions: {} ==", asset.label());
    for market in markets.iter().take(display_limit) {
        println!("{}", render_market(market));
    }
    println!();
}
