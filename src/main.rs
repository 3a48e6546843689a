use clap::Parser;
use energy_pricing::utils::{logger, validation::Validate};
use energy_pricing::{api, CliConfig, PriceConfig, PricingEngine, ServerConfig};
use std::sync::Arc;
use warp::Filter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pricing-server");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // File values win over CLI defaults when a config file is given
    let (host, port) = match &config.config {
        Some(path) => {
            let file = ServerConfig::from_file(path)?;
            tracing::info!("Loaded server config from {}", path);
            file.resolve_bind(&config)
        }
        None => (config.host.clone(), config.port),
    };

    let price_config = PriceConfig::default();
    tracing::info!(
        "Pricing with base {} ({}), multiplier range [{}, {}]",
        price_config.base_price,
        price_config.base_price_source,
        price_config.min_multiplier,
        price_config.max_multiplier
    );

    let engine = Arc::new(PricingEngine::new(price_config));
    let routes = api::create_routes(engine).recover(api::handle_rejection);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("✅ Listening on http://{}", addr);

    warp::serve(routes).run(addr).await;

    Ok(())
}
