use clap::Parser;
use iplists::Config;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::parse();
    log4rs::init_file(&config.log_config, Default::default())
        .map_err(|e| format!("Error initializing log4rs from {}: {e}", config.log_config))?;
    //
    log::info!("#Start main()");

    iplists::serve(&config).await
}
