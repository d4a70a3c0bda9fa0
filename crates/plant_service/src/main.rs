use clap::Parser;

use plant_service::config::{AppConfig, Cli};
use plant_service::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.debug, cli.log_format);

    let config = AppConfig::try_from(cli)?;
    tracing::debug!("Configuration: {:?}", config);

    plant_service::run(config).await
}
