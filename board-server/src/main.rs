use anyhow::Result;

use board_server::infrastructure::logging::init_logging;
use board_server::infrastructure::settings::Settings;
use board_server::server::run_http;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    run_http(&settings).await
}
