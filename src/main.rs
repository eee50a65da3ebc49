use advising_display::config::DisplayConfig;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = DisplayConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Run the display until Ctrl-C
    advising_display::start_display(config).await?;

    Ok(())
}
