use text2ics::startup;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting text2ics");

    // Load configuration
    let config = startup::load_config()?;

    // Run the terminal session
    startup::start_client(config).await
}
