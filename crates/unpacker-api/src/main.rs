use unpacker_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (scratch root, clients, routes)
    let (_state, router) = unpacker_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    unpacker_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
