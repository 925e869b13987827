use catalog_services::{
    config::Config,
    database::{self, PgCatalogStore, schema},
    routes, telemetry,
    uploads::UploadDir,
};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values already in the environment win over `.env`
    dotenvy::dotenv().ok();

    // Load configuration
    let config: Config = Config::init()?;

    // Initialize tracing
    telemetry::init_tracing(&config)?;
    info!(
        environment = %config.environment(),
        server_addr = %config.server_addr(),
        port = %config.port(),
        upload_dir = %config.upload_dir().display(),
        version = env!("CARGO_PKG_VERSION"),
        "Configuration loaded"
    );

    // A store we cannot reach at startup is fatal
    let pool = database::create_pool(&config).await?;
    schema::init_schema(&pool).await;

    UploadDir::new(config.upload_dir()).ensure_exists().await?;

    // Build the application router
    let route = routes(PgCatalogStore::new(pool), &config);

    // Create socket address
    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));

    info!("Starting server on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}
