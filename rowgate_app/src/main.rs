#[tokio::main]
async fn main() {
    let config = rowgate::config::AppConfig::new(
        rowgate::util::workspace_dir().join("configs"),
    )
    .unwrap();

    rowgate::logging::init_tracing(&config.logging)
        .expect("Failed to initialize logger");

    let _pool = rowgate::db::lazy_pool(&config.database)
        .expect("Failed to build database pool");

    tracing::info!(
        max_connections = config.database.max_connections,
        "database pool ready"
    );
    tracing::info!("app config: {:?}", config);
}
