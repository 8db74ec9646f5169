use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cost_manager={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let config = settings.server;
    let timezone: engine::Tz = config
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone {}: {err}", config.timezone))?;

    let db = connect_database(&config.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .timezone(timezone)
        .build()
        .await?;

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("reporting in {timezone}, team file {}", config.about.display());

    server::run_with_listener(server::ServerState::new(engine, config.about), listener).await?;
    Ok(())
}

async fn connect_database(
    url: &str,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
