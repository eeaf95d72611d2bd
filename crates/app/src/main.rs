use engine::Seed;
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "sinuelo={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server) = settings.server.as_ref() else {
        tracing::warn!("No server settings found, nothing to run");
        return Ok(());
    };
    if settings.partners.is_empty() {
        tracing::warn!("No partner capital accounts configured; statements will be rejected");
    }

    let db = parse_database(&server.database).await.inspect_err(|err| {
        tracing::error!("failed to initialize database: {err}");
    })?;

    let engine = engine::Engine::builder()
        .database(db)
        .partner_accounts(settings.partner_accounts())
        .build()
        .await?;
    if engine.seed(&Seed::embedded()?).await? {
        tracing::info!("Database seeded");
    }

    let bind = server.bind.as_deref().unwrap_or("127.0.0.1");
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(addr).await.inspect_err(|err| {
        tracing::error!("failed to bind server listener: {err}");
    })?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
