use clap::Parser;
use migration::{Migrator, MigratorTrait};

mod seed;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "txboard", about = "Transactions dashboard API server")]
struct Args {
    /// Settings file, with or without the `.toml` extension.
    #[arg(long, default_value = "settings")]
    config: String,
    /// Serve whatever the database already holds instead of fetching the feed.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let mut settings = settings::Settings::new(&args.config)?;
    if args.no_seed {
        settings.seed.enabled = false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "txboard={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    // Seeding runs before the listener exists, so no request observes it.
    if settings.seed.enabled {
        match seed::seed(&engine, &settings.seed).await {
            Ok(count) => tracing::info!("Database initialized with {count} transactions"),
            Err(err) => tracing::error!("failed to initialize database: {err}"),
        }
    } else {
        tracing::info!("Seeding disabled, serving existing data");
    }

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
