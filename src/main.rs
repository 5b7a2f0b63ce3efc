//! `heroes-api` binary: serve the API, apply migrations, or seed sample data.

use clap::{Parser, Subcommand};
use heroes_api::{
    app, apply_migrations, ensure_database_exists, seed, store, AppState, MemoryStore, PgStore, Settings, Store,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heroes-api", version, about = "Heroes, powers and hero powers over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Address to listen on; overrides HEROES_BIND_ADDR.
        #[arg(long)]
        bind: Option<String>,
        /// Keep data in process instead of PostgreSQL.
        #[arg(long)]
        in_memory: bool,
        /// Seed sample data before serving.
        #[arg(long)]
        seed: bool,
    },
    /// Apply pending schema migrations.
    Migrate,
    /// Insert sample heroes, powers and random hero powers.
    Seed {
        /// Fixed RNG seed for reproducible links.
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("heroes_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Command::Serve { bind, in_memory, seed: with_seed } => {
            let store: Arc<dyn Store> = if in_memory {
                tracing::warn!("using in-memory store; data is lost on exit");
                Arc::new(MemoryStore::new())
            } else {
                Arc::new(PgStore::new(migrated_pool(&settings).await?))
            };
            if with_seed {
                seed::seed(store.as_ref(), &mut StdRng::from_entropy()).await?;
            }

            let router = app(AppState::new(store), settings.body_limit);
            let listener = TcpListener::bind(bind.as_deref().unwrap_or(settings.bind_addr.as_str())).await?;
            tracing::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, router).await?;
        }
        Command::Migrate => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = store::connect(&settings).await?;
            let applied = apply_migrations(&pool).await?;
            tracing::info!(applied, "migrations complete");
        }
        Command::Seed { rng_seed } => {
            let store = PgStore::new(migrated_pool(&settings).await?);
            let mut rng = match rng_seed {
                Some(n) => StdRng::seed_from_u64(n),
                None => StdRng::from_entropy(),
            };
            let report = seed::seed(&store, &mut rng).await?;
            println!(
                "seeded {} powers, {} heroes, {} hero powers",
                report.powers, report.heroes, report.hero_powers
            );
        }
    }
    Ok(())
}

async fn migrated_pool(settings: &Settings) -> Result<sqlx::PgPool, heroes_api::AppError> {
    ensure_database_exists(&settings.database_url).await?;
    let pool = store::connect(settings).await?;
    apply_migrations(&pool).await?;
    Ok(pool)
}
