use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use interclasse_backend::run;
use interclasse_backend::config::settings::get_config;
use interclasse_backend::db::{InMemoryLeagueStore, LeagueStore, PgLeagueStore};
use interclasse_backend::services::{LogNotifier, NotificationQueue, Notifier, RedisNotifier};
use interclasse_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "interclasse-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let store: Arc<dyn LeagueStore> = if config.database.in_memory {
        tracing::warn!("Using the in-memory store, data is lost on restart");
        Arc::new(InMemoryLeagueStore::new())
    } else {
        // Only try to establish connection when actually used
        let connection_pool = PgPoolOptions::new()
            .max_connections(32)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect_lazy(
                config.database.connection_string().expose_secret()
            )
            .expect("Failed to create Postgres connection pool");
        let pg_store = PgLeagueStore::new(connection_pool);
        match pg_store.migrate().await {
            Ok(()) => tracing::info!("✅ Database migrations applied"),
            Err(e) => tracing::error!("❌ Failed to run database migrations: {}", e),
        }
        Arc::new(pg_store)
    };

    let notifier: Arc<dyn Notifier> = match &config.redis {
        Some(redis_settings) => {
            match redis::Client::open(redis_settings.get_redis_url().expose_secret()) {
                Ok(client) => {
                    tracing::info!("Redis client created successfully");
                    Arc::new(RedisNotifier::new(
                        Arc::new(client),
                        redis_settings.notification_channel.clone(),
                    ))
                }
                Err(e) => {
                    tracing::error!("Failed to create Redis client: {}. Notifications will only be logged.", e);
                    Arc::new(LogNotifier)
                }
            }
        }
        None => {
            tracing::info!("No Redis configured, notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };
    let (notifications, _worker) = NotificationQueue::start(notifier);

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("🚀 Listening on {}", address);

    run(
        listener,
        store,
        notifications,
        config.league,
        config.application.allowed_origins,
    )?.await
}
