use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memorial_api::config::ServerConfig;
use memorial_api::router::build_app_router;
use memorial_api::state::AppState;
use memorial_db::store::{PgCandleStore, PgForbiddenWordStore};
use memorial_events::{
    ActivityPersistence, DisabledNotifier, EmailConfig, EmailDelivery, EventBus, Mailer,
    ModerationNotifier, TelegramClient, TelegramConfig, TelegramNotifier,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memorial_api=debug,memorial_events=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = memorial_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    memorial_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    memorial_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let persistence_handle = tokio::spawn(ActivityPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    // --- Moderators' chat ---
    let telegram = TelegramConfig::from_env();
    let webhook_secret = telegram
        .as_ref()
        .and_then(|c| c.webhook_secret.as_deref())
        .map(Arc::<str>::from);
    let notifier: Arc<dyn ModerationNotifier> = match telegram {
        Some(telegram) => {
            let client = TelegramClient::new(telegram).expect("Failed to build Telegram client");
            if webhook_secret.is_none() {
                tracing::warn!(
                    "TELEGRAM_WEBHOOK_SECRET not set; any caller can deliver button callbacks"
                );
            }
            tracing::info!("Moderation prompts enabled");
            Arc::new(TelegramNotifier::new(client, config.display_offset))
        }
        None => {
            tracing::warn!("Telegram not configured; candles must be moderated from the admin panel");
            Arc::new(DisabledNotifier)
        }
    };

    // --- Email ---
    let mailer: Option<Arc<dyn Mailer>> = match EmailConfig::from_env() {
        Some(email) => {
            let delivery = EmailDelivery::new(email).expect("Failed to build SMTP transport");
            tracing::info!("Email delivery enabled");
            Some(Arc::new(delivery))
        }
        None => {
            tracing::info!("SMTP not configured; subscriber emails disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        candles: Arc::new(PgCandleStore::new(pool.clone())),
        forbidden_words: Arc::new(PgForbiddenWordStore::new(pool)),
        notifier,
        mailer,
        event_bus: Arc::clone(&event_bus),
        webhook_secret,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    // The router (and every state clone) is gone, so this is the last sender.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), persistence_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
