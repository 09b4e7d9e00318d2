use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use announcements_api::{
    config::{Config, StoreConfig},
    db::{
        self,
        announcements::PgAnnouncementStore,
        memory::MemoryStore,
        teachers::{demo_teachers, PgTeacherDirectory},
    },
    routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let state = match &config.store {
        StoreConfig::Postgres { database_url } => {
            let pool = db::create_pool(database_url, config.db_max_connections).await?;
            db::run_migrations(&pool).await?;
            info!("Database connected and migrations applied");
            AppState::new(
                Arc::new(PgAnnouncementStore::new(pool.clone())),
                Arc::new(PgTeacherDirectory::new(pool)),
                config.clone(),
            )
        }
        StoreConfig::Memory => {
            warn!("STORE_BACKEND=memory: announcements are lost on restart");
            let store = Arc::new(MemoryStore::with_teachers(demo_teachers()));
            AppState::in_memory(store, config.clone())
        }
    };

    // Allow the configured site origin plus localhost for development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_origin(cors_origin);

    let app = routes::router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("announcements API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
