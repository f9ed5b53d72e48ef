//! # pulsewatch-server
//!
//! REST API boundary for the pulsewatch pattern-detection engine. The
//! engine itself is the core; this crate only maps requests to engine
//! calls and drains the dispatch queue.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use engine::{EngineConfig, PatternEngine, Severity};

mod routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    engine: Arc<PatternEngine>,
}

/// Liveness probe - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - is the engine answering?
async fn readiness(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let stats = state.engine.stats();
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "live_series": stats.live_series,
        "dispatch_drops": stats.dispatch_drops,
    }))
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

/// Engine configuration from the environment, defaults otherwise.
fn engine_config_from_env() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.window.capacity = env_parse("WINDOW_CAPACITY", config.window.capacity);
    config.window.seasonal_period = env::var("SEASONAL_PERIOD")
        .ok()
        .and_then(|raw| raw.parse().ok());
    config.window.idle_eviction_secs =
        env_parse("IDLE_EVICTION_SECS", config.window.idle_eviction_secs);
    config.detector.z_threshold = env_parse("Z_THRESHOLD", config.detector.z_threshold);
    config.detector.min_samples = env_parse("MIN_SAMPLES", config.detector.min_samples);
    config.cache.ttl_secs = env_parse("CACHE_TTL_SECS", config.cache.ttl_secs);
    config.cache.capacity = env_parse("CACHE_CAPACITY", config.cache.capacity);
    config.limits.ingest_capacity = env_parse("INGEST_CAPACITY", config.limits.ingest_capacity);
    config.limits.ingest_refill_per_sec =
        env_parse("INGEST_REFILL_PER_SEC", config.limits.ingest_refill_per_sec);
    config.limits.query_capacity = env_parse("QUERY_CAPACITY", config.limits.query_capacity);
    config.limits.query_refill_per_sec =
        env_parse("QUERY_REFILL_PER_SEC", config.limits.query_refill_per_sec);
    config.queue.capacity = env_parse("QUEUE_CAPACITY", config.queue.capacity);
    config.detect_interval = env_parse("DETECT_INTERVAL", config.detect_interval);
    config
}

/// Downstream delivery loop: drains the dispatch queue and hands results to
/// whatever delivery integration is configured. With none, it logs them.
fn spawn_delivery_worker(engine: Arc<PatternEngine>) {
    let rx = engine.dispatch_receiver();
    std::thread::spawn(move || {
        for item in rx.iter() {
            match item.result.severity {
                Severity::None => {
                    tracing::debug!(series = %item.series_key, "delivered result downstream")
                }
                _ => tracing::info!(
                    series = %item.series_key,
                    classification = %item.result.classification,
                    score = item.result.score,
                    "delivered anomaly downstream"
                ),
            }
        }
    });
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,engine_core=info,tower_http=info".into()),
        )
        .init();

    let config = engine_config_from_env();
    let engine = Arc::new(PatternEngine::new(config).expect("invalid engine configuration"));

    spawn_delivery_worker(Arc::clone(&engine));

    // Periodic housekeeping: idle window eviction and bucket reaping.
    {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(60));
            loop {
                ticker.tick().await;
                let (windows, buckets) = engine.maintain();
                if windows > 0 || buckets > 0 {
                    tracing::debug!(windows, buckets, "maintenance sweep");
                }
            }
        });
    }

    let state = AppState { engine };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with middleware
    let app = Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        // Legacy health endpoint
        .route("/health", get(liveness))
        // API endpoints
        .route("/api/v1/ingest", post(routes::ingest_observation))
        .route("/api/v1/pattern/{series}", get(routes::query_pattern))
        .route("/api/v1/stats", get(routes::engine_stats))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Server configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST:PORT configuration");

    tracing::info!("pulsewatch-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
