use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::header::{HeaderName, HeaderValue, CONTENT_TYPE},
    http::{Method, Request},
    middleware,
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use clap::Parser;
use dotenvy::dotenv;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod error;
pub mod handlers;
pub mod store;

use error::ApiError;
use handlers::{health, learning, matches, profiles, similarity, teachers};
use sb_common::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use sb_common::oracle::{HttpTextOracle, NullOracle, TextOracle};
use sb_common::similarity::{NeuralSimilarity, OracleSimilarity};
use store::ProfileStore;

const SHUTDOWN_DRAIN_GRACE: std::time::Duration = std::time::Duration::from_millis(200);

#[derive(Debug, Clone, Parser)]
#[command(name = "sb-api", about = "HTTP API for the skill-barter matching engine")]
struct Cli {
    /// Server port
    #[arg(long, env = "SB_PORT", default_value_t = 3002)]
    port: u16,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "SB_CORS_ORIGINS", default_value = "http://localhost:3000")]
    cors_origins: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    fn from_cli(cli: Cli) -> Result<Self, ApiError> {
        let cors_origins = cli
            .cors_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect::<Vec<_>>();

        if cors_origins.iter().any(|origin| origin == "*") {
            return Err(ApiError::BadRequest(
                "SB_CORS_ORIGINS must list explicit origins".into(),
            ));
        }

        Ok(Self {
            port: cli.port,
            cors_origins,
        })
    }

    pub fn for_tests() -> Self {
        Self {
            port: 3002,
            cors_origins: vec!["http://localhost:3000".into()],
        }
    }
}

pub struct AppState {
    pub store: ProfileStore,
    pub oracle: Arc<dyn TextOracle>,
    /// Oracle-backed strategy with lexical fallback; the default match path.
    pub matcher: OracleSimilarity,
    /// Local neural path for the similarity/advanced endpoints.
    pub neural: NeuralSimilarity,
    pub config: AppConfig,
    pub readiness: Arc<std::sync::atomic::AtomicBool>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    fn new(config: AppConfig, oracle: Arc<dyn TextOracle>) -> Self {
        Self {
            store: ProfileStore::new(),
            matcher: OracleSimilarity::new(oracle.clone()),
            oracle,
            neural: NeuralSimilarity::new(),
            config,
            readiness: Arc::new(std::sync::atomic::AtomicBool::new(true)),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

async fn attach_request_id_context(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    Ok(error::with_request_id(request_id, next.run(req)).await)
}

pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_header = request_id_header.clone();

    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&trace_header)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let api_routes = Router::new()
        .route("/profiles", put(profiles::upsert_profile))
        .route("/users/:user_id/match/:other_id", get(matches::match_score))
        .route("/users/:user_id/recommended", get(matches::recommended))
        .route("/users/:user_id/mutual-matches", get(matches::mutual))
        .route("/users/:user_id/advanced-matches", get(matches::advanced))
        .route("/teachers/:skill_name", get(teachers::find_teachers))
        .route("/similarity", post(similarity::score))
        .route("/users/:user_id/learning-path", post(learning::learning_path))
        .route("/users/:user_id/proficiency", post(learning::proficiency))
        .route(
            "/users/:user_id/skill-recommendations",
            get(learning::skill_recommendations),
        );

    Router::new()
        .route("/health", get(health::readyz))
        .route("/livez", get(health::livez))
        .route("/readyz", get(health::readyz))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(attach_request_id_context))
        .layer(DefaultBodyLimit::max(256 * 1024))
        .layer(trace)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(
            request_id_header,
            MakeRequestUuid::default(),
        ))
        .layer(cors)
        .with_state(state)
}

/// State wired to the null oracle so every code path is deterministic.
pub fn test_state() -> SharedState {
    Arc::new(AppState::new(AppConfig::for_tests(), Arc::new(NullOracle)))
}

pub async fn run() -> Result<(), ApiError> {
    dotenv().ok();
    init_tracing_subscriber(env!("CARGO_PKG_NAME"));
    install_tracing_panic_hook(env!("CARGO_PKG_NAME"));

    let cli = Cli::parse();
    let config = AppConfig::from_cli(cli)?;

    let oracle: Arc<dyn TextOracle> = Arc::new(HttpTextOracle::from_env());
    let state = Arc::new(AppState::new(config.clone(), oracle));

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let app = create_router(state.clone());

    info!(%addr, "sb-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(())
}

async fn shutdown_signal(state: SharedState) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            let _ = sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state
        .readiness
        .store(false, std::sync::atomic::Ordering::SeqCst);

    // Give load balancers a brief window to observe /readyz as not ready
    // before axum stops accepting new connections.
    tokio::time::sleep(SHUTDOWN_DRAIN_GRACE).await;
}
