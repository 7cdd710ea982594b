use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full router: `/`, `/health` and the versioned API under `/api/v1`.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", public_routes().merge(protected_routes(state.clone())))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(public::auth::sign_in))
        .route("/sign-up", post(public::auth::sign_up))
        .route("/users", get(public::users::list))
        .route("/user/:id", get(public::users::get))
        .route("/houses", get(public::houses::list))
        .route("/house/:id", get(public::houses::get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/user",
            post(protected::users::create)
                .put(protected::users::update)
                .delete(protected::users::delete),
        )
        .route(
            "/house",
            post(protected::houses::create)
                .put(protected::houses::update)
                .delete(protected::houses::delete),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

async fn root() -> &'static str {
    "App running"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "error": false,
                "msg": null,
                "status": "ok",
                "timestamp": now,
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "msg": "database unavailable",
                    "status": "degraded",
                    "timestamp": now,
                })),
            )
        }
    }
}
