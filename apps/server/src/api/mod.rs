use std::sync::Arc;

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{FromRequest, State},
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use bucketlist_core::GoalStore;
use bucketlist_storage_sqlite::db;
use serde::Serialize;
use tokio::task;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

mod categories;
mod goals;
mod vision_board;

/// JSON body extractor whose rejections use the API error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Runs a store operation on the blocking pool. Every store call locks and
/// does synchronous storage I/O.
pub(crate) async fn with_store<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&GoalStore) -> bucketlist_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let goal_store = state.goal_store.clone();
    task::spawn_blocking(move || f(&goal_store))
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to execute store task: {}", e)))?
        .map_err(ApiError::from)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupResponse {
    backup_path: String,
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn backup_database(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<BackupResponse>)> {
    let db_path = state.db_path.clone();
    let backup_path = task::spawn_blocking(move || db::backup_database(&db_path))
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to execute backup task: {}", e)))??;
    Ok((StatusCode::CREATED, Json(BackupResponse { backup_path })))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_allow_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .merge(categories::router())
        .merge(goals::router())
        .merge(vision_board::router())
        .route("/backup", post(backup_database));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}
