use std::sync::Arc;

use super::{with_store, ApiJson};
use crate::{
    error::{require_non_blank, ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bucketlist_core::categories::{Category, CategoryServiceTrait, CategoryUpdate};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewCategoryRequest {
    name: String,
}

async fn get_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Category>>> {
    let categories = with_store(&state, |store| store.get_categories()).await?;
    Ok(Json(categories))
}

async fn get_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Category>> {
    let lookup = id.clone();
    with_store(&state, move |store| store.get_category(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Category {}", id)))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<NewCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    require_non_blank("name", &request.name)?;
    let category = with_store(&state, move |store| store.create_category(request.name)).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    if let Some(name) = update.name.as_deref() {
        require_non_blank("name", name)?;
    }
    let target = id.clone();
    with_store(&state, move |store| store.update_category(&target, update))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Category {}", id)))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let target = id.clone();
    if with_store(&state, move |store| store.delete_category(&target)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Category {}", id)))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
