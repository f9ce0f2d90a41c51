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
use bucketlist_core::vision_board::{
    NewVisionBoardItem, VisionBoardItem, VisionBoardItemUpdate, VisionBoardServiceTrait,
};

async fn get_items(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<VisionBoardItem>>> {
    let items = with_store(&state, |store| store.get_vision_board_items()).await?;
    Ok(Json(items))
}

async fn get_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<VisionBoardItem>> {
    let lookup = id.clone();
    with_store(&state, move |store| store.get_vision_board_item(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Vision board item {}", id)))
}

async fn add_item(
    State(state): State<Arc<AppState>>,
    ApiJson(item): ApiJson<NewVisionBoardItem>,
) -> ApiResult<(StatusCode, Json<VisionBoardItem>)> {
    require_non_blank("title", &item.title)?;
    let item = with_store(&state, move |store| store.add_vision_board_item(item)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<VisionBoardItemUpdate>,
) -> ApiResult<Json<VisionBoardItem>> {
    if let Some(title) = update.title.as_deref() {
        require_non_blank("title", title)?;
    }
    let target = id.clone();
    with_store(&state, move |store| {
        store.update_vision_board_item(&target, update)
    })
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::not_found(format!("Vision board item {}", id)))
}

async fn delete_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let target = id.clone();
    if with_store(&state, move |store| store.delete_vision_board_item(&target)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Vision board item {}", id)))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vision-board", get(get_items).post(add_item))
        .route(
            "/vision-board/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
