use std::sync::Arc;

use super::{with_store, ApiJson};
use crate::{
    error::{require_non_blank, ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bucketlist_core::goals::{
    Goal, GoalServiceTrait, GoalStatusFilter, GoalUpdate, NewGoal, SummaryStats,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct GoalsQuery {
    category: Option<String>,
    status: Option<String>,
}

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GoalsQuery>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = with_store(&state, move |store| {
        match (query.category.as_deref(), query.status.as_deref()) {
            (None, None) => store.get_goals(),
            (None, Some(status)) => store.get_goals_by_status(status),
            (Some(category), None) => store.get_goals_by_category(category),
            (Some(category), Some(status)) => {
                let filter = GoalStatusFilter::from(status);
                Ok(store
                    .get_goals_by_category(category)?
                    .into_iter()
                    .filter(|g| filter.matches(g))
                    .collect())
            }
        }
    })
    .await?;
    Ok(Json(goals))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Goal>> {
    let lookup = id.clone();
    with_store(&state, move |store| store.get_goal(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Goal {}", id)))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    ApiJson(new_goal): ApiJson<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    require_non_blank("title", new_goal.title.as_deref().unwrap_or_default())?;
    let goal = with_store(&state, move |store| store.create_goal(new_goal)).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    if let Some(title) = update.title.as_deref() {
        require_non_blank("title", title)?;
    }
    let target = id.clone();
    with_store(&state, move |store| store.update_goal(&target, update))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Goal {}", id)))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let target = id.clone();
    if with_store(&state, move |store| store.delete_goal(&target)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Goal {}", id)))
    }
}

async fn get_summary_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<SummaryStats>> {
    let stats = with_store(&state, |store| store.get_summary_stats()).await?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/stats", get(get_summary_stats))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}
