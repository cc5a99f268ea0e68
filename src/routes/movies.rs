use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::TransactionTrait;
use tracing::{debug, warn};

use crate::{
    AppState,
    error::{AppError, AppResult},
    filter::{self, MovieFilter, MovieQuery},
    models::{MovieFields, MoviePatch},
    repository::movies,
    views::{MovieDetailView, MovieListing, Pretty},
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
) -> AppResult<Pretty<MovieListing>> {
    let filter = MovieFilter::from_query(&q);
    Ok(Pretty(filter::resolve(&state.db, &filter).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<MovieFields>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    let inserted = movies::create(&txn, fields).await?;
    txn.commit().await?;

    if !inserted {
        debug!("duplicate movie create ignored");
    }
    Ok(StatusCode::CREATED)
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Pretty<MovieDetailView>> {
    movies::find_detail(&state.db, id)
        .await?
        .map(Pretty)
        .ok_or_else(|| AppError::not_found_with(format!("Movie with id {id} not found")))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    if !movies::delete(&txn, id).await? {
        warn!(id = id, "delete of unknown movie");
        return Err(AppError::not_found());
    }
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<MoviePatch>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    if !movies::patch(&txn, id, patch).await? {
        warn!(id = id, "patch of unknown movie");
        return Err(AppError::not_found());
    }
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(fields): Json<MovieFields>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    if !movies::replace(&txn, id, fields).await? {
        warn!(id = id, "replace of unknown movie");
        return Err(AppError::not_found());
    }
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
