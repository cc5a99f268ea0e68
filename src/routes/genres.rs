use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::TransactionTrait;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{NameFields, NamePatch},
    repository::genres,
    views::{NamedView, Pretty},
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Pretty<Vec<NamedView>>> {
    let rows = genres::list(&state.db).await?;
    Ok(Pretty(rows.into_iter().map(NamedView::from).collect()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<NameFields>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    genres::create(&txn, fields).await?;
    txn.commit().await?;
    Ok(StatusCode::CREATED)
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Pretty<NamedView>> {
    let genre = genres::find(&state.db, id).await?.ok_or_else(AppError::not_found)?;
    Ok(Pretty(genre.into()))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    if !genres::delete(&txn, id, state.config.reference_policy).await? {
        return Err(AppError::not_found());
    }
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(fields): Json<NameFields>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    if !genres::replace(&txn, id, fields).await? {
        return Err(AppError::not_found());
    }
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<NamePatch>,
) -> AppResult<StatusCode> {
    let txn = state.db.begin().await?;
    if !genres::patch(&txn, id, patch).await? {
        return Err(AppError::not_found());
    }
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
