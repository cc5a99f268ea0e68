use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};
use tracing::info;

use crate::{
    entities::{genre, movie},
    error::AppResult,
    models::{NameFields, NamePatch, ReferencePolicy},
};

pub async fn list<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<genre::Model>> {
    Ok(genre::Entity::find().order_by_asc(genre::Column::Id).all(conn).await?)
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<genre::Model>> {
    Ok(genre::Entity::find_by_id(id).one(conn).await?)
}

pub async fn create<C: ConnectionTrait>(conn: &C, fields: NameFields) -> AppResult<genre::Model> {
    let created = genre::ActiveModel::from(fields).insert(conn).await?;
    info!(id = created.id, "genre created");
    Ok(created)
}

pub async fn replace<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    fields: NameFields,
) -> AppResult<bool> {
    let Some(stored) = find(conn, id).await? else {
        return Ok(false);
    };
    let mut model = stored.into_active_model();
    model.name = Set(fields.name);
    model.update(conn).await?;
    info!(id = id, "genre replaced");
    Ok(true)
}

pub async fn patch<C: ConnectionTrait>(conn: &C, id: i32, patch: NamePatch) -> AppResult<bool> {
    let Some(stored) = find(conn, id).await? else {
        return Ok(false);
    };
    if patch.name.is_absent() {
        return Ok(true);
    }
    let mut model = stored.into_active_model();
    patch.name.merge_into(&mut model.name);
    model.update(conn).await?;
    info!(id = id, "genre patched");
    Ok(true)
}

pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    policy: ReferencePolicy,
) -> AppResult<bool> {
    if find(conn, id).await?.is_none() {
        return Ok(false);
    }
    super::release_references(conn, movie::Column::GenreId, id, policy).await?;
    genre::Entity::delete_by_id(id).exec(conn).await?;
    info!(id = id, policy = policy.as_str(), "genre deleted");
    Ok(true)
}
