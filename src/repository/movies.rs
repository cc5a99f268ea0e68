use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    JoinType, QueryFilter, QuerySelect, RelationTrait,
};
use tracing::{debug, info};

use crate::{
    entities::{director, genre, movie},
    error::AppResult,
    models::{MovieFields, MoviePatch},
    views::MovieDetailView,
};

/// Inserts the movie unless one with the same title and year is already stored.
/// Returns whether a row was written.
pub async fn create<C: ConnectionTrait>(conn: &C, fields: MovieFields) -> AppResult<bool> {
    if let Some(title) = fields.title.as_deref() {
        let year = match fields.year {
            Some(year) => movie::Column::Year.eq(year),
            None => movie::Column::Year.is_null(),
        };
        let existing = movie::Entity::find()
            .filter(Condition::all().add(movie::Column::Title.eq(title)).add(year))
            .one(conn)
            .await?;
        if let Some(existing) = existing {
            debug!(id = existing.id, title = %title, "movie already stored, skipping insert");
            return Ok(false);
        }
    }

    let created = fields.into_insert_model().insert(conn).await?;
    info!(id = created.id, "movie created");
    Ok(true)
}

/// Movie with director and genre names. Movies missing either reference are not found.
pub async fn find_detail<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> AppResult<Option<MovieDetailView>> {
    let detail = movie::Entity::find_by_id(id)
        .select_only()
        .columns([
            movie::Column::Id,
            movie::Column::Title,
            movie::Column::Description,
            movie::Column::Year,
            movie::Column::Trailer,
            movie::Column::Rating,
        ])
        .column_as(genre::Column::Name, "genre_name")
        .column_as(director::Column::Name, "director_name")
        .join(JoinType::InnerJoin, movie::Relation::Director.def())
        .join(JoinType::InnerJoin, movie::Relation::Genre.def())
        .into_model::<MovieDetailView>()
        .one(conn)
        .await?;
    Ok(detail)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<bool> {
    let res = movie::Entity::delete_by_id(id).exec(conn).await?;
    if res.rows_affected == 0 {
        return Ok(false);
    }
    info!(id = id, "movie deleted");
    Ok(true)
}

pub async fn patch<C: ConnectionTrait>(conn: &C, id: i32, patch: MoviePatch) -> AppResult<bool> {
    let Some(stored) = movie::Entity::find_by_id(id).one(conn).await? else {
        return Ok(false);
    };
    if patch.is_empty() {
        debug!(id = id, "empty movie patch");
        return Ok(true);
    }

    let mut model = stored.into_active_model();
    patch.merge_into(&mut model);
    model.update(conn).await?;
    info!(id = id, "movie patched");
    Ok(true)
}

pub async fn replace<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    fields: MovieFields,
) -> AppResult<bool> {
    let Some(stored) = movie::Entity::find_by_id(id).one(conn).await? else {
        return Ok(false);
    };

    let mut model = stored.into_active_model();
    fields.overwrite(&mut model);
    model.update(conn).await?;
    info!(id = id, "movie replaced");
    Ok(true)
}
