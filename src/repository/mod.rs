//! Reads and writes against the catalog tables.
//!
//! Every function takes the connection it runs on, so a handler decides whether
//! the work happens on the pool or inside its own transaction.

pub mod directors;
pub mod genres;
pub mod movies;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, sea_query::Expr,
};
use tracing::info;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::ReferencePolicy,
};

/// Applies `policy` to the movies whose `column` points at `id`, ahead of deleting that row.
async fn release_references<C: ConnectionTrait>(
    conn: &C,
    column: movie::Column,
    id: i32,
    policy: ReferencePolicy,
) -> AppResult<()> {
    match policy {
        ReferencePolicy::Dangle => Ok(()),
        ReferencePolicy::Nullify => {
            let res = movie::Entity::update_many()
                .col_expr(column, Expr::value(Option::<i32>::None))
                .filter(column.eq(id))
                .exec(conn)
                .await?;
            if res.rows_affected > 0 {
                info!(id = id, movies = res.rows_affected, "cleared movie references");
            }
            Ok(())
        },
        ReferencePolicy::Restrict => {
            let refs = movie::Entity::find().filter(column.eq(id)).count(conn).await?;
            if refs > 0 {
                return Err(AppError::Conflict(format!(
                    "{refs} movie(s) still reference id {id}"
                )));
            }
            Ok(())
        },
    }
}
