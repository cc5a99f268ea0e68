use std::sync::Arc;

use axum::{Router, routing::get};

use crate::AppState;

pub mod directors;
pub mod genres;
pub mod movies;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/", get(movies::list).post(movies::create))
        .route(
            "/movies/{id}",
            get(movies::get).delete(movies::delete).patch(movies::patch).put(movies::replace),
        )
        .route("/genres", get(genres::list).post(genres::create))
        .route("/genres/", get(genres::list).post(genres::create))
        .route(
            "/genres/{id}",
            get(genres::get).delete(genres::delete).patch(genres::patch).put(genres::replace),
        )
        .route("/directors", get(directors::list).post(directors::create))
        .route("/directors/", get(directors::list).post(directors::create))
        .route(
            "/directors/{id}",
            get(directors::get)
                .delete(directors::delete)
                .patch(directors::patch)
                .put(directors::replace),
        )
}
