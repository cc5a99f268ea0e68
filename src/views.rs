use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use sea_orm::FromQueryResult;
use serde::Serialize;

use crate::entities::{director, genre, movie};

const INDENT: &[u8] = b"   ";

/// Row of the movie collection when the query resolved director and genre names.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct MovieListView {
    pub id: i32,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
    pub genre_name: Option<String>,
    pub director_name: Option<String>,
}

/// Row of the unfiltered movie collection, read without joins.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieSummaryView {
    pub id: i32,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl From<movie::Model> for MovieSummaryView {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            rating: m.rating,
            genre_id: m.genre_id,
            director_id: m.director_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct MovieDetailView {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub trailer: Option<String>,
    pub rating: Option<f64>,
    pub genre_name: Option<String>,
    pub director_name: Option<String>,
}

/// The two shapes the movie collection can come back in.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum MovieListing {
    Resolved(Vec<MovieListView>),
    Plain(Vec<MovieSummaryView>),
}

impl MovieListing {
    pub fn len(&self) -> usize {
        match self {
            MovieListing::Resolved(rows) => rows.len(),
            MovieListing::Plain(rows) => rows.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamedView {
    pub id: i32,
    pub name: Option<String>,
}

impl From<genre::Model> for NamedView {
    fn from(m: genre::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

impl From<director::Model> for NamedView {
    fn from(m: director::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

/// JSON body written with a three-space indent, keys in declaration order.
#[derive(Debug)]
pub struct Pretty<T>(pub T);

impl<T: Serialize> IntoResponse for Pretty<T> {
    fn into_response(self) -> Response {
        let mut buf = Vec::with_capacity(256);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);

        if let Err(err) = self.0.serialize(&mut ser) {
            tracing::error!(error = %err, "failed to serialize response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        ([(header::CONTENT_TYPE, "application/json")], buf).into_response()
    }
}
