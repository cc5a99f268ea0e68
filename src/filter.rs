//! Turns the movie collection's query string into one filtered, paginated read.
//!
//! Parameters are checked in a fixed order and the first one that applies wins:
//! `page`, then `genre_id` together with `director_id`, then the genre pair, then
//! the director pair. With none of them the whole table is returned unjoined.

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    entities::{director, genre, movie},
    error::AppResult,
    views::{MovieListView, MovieListing, MovieSummaryView},
};

pub const PAGE_SIZE: i64 = 3;

/// Raw query string. Values that don't parse, zeros, and empty strings count as absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieQuery {
    pub page: Option<String>,
    pub director_id: Option<String>,
    pub director_name: Option<String>,
    pub genre_id: Option<String>,
    pub genre_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovieFilter {
    Page(i64),
    GenreAndDirector { genre_id: i32, director_id: i32 },
    Genre { id: Option<i32>, name: Option<String> },
    Director { id: Option<i32>, name: Option<String> },
    All,
}

impl MovieFilter {
    pub fn from_query(query: &MovieQuery) -> Self {
        let page = query.page.as_deref().and_then(parse_page);
        let genre_id = query.genre_id.as_deref().and_then(parse_id);
        let genre_name = non_empty(query.genre_name.as_deref());
        let director_id = query.director_id.as_deref().and_then(parse_id);
        let director_name = non_empty(query.director_name.as_deref());

        if let Some(page) = page {
            return MovieFilter::Page(page);
        }
        if let (Some(genre_id), Some(director_id)) = (genre_id, director_id) {
            return MovieFilter::GenreAndDirector { genre_id, director_id };
        }
        if genre_id.is_some() || genre_name.is_some() {
            return MovieFilter::Genre { id: genre_id, name: genre_name };
        }
        if director_id.is_some() || director_name.is_some() {
            return MovieFilter::Director { id: director_id, name: director_name };
        }
        MovieFilter::All
    }

    fn condition(&self) -> Option<Condition> {
        match self {
            MovieFilter::Page(_) | MovieFilter::All => None,
            MovieFilter::GenreAndDirector { genre_id, director_id } => Some(
                Condition::all()
                    .add(movie::Column::GenreId.eq(*genre_id))
                    .add(movie::Column::DirectorId.eq(*director_id)),
            ),
            MovieFilter::Genre { id, name } => Some(
                Condition::any()
                    .add_option(id.map(|id| movie::Column::GenreId.eq(id)))
                    .add_option(name.as_ref().map(|name| genre::Column::Name.eq(name.as_str()))),
            ),
            MovieFilter::Director { id, name } => Some(
                Condition::any()
                    .add_option(id.map(|id| movie::Column::DirectorId.eq(id)))
                    .add_option(
                        name.as_ref().map(|name| director::Column::Name.eq(name.as_str())),
                    ),
            ),
        }
    }
}

pub async fn resolve<C: ConnectionTrait>(conn: &C, filter: &MovieFilter) -> AppResult<MovieListing> {
    debug!(?filter, "resolving movie listing");

    let listing = match filter {
        MovieFilter::All => {
            let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(conn).await?;
            MovieListing::Plain(rows.into_iter().map(MovieSummaryView::from).collect())
        },
        MovieFilter::Page(page) => {
            let Some(offset) = page_offset(*page) else {
                debug!(page = page, "page lies past any storable offset");
                return Ok(MovieListing::Resolved(Vec::new()));
            };
            let rows = joined_listing()
                .limit(PAGE_SIZE as u64)
                .offset(offset)
                .into_model::<MovieListView>()
                .all(conn)
                .await?;
            MovieListing::Resolved(rows)
        },
        other => {
            let mut select = joined_listing();
            if let Some(condition) = other.condition() {
                select = select.filter(condition);
            }
            MovieListing::Resolved(select.into_model::<MovieListView>().all(conn).await?)
        },
    };

    debug!(rows = listing.len(), "resolved movie listing");
    Ok(listing)
}

/// Every movie with its director and genre names; missing references yield null names.
fn joined_listing() -> Select<movie::Entity> {
    movie::Entity::find()
        .select_only()
        .columns([
            movie::Column::Id,
            movie::Column::Title,
            movie::Column::Year,
            movie::Column::Rating,
            movie::Column::GenreId,
            movie::Column::DirectorId,
        ])
        .column_as(genre::Column::Name, "genre_name")
        .column_as(director::Column::Name, "director_name")
        .join(JoinType::LeftJoin, movie::Relation::Director.def())
        .join(JoinType::LeftJoin, movie::Relation::Genre.def())
        .order_by_asc(movie::Column::Id)
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id != 0)
}

/// Any non-zero integer selects a page. Integers too wide for `i64` saturate.
fn parse_page(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let page = match raw.parse::<i64>() {
        Ok(page) => page,
        Err(_) => {
            let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            if raw.starts_with('-') { i64::MIN } else { i64::MAX }
        },
    };
    (page != 0).then_some(page)
}

/// Row offset of `page`; pages below one read from the start. `None` once the
/// offset no longer fits the store's signed 64-bit integers.
fn page_offset(page: i64) -> Option<u64> {
    (page.max(1) - 1).checked_mul(PAGE_SIZE).and_then(|offset| u64::try_from(offset).ok())
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> MovieQuery {
        let mut q = MovieQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => q.page = value,
                "director_id" => q.director_id = value,
                "director_name" => q.director_name = value,
                "genre_id" => q.genre_id = value,
                "genre_name" => q.genre_name = value,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn page_wins_over_everything() {
        let q = query(&[("page", "2"), ("genre_id", "1"), ("director_id", "3")]);
        assert_eq!(MovieFilter::from_query(&q), MovieFilter::Page(2));
    }

    #[test]
    fn zero_or_garbage_page_falls_through() {
        for page in ["0", "-0", "two", "", "-"] {
            let q = query(&[("page", page), ("genre_name", "Drama")]);
            assert_eq!(
                MovieFilter::from_query(&q),
                MovieFilter::Genre { id: None, name: Some("Drama".to_string()) },
                "page={page:?}"
            );
        }
    }

    #[test]
    fn negative_page_still_selects_the_page_branch() {
        let q = query(&[("page", "-1"), ("genre_id", "2")]);
        assert_eq!(MovieFilter::from_query(&q), MovieFilter::Page(-1));
        assert_eq!(page_offset(-1), Some(0));
    }

    #[test]
    fn oversized_page_saturates_and_has_no_offset() {
        let q = query(&[("page", "18446744073709551615")]);
        assert_eq!(MovieFilter::from_query(&q), MovieFilter::Page(i64::MAX));
        assert_eq!(page_offset(i64::MAX), None);
        assert_eq!(page_offset(i64::MIN), Some(0));
        assert_eq!(page_offset(3), Some(6));
    }

    #[test]
    fn both_ids_make_a_conjunction() {
        let q = query(&[("genre_id", "1"), ("director_id", "3"), ("genre_name", "x")]);
        assert_eq!(
            MovieFilter::from_query(&q),
            MovieFilter::GenreAndDirector { genre_id: 1, director_id: 3 }
        );
    }

    #[test]
    fn genre_beats_director_when_ids_are_not_paired() {
        let q = query(&[("genre_name", "Drama"), ("director_id", "3")]);
        assert_eq!(
            MovieFilter::from_query(&q),
            MovieFilter::Genre { id: None, name: Some("Drama".to_string()) }
        );
    }

    #[test]
    fn director_pair_is_last_filter() {
        let q = query(&[("director_id", "4"), ("director_name", "Villeneuve")]);
        assert_eq!(
            MovieFilter::from_query(&q),
            MovieFilter::Director { id: Some(4), name: Some("Villeneuve".to_string()) }
        );
    }

    #[test]
    fn zero_ids_are_falsy() {
        let q = query(&[("genre_id", "0"), ("director_id", "0")]);
        assert_eq!(MovieFilter::from_query(&q), MovieFilter::All);
    }

    #[test]
    fn no_parameters_means_all() {
        assert_eq!(MovieFilter::from_query(&MovieQuery::default()), MovieFilter::All);
        assert!(MovieFilter::All.condition().is_none());
    }
}
