use std::str::FromStr;

use sea_orm::{ActiveValue::NotSet, Set};
use serde::Deserialize;

use crate::{
    entities::{director, genre, movie},
    patch::Patch,
};

/// What deleting a director or genre does to the movies that point at it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReferencePolicy {
    /// Leave `genre_id`/`director_id` pointing at the removed row.
    #[default]
    Dangle,
    /// Clear the references in the same transaction as the delete.
    Nullify,
    /// Refuse the delete while any movie still refers to the row.
    Restrict,
}

impl ReferencePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferencePolicy::Dangle => "dangle",
            ReferencePolicy::Nullify => "nullify",
            ReferencePolicy::Restrict => "restrict",
        }
    }
}

impl FromStr for ReferencePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dangle" => Ok(ReferencePolicy::Dangle),
            "nullify" => Ok(ReferencePolicy::Nullify),
            "restrict" => Ok(ReferencePolicy::Restrict),
            other => anyhow::bail!("unknown reference policy {other:?}"),
        }
    }
}

/// Movie body for POST and PUT. Every field is optional; PUT writes all seven,
/// so whatever is missing is stored as null.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl MovieFields {
    pub fn into_insert_model(self) -> movie::ActiveModel {
        let mut model = movie::ActiveModel::default();
        self.overwrite(&mut model);
        model
    }

    pub fn overwrite(self, model: &mut movie::ActiveModel) {
        model.title = Set(self.title);
        model.description = Set(self.description);
        model.trailer = Set(self.trailer);
        model.year = Set(self.year);
        model.rating = Set(self.rating);
        model.genre_id = Set(self.genre_id);
        model.director_id = Set(self.director_id);
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MoviePatch {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub trailer: Patch<String>,
    pub year: Patch<i32>,
    pub rating: Patch<f64>,
    pub genre_id: Patch<i32>,
    pub director_id: Patch<i32>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_absent()
            && self.description.is_absent()
            && self.trailer.is_absent()
            && self.year.is_absent()
            && self.rating.is_absent()
            && self.genre_id.is_absent()
            && self.director_id.is_absent()
    }

    pub fn merge_into(self, model: &mut movie::ActiveModel) {
        self.title.merge_into(&mut model.title);
        self.description.merge_into(&mut model.description);
        self.trailer.merge_into(&mut model.trailer);
        self.year.merge_into(&mut model.year);
        self.rating.merge_into(&mut model.rating);
        self.genre_id.merge_into(&mut model.genre_id);
        self.director_id.merge_into(&mut model.director_id);
    }
}

/// Body shared by directors and genres for POST and PUT.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NameFields {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamePatch {
    pub name: Patch<String>,
}

impl From<NameFields> for genre::ActiveModel {
    fn from(fields: NameFields) -> Self {
        genre::ActiveModel { id: NotSet, name: Set(fields.name) }
    }
}

impl From<NameFields> for director::ActiveModel {
    fn from(fields: NameFields) -> Self {
        director::ActiveModel { id: NotSet, name: Set(fields.name) }
    }
}
