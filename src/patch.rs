//! Tri-state fields for partial updates.
//!
//! A JSON key that is missing leaves the stored value alone, an explicit `null`
//! clears it, and any other value replaces it. Pair every `Patch` field with
//! `#[serde(default)]` so a missing key lands on [`Patch::Absent`].

use sea_orm::{ActiveValue, Set, Value};
use serde::{Deserialize, Deserializer};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// `None` when the field was not sent, otherwise the value to store.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    /// Writes the new value into `slot` unless the field was absent.
    pub fn merge_into(self, slot: &mut ActiveValue<Option<T>>)
    where
        Option<T>: Into<Value>,
    {
        if let Some(value) = self.into_update() {
            *slot = Set(value);
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}
