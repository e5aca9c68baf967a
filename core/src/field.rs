//! Tri-state field wrapper for sparse request bodies.
//!
//! `Option<T>` cannot tell "leave this alone" from "set this to null" once it
//! has been serialized. `Field<T>` keeps the two apart: `Unset` fields are
//! skipped entirely (pair it with
//! `#[serde(default, skip_serializing_if = "Field::is_unset")]`), `Cleared`
//! becomes JSON `null`, and `Set(v)` becomes `v`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    /// Not assigned. Omitted from the wire.
    #[default]
    Unset,
    /// Assigned a value.
    Set(T),
    /// Explicitly cleared. Sent as `null`.
    Cleared,
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Set(value),
            None => Field::Cleared,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Set(value) => value.serialize(serializer),
            Field::Unset | Field::Cleared => serializer.serialize_none(),
        }
    }
}

// A missing key never reaches this impl; `#[serde(default)]` yields `Unset`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}
