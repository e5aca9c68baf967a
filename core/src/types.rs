//! Domain DTOs for the people API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Wire keys are
//! PascalCase (`Id`, `FirstName`, `LastName`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::Field;
use crate::query::QueryParams;

/// A person as returned by the API. Only ever produced by decoding a
/// response; the server assigns `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for create and edit.
///
/// Only assigned fields are serialized, so a PATCH built from a value where
/// just `first_name` was set carries `{"FirstName": ...}` and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditPersonParameters {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub first_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub last_name: Field<String>,
}

impl EditPersonParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Field::Set(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Field::Set(last_name.into());
        self
    }

    pub fn clear_first_name(mut self) -> Self {
        self.first_name = Field::Cleared;
        self
    }

    pub fn clear_last_name(mut self) -> Self {
        self.last_name = Field::Cleared;
        self
    }

    /// Drop assignments that match `baseline`, leaving only real changes.
    pub fn changed_from(mut self, baseline: &Person) -> Self {
        if self.first_name.as_set() == Some(&baseline.first_name) {
            self.first_name = Field::Unset;
        }
        if self.last_name.as_set() == Some(&baseline.last_name) {
            self.last_name = Field::Unset;
        }
        self
    }

    /// Wire names of every assigned field, in declaration order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.first_name.is_unset() {
            fields.push("FirstName");
        }
        if !self.last_name.is_unset() {
            fields.push("LastName");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_unset() && self.last_name.is_unset()
    }
}

/// Filters for listing people. Values within a field are OR'd by the server,
/// fields are AND'd. An empty vector means no filter on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryPersonParameters {
    #[serde(default)]
    pub first_name: Vec<String>,
    #[serde(default)]
    pub last_name: Vec<String>,
    #[serde(default)]
    pub id: Vec<Uuid>,
}

impl QueryPersonParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name.push(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name.push(last_name.into());
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id.push(id);
        self
    }
}

impl QueryParams for QueryPersonParameters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let first = self.first_name.iter().map(|v| ("FirstName", v.clone()));
        let last = self.last_name.iter().map(|v| ("LastName", v.clone()));
        let ids = self.id.iter().map(|v| ("Id", v.hyphenated().to_string()));
        first.chain(last).chain(ids).collect()
    }
}
