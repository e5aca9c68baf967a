//! Binds an entity to its edit and query types and its collection path.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::query::QueryParams;
use crate::types::{EditPersonParameters, Person, QueryPersonParameters};

/// A remote resource collection addressed as `{base}/{COLLECTION}[/{id}]`.
pub trait Resource {
    /// Decoded from create, get, query and edit responses.
    type Entity: DeserializeOwned + Send;
    /// Request body for create and edit.
    type Edit: Serialize + Sync;
    /// Filter for collection reads.
    type Query: QueryParams + Sync;

    /// Path segment of the collection, without slashes.
    const COLLECTION: &'static str;
}

/// The `people` collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct People;

impl Resource for People {
    type Entity = Person;
    type Edit = EditPersonParameters;
    type Query = QueryPersonParameters;

    const COLLECTION: &'static str = "people";
}
