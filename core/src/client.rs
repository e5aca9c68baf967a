//! Stateless HTTP request builder and response parser for a resource
//! collection.
//!
//! # Design
//! `ResourceClient` holds only the collection URL and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `HttpRepository` drives both halves around a transport;
//! a host that performs its own I/O can drive them directly.

use std::fmt;
use std::marker::PhantomData;

use uuid::Uuid;

use crate::error::RepositoryError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::encode_query;
use crate::resolve::{resolve, resolve_no_content};
use crate::resource::Resource;

const JSON: &str = "application/json";

/// Builds requests for, and parses responses from, the `R` collection.
pub struct ResourceClient<R> {
    collection_url: String,
    // fn() keeps the client Send + Sync whatever R is.
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            collection_url: self.collection_url.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("collection_url", &self.collection_url)
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(base_url: &str) -> Self {
        Self {
            collection_url: format!("{}/{}", base_url.trim_end_matches('/'), R::COLLECTION),
            _resource: PhantomData,
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}/{}", self.collection_url, id.hyphenated())
    }

    pub fn build_create(&self, input: &R::Edit) -> Result<HttpRequest, RepositoryError> {
        json_request(HttpMethod::Post, self.collection_url.clone(), input)
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        bodiless_request(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_query(&self, filters: &R::Query) -> HttpRequest {
        let url = format!("{}{}", self.collection_url, encode_query(filters));
        bodiless_request(HttpMethod::Get, url)
    }

    pub fn build_edit(&self, id: Uuid, input: &R::Edit) -> Result<HttpRequest, RepositoryError> {
        json_request(HttpMethod::Patch, self.item_url(id), input)
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        bodiless_request(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<R::Entity, RepositoryError> {
        resolve(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<R::Entity, RepositoryError> {
        resolve(response)
    }

    pub fn parse_query(&self, response: HttpResponse) -> Result<Vec<R::Entity>, RepositoryError> {
        resolve(response)
    }

    pub fn parse_edit(&self, response: HttpResponse) -> Result<R::Entity, RepositoryError> {
        resolve(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), RepositoryError> {
        resolve_no_content(response)
    }
}

fn bodiless_request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![("accept".to_string(), JSON.to_string())],
        body: None,
    }
}

fn json_request<B: serde::Serialize + ?Sized>(
    method: HttpMethod,
    url: String,
    input: &B,
) -> Result<HttpRequest, RepositoryError> {
    let body =
        serde_json::to_string(input).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![
            ("accept".to_string(), JSON.to_string()),
            ("content-type".to_string(), JSON.to_string()),
        ],
        body: Some(body),
    })
}
