//! Async client core for the people API.
//!
//! # Overview
//! Exposes create, get, filtered query, partial edit and delete for `Person`
//! records as the [`PersonRepository`] trait, implemented by
//! [`HttpRepository`] on top of an injected [`Transport`].
//!
//! # Design
//! - `ResourceClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network. It is pure and usable on its own
//!   by hosts that do their own I/O.
//! - `HttpRepository` sends each request through a `Transport` and races it
//!   against a `CancellationToken`. It holds no mutable state.
//! - Non-2xx responses are classified by status (`NotFound`,
//!   `ValidationRejected`, ...) and never decoded as the expected entity.
//! - Edits are sparse: `Field<T>` keeps "not provided" apart from "cleared".
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod field;
pub mod http;
pub mod query;
pub mod repository;
pub mod resolve;
pub mod resource;
pub mod transport;
pub mod types;

pub use client::ResourceClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{RepositoryError, TransportError};
pub use field::Field;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{encode_query, QueryParams};
pub use repository::{HttpRepository, PersonRepository};
pub use resource::{People, Resource};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::{EditPersonParameters, Person, QueryPersonParameters};
pub use tokio_util::sync::CancellationToken;
