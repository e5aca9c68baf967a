//! Turn an `HttpResponse` into a decoded value or a classified error.
//!
//! Non-2xx bodies are never decoded as the expected shape; they travel with
//! the error as text. A 2xx body that does not decode is `DecodeFailure`,
//! never a default value.

use serde::de::DeserializeOwned;

use crate::error::RepositoryError;
use crate::http::HttpResponse;

/// Decode a 2xx body as `T` (an entity, or `Vec` of entities).
pub fn resolve<T: DeserializeOwned>(response: HttpResponse) -> Result<T, RepositoryError> {
    check_status(&response)?;
    serde_json::from_slice(&response.body).map_err(|e| RepositoryError::DecodeFailure {
        message: e.to_string(),
        body: response.body_text(),
    })
}

/// Succeed on any 2xx status. The body is ignored.
pub fn resolve_no_content(response: HttpResponse) -> Result<(), RepositoryError> {
    check_status(&response)
}

fn check_status(response: &HttpResponse) -> Result<(), RepositoryError> {
    if response.is_success() {
        return Ok(());
    }
    Err(classify(response.status, response.body_text()))
}

/// Map a non-success status to its error variant.
pub fn classify(status: u16, body: String) -> RepositoryError {
    match status {
        404 => RepositoryError::NotFound { status, body },
        409 | 422 => RepositoryError::ValidationRejected { status, body },
        401 | 403 => RepositoryError::Unauthorized { status, body },
        400..=499 => RepositoryError::ClientRequestError { status, body },
        // 5xx, plus statuses a JSON API should never answer with.
        _ => RepositoryError::ServerError { status, body },
    }
}
