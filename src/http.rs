//! Transport-agnostic request and response shapes, plus their builders.

use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::SignupError;

/// Request as seen by controllers: only the body is read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    pub body: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a [`HttpRequest`] from any field/value pairs.
    pub fn new<K, V>(body: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            body: body
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a body field, treating an empty string as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.body
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Payload of a [`HttpResponse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Error(SignupError),
    Success(serde_json::Value),
}

/// Response produced by controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

/// Reject request with `400 Bad Request`.
pub fn bad_request(error: SignupError) -> HttpResponse {
    HttpResponse {
        status: StatusCode::BAD_REQUEST,
        body: ResponseBody::Error(error),
    }
}

/// Fail with `500 Internal Server Error`, without details.
pub fn server_error() -> HttpResponse {
    HttpResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ResponseBody::Error(SignupError::Server),
    }
}

/// Answer with `201 Created`.
pub fn created(payload: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: StatusCode::CREATED,
        body: ResponseBody::Success(payload),
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_field_is_absent() {
        let request = HttpRequest::new([("name", ""), ("email", "a@b.c")]);
        assert_eq!(request.field("name"), None);
        assert_eq!(request.field("email"), Some("a@b.c"));
        assert_eq!(request.field("password"), None);
    }

    #[test]
    fn test_helpers_status() {
        assert_eq!(
            bad_request(SignupError::InvalidParam("email".into())).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(server_error().status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(server_error().body, ResponseBody::Error(SignupError::Server));

        let response = created(json!({}));
        assert!(response.status.is_success());
        assert_eq!(response.body, ResponseBody::Success(json!({})));
    }
}
