//! Error handler for signup.

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Error raised by a collaborator (email validator, account creator).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure descriptor returned as the body of a rejected signup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Missing param: {0}")]
    MissingParam(String),

    #[error("Invalid param: {0}")]
    InvalidParam(String),

    #[error("Internal server error")]
    Server,
}

impl SignupError {
    /// Kind of the error, as exposed on `name` JSON field.
    pub fn name(&self) -> &'static str {
        match self {
            SignupError::MissingParam(_) => "MissingParamError",
            SignupError::InvalidParam(_) => "InvalidParamError",
            SignupError::Server => "ServerError",
        }
    }

    /// Offending field, if any.
    pub fn param(&self) -> Option<&str> {
        match self {
            SignupError::MissingParam(field) | SignupError::InvalidParam(field) => {
                Some(field.as_str())
            },
            SignupError::Server => None,
        }
    }
}

impl Serialize for SignupError {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let param = self.param();
        let len = if param.is_some() { 3 } else { 2 };

        let mut state = serializer.serialize_struct("SignupError", len)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("message", &self.to_string())?;
        if let Some(param) = param {
            state.serialize_field("param", param)?;
        }
        state.end()
    }
}

/// Enum representing application errors, outside of signup validation.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("cannot read configuration: {0}")]
    Config(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("argon2 error: {0}")]
    Argon2(String),
}

/// Structure for detailed error responses.
#[derive(Debug, Serialize)]
pub struct ResponseError {
    r#type: Option<String>,
    title: String,
    status: u16,
    detail: String,
}

impl ResponseError {
    /// Update error status code.
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code.as_u16();
        self
    }

    /// Update `title` field.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    /// Add detailed error.
    pub fn details(mut self, description: &str) -> Self {
        self.detail = description.into();
        self
    }

    /// Transform [`ResponseError`] into axum [`Response`].
    pub fn into_response(self) -> std::result::Result<Response, axum::http::Error> {
        if let Ok(body) = serde_json::to_string(&self) {
            Response::builder()
                .status(self.status)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
        } else {
            Ok(internal_server_error())
        }
    }
}

impl Default for ResponseError {
    fn default() -> Self {
        Self {
            r#type: None,
            title: "Internal server error.".to_owned(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail: String::default(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let response = match &self {
            ServerError::Axum(rejection) => ResponseError::default()
                .title("Request body cannot be parsed.")
                .details(&rejection.body_text())
                .status(rejection.status()),
            _ => {
                tracing::error!(error = %self, "server returned 500 status");
                ResponseError::default()
            },
        };

        response
            .into_response()
            .unwrap_or_else(|_| internal_server_error())
    }
}

fn internal_server_error() -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(
            serde_json::json!({
                "type": null,
                "title": "Internal server error.",
                "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                "detail": null,
            })
            .to_string()
            .into(),
        )
        .unwrap_or_else(|_| Response::new("Internal server error".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_param_serialization() {
        let err = SignupError::MissingParam("email".into());
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "name": "MissingParamError",
                "message": "Missing param: email",
                "param": "email",
            })
        );
    }

    #[test]
    fn test_server_error_hides_param() {
        let value = serde_json::to_value(SignupError::Server).unwrap();
        assert_eq!(
            value,
            json!({ "name": "ServerError", "message": "Internal server error" })
        );
        assert!(value.get("param").is_none());
    }

    #[test]
    fn test_internal_error_status() {
        let response =
            ServerError::Argon2("bad params".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
