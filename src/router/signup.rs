use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Map, Value};

use crate::AppState;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Handler to sign up a user.
///
/// Body must be a JSON object. Only string members are read: `null` or
/// any other value is treated as an absent field.
pub async fn handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<HttpResponse> {
    let Json(body) = body?;

    let request = HttpRequest::new(body.into_iter().filter_map(
        |(field, value)| match value {
            Value::String(value) => Some((field, value)),
            _ => None,
        },
    ));

    let response = state.signup.handle(&request).await;
    crate::telemetry::record_signup(response.status);

    Ok(response)
}
