//! Axum extractor for raw form input
//!
//! Accepts either `application/x-www-form-urlencoded` (what an HTML form
//! posts) or a JSON object. Validation is not done here: the action decides
//! which summary message to attach, so it runs the schema itself.

use super::input::FormInput;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/json"))
}

fn bad_request(error: &str, details: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": error,
            "details": details
        })),
    )
        .into_response()
}

impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(payload): Json<Map<String, Value>> = Json::from_request(req, state)
                .await
                .map_err(|e| bad_request("Invalid JSON", e.to_string()))?;
            return Ok(FormInput::from_json(payload));
        }

        let Form(fields): Form<HashMap<String, String>> = Form::from_request(req, state)
            .await
            .map_err(|e| bad_request("Invalid form data", e.to_string()))?;
        Ok(FormInput::from(fields))
    }
}
