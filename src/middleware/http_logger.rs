use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::config::APP_CONFIG;
use crate::constants::API_KEY_HEADER;

/// Body fields that identify a person. Their values never reach the log
/// output.
const PERSONAL_FIELDS: [&str; 2] = ["ssn", "date_of_birth"];

fn redact_personal_fields(value: &mut Value) {
    if let Value::Object(map) = value {
        for field in PERSONAL_FIELDS {
            if let Some(entry) = map.get_mut(field) {
                *entry = Value::String("[REDACTED]".to_string());
            }
        }
    }
}

/// Logs one line per request: method, path, status, latency and, for
/// writes, the redacted body. The API key itself is never logged, only
/// whether one was presented.
pub async fn http_logger(req: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let key_presented = req.headers().contains_key(API_KEY_HEADER);

    // Writes carry a JSON body worth logging. Buffer it, then hand the
    // request on with the body restored.
    let (req, logged_body) = if method == Method::POST || method == Method::PUT {
        let (parts, body) = req.into_parts();
        let bytes: Bytes = body
            .collect()
            .await
            .map_err(|err| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("failed to read request body: {err}"),
                )
            })?
            .to_bytes();
        let logged = match serde_json::from_slice::<Value>(&bytes) {
            Ok(mut json) => {
                redact_personal_fields(&mut json);
                json.to_string()
            }
            Err(_) => format!("<{} bytes, not json>", bytes.len()),
        };
        (Request::from_parts(parts, Body::from(bytes)), Some(logged))
    } else {
        (req, None)
    };

    let response = next.run(req).await;

    if method == Method::OPTIONS {
        // preflight noise
        return Ok(response);
    }

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis(),
        key_presented,
        body = logged_body.as_deref().unwrap_or(""),
        app_env = %APP_CONFIG.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn personal_fields_are_redacted() {
        let mut body = json!({
            "first_name": "Draco",
            "date_of_birth": "1980-06-05",
            "ssn": "050680-6367",
        });
        redact_personal_fields(&mut body);
        assert_eq!(body["first_name"], "Draco");
        assert_eq!(body["ssn"], "[REDACTED]");
        assert_eq!(body["date_of_birth"], "[REDACTED]");
    }

    #[test]
    fn non_object_bodies_pass_through() {
        let mut body = json!(["050680-6367"]);
        redact_personal_fields(&mut body);
        assert_eq!(body, json!(["050680-6367"]));
    }
}
