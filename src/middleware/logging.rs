use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::time::Instant;

/// JSON fields whose values are never written to logs
const REDACTED_FIELDS: &[&str] = &["signature"];

const MAX_BODY_BYTES: usize = 1024 * 1024;
const MAX_LOGGED_CHARS: usize = 2000;

/// Middleware that logs request and response bodies with a per-request id
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to read request body: {}", e);
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        body = %loggable_body(&bytes),
        "→ Request"
    );

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let status = response.status();
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to read response body: {}", e);
            Bytes::new()
        }
    };

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %start.elapsed().as_millis(),
        body = %loggable_body(&bytes),
        "← Response"
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Body text for logs: redacted if it is a JSON object, then truncated
fn loggable_body(bytes: &[u8]) -> String {
    let text = match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(mut map)) => {
            for field in REDACTED_FIELDS {
                if let Some(value) = map.get_mut(*field) {
                    *value = Value::String("[redacted]".to_string());
                }
            }
            Value::Object(map).to_string()
        }
        _ => String::from_utf8_lossy(bytes).trim().to_string(),
    };
    truncate_body(&text, MAX_LOGGED_CHARS)
}

/// Truncate body for logging, adding ellipsis if truncated
fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        None => body.to_string(),
        Some((cut, _)) => format!(
            "{}...[truncated, {} bytes total]",
            &body[..cut],
            body.len()
        ),
    }
}
