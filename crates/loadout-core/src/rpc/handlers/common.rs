//! Common Handler Utilities
//!
//! Shared parameter extraction and response construction.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::super::protocol::JsonRpcResponse;
use crate::common::LoadoutResult;

// ────────────────────────────────────────────────────────────────────────────
// Parameter Extraction Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Extract a required string parameter
pub fn require_string<'a>(
    params: &'a Value,
    key: &str,
    id: &Value,
) -> Result<&'a str, JsonRpcResponse> {
    params.get(key).and_then(|v| v.as_str()).ok_or_else(|| {
        JsonRpcResponse::invalid_params(id.clone(), format!("Missing '{}' parameter", key))
    })
}

/// Extract an optional string parameter
pub fn optional_string<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

/// Extract an optional bool parameter
pub fn optional_bool(params: &Value, key: &str) -> Option<bool> {
    params.get(key).and_then(|v| v.as_bool())
}

// ────────────────────────────────────────────────────────────────────────────
// Response Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Success response with data
#[inline]
pub fn ok(id: Value, data: Value) -> JsonRpcResponse {
    JsonRpcResponse::success(id, data)
}

/// Method not found error
#[inline]
pub fn method_not_found(id: Value, method: &str) -> JsonRpcResponse {
    JsonRpcResponse::method_not_found(id, method)
}

/// Success response with a simple "success: true" payload
#[inline]
pub fn simple_success(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::success(id, serde_json::json!({ "success": true }))
}

/// Success response with a count field
#[inline]
pub fn success_with_count(id: Value, data: Value, count: usize) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "data": data,
            "count": count,
        }),
    )
}

/// Serialize an engine result into a response
pub fn respond<T: Serialize>(id: Value, result: LoadoutResult<T>) -> JsonRpcResponse {
    match result.and_then(|value| Ok(serde_json::to_value(value)?)) {
        Ok(value) => ok(id, value),
        Err(e) => {
            warn!("Request failed: {}", e);
            JsonRpcResponse::from_error(id, &e)
        }
    }
}
