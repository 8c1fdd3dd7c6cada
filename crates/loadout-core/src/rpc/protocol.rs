//! JSON-RPC 2.0 Protocol Implementation
//!
//! Parsing and serialization of JSON-RPC 2.0 messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{ErrorCode, LoadoutError};

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (must be "2.0")
    pub jsonrpc: String,

    /// Request ID for correlating responses
    #[serde(default)]
    pub id: Option<Value>,

    /// Method name (e.g., "profiles.create", "config.getExternalPath")
    pub method: String,

    /// Method parameters
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Check if this is a notification (no id = no response expected)
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Validate the request structure
    pub fn validate(&self) -> Result<(), String> {
        if self.jsonrpc != "2.0" {
            return Err("Invalid JSON-RPC version, expected '2.0'".to_string());
        }
        if self.method.is_empty() {
            return Err("Method cannot be empty".to_string());
        }
        Ok(())
    }

    /// Parse method into namespace and action
    /// e.g., "profiles.list" -> ("profiles", "list")
    pub fn parse_method(&self) -> (&str, &str) {
        if let Some((namespace, action)) = self.method.split_once('.') {
            (namespace, action)
        } else {
            (self.method.as_str(), "")
        }
    }
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version
    pub jsonrpc: String,

    /// Request ID (copied from request)
    pub id: Value,

    /// Result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error (on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }

    /// Create an error response from an engine error
    pub fn from_error(id: Value, err: &LoadoutError) -> Self {
        Self::error(id, err.code().code(), err.to_string(), err.data())
    }

    /// Create a parse error response (for malformed JSON)
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::error(Value::Null, ErrorCode::ParseError.code(), message, None)
    }

    /// Create an invalid request error
    pub fn invalid_request(id: Value, message: impl Into<String>) -> Self {
        Self::error(id, ErrorCode::InvalidRequest.code(), message, None)
    }

    /// Create a method not found error
    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self::error(
            id,
            ErrorCode::MethodNotFound.code(),
            format!("Method not found: {}", method),
            None,
        )
    }

    /// Create an invalid params error
    pub fn invalid_params(id: Value, message: impl Into<String>) -> Self {
        Self::error(id, ErrorCode::InvalidParams.code(), message, None)
    }
}

/// JSON-RPC 2.0 Error Object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,

    /// Error message
    pub message: String,

    /// Additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// One line of input: a single request or a batch.
///
/// Batch elements parse independently, so one malformed element only
/// yields an error response for that element.
#[derive(Debug)]
pub enum Incoming {
    Single(JsonRpcRequest),
    Batch(Vec<Result<JsonRpcRequest, JsonRpcResponse>>),
}

/// Batch request support - parse either single request or array of requests
pub fn parse_request(input: &str) -> Result<Incoming, JsonRpcResponse> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(JsonRpcResponse::parse_error("Empty request"));
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| JsonRpcResponse::parse_error(e.to_string()))?;

    match value {
        Value::Array(elements) if elements.is_empty() => Err(JsonRpcResponse::invalid_request(
            Value::Null,
            "Empty batch request",
        )),
        Value::Array(elements) => Ok(Incoming::Batch(
            elements.into_iter().map(request_from_value).collect(),
        )),
        other => request_from_value(other).map(Incoming::Single),
    }
}

fn request_from_value(value: Value) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    serde_json::from_value(value)
        .map_err(|e| JsonRpcResponse::invalid_request(id, format!("Invalid request: {}", e)))
}
