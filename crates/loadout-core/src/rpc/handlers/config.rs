//! Config Handler
//!
//! Registration of the client's external config directory.

use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

use super::common::*;
use super::super::protocol::JsonRpcResponse;
use crate::config::{ConfigStore, EXTERNAL_CONFIG_PATH_KEY};

pub async fn handle(store: &dyn ConfigStore, action: &str, params: &Value, id: Value) -> JsonRpcResponse {
    match action {
        "registerExternalPath" => handle_register(store, params, id).await,
        "getExternalPath" => ok(id, serde_json::json!(store.get(EXTERNAL_CONFIG_PATH_KEY))),
        _ => method_not_found(id, &format!("config.{}", action)),
    }
}

/// Store `path` when it names an existing directory.
///
/// Returns `false` (and stores nothing) otherwise.
async fn handle_register(store: &dyn ConfigStore, params: &Value, id: Value) -> JsonRpcResponse {
    let path = match require_string(params, "path", &id) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let is_dir = tokio::fs::metadata(Path::new(path))
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        warn!("Refusing to register {:?}: not a directory", path);
        return ok(id, Value::Bool(false));
    }

    match store.set(EXTERNAL_CONFIG_PATH_KEY, path) {
        Ok(()) => {
            info!("Registered external config path {:?}", path);
            ok(id, Value::Bool(true))
        }
        Err(e) => JsonRpcResponse::from_error(id, &e),
    }
}
