//! Request Dispatcher
//!
//! Routes JSON-RPC requests by namespace to the profile and config handlers.

pub mod common;
pub mod config;
pub mod profiles;

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::protocol::{parse_request, Incoming, JsonRpcRequest, JsonRpcResponse};
use crate::config::ConfigStore;
use crate::profiles::ProfileRegistry;

pub struct Dispatcher {
    registry: Arc<ProfileRegistry>,
    store: Arc<dyn ConfigStore>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ProfileRegistry>, store: Arc<dyn ConfigStore>) -> Self {
        Self { registry, store }
    }

    /// Handle a JSON-RPC request
    pub async fn handle(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        if let Err(message) = request.validate() {
            warn!("Invalid request: {}", message);
            return JsonRpcResponse::invalid_request(id, message);
        }

        debug!("Handling method: {}", request.method);
        let (namespace, action) = request.parse_method();

        match namespace {
            "profiles" => profiles::handle(&self.registry, action, &request.params, id).await,
            "config" => config::handle(self.store.as_ref(), action, &request.params, id).await,
            _ => JsonRpcResponse::method_not_found(id, &request.method),
        }
    }

    /// Handle one raw line of input.
    ///
    /// Returns the serialized reply, or `None` when the line held only
    /// notifications.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let incoming = match parse_request(line) {
            Ok(incoming) => incoming,
            Err(response) => return serde_json::to_string(&response).ok(),
        };

        match incoming {
            Incoming::Single(request) => {
                let response = self.handle(&request).await;
                if request.is_notification() {
                    None
                } else {
                    serde_json::to_string(&response).ok()
                }
            }
            Incoming::Batch(items) => {
                let mut responses = Vec::new();
                for item in items {
                    match item {
                        Ok(request) => {
                            let response = self.handle(&request).await;
                            if !request.is_notification() {
                                responses.push(response);
                            }
                        }
                        Err(response) => responses.push(response),
                    }
                }

                if responses.is_empty() {
                    None
                } else {
                    serde_json::to_string(&responses).ok()
                }
            }
        }
    }
}
