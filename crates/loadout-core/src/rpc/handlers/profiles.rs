//! Profiles Handler
//!
//! Profile lifecycle and sync methods over the registry.

use serde_json::Value;

use super::common::*;
use super::super::protocol::JsonRpcResponse;
use crate::profiles::{CreateProfileDto, ProfileRegistry, UpdateProfileDto};

pub async fn handle(
    registry: &ProfileRegistry,
    action: &str,
    params: &Value,
    id: Value,
) -> JsonRpcResponse {
    match action {
        "create" => handle_create(registry, params, id).await,
        "update" => handle_update(registry, params, id).await,
        "delete" => handle_delete(registry, params, id).await,
        "get" => handle_get(registry, params, id).await,
        "list" => handle_list(registry, id).await,
        "export" => handle_export(registry, params, id).await,
        "openFolder" => handle_open_folder(registry, params, id).await,
        _ => method_not_found(id, &format!("profiles.{}", action)),
    }
}

/// Params:
///   - name (required)
///   - color (optional, 7 characters, default "#FFFFFF")
///   - isFavorite (optional, default false)
async fn handle_create(registry: &ProfileRegistry, params: &Value, id: Value) -> JsonRpcResponse {
    let name = match require_string(params, "name", &id) {
        Ok(n) => n,
        Err(response) => return response,
    };

    let dto = CreateProfileDto {
        name: name.to_string(),
        color: optional_string(params, "color").map(String::from),
        is_favorite: optional_bool(params, "isFavorite"),
    };
    respond(id, registry.create(dto).await)
}

/// Params: id (required), name / color / isFavorite (optional)
async fn handle_update(registry: &ProfileRegistry, params: &Value, id: Value) -> JsonRpcResponse {
    let profile_id = match require_string(params, "id", &id) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let dto = UpdateProfileDto {
        name: optional_string(params, "name").map(String::from),
        color: optional_string(params, "color").map(String::from),
        is_favorite: optional_bool(params, "isFavorite"),
    };
    respond(id, registry.update(profile_id, dto).await)
}

async fn handle_delete(registry: &ProfileRegistry, params: &Value, id: Value) -> JsonRpcResponse {
    let profile_id = match require_string(params, "id", &id) {
        Ok(p) => p,
        Err(response) => return response,
    };
    respond(id, registry.delete(profile_id).await)
}

async fn handle_get(registry: &ProfileRegistry, params: &Value, id: Value) -> JsonRpcResponse {
    let profile_id = match require_string(params, "id", &id) {
        Ok(p) => p,
        Err(response) => return response,
    };
    respond(id, registry.get(profile_id).await)
}

async fn handle_list(registry: &ProfileRegistry, id: Value) -> JsonRpcResponse {
    let profiles = registry.get_all().await;
    let count = profiles.len();
    success_with_count(id, serde_json::json!(profiles), count)
}

async fn handle_export(registry: &ProfileRegistry, params: &Value, id: Value) -> JsonRpcResponse {
    let profile_id = match require_string(params, "id", &id) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match registry.export_to_client(profile_id).await {
        Ok(report) => ok(
            id,
            serde_json::json!({
                "success": report.is_success(),
                "copied": report.copied,
                "missing": report.missing,
                "failed": report.failed,
            }),
        ),
        Err(e) => JsonRpcResponse::from_error(id, &e),
    }
}

async fn handle_open_folder(
    registry: &ProfileRegistry,
    params: &Value,
    id: Value,
) -> JsonRpcResponse {
    let profile_id = match require_string(params, "id", &id) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match registry.open_folder_in_file_explorer(profile_id).await {
        Ok(()) => simple_success(id),
        Err(e) => JsonRpcResponse::from_error(id, &e),
    }
}
