use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::types::{MergedEntry, RepoId};

use super::{
    error::ApiError,
    models::{
        DescriptionResponse, ErrorResponse, HealthResponse, ListQuery, OkResponse,
        UpdateDescriptionResponse,
    },
    AppState,
};

const TEXT_REQUIRED: &str = "\"text\" field is required";
const TEXT_NOT_STRING: &str = "\"text\" must be a string";

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_repos(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<MergedEntry>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        log::warn!("invalid listing query: {}", rejection.body_text());
        ApiError::bad_request("invalid query string").with_detail(rejection.body_text())
    })?;
    let merged = state
        .overlay
        .list(query.user.as_deref(), query.meta)
        .await?;
    Ok(Json(merged))
}

pub async fn get_description(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let id = parse_id(id)?;
    let found = state.overlay.read(&id)?;
    Ok(Json(DescriptionResponse {
        text: found.text().map(str::to_string),
    }))
}

pub async fn put_description(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateDescriptionResponse>, ApiError> {
    let id = parse_id(id)?;
    let Json(body) = payload.map_err(|rejection| {
        log::warn!("invalid description body for {}: {}", id, rejection.body_text());
        ApiError::bad_request("invalid JSON body").with_detail(rejection.body_text())
    })?;
    let text = required_text(&body)?;

    let description = state.overlay.write(&id, text)?;
    log::info!("✏️ description override saved for repository {}", id);
    Ok(Json(UpdateDescriptionResponse {
        ok: true,
        description,
    }))
}

pub async fn delete_description(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_id(id)?;
    state.overlay.remove(&id)?;
    log::info!("🧹 description override cleared for repository {}", id);
    Ok(Json(OkResponse { ok: true }))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("endpoint not found")),
    )
}

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<RepoId, ApiError> {
    let Path(raw) = path.map_err(|rejection| {
        log::warn!("invalid repository path: {}", rejection.body_text());
        ApiError::bad_request("invalid repository id").with_detail(rejection.body_text())
    })?;
    raw.parse::<RepoId>().map_err(|err| {
        log::warn!("Invalid repository id {:?}: {}", raw, err);
        ApiError::bad_request(format!("invalid repository id: {err}"))
    })
}

/// Missing and `null` are both "absent"; `""` is a valid value.
fn required_text(body: &Value) -> Result<&str, ApiError> {
    match body.get("text") {
        None | Some(Value::Null) => Err(ApiError::bad_request(TEXT_REQUIRED)),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ApiError::bad_request(TEXT_NOT_STRING)),
    }
}
