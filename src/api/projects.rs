use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use grantflow_core::models::{
    CreateProjectInput, Project, ProjectRef, SectionUpsertInput, UpdateProjectInput,
};
use grantflow_core::Database;

use super::ApiError;

fn parse_ref(raw: &str) -> Result<ProjectRef, ApiError> {
    ProjectRef::parse(raw)
        .ok_or_else(|| ApiError::Validation(format!("invalid project identifier: {raw}")))
}

pub async fn list_projects(State(db): State<Database>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(db.list_projects()?))
}

pub async fn create_project(
    State(db): State<Database>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("project name must not be empty".into()));
    }
    Ok((StatusCode::CREATED, Json(db.create_project(input)?)))
}

pub async fn get_project(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_ref(&id)?;
    Ok(Json(db.resolve_or_create(&id)?))
}

pub async fn replace_project(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(input): Json<CreateProjectInput>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_ref(&id)?;
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("project name must not be empty".into()));
    }
    Ok(Json(db.replace_project(&id, input)?))
}

/// PATCH dispatch: a payload carrying `sectionId` is a section upsert,
/// anything else is a partial field merge.
pub async fn update_project(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_ref(&id)?;

    if body.get("sectionId").is_some() {
        let input: SectionUpsertInput = serde_json::from_value(body)
            .map_err(|err| ApiError::Validation(format!("malformed section payload: {err}")))?;
        if input.section_id.trim().is_empty() {
            return Err(ApiError::Validation("sectionId must not be empty".into()));
        }
        return Ok(Json(db.upsert_section(&id, input)?));
    }

    let mut body = body;
    if let Some(fields) = body.as_object_mut() {
        // Identifier keys must not override the resolved document's identity.
        fields.remove("id");
        fields.remove("_id");
    } else {
        return Err(ApiError::Validation(
            "update payload must be a JSON object".into(),
        ));
    }
    let input: UpdateProjectInput = serde_json::from_value(body)
        .map_err(|err| ApiError::Validation(format!("malformed update payload: {err}")))?;
    Ok(Json(db.update_project(&id, input)?))
}
