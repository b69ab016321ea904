use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::{
        background_dto::{CreateAcademicPayload, ReplaceAcademicPayload, UpdateAcademicPayload},
        message_dto::MessageResponse,
    },
    error::Result,
    models::user::Role,
    routes::{method_not_allowed, ResourceRequest},
    utils::validation::{empty_update, parse_patch, parse_payload},
    AppState,
};

const ID_REQUIRED: &str = "Se requiere el ID del antecedente académico";

pub async fn handle(state: &AppState, request: ResourceRequest) -> Result<Response> {
    match request.method {
        Method::GET => get(state, &request).await,
        Method::POST => create(state, &request).await,
        Method::PUT => replace(state, &request).await,
        Method::PATCH => update(state, &request).await,
        Method::DELETE => delete(state, &request).await,
        ref other => Err(method_not_allowed(other)),
    }
}

async fn get(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    if let Some(id) = request.id {
        let record = state.academic_backgrounds.get_by_id(id).await?;
        return Ok(Json(record).into_response());
    }
    if let Some(candidate_id) = request.candidato_id()? {
        let records = state.academic_backgrounds.list_for_candidate(candidate_id).await?;
        return Ok(Json(records).into_response());
    }
    Ok(Json(state.academic_backgrounds.list().await?).into_response())
}

async fn create(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let payload: CreateAcademicPayload = parse_payload(request.body())?;
    payload.check()?;
    state
        .authorization
        .require_role(payload.candidate_id, Role::Candidate, "registrar antecedentes académicos")
        .await?;

    let record = state.academic_backgrounds.create(payload).await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

async fn replace(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: ReplaceAcademicPayload = parse_payload(request.body())?;
    payload.check()?;

    state.academic_backgrounds.update(id, &payload.to_changeset()).await?;
    let message = MessageResponse::new("Antecedente académico actualizado correctamente");
    Ok(Json(message).into_response())
}

async fn update(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: UpdateAcademicPayload = parse_patch(request.body())?;
    let changes = payload.to_changeset();
    if changes.is_empty() {
        return Err(empty_update());
    }

    let current = state.academic_backgrounds.get_by_id(id).await?;
    payload.check_against(&current)?;

    state.academic_backgrounds.update(id, &changes).await?;
    let message = MessageResponse::new("Antecedente académico actualizado parcialmente");
    Ok(Json(message).into_response())
}

async fn delete(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    state.academic_backgrounds.delete(id).await?;
    let message = MessageResponse::new("Antecedente académico eliminado correctamente");
    Ok(Json(message).into_response())
}
