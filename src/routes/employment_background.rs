use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::{
        background_dto::{
            CreateEmploymentPayload, ReplaceEmploymentPayload, UpdateEmploymentPayload,
        },
        message_dto::MessageResponse,
    },
    error::Result,
    models::user::Role,
    routes::{method_not_allowed, ResourceRequest},
    utils::validation::{empty_update, parse_patch, parse_payload},
    AppState,
};

const ID_REQUIRED: &str = "Se requiere el ID del antecedente laboral";

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
        let record = state.employment_backgrounds.get_by_id(id).await?;
        return Ok(Json(record).into_response());
    }
    if let Some(candidate_id) = request.candidato_id()? {
        let records = state.employment_backgrounds.list_for_candidate(candidate_id).await?;
        return Ok(Json(records).into_response());
    }
    Ok(Json(state.employment_backgrounds.list().await?).into_response())
}

async fn create(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let payload: CreateEmploymentPayload = parse_payload(request.body())?;
    payload.check()?;
    state
        .authorization
        .require_role(payload.candidate_id, Role::Candidate, "registrar antecedentes laborales")
        .await?;

    let record = state.employment_backgrounds.create(payload).await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

async fn replace(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: ReplaceEmploymentPayload = parse_payload(request.body())?;
    payload.check()?;

    state.employment_backgrounds.update(id, &payload.to_changeset()).await?;
    let message = MessageResponse::new("Antecedente laboral actualizado correctamente");
    Ok(Json(message).into_response())
}

async fn update(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: UpdateEmploymentPayload = parse_patch(request.body())?;
    let changes = payload.to_changeset();
    if changes.is_empty() {
        return Err(empty_update());
    }

    let current = state.employment_backgrounds.get_by_id(id).await?;
    payload.check_against(&current)?;

    state.employment_backgrounds.update(id, &changes).await?;
    let message = MessageResponse::new("Antecedente laboral actualizado parcialmente");
    Ok(Json(message).into_response())
}

async fn delete(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    state.employment_backgrounds.delete(id).await?;
    let message = MessageResponse::new("Antecedente laboral eliminado correctamente");
    Ok(Json(message).into_response())
}
