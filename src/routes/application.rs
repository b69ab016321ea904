use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::{
        application_dto::{
            CreateApplicationPayload, ReplaceApplicationPayload, UpdateApplicationPayload,
        },
        message_dto::MessageResponse,
    },
    error::Result,
    models::user::Role,
    routes::{method_not_allowed, ResourceRequest},
    utils::validation::{empty_update, parse_patch, parse_payload},
    AppState,
};

const ID_REQUIRED: &str = "Se requiere el ID de la postulación";

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

/// Listing variants, first match wins: applicants of one offer, applicants
/// grouped by every offer, one candidate's applications, one row, all rows.
async fn get(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    if let Some(offer_id) = request.oferta_id()? {
        state.job_offers.get_by_id(offer_id).await?;
        let applicants = state.applications.list_applicants_for_offer(offer_id).await?;
        return Ok(Json(applicants).into_response());
    }
    if request.wants_all_offers() {
        let grouped = state.applications.list_applicants_by_offer().await?;
        return Ok(Json(grouped).into_response());
    }
    if let Some(candidate_id) = request.candidato_id()? {
        let own = state.applications.list_for_candidate(candidate_id).await?;
        return Ok(Json(own).into_response());
    }
    if let Some(id) = request.id {
        let application = state.applications.get_by_id(id).await?;
        return Ok(Json(application).into_response());
    }
    Ok(Json(state.applications.list().await?).into_response())
}

async fn create(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let payload: CreateApplicationPayload = parse_payload(request.body())?;
    state.job_offers.get_by_id(payload.job_offer_id).await?;
    state
        .authorization
        .require_role(payload.candidate_id, Role::Candidate, "postular a ofertas laborales")
        .await?;

    let application = state.applications.create(payload).await?;
    Ok((StatusCode::CREATED, Json(application)).into_response())
}

async fn replace(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: ReplaceApplicationPayload = parse_payload(request.body())?;

    state.applications.get_by_id(id).await?;
    if let Some(recruiter_id) = payload.recruiter_id {
        state
            .authorization
            .require_role(recruiter_id, Role::Recruiter, "actualizar postulaciones")
            .await?;
    }

    state.applications.update(id, &payload.to_changeset()).await?;
    Ok(Json(MessageResponse::new("Postulación actualizada correctamente")).into_response())
}

async fn update(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: UpdateApplicationPayload = parse_patch(request.body())?;
    payload.check()?;
    let changes = payload.to_changeset();
    if changes.is_empty() {
        return Err(empty_update());
    }

    state.applications.update(id, &changes).await?;
    Ok(Json(MessageResponse::new("Postulación actualizada parcialmente")).into_response())
}

async fn delete(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    state.applications.delete(id).await?;
    Ok(Json(MessageResponse::new("Postulación eliminada correctamente")).into_response())
}
