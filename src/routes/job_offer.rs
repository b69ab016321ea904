use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value as JsonValue;

use crate::{
    dto::{
        job_offer_dto::{
            CreateJobOfferPayload, JobOfferListQuery, ReplaceJobOfferPayload,
            UpdateJobOfferPayload,
        },
        message_dto::MessageResponse,
    },
    error::{Error, Result},
    models::{job_offer::OfferStatus, user::Role},
    routes::{method_not_allowed, ResourceRequest},
    utils::validation::{empty_update, parse_patch, parse_payload},
    AppState,
};

const ID_REQUIRED: &str = "Se requiere el ID de la oferta laboral";
const DEACTIVATE: &str = "desactivar";

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
    let filter = JobOfferListQuery {
        estado: request.query.estado.clone(),
    };
    if filter.only_open() {
        let offers = state.job_offers.list_by_status(OfferStatus::Open).await?;
        return Ok(Json(offers).into_response());
    }
    if let Some(id) = request.id {
        let offer = state.job_offers.get_by_id(id).await?;
        return Ok(Json(offer).into_response());
    }
    Ok(Json(state.job_offers.list().await?).into_response())
}

async fn create(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let payload: CreateJobOfferPayload = parse_payload(request.body())?;
    payload.check()?;
    state
        .authorization
        .require_role(payload.recruiter_id, Role::Recruiter, "crear ofertas laborales")
        .await?;

    let offer = state.job_offers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(offer)).into_response())
}

/// Full replacement, or logical deactivation when the body carries
/// `"accion": "desactivar"`.
async fn replace(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;

    match requested_action(request.body()) {
        Some(DEACTIVATE) => {
            state.job_offers.deactivate(id).await?;
            return Ok(Json(MessageResponse::new("Oferta laboral desactivada")).into_response());
        }
        Some(other) => {
            return Err(Error::BadRequest(format!("Acción no soportada: '{}'", other)));
        }
        None => {}
    }

    let payload: ReplaceJobOfferPayload = parse_payload(request.body())?;
    payload.check()?;
    state.job_offers.update(id, &payload.to_changeset()).await?;
    Ok(Json(MessageResponse::new("Oferta laboral actualizada correctamente")).into_response())
}

async fn update(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: UpdateJobOfferPayload = parse_patch(request.body())?;
    payload.check()?;
    let changes = payload.to_changeset();
    if changes.is_empty() {
        return Err(empty_update());
    }

    state.job_offers.update(id, &changes).await?;
    Ok(Json(MessageResponse::new("Oferta laboral actualizada parcialmente")).into_response())
}

async fn delete(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    state.job_offers.delete(id).await?;
    Ok(Json(MessageResponse::new("Oferta laboral eliminada correctamente")).into_response())
}

fn requested_action(body: Option<&JsonValue>) -> Option<&str> {
    body?.get("accion")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_is_read_from_the_body() {
        let body = json!({ "accion": "desactivar" });
        assert_eq!(requested_action(Some(&body)), Some(DEACTIVATE));
        assert_eq!(requested_action(Some(&json!({ "titulo": "x" }))), None);
        assert_eq!(requested_action(None), None);
    }
}
