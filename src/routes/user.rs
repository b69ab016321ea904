use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::{
        message_dto::MessageResponse,
        user_dto::{CreateUserPayload, ReplaceUserPayload, UpdateUserPayload, UserResponse},
    },
    error::Result,
    routes::{method_not_allowed, ResourceRequest},
    utils::validation::{parse_patch, parse_payload},
    AppState,
};

const ID_REQUIRED: &str = "Se requiere el ID del usuario";

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
        let user = state.users.get_by_id(id).await?;
        return Ok(Json(UserResponse::from(user)).into_response());
    }
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(users).into_response())
}

async fn create(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let payload: CreateUserPayload = parse_payload(request.body())?;
    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

async fn replace(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: ReplaceUserPayload = parse_payload(request.body())?;
    state.users.update(id, payload.into()).await?;
    Ok(Json(MessageResponse::new("Usuario actualizado correctamente")).into_response())
}

async fn update(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    let payload: UpdateUserPayload = parse_patch(request.body())?;
    state.users.update(id, payload).await?;
    Ok(Json(MessageResponse::new("Usuario actualizado parcialmente")).into_response())
}

async fn delete(state: &AppState, request: &ResourceRequest) -> Result<Response> {
    let id = request.require_id(ID_REQUIRED)?;
    state.users.delete(id).await?;
    Ok(Json(MessageResponse::new("Usuario eliminado correctamente")).into_response())
}
