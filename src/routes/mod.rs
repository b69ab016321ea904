//! Single HTTP entrypoint.
//!
//! Every resource is served from the same URL; the `path` query parameter
//! picks the controller and `id` picks the row, e.g.
//! `PATCH /?path=postulacion&id=12`.

pub mod academic_background;
pub mod application;
pub mod employment_background;
pub mod health;
pub mod job_offer;
pub mod user;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use serde_json::Value as JsonValue;
use tower_http::trace::TraceLayer;

use crate::{
    error::{Error, Result},
    middleware::cors::api_cors,
    AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    JobOffer,
    Application,
    EmploymentBackground,
    AcademicBackground,
}

impl Resource {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "usuario" => Some(Resource::User),
            "oferta_laboral" => Some(Resource::JobOffer),
            "postulacion" => Some(Resource::Application),
            "antecedente_laboral" => Some(Resource::EmploymentBackground),
            "antecedente_academico" => Some(Resource::AcademicBackground),
            _ => None,
        }
    }
}

/// Query-string parameters understood by any controller. Unknown keys are
/// ignored; a known key may appear only once.
#[derive(Debug, Clone, Default)]
pub struct RequestQuery {
    pub path: Option<String>,
    pub id: Option<String>,
    pub estado: Option<String>,
    pub oferta_id: Option<String>,
    pub candidato_id: Option<String>,
    pub todas_las_ofertas: Option<String>,
}

impl RequestQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self> {
        let mut query = RequestQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "path" => &mut query.path,
                "id" => &mut query.id,
                "estado" => &mut query.estado,
                "oferta_id" => &mut query.oferta_id,
                "candidato_id" => &mut query.candidato_id,
                "todas_las_ofertas" => &mut query.todas_las_ofertas,
                _ => continue,
            };
            if slot.is_some() {
                return Err(Error::BadRequest(format!(
                    "El parámetro '{}' está repetido",
                    key
                )));
            }
            *slot = Some(value);
        }
        Ok(query)
    }
}

/// What a controller receives: method, row id, the remaining query string
/// and the decoded JSON body.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    pub method: Method,
    pub id: Option<i64>,
    pub query: RequestQuery,
    pub body: Option<JsonValue>,
}

impl ResourceRequest {
    pub fn new(method: Method, query: RequestQuery, body: &[u8]) -> Result<Self> {
        let id = parse_numeric_param("id", query.id.as_deref())?;
        let body = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(body)?)
        };
        Ok(Self {
            method,
            id,
            query,
            body,
        })
    }

    pub fn body(&self) -> Option<&JsonValue> {
        self.body.as_ref()
    }

    pub fn require_id(&self, message: &str) -> Result<i64> {
        self.id.ok_or_else(|| Error::BadRequest(message.to_string()))
    }

    pub fn oferta_id(&self) -> Result<Option<i64>> {
        parse_numeric_param("oferta_id", self.query.oferta_id.as_deref())
    }

    pub fn candidato_id(&self) -> Result<Option<i64>> {
        parse_numeric_param("candidato_id", self.query.candidato_id.as_deref())
    }

    /// `todas_las_ofertas` may arrive as a body key or a query parameter.
    pub fn wants_all_offers(&self) -> bool {
        let in_body = self
            .body
            .as_ref()
            .and_then(JsonValue::as_object)
            .is_some_and(|map| map.contains_key("todas_las_ofertas"));
        in_body || self.query.todas_las_ofertas.is_some()
    }
}

fn parse_numeric_param(name: &str, raw: Option<&str>) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
            Error::BadRequest(format!("El parámetro '{}' debe ser numérico", name))
        }),
    }
}

pub fn method_not_allowed(method: &Method) -> Error {
    Error::MethodNotAllowed(format!("Método {} no soportado", method))
}

#[axum::debug_handler]
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Bytes,
) -> Result<Response> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    let Query(pairs) = query.map_err(|err| Error::BadRequest(err.body_text()))?;
    // The first `path` picks the controller even when keys repeat.
    let path = pairs
        .iter()
        .find(|(key, _)| key == "path")
        .map(|(_, value)| value.as_str());
    let Some(resource) = path.and_then(Resource::from_path) else {
        tracing::debug!(?path, "Unknown resource path");
        return Err(Error::NotFound("Ruta no encontrada".to_string()));
    };
    let query = RequestQuery::from_pairs(pairs)?;
    let request = ResourceRequest::new(method, query, &body)?;

    match resource {
        Resource::User => user::handle(&state, request).await,
        Resource::JobOffer => job_offer::handle(&state, request).await,
        Resource::Application => application::handle(&state, request).await,
        Resource::EmploymentBackground => employment_background::handle(&state, request).await,
        Resource::AcademicBackground => academic_background::handle(&state, request).await,
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(dispatch))
        .route("/index.php", any(dispatch))
        .route("/health", get(health::health))
        .with_state(state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
}
