use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "Postulando")]
    Applying,
    #[serde(rename = "Revisando")]
    Reviewing,
    #[serde(rename = "Entrevista Psicológica")]
    PsychInterview,
    #[serde(rename = "Entrevista Personal")]
    PersonalInterview,
    #[serde(rename = "Seleccionado")]
    Selected,
    #[serde(rename = "Descartado")]
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applying => "Postulando",
            ApplicationStatus::Reviewing => "Revisando",
            ApplicationStatus::PsychInterview => "Entrevista Psicológica",
            ApplicationStatus::PersonalInterview => "Entrevista Personal",
            ApplicationStatus::Selected => "Seleccionado",
            ApplicationStatus::Rejected => "Descartado",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    pub id: i64,
    #[serde(rename = "candidato_id")]
    pub candidate_id: i64,
    #[serde(rename = "oferta_laboral_id")]
    pub job_offer_id: i64,
    #[serde(rename = "estado_postulacion")]
    pub status: String,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
    #[serde(rename = "fecha_postulacion")]
    pub applied_at: DateTime<Utc>,
}

/// An application joined with the applicant's user record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Applicant {
    #[serde(rename = "postulacion_id")]
    pub application_id: i64,
    #[serde(skip)]
    pub job_offer_id: i64,
    #[serde(rename = "candidato_id")]
    pub candidate_id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "estado_postulacion")]
    pub status: String,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
    #[serde(rename = "fecha_postulacion")]
    pub applied_at: DateTime<Utc>,
}

/// One offer with everyone who applied to it.
#[derive(Debug, Clone, Serialize)]
pub struct OfferApplicants {
    pub oferta_id: i64,
    pub titulo: String,
    pub postulantes: Vec<Applicant>,
}

/// A candidate's view of their own application.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateApplication {
    #[serde(rename = "postulacion_id")]
    pub application_id: i64,
    #[serde(rename = "estado_postulacion")]
    pub status: String,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
    #[serde(rename = "oferta_titulo")]
    pub offer_title: String,
    #[serde(rename = "oferta_descripcion")]
    pub offer_description: String,
}
