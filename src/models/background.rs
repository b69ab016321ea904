use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AcademicBackground {
    pub id: i64,
    #[serde(rename = "candidato_id")]
    pub candidate_id: i64,
    #[serde(rename = "institucion")]
    pub institution: String,
    #[serde(rename = "titulo_obtenido")]
    pub degree: String,
    #[serde(rename = "anio_ingreso")]
    pub start_year: i32,
    #[serde(rename = "anio_egreso")]
    pub end_year: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmploymentBackground {
    pub id: i64,
    #[serde(rename = "candidato_id")]
    pub candidate_id: i64,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "cargo")]
    pub title: String,
    #[serde(rename = "funciones")]
    pub duties: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_termino")]
    pub end_date: NaiveDate,
}
