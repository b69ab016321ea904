use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::database::changeset::Changeset;
use crate::error::{Error, Result};
use crate::models::background::{AcademicBackground, EmploymentBackground};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAcademicPayload {
    #[serde(rename = "candidato_id")]
    pub candidate_id: i64,
    #[serde(rename = "institucion")]
    #[validate(length(min = 1, message = "El campo 'institucion' es obligatorio"))]
    pub institution: String,
    #[serde(rename = "titulo_obtenido")]
    #[validate(length(min = 1, message = "El campo 'titulo_obtenido' es obligatorio"))]
    pub degree: String,
    #[serde(rename = "anio_ingreso")]
    #[validate(range(min = 1900, max = 2100))]
    pub start_year: i32,
    #[serde(rename = "anio_egreso")]
    #[validate(range(min = 1900, max = 2100))]
    pub end_year: i32,
}

impl CreateAcademicPayload {
    pub fn check(&self) -> Result<()> {
        check_years(self.start_year, self.end_year)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReplaceAcademicPayload {
    #[serde(rename = "institucion")]
    #[validate(length(min = 1, message = "El campo 'institucion' es obligatorio"))]
    pub institution: String,
    #[serde(rename = "titulo_obtenido")]
    #[validate(length(min = 1, message = "El campo 'titulo_obtenido' es obligatorio"))]
    pub degree: String,
    #[serde(rename = "anio_ingreso")]
    #[validate(range(min = 1900, max = 2100))]
    pub start_year: i32,
    #[serde(rename = "anio_egreso")]
    #[validate(range(min = 1900, max = 2100))]
    pub end_year: i32,
}

impl ReplaceAcademicPayload {
    pub fn check(&self) -> Result<()> {
        check_years(self.start_year, self.end_year)
    }

    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("academic_backgrounds");
        changes
            .set("institution", self.institution.clone())
            .set("degree", self.degree.clone())
            .set("start_year", self.start_year)
            .set("end_year", self.end_year);
        changes
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateAcademicPayload {
    #[serde(rename = "institucion")]
    #[validate(length(min = 1, message = "El campo 'institucion' no puede estar vacío"))]
    pub institution: Option<String>,
    #[serde(rename = "titulo_obtenido")]
    #[validate(length(min = 1, message = "El campo 'titulo_obtenido' no puede estar vacío"))]
    pub degree: Option<String>,
    #[serde(rename = "anio_ingreso")]
    #[validate(range(min = 1900, max = 2100))]
    pub start_year: Option<i32>,
    #[serde(rename = "anio_egreso")]
    #[validate(range(min = 1900, max = 2100))]
    pub end_year: Option<i32>,
}

impl UpdateAcademicPayload {
    /// Checks the year ordering the row would have after the update.
    pub fn check_against(&self, current: &AcademicBackground) -> Result<()> {
        check_years(
            self.start_year.unwrap_or(current.start_year),
            self.end_year.unwrap_or(current.end_year),
        )
    }

    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("academic_backgrounds");
        changes
            .set_opt("institution", self.institution.clone())
            .set_opt("degree", self.degree.clone())
            .set_opt("start_year", self.start_year)
            .set_opt("end_year", self.end_year);
        changes
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmploymentPayload {
    #[serde(rename = "candidato_id")]
    pub candidate_id: i64,
    #[serde(rename = "empresa")]
    #[validate(length(min = 1, message = "El campo 'empresa' es obligatorio"))]
    pub company: String,
    #[serde(rename = "cargo")]
    #[validate(length(min = 1, message = "El campo 'cargo' es obligatorio"))]
    pub title: String,
    #[serde(rename = "funciones")]
    #[validate(length(min = 1, message = "El campo 'funciones' es obligatorio"))]
    pub duties: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_termino")]
    pub end_date: NaiveDate,
}

impl CreateEmploymentPayload {
    pub fn check(&self) -> Result<()> {
        check_dates(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReplaceEmploymentPayload {
    #[serde(rename = "empresa")]
    #[validate(length(min = 1, message = "El campo 'empresa' es obligatorio"))]
    pub company: String,
    #[serde(rename = "cargo")]
    #[validate(length(min = 1, message = "El campo 'cargo' es obligatorio"))]
    pub title: String,
    #[serde(rename = "funciones")]
    #[validate(length(min = 1, message = "El campo 'funciones' es obligatorio"))]
    pub duties: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_termino")]
    pub end_date: NaiveDate,
}

impl ReplaceEmploymentPayload {
    pub fn check(&self) -> Result<()> {
        check_dates(self.start_date, self.end_date)
    }

    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("employment_backgrounds");
        changes
            .set("company", self.company.clone())
            .set("title", self.title.clone())
            .set("duties", self.duties.clone())
            .set("start_date", self.start_date)
            .set("end_date", self.end_date);
        changes
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmploymentPayload {
    #[serde(rename = "empresa")]
    #[validate(length(min = 1, message = "El campo 'empresa' no puede estar vacío"))]
    pub company: Option<String>,
    #[serde(rename = "cargo")]
    #[validate(length(min = 1, message = "El campo 'cargo' no puede estar vacío"))]
    pub title: Option<String>,
    #[serde(rename = "funciones")]
    #[validate(length(min = 1, message = "El campo 'funciones' no puede estar vacío"))]
    pub duties: Option<String>,
    #[serde(rename = "fecha_inicio")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fecha_termino")]
    pub end_date: Option<NaiveDate>,
}

impl UpdateEmploymentPayload {
    pub fn check_against(&self, current: &EmploymentBackground) -> Result<()> {
        check_dates(
            self.start_date.unwrap_or(current.start_date),
            self.end_date.unwrap_or(current.end_date),
        )
    }

    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("employment_backgrounds");
        changes
            .set_opt("company", self.company.clone())
            .set_opt("title", self.title.clone())
            .set_opt("duties", self.duties.clone())
            .set_opt("start_date", self.start_date)
            .set_opt("end_date", self.end_date);
        changes
    }
}

fn check_years(start: i32, end: i32) -> Result<()> {
    if end < start {
        return Err(Error::BadRequest(
            "El año de egreso no puede ser anterior al año de ingreso".to_string(),
        ));
    }
    Ok(())
}

fn check_dates(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(Error::BadRequest(
            "La fecha de término no puede ser anterior a la fecha de inicio".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn academic_row() -> AcademicBackground {
        AcademicBackground {
            id: 1,
            candidate_id: 2,
            institution: "Universidad de Chile".into(),
            degree: "Ingeniería Civil".into(),
            start_year: 2012,
            end_year: 2018,
        }
    }

    #[test]
    fn end_year_before_start_is_rejected() {
        let payload: CreateAcademicPayload = serde_json::from_value(json!({
            "candidato_id": 2,
            "institucion": "DUOC",
            "titulo_obtenido": "Técnico",
            "anio_ingreso": 2020,
            "anio_egreso": 2019
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.check().is_err());
    }

    #[test]
    fn partial_years_are_checked_against_the_stored_row() {
        let patch = UpdateAcademicPayload {
            end_year: Some(2010),
            ..Default::default()
        };
        assert!(patch.check_against(&academic_row()).is_err());

        let patch = UpdateAcademicPayload {
            start_year: Some(2013),
            ..Default::default()
        };
        assert!(patch.check_against(&academic_row()).is_ok());
    }

    #[test]
    fn owner_is_not_an_updatable_field() {
        let body = json!({ "candidato_id": 5 });
        assert!(serde_json::from_value::<UpdateAcademicPayload>(body.clone()).is_err());
        assert!(serde_json::from_value::<UpdateEmploymentPayload>(body).is_err());
    }

    #[test]
    fn employment_patch_binds_dates() {
        let payload: UpdateEmploymentPayload = serde_json::from_value(json!({
            "cargo": "Jefe de proyecto",
            "fecha_termino": "2024-06-30"
        }))
        .unwrap();
        let builder = payload.to_changeset().to_query(8).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE employment_backgrounds SET title = $1, end_date = $2 WHERE id = $3"
        );
    }
}
