use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::database::changeset::Changeset;
use crate::error::{Error, Result};
use crate::models::job_offer::{ContractType, OfferStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobOfferPayload {
    #[serde(rename = "titulo")]
    #[validate(length(min = 1, message = "El campo 'titulo' es obligatorio"))]
    pub title: String,
    #[serde(rename = "descripcion")]
    #[validate(length(min = 1, message = "El campo 'descripcion' es obligatorio"))]
    pub description: String,
    #[serde(rename = "ubicacion")]
    #[validate(length(min = 1, message = "El campo 'ubicacion' es obligatorio"))]
    pub location: String,
    #[serde(rename = "salario")]
    pub salary: Decimal,
    #[serde(rename = "tipo_contrato")]
    pub contract_type: Option<ContractType>,
    #[serde(rename = "fecha_cierre")]
    pub close_date: NaiveDate,
    #[serde(rename = "estado")]
    pub status: Option<OfferStatus>,
    #[serde(rename = "reclutador_id")]
    pub recruiter_id: i64,
}

impl CreateJobOfferPayload {
    pub fn check(&self) -> Result<()> {
        check_salary(Some(self.salary))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReplaceJobOfferPayload {
    #[serde(rename = "titulo")]
    #[validate(length(min = 1, message = "El campo 'titulo' es obligatorio"))]
    pub title: String,
    #[serde(rename = "descripcion")]
    #[validate(length(min = 1, message = "El campo 'descripcion' es obligatorio"))]
    pub description: String,
    #[serde(rename = "ubicacion")]
    #[validate(length(min = 1, message = "El campo 'ubicacion' es obligatorio"))]
    pub location: String,
    #[serde(rename = "salario")]
    pub salary: Decimal,
    #[serde(rename = "tipo_contrato")]
    pub contract_type: ContractType,
    #[serde(rename = "fecha_cierre")]
    pub close_date: NaiveDate,
    #[serde(rename = "estado")]
    pub status: OfferStatus,
}

impl ReplaceJobOfferPayload {
    pub fn check(&self) -> Result<()> {
        check_salary(Some(self.salary))
    }

    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("job_offers");
        changes
            .set("title", self.title.clone())
            .set("description", self.description.clone())
            .set("location", self.location.clone())
            .set("salary", self.salary)
            .set("contract_type", self.contract_type.as_str())
            .set("close_date", self.close_date)
            .set("status", self.status.as_str());
        changes
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateJobOfferPayload {
    #[serde(rename = "titulo")]
    #[validate(length(min = 1, message = "El campo 'titulo' no puede estar vacío"))]
    pub title: Option<String>,
    #[serde(rename = "descripcion")]
    #[validate(length(min = 1, message = "El campo 'descripcion' no puede estar vacío"))]
    pub description: Option<String>,
    #[serde(rename = "ubicacion")]
    #[validate(length(min = 1, message = "El campo 'ubicacion' no puede estar vacío"))]
    pub location: Option<String>,
    #[serde(rename = "salario")]
    pub salary: Option<Decimal>,
    #[serde(rename = "tipo_contrato")]
    pub contract_type: Option<ContractType>,
    #[serde(rename = "fecha_cierre")]
    pub close_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    pub status: Option<OfferStatus>,
}

impl UpdateJobOfferPayload {
    pub fn check(&self) -> Result<()> {
        check_salary(self.salary)
    }

    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("job_offers");
        changes
            .set_opt("title", self.title.clone())
            .set_opt("description", self.description.clone())
            .set_opt("location", self.location.clone())
            .set_opt("salary", self.salary)
            .set_opt("contract_type", self.contract_type.map(|c| c.as_str()))
            .set_opt("close_date", self.close_date)
            .set_opt("status", self.status.map(|s| s.as_str()));
        changes
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobOfferListQuery {
    pub estado: Option<String>,
}

impl JobOfferListQuery {
    /// Only `vigentes` filters; any other value lists every offer.
    pub fn only_open(&self) -> bool {
        self.estado.as_deref() == Some("vigentes")
    }
}

fn check_salary(salary: Option<Decimal>) -> Result<()> {
    match salary {
        Some(value) if value.is_sign_negative() => Err(Error::BadRequest(
            "El salario no puede ser negativo".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_without_contract_or_status_leaves_them_for_defaults() {
        let payload: CreateJobOfferPayload = serde_json::from_value(json!({
            "titulo": "Analista QA",
            "descripcion": "Pruebas manuales y automatizadas",
            "ubicacion": "Santiago",
            "salario": 1200000,
            "fecha_cierre": "2025-12-31",
            "reclutador_id": 4
        }))
        .unwrap();
        assert!(payload.contract_type.is_none());
        assert!(payload.status.is_none());
        assert!(payload.check().is_ok());
    }

    #[test]
    fn negative_salary_is_rejected() {
        let payload = UpdateJobOfferPayload {
            salary: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(matches!(payload.check(), Err(Error::BadRequest(_))));
    }

    #[test]
    fn patch_changeset_follows_declaration_order() {
        let payload: UpdateJobOfferPayload = serde_json::from_value(json!({
            "estado": "Cerrada",
            "titulo": "Analista QA Senior"
        }))
        .unwrap();
        let changes = payload.to_changeset();
        assert_eq!(changes.columns().collect::<Vec<_>>(), vec!["title", "status"]);
    }

    #[test]
    fn recruiter_cannot_be_patched() {
        let body = json!({ "reclutador_id": 9 });
        assert!(serde_json::from_value::<UpdateJobOfferPayload>(body).is_err());
    }

    #[test]
    fn only_vigentes_filters_the_listing() {
        let q = JobOfferListQuery { estado: Some("vigentes".into()) };
        assert!(q.only_open());
        assert!(!JobOfferListQuery::default().only_open());
        for other in ["todas", "cerradas", ""] {
            let q = JobOfferListQuery { estado: Some(other.into()) };
            assert!(!q.only_open(), "{}", other);
        }
    }
}
