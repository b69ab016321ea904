use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContractType {
    #[default]
    #[serde(rename = "Indefinido")]
    Indefinite,
    #[serde(rename = "Temporal")]
    Temporary,
    #[serde(rename = "Honorarios")]
    FeeBased,
    #[serde(rename = "Práctica")]
    Internship,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Indefinite => "Indefinido",
            ContractType::Temporary => "Temporal",
            ContractType::FeeBased => "Honorarios",
            ContractType::Internship => "Práctica",
        }
    }
}

/// `Withdrawn` is the logical deactivation state set by `accion=desactivar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OfferStatus {
    #[default]
    #[serde(rename = "Vigente")]
    Open,
    #[serde(rename = "Cerrada")]
    Closed,
    #[serde(rename = "Baja")]
    Withdrawn,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Open => "Vigente",
            OfferStatus::Closed => "Cerrada",
            OfferStatus::Withdrawn => "Baja",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobOffer {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "salario")]
    pub salary: Decimal,
    #[serde(rename = "tipo_contrato")]
    pub contract_type: String,
    #[serde(rename = "fecha_cierre")]
    pub close_date: NaiveDate,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "reclutador_id")]
    pub recruiter_id: i64,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_new_offer() {
        assert_eq!(ContractType::default().as_str(), "Indefinido");
        assert_eq!(OfferStatus::default().as_str(), "Vigente");
    }

    #[test]
    fn accented_contract_type_deserializes() {
        let parsed: ContractType = serde_json::from_str("\"Práctica\"").unwrap();
        assert_eq!(parsed, ContractType::Internship);
        assert!(serde_json::from_str::<OfferStatus>("\"Abierta\"").is_err());
    }
}
