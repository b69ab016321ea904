use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Candidato")]
    Candidate,
    #[serde(rename = "Reclutador")]
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "Candidato",
            Role::Recruiter => "Reclutador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Candidato" => Ok(Role::Candidate),
            "Reclutador" => Ok(Role::Recruiter),
            other => Err(format!(
                "El rol debe ser 'Candidato' o 'Reclutador', no '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_names_round_trip_through_from_str() {
        for role in [Role::Candidate, Role::Recruiter] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("Administrador".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_with_spanish_names() {
        assert_eq!(serde_json::to_string(&Role::Recruiter).unwrap(), "\"Reclutador\"");
        let parsed: Role = serde_json::from_str("\"Candidato\"").unwrap();
        assert_eq!(parsed, Role::Candidate);
    }
}
