use serde::Deserialize;
use validator::Validate;

use crate::database::changeset::Changeset;
use crate::error::{Error, Result};
use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplicationPayload {
    #[serde(rename = "candidato_id")]
    pub candidate_id: i64,
    #[serde(rename = "oferta_laboral_id")]
    pub job_offer_id: i64,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
}

/// Status change by a recruiter. The comment is mandatory.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReplaceApplicationPayload {
    #[serde(rename = "estado_postulacion")]
    pub status: ApplicationStatus,
    #[serde(rename = "comentario")]
    #[validate(length(min = 1, message = "El campo 'comentario' es obligatorio"))]
    pub comment: String,
    #[serde(rename = "reclutador_id")]
    pub recruiter_id: Option<i64>,
}

impl ReplaceApplicationPayload {
    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("applications");
        changes
            .set("status", self.status.as_str())
            .set("comment", self.comment.clone());
        changes
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateApplicationPayload {
    #[serde(rename = "estado_postulacion")]
    pub status: Option<ApplicationStatus>,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
}

impl UpdateApplicationPayload {
    pub fn check(&self) -> Result<()> {
        let has_comment = self
            .comment
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());
        if self.status.is_some() && !has_comment {
            return Err(Error::BadRequest(
                "El campo 'comentario' es obligatorio al actualizar el estado".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("applications");
        changes
            .set_opt("status", self.status.map(|s| s.as_str()))
            .set_opt("comment", self.comment.clone());
        changes
    }
}
