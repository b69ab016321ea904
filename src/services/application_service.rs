use crate::database::changeset::Changeset;
use crate::dto::application_dto::CreateApplicationPayload;
use crate::error::{Error, Result};
use crate::models::application::{
    Applicant, Application, ApplicationStatus, CandidateApplication, OfferApplicants,
};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

const APPLICATION_COLUMNS: &str =
    "id, candidate_id, job_offer_id, status, comment, applied_at";

const APPLICANT_SELECT: &str = r#"
    SELECT
        a.id AS application_id,
        a.job_offer_id,
        u.id AS candidate_id,
        u.first_name,
        u.last_name,
        u.email,
        a.status,
        a.comment,
        a.applied_at
    FROM applications a
    INNER JOIN users u ON a.candidate_id = u.id
"#;

#[derive(Debug, FromRow)]
struct OfferTitle {
    id: i64,
    title: String,
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateApplicationPayload) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (candidate_id, job_offer_id, status, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(payload.candidate_id)
        .bind(payload.job_offer_id)
        .bind(ApplicationStatus::default().as_str())
        .bind(&payload.comment)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            application_id = application.id,
            candidate_id = application.candidate_id,
            offer_id = application.job_offer_id,
            "Application created"
        );
        Ok(application)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Application> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("La postulación no existe".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Application>> {
        let items = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications ORDER BY id",
            APPLICATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn list_applicants_for_offer(&self, offer_id: i64) -> Result<Vec<Applicant>> {
        let items = sqlx::query_as::<_, Applicant>(&format!(
            "{} WHERE a.job_offer_id = $1 ORDER BY a.applied_at, a.id",
            APPLICANT_SELECT
        ))
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Every offer, each with its applicants. Offers nobody applied to are
    /// listed with an empty `postulantes`.
    pub async fn list_applicants_by_offer(&self) -> Result<Vec<OfferApplicants>> {
        let offers = sqlx::query_as::<_, OfferTitle>("SELECT id, title FROM job_offers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let applicants = sqlx::query_as::<_, Applicant>(&format!(
            "{} ORDER BY a.applied_at, a.id",
            APPLICANT_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(group_by_offer(offers, applicants))
    }

    pub async fn list_for_candidate(&self, candidate_id: i64) -> Result<Vec<CandidateApplication>> {
        let items = sqlx::query_as::<_, CandidateApplication>(
            r#"
            SELECT
                a.id AS application_id,
                a.status,
                a.comment,
                o.title AS offer_title,
                o.description AS offer_description
            FROM applications a
            INNER JOIN job_offers o ON a.job_offer_id = o.id
            WHERE a.candidate_id = $1
            ORDER BY a.applied_at DESC, a.id DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn update(&self, id: i64, changes: &Changeset) -> Result<Application> {
        let result = changes.execute(&self.pool, id).await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("La postulación no existe".to_string()));
        }
        tracing::info!(
            application_id = id,
            columns = ?changes.columns().collect::<Vec<_>>(),
            "Application updated"
        );
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("La postulación no existe".to_string()));
        }
        tracing::info!(application_id = id, "Application deleted");
        Ok(())
    }
}

fn group_by_offer(offers: Vec<OfferTitle>, applicants: Vec<Applicant>) -> Vec<OfferApplicants> {
    let mut by_offer: HashMap<i64, Vec<Applicant>> = HashMap::new();
    for applicant in applicants {
        by_offer.entry(applicant.job_offer_id).or_default().push(applicant);
    }
    offers
        .into_iter()
        .map(|offer| OfferApplicants {
            oferta_id: offer.id,
            postulantes: by_offer.remove(&offer.id).unwrap_or_default(),
            titulo: offer.title,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn applicant(id: i64, offer: i64) -> Applicant {
        Applicant {
            application_id: id,
            job_offer_id: offer,
            candidate_id: 10 + id,
            first_name: "Ana".into(),
            last_name: "Pérez".into(),
            email: format!("ana{}@example.com", id),
            status: "Postulando".into(),
            comment: None,
            applied_at: Utc::now(),
        }
    }

    #[test]
    fn applicants_are_grouped_under_their_offer_in_offer_order() {
        let offers = vec![
            OfferTitle { id: 2, title: "Backend".into() },
            OfferTitle { id: 5, title: "Frontend".into() },
            OfferTitle { id: 7, title: "Data".into() },
        ];
        let applicants = vec![applicant(1, 5), applicant(2, 2), applicant(3, 5)];

        let grouped = group_by_offer(offers, applicants);
        assert_eq!(grouped.iter().map(|g| g.oferta_id).collect::<Vec<_>>(), vec![2, 5, 7]);
        assert_eq!(grouped[0].postulantes.len(), 1);
        assert_eq!(
            grouped[1].postulantes.iter().map(|a| a.application_id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert!(grouped[2].postulantes.is_empty());
        assert_eq!(grouped[1].titulo, "Frontend");
    }
}
