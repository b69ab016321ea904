use crate::database::changeset::Changeset;
use crate::dto::job_offer_dto::CreateJobOfferPayload;
use crate::error::{Error, Result};
use crate::models::job_offer::{JobOffer, OfferStatus};
use sqlx::PgPool;

const OFFER_COLUMNS: &str = "id, title, description, location, salary, contract_type, \
                             close_date, status, recruiter_id, created_at";

#[derive(Clone)]
pub struct JobOfferService {
    pool: PgPool,
}

impl JobOfferService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Missing contract type and status fall back to `Indefinido` / `Vigente`.
    pub async fn create(&self, payload: CreateJobOfferPayload) -> Result<JobOffer> {
        let contract_type = payload.contract_type.unwrap_or_default();
        let status = payload.status.unwrap_or_default();

        let offer = sqlx::query_as::<_, JobOffer>(&format!(
            r#"
            INSERT INTO job_offers
                (title, description, location, salary, contract_type, close_date, status,
                 recruiter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            OFFER_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.location)
        .bind(payload.salary)
        .bind(contract_type.as_str())
        .bind(payload.close_date)
        .bind(status.as_str())
        .bind(payload.recruiter_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(offer_id = offer.id, recruiter_id = offer.recruiter_id, "Job offer created");
        Ok(offer)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<JobOffer>> {
        let offer = sqlx::query_as::<_, JobOffer>(&format!(
            "SELECT {} FROM job_offers WHERE id = $1",
            OFFER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(offer)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<JobOffer> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("La oferta laboral no existe".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<JobOffer>> {
        let items = sqlx::query_as::<_, JobOffer>(&format!(
            "SELECT {} FROM job_offers ORDER BY id",
            OFFER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn list_by_status(&self, status: OfferStatus) -> Result<Vec<JobOffer>> {
        let items = sqlx::query_as::<_, JobOffer>(&format!(
            "SELECT {} FROM job_offers WHERE status = $1 ORDER BY close_date, id",
            OFFER_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn update(&self, id: i64, changes: &Changeset) -> Result<JobOffer> {
        let result = changes.execute(&self.pool, id).await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("La oferta laboral no existe".to_string()));
        }
        tracing::info!(
            offer_id = id,
            columns = ?changes.columns().collect::<Vec<_>>(),
            "Job offer updated"
        );
        self.get_by_id(id).await
    }

    /// Logical deactivation: the row stays, its status becomes `Baja`.
    pub async fn deactivate(&self, id: i64) -> Result<JobOffer> {
        let mut changes = Changeset::new("job_offers");
        changes.set("status", OfferStatus::Withdrawn.as_str());
        self.update(id, &changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM job_offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("La oferta laboral no existe".to_string()));
        }
        tracing::info!(offer_id = id, "Job offer deleted");
        Ok(())
    }
}
