use crate::database::changeset::Changeset;
use crate::dto::background_dto::CreateEmploymentPayload;
use crate::error::{Error, Result};
use crate::models::background::EmploymentBackground;
use sqlx::PgPool;

const EMPLOYMENT_COLUMNS: &str = "id, candidate_id, company, title, duties, start_date, end_date";

#[derive(Clone)]
pub struct EmploymentBackgroundService {
    pool: PgPool,
}

impl EmploymentBackgroundService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateEmploymentPayload) -> Result<EmploymentBackground> {
        let record = sqlx::query_as::<_, EmploymentBackground>(&format!(
            r#"
            INSERT INTO employment_backgrounds
                (candidate_id, company, title, duties, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            EMPLOYMENT_COLUMNS
        ))
        .bind(payload.candidate_id)
        .bind(&payload.company)
        .bind(&payload.title)
        .bind(&payload.duties)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            record_id = record.id,
            candidate_id = record.candidate_id,
            "Employment background created"
        );
        Ok(record)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<EmploymentBackground> {
        sqlx::query_as::<_, EmploymentBackground>(&format!(
            "SELECT {} FROM employment_backgrounds WHERE id = $1",
            EMPLOYMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Antecedente laboral no encontrado".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<EmploymentBackground>> {
        let items = sqlx::query_as::<_, EmploymentBackground>(&format!(
            "SELECT {} FROM employment_backgrounds ORDER BY id",
            EMPLOYMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn list_for_candidate(&self, candidate_id: i64) -> Result<Vec<EmploymentBackground>> {
        let items = sqlx::query_as::<_, EmploymentBackground>(&format!(
            "SELECT {} FROM employment_backgrounds \
             WHERE candidate_id = $1 ORDER BY start_date DESC, id",
            EMPLOYMENT_COLUMNS
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn update(&self, id: i64, changes: &Changeset) -> Result<EmploymentBackground> {
        let result = changes.execute(&self.pool, id).await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Antecedente laboral no encontrado".to_string()));
        }
        tracing::info!(record_id = id, "Employment background updated");
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM employment_backgrounds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Antecedente laboral no encontrado".to_string()));
        }
        tracing::info!(record_id = id, "Employment background deleted");
        Ok(())
    }
}
