use crate::database::changeset::Changeset;
use crate::dto::background_dto::CreateAcademicPayload;
use crate::error::{Error, Result};
use crate::models::background::AcademicBackground;
use sqlx::PgPool;

const ACADEMIC_COLUMNS: &str = "id, candidate_id, institution, degree, start_year, end_year";

#[derive(Clone)]
pub struct AcademicBackgroundService {
    pool: PgPool,
}

impl AcademicBackgroundService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateAcademicPayload) -> Result<AcademicBackground> {
        let record = sqlx::query_as::<_, AcademicBackground>(&format!(
            r#"
            INSERT INTO academic_backgrounds
                (candidate_id, institution, degree, start_year, end_year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ACADEMIC_COLUMNS
        ))
        .bind(payload.candidate_id)
        .bind(&payload.institution)
        .bind(&payload.degree)
        .bind(payload.start_year)
        .bind(payload.end_year)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            record_id = record.id,
            candidate_id = record.candidate_id,
            "Academic background created"
        );
        Ok(record)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<AcademicBackground> {
        sqlx::query_as::<_, AcademicBackground>(&format!(
            "SELECT {} FROM academic_backgrounds WHERE id = $1",
            ACADEMIC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Antecedente académico no encontrado".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<AcademicBackground>> {
        let items = sqlx::query_as::<_, AcademicBackground>(&format!(
            "SELECT {} FROM academic_backgrounds ORDER BY id",
            ACADEMIC_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn list_for_candidate(&self, candidate_id: i64) -> Result<Vec<AcademicBackground>> {
        let items = sqlx::query_as::<_, AcademicBackground>(&format!(
            "SELECT {} FROM academic_backgrounds WHERE candidate_id = $1 ORDER BY start_year, id",
            ACADEMIC_COLUMNS
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn update(&self, id: i64, changes: &Changeset) -> Result<AcademicBackground> {
        let result = changes.execute(&self.pool, id).await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Antecedente académico no encontrado".to_string()));
        }
        tracing::info!(record_id = id, "Academic background updated");
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM academic_backgrounds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Antecedente académico no encontrado".to_string()));
        }
        tracing::info!(record_id = id, "Academic background deleted");
        Ok(())
    }
}
