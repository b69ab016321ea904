use crate::database::changeset::ColumnValue;
use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::{hash_password, password_matches};
use crate::utils::validation::empty_update;
use sqlx::PgPool;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, birth_date, phone, address, role, created_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateUserPayload) -> Result<User> {
        self.ensure_email_available(&payload.email, None).await?;
        let password_hash = hash_password(&payload.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users
                (first_name, last_name, email, password_hash, birth_date, phone, address, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(payload.birth_date)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(payload.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("El usuario no existe".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Applies only the fields that differ from the stored row. A password
    /// counts as unchanged when it verifies against the stored hash.
    pub async fn update(&self, id: i64, payload: UpdateUserPayload) -> Result<User> {
        if payload.is_empty() {
            return Err(empty_update());
        }
        let current = self.get_by_id(id).await?;

        let mut changes = payload.to_changeset();
        changes.retain(|column, value| differs(&current, column, value));
        if let Some(plain) = payload.password.as_deref() {
            if !password_matches(plain, &current.password_hash) {
                changes.set("password_hash", hash_password(plain)?);
            }
        }
        if changes.is_empty() {
            return Err(Error::BadRequest(
                "No se realizaron cambios en el usuario".to_string(),
            ));
        }
        if let Some(ColumnValue::Text(email)) = changes.get("email") {
            self.ensure_email_available(email, Some(id)).await?;
        }

        let result = changes.execute(&self.pool, id).await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("El usuario no existe".to_string()));
        }
        tracing::info!(
            user_id = id,
            columns = ?changes.columns().collect::<Vec<_>>(),
            "User updated"
        );
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("El usuario no existe".to_string()));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn ensure_email_available(&self, email: &str, except_id: Option<i64>) -> Result<()> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        match existing {
            Some(found) if Some(found) != except_id => Err(Error::BadRequest(
                "Ya existe un usuario con este email".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn differs(user: &User, column: &str, value: &ColumnValue) -> bool {
    match (column, value) {
        ("first_name", ColumnValue::Text(v)) => *v != user.first_name,
        ("last_name", ColumnValue::Text(v)) => *v != user.last_name,
        ("email", ColumnValue::Text(v)) => *v != user.email,
        ("phone", ColumnValue::Text(v)) => *v != user.phone,
        ("address", ColumnValue::Text(v)) => *v != user.address,
        ("role", ColumnValue::Text(v)) => *v != user.role,
        ("birth_date", ColumnValue::Date(v)) => *v != user.birth_date,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn stored_user() -> User {
        User {
            id: 1,
            first_name: "Camila".into(),
            last_name: "Soto".into(),
            email: "camila@example.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            birth_date: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
            phone: "+56911112222".into(),
            address: "Av. Siempre Viva 742".into(),
            role: "Candidato".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unchanged_fields_are_dropped_from_the_changeset() {
        let user = stored_user();
        let payload = UpdateUserPayload {
            first_name: Some("Camila".into()),
            phone: Some("+56933334444".into()),
            birth_date: Some(user.birth_date),
            ..Default::default()
        };
        let mut changes = payload.to_changeset();
        changes.retain(|column, value| differs(&user, column, value));
        assert_eq!(changes.columns().collect::<Vec<_>>(), vec!["phone"]);
    }

    #[test]
    fn resending_the_current_row_leaves_nothing_to_write() {
        let user = stored_user();
        let payload = UpdateUserPayload {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
            role: Some(crate::models::user::Role::Candidate),
            ..Default::default()
        };
        let mut changes = payload.to_changeset();
        changes.retain(|column, value| differs(&user, column, value));
        assert!(changes.is_empty());
    }
}
