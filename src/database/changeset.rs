//! Partial-update statements.
//!
//! A [`Changeset`] collects typed column assignments for one table and renders
//! them into a single parameterized `UPDATE ... SET ... WHERE id = $n`.
//! Table and column names are `&'static str` taken from code, never from
//! request input; the request side decides *which* columns appear through
//! each entity's typed patch payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{postgres::PgQueryResult, PgPool, Postgres, QueryBuilder};

use crate::error::{Error, Result};

/// A bound value together with the wire type it is sent as.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Integer(i32),
    BigInt(i64),
    Text(String),
    Numeric(Decimal),
    Date(NaiveDate),
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::BigInt(value)
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

impl From<Decimal> for ColumnValue {
    fn from(value: Decimal) -> Self {
        ColumnValue::Numeric(value)
    }
}

impl From<NaiveDate> for ColumnValue {
    fn from(value: NaiveDate) -> Self {
        ColumnValue::Date(value)
    }
}

#[derive(Debug, Clone)]
pub struct Changeset {
    table: &'static str,
    assignments: Vec<(&'static str, ColumnValue)>,
}

impl Changeset {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    /// Assigns `column`. Setting a column twice keeps its first position and
    /// the last value.
    pub fn set(&mut self, column: &'static str, value: impl Into<ColumnValue>) -> &mut Self {
        let value = value.into();
        match self.assignments.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((column, value)),
        }
        self
    }

    pub fn set_opt<V: Into<ColumnValue>>(
        &mut self,
        column: &'static str,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.assignments
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    /// Keeps only the assignments for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&'static str, &ColumnValue) -> bool) {
        self.assignments.retain(|(c, v)| keep(*c, v));
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.assignments.iter().map(|(c, _)| *c)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn to_query(&self, id: i64) -> Result<QueryBuilder<'static, Postgres>> {
        if self.assignments.is_empty() {
            return Err(Error::BadRequest(
                "No se proporcionaron datos para actualizar".to_string(),
            ));
        }

        let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", self.table));
        let mut separated = builder.separated(", ");
        for (column, value) in &self.assignments {
            separated.push(format!("{} = ", column));
            match value.clone() {
                ColumnValue::Integer(v) => separated.push_bind_unseparated(v),
                ColumnValue::BigInt(v) => separated.push_bind_unseparated(v),
                ColumnValue::Text(v) => separated.push_bind_unseparated(v),
                ColumnValue::Numeric(v) => separated.push_bind_unseparated(v),
                ColumnValue::Date(v) => separated.push_bind_unseparated(v),
            };
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        Ok(builder)
    }

    /// Runs the update. Callers that care whether a row matched inspect
    /// `rows_affected()` on the result.
    pub async fn execute(&self, pool: &PgPool, id: i64) -> Result<PgQueryResult> {
        let mut builder = self.to_query(id)?;
        tracing::debug!(
            table = self.table,
            id,
            columns = ?self.columns().collect::<Vec<_>>(),
            "Applying partial update"
        );
        let result = builder.build().execute(pool).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn renders_one_placeholder_per_column_in_insertion_order() {
        let mut changes = Changeset::new("job_offers");
        changes
            .set("title", "Backend developer")
            .set("salary", Decimal::from_str("1500000.00").unwrap())
            .set("close_date", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        let builder = changes.to_query(7).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE job_offers SET title = $1, salary = $2, close_date = $3 WHERE id = $4"
        );
    }

    #[test]
    fn single_column_has_no_separator() {
        let mut changes = Changeset::new("applications");
        changes.set("status", "Revisando");
        let builder = changes.to_query(1).unwrap();
        assert_eq!(builder.sql(), "UPDATE applications SET status = $1 WHERE id = $2");
    }

    #[test]
    fn empty_changeset_is_rejected_before_building() {
        let changes = Changeset::new("users");
        let err = changes.to_query(1).err().expect("empty changeset must fail");
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn setting_a_column_twice_keeps_position_and_last_value() {
        let mut changes = Changeset::new("users");
        changes.set("first_name", "Ana").set("phone", "123").set("first_name", "Luisa");

        assert_eq!(changes.columns().collect::<Vec<_>>(), vec!["first_name", "phone"]);
        assert_eq!(
            changes.get("first_name"),
            Some(&ColumnValue::Text("Luisa".to_string()))
        );
    }

    #[test]
    fn set_opt_skips_absent_values() {
        let mut changes = Changeset::new("academic_backgrounds");
        changes
            .set_opt("institution", None::<String>)
            .set_opt("start_year", Some(2015));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("start_year"), Some(&ColumnValue::Integer(2015)));
    }

    #[test]
    fn retain_drops_assignments() {
        let mut changes = Changeset::new("users");
        changes.set("first_name", "Ana").set("last_name", "Rojas");
        changes.retain(|column, _| column != "first_name");
        assert_eq!(changes.columns().collect::<Vec<_>>(), vec!["last_name"]);
        assert!(!changes.is_empty());
    }
}
