//! Employee lookup against PostgreSQL
//!
//! The table's column names are an external contract: `"internalCode"`,
//! `"employeeCode"` and `"name"`, any of which may be NULL.

use async_trait::async_trait;
use shared::models::Employee;
use sqlx::PgPool;

use super::{BoxError, EmployeeStore};
use crate::config::TableName;
use crate::search::SearchQuery;

pub struct PgEmployeeStore {
    pool: PgPool,
    sql: String,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool, table: &TableName) -> Self {
        Self {
            pool,
            sql: search_sql(table),
        }
    }
}

/// `$1` is the escaped `LIKE` pattern, `$2` the row limit.
fn search_sql(table: &TableName) -> String {
    format!(
        r#"
        SELECT COALESCE("internalCode", 0)::BIGINT AS internal_code,
               COALESCE("employeeCode", 0)::BIGINT AS employee_code,
               COALESCE("name", '')::TEXT AS name
        FROM {table}
        WHERE CAST("internalCode" AS TEXT) ILIKE $1 ESCAPE '\'
           OR CAST("employeeCode" AS TEXT) ILIKE $1 ESCAPE '\'
           OR "name" ILIKE $1 ESCAPE '\'
        ORDER BY name ASC
        LIMIT $2
        "#,
        table = table.as_sql()
    )
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Employee>, BoxError> {
        let rows: Vec<Employee> = sqlx::query_as(&self.sql)
            .bind(query.like_pattern())
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_sql_shape() {
        let table: TableName = "public.Ffuncionarios".parse().unwrap();
        let sql = search_sql(&table);

        assert!(sql.contains(r#"FROM "public"."Ffuncionarios""#));
        assert!(sql.contains(r#"CAST("internalCode" AS TEXT) ILIKE $1"#));
        assert!(sql.contains(r#"CAST("employeeCode" AS TEXT) ILIKE $1"#));
        assert!(sql.contains(r#""name" ILIKE $1"#));
        assert_eq!(sql.matches(r"ESCAPE '\'").count(), 3);
        assert!(sql.contains("ORDER BY name ASC"));
        assert!(sql.contains("LIMIT $2"));
    }

    #[test]
    fn test_search_sql_coalesces_nulls() {
        let table: TableName = "employees".parse().unwrap();
        let sql = search_sql(&table);
        assert!(sql.contains(r#"COALESCE("internalCode", 0)"#));
        assert!(sql.contains(r#"COALESCE("employeeCode", 0)"#));
        assert!(sql.contains(r#"COALESCE("name", '')"#));
    }
}
