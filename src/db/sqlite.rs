use crate::db::models::Account;
use crate::db::schema::SQLITE_INIT;
use crate::error::MindwellError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

pub type SqlitePool = Pool<Sqlite>;

/// Shared handle to account storage. `Pool` is internally synchronized, so
/// clones of this handle can serve overlapping queries from concurrent
/// requests without external locking.
#[derive(Clone)]
pub struct AccountStorage {
    pool: SqlitePool,
}

impl AccountStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), MindwellError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Uniqueness pre-check lookup. `None` means the email is free as of this
    /// query; the UNIQUE constraint remains the final authority on insert.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, MindwellError> {
        let row = sqlx::query(
            r#"SELECT id, name, email, password_hash, created_at
               FROM accounts WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    /// Insert a new account and return its row id. A racing duplicate is
    /// rejected by the store's UNIQUE constraint and surfaces through the
    /// typed error classification.
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, MindwellError> {
        let result = sqlx::query(
            r#"INSERT INTO accounts (name, email, password_hash) VALUES (?, ?, ?)"#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    fn row_to_model(row: SqliteRow) -> Result<Account, MindwellError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let password_hash: String = row.try_get("password_hash")?;
        let created_str: String = row.try_get("created_at")?;

        let created_at: DateTime<Utc> = chrono::DateTime::parse_from_rfc3339(&created_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(Account {
            id,
            name,
            email,
            password_hash,
            created_at,
        })
    }
}
