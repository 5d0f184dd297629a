//! # PostgreSQL backend
//!
//! Pool construction, embedded migrations, and [`PgStore`], the
//! [`MemoryStore`]/[`UserStore`] implementation over `sqlx`. Each trait
//! method is a single statement; there are no cross-record invariants, so no
//! multi-statement transactions either.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};

use store::models::{Memory, NewMemory, NewUser, User};
use store::storage::{today, MemoryStore, StoreError, UserStore};

use crate::settings;

/// Open a connection pool for the configured database.
pub async fn connect(database: &settings::Database) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database.url())
        .await?;
    Ok(pool)
}

/// Bring the schema up to date from the embedded migrations.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// SQL-backed store over the `memories` and `users` tables.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw `memories` row. Projected into the shared [`Memory`] model so the
/// `store` crate stays free of `sqlx`.
#[derive(Debug, FromRow)]
struct MemoryRow {
    id: i32,
    title: String,
    description: String,
    image: String,
    date: String,
    created_at: DateTime<Utc>,
}

impl From<MemoryRow> for Memory {
    fn from(row: MemoryRow) -> Self {
        Memory {
            id: row.id,
            title: row.title,
            description: row.description,
            image: row.image,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl MemoryStore for PgStore {
    async fn memories(&self) -> Result<Vec<Memory>, StoreError> {
        let rows: Vec<MemoryRow> = sqlx::query_as(
            "SELECT id, title, description, image, date, created_at \
             FROM memories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Memory::from).collect())
    }

    async fn memory(&self, id: i32) -> Result<Option<Memory>, StoreError> {
        let row: Option<MemoryRow> = sqlx::query_as(
            "SELECT id, title, description, image, date, created_at \
             FROM memories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(Memory::from))
    }

    async fn create_memory(&self, draft: NewMemory) -> Result<Memory, StoreError> {
        let row: MemoryRow = sqlx::query_as(
            "INSERT INTO memories (title, description, image, date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, description, image, date, created_at",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.image)
        .bind(today())
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into())
    }

    async fn delete_memory(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM memories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

        Ok(row.map(User::from))
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (username, password) VALUES ($1, $2) \
             RETURNING id, username, password",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into())
    }
}
