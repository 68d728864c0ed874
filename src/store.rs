use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use std::path::Path;
use std::str::FromStr;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    done INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// A task record as stored and as serialized on the wire.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub done: bool,
    pub created_at: String,
}

#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `db_path` and ensure the schema.
    pub async fn open(db_path: &str) -> Result<Self, sqlx::Error> {
        if let Some(parent) = Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(sqlx::Error::Io)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{db_path}"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<TaskRow>, sqlx::Error> {
        sqlx::query_as("SELECT id, title, done, created_at FROM tasks ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<TaskRow>, sqlx::Error> {
        sqlx::query_as("SELECT id, title, done, created_at FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, title: &str) -> Result<TaskRow, sqlx::Error> {
        let created_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let result = sqlx::query("INSERT INTO tasks (title, done, created_at) VALUES (?, 0, ?)")
            .bind(title)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get(id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Merge the provided fields into an existing row. Returns `None` when the
    /// id does not exist.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        done: Option<bool>,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };

        let title = title.unwrap_or(&current.title);
        let done = done.unwrap_or(current.done);
        sqlx::query("UPDATE tasks SET title = ?, done = ? WHERE id = ?")
            .bind(title)
            .bind(done)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get(id).await
    }

    /// Returns `false` when no row had the given id.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
