use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deep_control::StateStore;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredSession {
    pub name: String,
    pub encoding: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `sqlite::memory:` opens its own empty database.
        let max_connections = if database_url.starts_with("sqlite::memory:") {
            1
        } else {
            5
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open database '{database_url}'"))?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn save_session(&self, name: &str, encoding: &str) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO pad_sessions (name, encoding, created_at, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET encoding = excluded.encoding, updated_at = excluded.updated_at",
        )
        .bind(name)
        .bind(encoding)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to save session '{name}'"))?;
        debug!(session = name, %encoding, "saved pad session");
        Ok(())
    }

    pub async fn load_session(&self, name: &str) -> Result<Option<StoredSession>> {
        let row = sqlx::query(
            "SELECT name, encoding, created_at, updated_at FROM pad_sessions WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| session_from_row(&r)).transpose()
    }

    pub async fn list_sessions(&self) -> Result<Vec<StoredSession>> {
        let rows = sqlx::query(
            "SELECT name, encoding, created_at, updated_at FROM pad_sessions
             ORDER BY updated_at DESC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(session_from_row).collect()
    }

    pub async fn delete_session(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pad_sessions WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn session_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<StoredSession> {
    Ok(StoredSession {
        name: row.try_get("name")?,
        encoding: row.try_get("encoding")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Creates the directory a file-backed SQLite URL points into.
fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    match sqlite_path(database_url).as_deref().and_then(Path::parent) {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create '{}' for database '{database_url}'",
                    parent.display()
                )
            })
        }
        _ => Ok(()),
    }
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") {
        return None;
    }
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().filter(|path| !path.is_empty())?;
    Some(PathBuf::from(path))
}

#[async_trait]
impl StateStore for Storage {
    async fn load_encoding(&self, session: &str) -> Result<Option<String>> {
        Ok(self.load_session(session).await?.map(|s| s.encoding))
    }

    async fn save_encoding(&self, session: &str, encoding: &str) -> Result<()> {
        self.save_session(session, encoding).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
