//! Shared fixtures for tests that need a real backing store
//!
//! Fixtures are written through a separate writable pool, then read back
//! through [`Store`], which only ever opens the file read-only.

use crate::app::models::timestamp_to_unix;
use crate::app::storage::Store;
use crate::app::storage::schema::CREATE_TABLES;
use crate::config::DatabaseConfig;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;


/// Start of the fixture timeline
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// Temporary database file with the deployed schema
pub struct FixtureDb {
    _dir: TempDir,
    pub path: PathBuf,
    pool: SqlitePool,
}

impl FixtureDb {
    /// Create an empty database with all four tables
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("example-db.sqlite3");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::raw_sql(CREATE_TABLES).execute(&pool).await.unwrap();

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub async fn station(
        &self,
        station_id: &str,
        location: &str,
        valid_from: DateTime<Utc>,
        valid_to: Option<DateTime<Utc>>,
    ) -> &Self {
        sqlx::query("INSERT INTO stations VALUES (?, ?, ?, ?, ?, ?, ?)")
            .bind(station_id)
            .bind(location)
            .bind(format!("{location} sublocation"))
            .bind(format!("Station {station_id}"))
            .bind(timestamp_to_unix(valid_from))
            .bind(valid_to.map(timestamp_to_unix))
            .bind(valid_to.is_none())
            .execute(&self.pool)
            .await
            .unwrap();
        self
    }

    pub async fn fixed(&self, station_id: &str, at: DateTime<Utc>, temp_c: f64) -> &Self {
        sqlx::query("INSERT INTO temperature VALUES (?, ?, ?)")
            .bind(timestamp_to_unix(at))
            .bind(station_id)
            .bind(temp_c)
            .execute(&self.pool)
            .await
            .unwrap();
        self
    }

    pub async fn weather(
        &self,
        station_id: &str,
        at: DateTime<Utc>,
        temp_c: f64,
        pressure_hpa: f64,
        relative_hum_pct: f64,
    ) -> &Self {
        sqlx::query("INSERT INTO meteoTemps VALUES (?, ?, ?, ?, ?)")
            .bind(station_id)
            .bind(temp_c)
            .bind(pressure_hpa)
            .bind(relative_hum_pct)
            .bind(timestamp_to_unix(at))
            .execute(&self.pool)
            .await
            .unwrap();
        self
    }

    pub async fn latest(
        &self,
        station_id: &str,
        at: DateTime<Utc>,
        measure_type: &str,
        value: f64,
    ) -> &Self {
        sqlx::query("INSERT INTO lastUpdates VALUES (?, ?, ?, ?, ?, ?)")
            .bind(station_id)
            .bind(timestamp_to_unix(at))
            .bind(measure_type)
            .bind(value)
            .bind(timestamp_to_unix(at))
            .bind(value)
            .execute(&self.pool)
            .await
            .unwrap();
        self
    }

    /// Run arbitrary SQL against the fixture, for loosely-typed rows
    pub async fn raw(&self, sql: &str) -> &Self {
        sqlx::raw_sql(sql).execute(&self.pool).await.unwrap();
        self
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            path: self.path.clone(),
            query_timeout_secs: 5,
            max_connections: 2,
        }
    }

    /// Open the fixture read-only, the way production code does
    pub async fn store(&self) -> Store {
        Store::open(&self.database_config()).await.unwrap()
    }
}

/// Store over a single-connection pool with a short timeout
pub async fn single_connection_store(fixture: &FixtureDb, timeout: Duration) -> Store {
    let options = SqliteConnectOptions::new()
        .filename(&fixture.path)
        .read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    Store::from_pool(pool, timeout)
}
