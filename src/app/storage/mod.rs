//! Read-only access to the sensor network's SQLite store
//!
//! The store is shared with the ingestion pipeline, which owns all writes.
//! Every query runs on a [`Session`] that the caller acquires from a [`Store`]
//! and drops when the request is done, returning the connection to the pool
//! on every exit path. Each storage call is bounded by the configured query
//! timeout and surfaces as [`Error::StorageTimeout`] when it runs over.
//!
//! Columns are read through explicit casts because the deployed schema uses
//! loose SQLite types: identifiers as TEXT, timestamps as REAL unix seconds
//! and flags as INTEGER.

use crate::app::models::{TimeWindow, timestamp_to_unix};
use crate::config::DatabaseConfig;
use crate::constants::{
    FIXED_TEMPERATURE_TABLE, LATEST_TABLE, SQLITE_BUSY_TIMEOUT_MS, STATIONS_TABLE, WEATHER_TABLE,
};
use crate::{Error, Result};
use futures::TryStreamExt;
use sqlx::Sqlite;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

pub mod schema;

#[cfg(test)]
pub mod tests;

// =============================================================================
// Row Shapes
// =============================================================================

/// Raw row of the `stations` table
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StationRow {
    pub station_id: Option<String>,
    pub location: Option<String>,
    pub sublocation: Option<String>,
    pub description: Option<String>,
    pub from_timestamp_utc: Option<f64>,
    pub to_timestamp_utc: Option<f64>,
    pub is_current: Option<i64>,
}

/// Raw row of the `temperature` table (fixed installations)
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FixedTemperatureRow {
    pub timestamp_utc: Option<f64>,
    pub station_id: Option<String>,
    pub temp_c: Option<f64>,
}

/// Raw row of the `meteoTemps` table (weather stations)
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WeatherRow {
    pub station_id: Option<String>,
    pub temp_c: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub relative_hum_pct: Option<f64>,
    pub timestamp_utc: Option<f64>,
}

/// Raw row of the `lastUpdates` table
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LatestRow {
    pub station_id: Option<String>,
    pub timestamp_utc: Option<f64>,
    pub measure_type: Option<String>,
    pub measure_value: Option<f64>,
}

// =============================================================================
// Store
// =============================================================================

/// Pool of read-only connections to the backing store
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Store {
    /// Open the database file read-only
    ///
    /// # Errors
    /// * `Error::Storage` if the file is missing or not a SQLite database
    /// * `Error::StorageTimeout` if the first connection takes too long
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let query_timeout = config.query_timeout();
        info!(
            "Opening sensor store at {} (timeout {:?}, {} connections)",
            config.path.display(),
            query_timeout,
            config.max_connections
        );

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(true)
            .busy_timeout(Duration::from_millis(SQLITE_BUSY_TIMEOUT_MS));

        let pool = bounded(
            "open database",
            query_timeout,
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(query_timeout)
                .connect_with(options),
        )
        .await?;

        Ok(Self::from_pool(pool, query_timeout))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Bound applied to every storage call
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Acquire a scoped session for one request
    ///
    /// The connection goes back to the pool when the session is dropped.
    pub async fn session(&self) -> Result<Session> {
        let conn = bounded("acquire connection", self.query_timeout, self.pool.acquire()).await?;
        Ok(Session {
            conn,
            timeout: self.query_timeout,
        })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// =============================================================================
// Session
// =============================================================================

/// One pooled connection, held for the duration of a single query
pub struct Session {
    conn: PoolConnection<Sqlite>,
    timeout: Duration,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Every station assignment, current and historical
    pub async fn stations(&mut self) -> Result<Vec<StationRow>> {
        let sql = format!(
            "SELECT CAST(station_id AS TEXT) AS station_id, \
                    CAST(location AS TEXT) AS location, \
                    CAST(sublocation AS TEXT) AS sublocation, \
                    CAST(description AS TEXT) AS description, \
                    {} AS from_timestamp_utc, \
                    {} AS to_timestamp_utc, \
                    CAST(is_current AS INTEGER) AS is_current \
             FROM {STATIONS_TABLE}",
            unix_seconds("from_timestamp_utc"),
            unix_seconds("to_timestamp_utc"),
        );

        let rows: Vec<StationRow> = bounded(
            "load stations",
            self.timeout,
            sqlx::query_as::<_, StationRow>(&sql)
                .fetch(&mut *self.conn)
                .try_collect(),
        )
        .await?;

        debug!("Loaded {} station rows", rows.len());
        Ok(rows)
    }

    /// Archived fixed-installation rows, optionally limited to a window
    pub async fn fixed_temperatures(
        &mut self,
        window: Option<TimeWindow>,
    ) -> Result<Vec<FixedTemperatureRow>> {
        let sql = windowed(
            format!(
                "SELECT {} AS timestamp_utc, \
                        CAST(station_id AS TEXT) AS station_id, \
                        CAST(temp_c AS REAL) AS temp_c \
                 FROM {FIXED_TEMPERATURE_TABLE}",
                unix_seconds("timestamp_utc")
            ),
            window,
        );

        let mut query = sqlx::query_as::<_, FixedTemperatureRow>(&sql);
        if let Some(window) = window {
            query = query
                .bind(timestamp_to_unix(window.start))
                .bind(timestamp_to_unix(window.end));
        }

        let rows = bounded(
            "read fixed temperatures",
            self.timeout,
            query.fetch_all(&mut *self.conn),
        )
        .await?;

        debug!("Read {} rows from {}", rows.len(), FIXED_TEMPERATURE_TABLE);
        Ok(rows)
    }

    /// Archived weather-station rows, optionally limited to a window
    pub async fn weather_rows(&mut self, window: Option<TimeWindow>) -> Result<Vec<WeatherRow>> {
        let sql = windowed(
            format!("{} FROM {WEATHER_TABLE}", weather_columns()),
            window,
        );

        let mut query = sqlx::query_as::<_, WeatherRow>(&sql);
        if let Some(window) = window {
            query = query
                .bind(timestamp_to_unix(window.start))
                .bind(timestamp_to_unix(window.end));
        }

        let rows = bounded(
            "read weather rows",
            self.timeout,
            query.fetch_all(&mut *self.conn),
        )
        .await?;

        debug!("Read {} rows from {}", rows.len(), WEATHER_TABLE);
        Ok(rows)
    }

    /// Latest-value rows, optionally limited to a window
    pub async fn latest_rows(&mut self, window: Option<TimeWindow>) -> Result<Vec<LatestRow>> {
        let sql = windowed(
            format!(
                "SELECT CAST(station_id AS TEXT) AS station_id, \
                        {} AS timestamp_utc, \
                        CAST(measure_type AS TEXT) AS measure_type, \
                        CAST(measure_value AS REAL) AS measure_value \
                 FROM {LATEST_TABLE}",
                unix_seconds("timestamp_utc")
            ),
            window,
        );

        let mut query = sqlx::query_as::<_, LatestRow>(&sql);
        if let Some(window) = window {
            query = query
                .bind(timestamp_to_unix(window.start))
                .bind(timestamp_to_unix(window.end));
        }

        let rows = bounded(
            "read latest values",
            self.timeout,
            query.fetch_all(&mut *self.conn),
        )
        .await?;

        debug!("Read {} rows from {}", rows.len(), LATEST_TABLE);
        Ok(rows)
    }

    /// Most recent weather-station row for one station, if it reports there
    pub async fn latest_weather_row(&mut self, station_id: &str) -> Result<Option<WeatherRow>> {
        let sql = format!(
            "{} FROM {WEATHER_TABLE} \
             WHERE CAST(station_id AS TEXT) = ?1 \
             ORDER BY CAST(timestamp_utc AS REAL) DESC, rowid DESC \
             LIMIT 1",
            weather_columns()
        );

        bounded(
            "read latest weather row",
            self.timeout,
            sqlx::query_as::<_, WeatherRow>(&sql)
                .bind(station_id)
                .fetch_optional(&mut *self.conn),
        )
        .await
    }
}

fn weather_columns() -> String {
    format!(
        "SELECT CAST(station_id AS TEXT) AS station_id, \
                CAST(temp_c AS REAL) AS temp_c, \
                CAST(pressure_hpa AS REAL) AS pressure_hpa, \
                CAST(relative_hum_pct AS REAL) AS relative_hum_pct, \
                {} AS timestamp_utc",
        unix_seconds("timestamp_utc")
    )
}

/// Read a column as unix seconds, or NULL unless it holds a number
///
/// A plain CAST would turn ISO text such as `2024-03-01 ...` into `2024.0`.
fn unix_seconds(column: &str) -> String {
    format!("CASE WHEN typeof({column}) IN ('integer', 'real') THEN CAST({column} AS REAL) END")
}

/// Append the inclusive window predicate, binding `?1` and `?2`
fn windowed(select: String, window: Option<TimeWindow>) -> String {
    match window {
        Some(_) => format!("{select} WHERE CAST(timestamp_utc AS REAL) BETWEEN ?1 AND ?2"),
        None => select,
    }
}

/// Run a storage future under the query timeout, classifying its failure
async fn bounded<T, F>(operation: &'static str, timeout: Duration, future: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(sqlx::Error::PoolTimedOut)) => Err(Error::storage_timeout(operation, timeout)),
        Ok(Err(source)) => Err(Error::storage(operation, source)),
        Err(_) => Err(Error::storage_timeout(operation, timeout)),
    }
}
