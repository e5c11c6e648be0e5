//! Table definitions of the deployed sensor store
//!
//! The ingestion pipeline owns the schema; these statements mirror it exactly
//! and exist to build fixture databases. No migrations are run from here.

/// DDL for the four tables read by the query engine
pub const CREATE_TABLES: &str = r#"
CREATE TABLE stations
( station_id STRING,
  location STRING,
  sublocation STRING,
  description STRING,
  from_timestamp_utc TIMESTAMP,
  to_timestamp_utc TIMESTAMP,
  is_current BOOLEAN);

CREATE TABLE temperature
( timestamp_utc TIMESTAMP,
  station_id STRING,
  temp_c FLOAT);

CREATE TABLE meteoTemps
(station_id STRING,
temp_c FLOAT,
pressure_hpa FLOAT,
relative_hum_pct FLOAT,
timestamp_utc FLOAT);

CREATE TABLE lastUpdates
( station_id STRING NOT NULL,
  timestamp_utc TIMESTAMP,
  measure_type STRING NOT NULL,
  measure_value FLOAT,
  last_archive_time_utc TIMESTAMP,
  last_archive_value FLOAT,
  PRIMARY KEY(station_id, measure_type));
"#;

/// Names of the tables created by [`CREATE_TABLES`]
pub const TABLES: [&str; 4] = [
    crate::constants::STATIONS_TABLE,
    crate::constants::FIXED_TEMPERATURE_TABLE,
    crate::constants::WEATHER_TABLE,
    crate::constants::LATEST_TABLE,
];
