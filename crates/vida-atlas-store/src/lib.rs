#![forbid(unsafe_code)]
//! SQLite store for species records.
//!
//! All writes are single-row and atomic; there is no multi-document
//! transaction because no operation spans more than one record. The
//! connection is guarded by a mutex and queries run synchronously, so a
//! store timeout or failure is terminal for the request that hit it;
//! retries belong to callers.

mod row;
mod schema;

use chrono::{SecondsFormat, Utc};
use row::{decode_row, map_decode};
use rusqlite::{params, params_from_iter, types::Value, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;
use vida_atlas_model::{ModerationAction, NewSpecies, SpeciesRecord, TaxonomyAxis};
use vida_atlas_query::{build_where, count_sql, list_sql, register_regexp, SpeciesFilter, SELECT_COLUMNS};

pub const CRATE_NAME: &str = "vida-atlas-store";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// No record matches the given id.
    NotFound,
    /// A uniqueness constraint rejected the write; carries the field name.
    Conflict(&'static str),
    /// Anything the database layer reported.
    Sqlite(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("species not found"),
            Self::Conflict(field) => write!(f, "duplicate value for unique field {field}"),
            Self::Sqlite(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(e, _) = &value {
            if e.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::Conflict("scientific_name");
            }
        }
        Self::Sqlite(value.to_string())
    }
}

/// Columns the filter options aggregator may take distinct values of.
/// A closed enum rather than a string keeps column names out of caller
/// hands entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DistinctColumn {
    Status,
    Taxonomy(TaxonomyAxis),
}

impl DistinctColumn {
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Status => "conservation_status",
            Self::Taxonomy(axis) => axis.column(),
        }
    }
}

pub struct SpeciesStore {
    conn: Mutex<Connection>,
}

impl SpeciesStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened species store");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        register_regexp(&conn)?;
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Sqlite("connection lock poisoned".to_string()))
    }

    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Insert a contribution. Fails with `Conflict` when a record with the
    /// same scientific name already exists, leaving that record untouched.
    pub fn create(&self, new: &NewSpecies) -> Result<SpeciesRecord, StoreError> {
        let conn = self.conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM species WHERE scientific_name = ?1)",
            [new.scientific_name.as_str()],
            |r| r.get(0),
        )?;
        if exists {
            return Err(StoreError::Conflict("scientific_name"));
        }
        let now = Self::now();
        let photos = serde_json::to_string(&new.photos)
            .map_err(|e| StoreError::Sqlite(e.to_string()))?;
        conn.execute(
            "INSERT INTO species (scientific_name, common_name, conservation_status, photos,
                                  primary_photo, description, kingdom, phylum, class, \"order\",
                                  family, full_metadata, taxon_sis_id, inaturalist_id, gbif_id,
                                  top_locations, contributor_id, moderation_state,
                                  created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?19)",
            params![
                new.scientific_name.as_str(),
                new.common_name,
                new.conservation_status,
                photos,
                new.primary_photo,
                new.description,
                new.kingdom,
                new.phylum,
                new.class,
                new.order,
                new.family,
                new.full_metadata,
                new.taxon_sis_id,
                new.inaturalist_id,
                new.gbif_id,
                new.top_locations,
                new.contributor_id.as_str(),
                new.moderation_state.as_str(),
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Self::get_with_conn(&conn, id)
    }

    pub fn get(&self, id: i64) -> Result<SpeciesRecord, StoreError> {
        Self::get_with_conn(&self.conn()?, id)
    }

    fn get_with_conn(conn: &Connection, id: i64) -> Result<SpeciesRecord, StoreError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM species WHERE id = ?1");
        conn.query_row(&sql, [id], decode_row).map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            other => map_decode(other),
        })
    }

    /// Number of records matching a filter, including the implicit
    /// approved-or-legacy gate unless the filter carries an explicit state.
    pub fn count(&self, filter: &SpeciesFilter) -> Result<u64, StoreError> {
        let (where_parts, sql_params) = build_where(filter);
        let conn = self.conn()?;
        let total: i64 = conn.query_row(
            &count_sql(&where_parts),
            params_from_iter(sql_params.iter()),
            |r| r.get(0),
        )?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    /// One page of matching records in stable id order.
    pub fn fetch_page(
        &self,
        filter: &SpeciesFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<SpeciesRecord>, StoreError> {
        let (where_parts, mut sql_params) = build_where(filter);
        sql_params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        sql_params.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&list_sql(&where_parts))?;
        let rows = stmt
            .query_map(params_from_iter(sql_params.iter()), decode_row)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_decode)?;
        Ok(rows)
    }

    /// Apply a moderation decision and return the updated record. The only
    /// code path that mutates `moderation_state`.
    pub fn set_moderation_state(
        &self,
        id: i64,
        action: ModerationAction,
    ) -> Result<SpeciesRecord, StoreError> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "UPDATE species SET moderation_state = ?1, updated_at = ?2 WHERE id = ?3",
            params![action.as_state().as_str(), Self::now(), id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        info!(id, action = action.as_state().as_str(), "moderation state updated");
        Self::get_with_conn(&conn, id)
    }

    /// Distinct non-empty values of one flat column across all records.
    pub fn distinct_values(&self, column: DistinctColumn) -> Result<Vec<String>, StoreError> {
        let col = column.column();
        let sql = format!(
            "SELECT DISTINCT {col} FROM species WHERE {col} IS NOT NULL AND {col} != ''"
        );
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        let values = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    /// Metadata blobs of records whose flat column is missing, for the
    /// aggregator's blob-fallback pass.
    pub fn metadata_for_missing(
        &self,
        column: DistinctColumn,
    ) -> Result<Vec<String>, StoreError> {
        let col = column.column();
        let sql = format!(
            "SELECT full_metadata FROM species
             WHERE ({col} IS NULL OR {col} = '')
               AND full_metadata IS NOT NULL AND full_metadata != ''"
        );
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        let blobs = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(blobs)
    }

    /// Every non-empty serialized locations string, for the region union.
    pub fn all_top_locations(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT top_locations FROM species
             WHERE top_locations IS NOT NULL AND top_locations != ''",
        )?;
        let values = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }
}
