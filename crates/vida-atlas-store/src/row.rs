// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use rusqlite::Row;
use tracing::debug;
use vida_atlas_model::{ContributorId, ModerationState, ScientificName, SpeciesRecord};

fn invalid(field: &str, err: impl std::fmt::Display) -> rusqlite::Error {
    rusqlite::Error::UserFunctionError(format!("stored {field} is invalid: {err}").into())
}

/// Decode one row, positional against `vida_atlas_query::SELECT_COLUMNS`.
///
/// The serialized photos array is decoded tolerantly: malformed JSON
/// becomes an empty list. The identity fields went through validation on
/// the write path, so a failure here means the database was edited from
/// outside and the row is surfaced as an error rather than mangled.
pub(crate) fn decode_row(row: &Row<'_>) -> rusqlite::Result<SpeciesRecord> {
    let scientific_raw: String = row.get(1)?;
    let scientific_name = ScientificName::parse(&scientific_raw)
        .map_err(|e| invalid("scientific_name", e))?;
    let contributor_raw: String = row.get(21)?;
    let contributor_id =
        ContributorId::parse(&contributor_raw).map_err(|e| invalid("contributor_id", e))?;
    let state_raw: Option<String> = row.get(22)?;
    let moderation_state = match state_raw {
        Some(raw) => Some(ModerationState::parse(&raw).map_err(|e| invalid("moderation_state", e))?),
        None => None,
    };
    let photos_raw: String = row.get(4)?;
    let photos = serde_json::from_str::<Vec<String>>(&photos_raw).unwrap_or_else(|_| {
        debug!(row_id = row.get::<_, i64>(0).unwrap_or(-1), "malformed photos array; treating as empty");
        Vec::new()
    });

    Ok(SpeciesRecord {
        id: row.get(0)?,
        scientific_name,
        common_name: row.get(2)?,
        conservation_status: row.get(3)?,
        photos,
        primary_photo: row.get(5)?,
        photo_1: row.get(6)?,
        photo_2: row.get(7)?,
        photo_3: row.get(8)?,
        photo_4: row.get(9)?,
        description: row.get(10)?,
        kingdom: row.get(11)?,
        phylum: row.get(12)?,
        class: row.get(13)?,
        order: row.get(14)?,
        family: row.get(15)?,
        full_metadata: row.get(16)?,
        top_locations: row.get(17)?,
        taxon_sis_id: row.get(18)?,
        inaturalist_id: row.get(19)?,
        gbif_id: row.get(20)?,
        contributor_id,
        moderation_state,
        created_at: row.get(23)?,
        updated_at: row.get(24)?,
    })
}

pub(crate) fn map_decode(err: rusqlite::Error) -> StoreError {
    StoreError::Sqlite(err.to_string())
}
