// SPDX-License-Identifier: Apache-2.0

use crate::filters::{non_blank, SpeciesFilter};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::Connection;
use vida_atlas_model::{normalize_region_token, TaxonomyAxis};

/// Column order every row-returning query uses; `decode_row` in the store
/// crate is positional against this list.
pub const SELECT_COLUMNS: &str = "id, scientific_name, common_name, conservation_status, \
     photos, primary_photo, photo_1, photo_2, photo_3, photo_4, description, \
     kingdom, phylum, class, \"order\", family, full_metadata, top_locations, \
     taxon_sis_id, inaturalist_id, gbif_id, contributor_id, moderation_state, \
     created_at, updated_at";

#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[must_use]
pub fn like_contains(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Pattern matching `"<axis>": "<value>"` textually inside the serialized
/// metadata blob, tolerant of whitespace around the colon. The blob is not
/// parsed here on purpose: flat fields are not reliably populated, and the
/// textual check is the fallback the store evaluates per row.
#[must_use]
pub fn metadata_regex(axis: TaxonomyAxis, value: &str) -> String {
    format!(r#"(?i)"{}"\s*:\s*"{}""#, axis.key(), regex::escape(value))
}

/// SQLite's REGEXP operator has no default implementation; register one
/// backed by the regex crate. NULL on either side matches nothing.
pub fn register_regexp(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "regexp",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let Some(pattern) = ctx.get::<Option<String>>(0)? else {
                return Ok(false);
            };
            let Some(haystack) = ctx.get::<Option<String>>(1)? else {
                return Ok(false);
            };
            let re = regex::Regex::new(&pattern)
                .map_err(|e| rusqlite::Error::UserFunctionError(Box::new(e)))?;
            Ok(re.is_match(&haystack))
        },
    )
}

fn push_taxonomy(
    where_parts: &mut Vec<String>,
    params: &mut Vec<Value>,
    axis: TaxonomyAxis,
    value: &str,
) {
    where_parts.push(format!(
        "({} = ? OR full_metadata REGEXP ?)",
        axis.column()
    ));
    params.push(Value::Text(value.to_string()));
    params.push(Value::Text(metadata_regex(axis, value)));
}

/// Compose the WHERE clause for a listing request.
///
/// Conditions are contributed in a fixed declared order and combined with
/// AND. The approved-or-legacy gate is appended only when no explicit
/// moderation state was supplied; an explicit state (the admin queue path)
/// is authoritative.
#[must_use]
pub fn build_where(filter: &SpeciesFilter) -> (Vec<String>, Vec<Value>) {
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(status) = non_blank(&filter.status) {
        where_parts.push("conservation_status = ?".to_string());
        params.push(Value::Text(status.to_string()));
    }
    if let Some(region) = non_blank(&filter.region) {
        // Substring match against the RAW serialized field, with the same
        // normalized needle the Location Normalizer would produce.
        where_parts.push("top_locations LIKE ? ESCAPE '!'".to_string());
        params.push(Value::Text(like_contains(&normalize_region_token(region))));
    }
    for axis in TaxonomyAxis::ALL {
        let value = match axis {
            TaxonomyAxis::Kingdom => non_blank(&filter.kingdom),
            TaxonomyAxis::Phylum => non_blank(&filter.phylum),
            TaxonomyAxis::Class => non_blank(&filter.class),
            TaxonomyAxis::Order => non_blank(&filter.order),
            TaxonomyAxis::Family => non_blank(&filter.family),
        };
        if let Some(value) = value {
            push_taxonomy(&mut where_parts, &mut params, axis, value);
        }
    }
    if let Some(search) = non_blank(&filter.search) {
        where_parts
            .push("(scientific_name LIKE ? ESCAPE '!' OR common_name LIKE ? ESCAPE '!')".to_string());
        let pattern = like_contains(search);
        params.push(Value::Text(pattern.clone()));
        params.push(Value::Text(pattern));
    }
    if let Some(contributor) = non_blank(&filter.contributor) {
        where_parts.push("contributor_id = ?".to_string());
        params.push(Value::Text(contributor.to_string()));
    }
    match non_blank(&filter.moderation_state) {
        Some(state) => {
            where_parts.push("moderation_state = ?".to_string());
            params.push(Value::Text(state.to_string()));
        }
        None => {
            where_parts
                .push("(moderation_state = 'approved' OR moderation_state IS NULL)".to_string());
        }
    }

    (where_parts, params)
}

#[must_use]
pub fn count_sql(where_parts: &[String]) -> String {
    let mut sql = "SELECT COUNT(*) FROM species".to_string();
    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    sql
}

/// Listing query ordered by internal id so pages are stable across
/// requests; LIMIT and OFFSET are bound by the caller after the page
/// window is computed.
#[must_use]
pub fn list_sql(where_parts: &[String]) -> String {
    let mut sql = format!("SELECT {SELECT_COLUMNS} FROM species");
    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");
    sql
}
