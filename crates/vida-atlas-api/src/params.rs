// SPDX-License-Identifier: Apache-2.0

use crate::dto::{CreateSpeciesDto, ModerationRequestDto};
use crate::errors::ApiError;
use std::collections::BTreeMap;
use vida_atlas_model::{
    ContributorId, ModerationAction, ModerationState, NewSpecies, ScientificName, DEFAULT_IMAGE,
    NOT_ASSESSED,
};
use vida_atlas_query::{SpeciesFilter, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpeciesParams {
    pub page: u64,
    pub page_size: u64,
    pub filter: SpeciesFilter,
}

fn param(query: &BTreeMap<String, String>, name: &str) -> Option<String> {
    query
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse listing parameters. Every axis is optional and the pagination
/// inputs are tolerant: a missing or unparsable page falls back to 1 and
/// the page size is clamped into `[1, max_page_size]`; out-of-range
/// paging clamps later, it never errors.
#[must_use]
pub fn parse_list_species_params(
    query: &BTreeMap<String, String>,
    max_page_size: u64,
) -> ListSpeciesParams {
    let page = param(query, "page")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
        .max(1);
    let page_size = param(query, "page_size")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, max_page_size.max(1));

    ListSpeciesParams {
        page,
        page_size,
        filter: SpeciesFilter {
            status: param(query, "status"),
            region: param(query, "region"),
            kingdom: param(query, "kingdom"),
            phylum: param(query, "phylum"),
            class: param(query, "class"),
            order: param(query, "order"),
            family: param(query, "family"),
            search: param(query, "search"),
            contributor: param(query, "contributor"),
            moderation_state: param(query, "state"),
        },
    }
}

/// Validate a contribution payload into a `NewSpecies`, applying the
/// submission defaults (pending state, "Not Assessed" status, placeholder
/// primary photo).
pub fn validate_create(dto: &CreateSpeciesDto) -> Result<NewSpecies, ApiError> {
    let mut missing = Vec::new();
    if dto.scientific_name.as_deref().map_or(true, str::is_empty) {
        missing.push("scientific_name");
    }
    if dto.contributor_id.as_deref().map_or(true, str::is_empty) {
        missing.push("contributor_id");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let scientific_name = ScientificName::parse(dto.scientific_name.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::invalid_field("scientific_name", &e.to_string()))?;
    let contributor_id = ContributorId::parse(dto.contributor_id.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::invalid_field("contributor_id", &e.to_string()))?;
    let moderation_state = match dto.moderation_state.as_deref() {
        None | Some("") => ModerationState::Pending,
        Some(raw) => ModerationState::parse(raw)
            .map_err(|e| ApiError::invalid_field("moderation_state", &e.to_string()))?,
    };

    let non_empty_or = |value: &Option<String>, default: &str| -> String {
        match value.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => default.to_string(),
        }
    };

    Ok(NewSpecies {
        scientific_name,
        common_name: dto.common_name.clone().unwrap_or_default(),
        conservation_status: non_empty_or(&dto.conservation_status, NOT_ASSESSED),
        description: dto.description.clone().unwrap_or_default(),
        primary_photo: non_empty_or(&dto.primary_photo, DEFAULT_IMAGE),
        photos: dto.photos.clone().unwrap_or_default(),
        kingdom: dto.kingdom.clone().filter(|v| !v.is_empty()),
        phylum: dto.phylum.clone().filter(|v| !v.is_empty()),
        class: dto.class.clone().filter(|v| !v.is_empty()),
        order: dto.order.clone().filter(|v| !v.is_empty()),
        family: dto.family.clone().filter(|v| !v.is_empty()),
        full_metadata: dto.full_metadata.clone().filter(|v| !v.is_empty()),
        taxon_sis_id: dto.taxon_sis_id,
        inaturalist_id: dto.inaturalist_id,
        gbif_id: dto.gbif_id,
        top_locations: dto.top_locations.clone().filter(|v| !v.is_empty()),
        contributor_id,
        moderation_state,
    })
}

/// Validate a moderation request: both fields are required and the action
/// vocabulary is exactly {approved, rejected}.
pub fn parse_moderation_request(
    dto: &ModerationRequestDto,
) -> Result<(i64, ModerationAction), ApiError> {
    let Some(id) = dto.id else {
        return Err(ApiError::invalid_field("id", "required"));
    };
    let raw = dto.action.as_deref().unwrap_or_default();
    let action = ModerationAction::parse(raw)
        .map_err(|_| ApiError::invalid_moderation_action(raw))?;
    Ok((id, action))
}
