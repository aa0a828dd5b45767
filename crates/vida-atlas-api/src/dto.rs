// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use vida_atlas_query::{PageWindow, SpeciesView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationDto {
    pub page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub total_items: u64,
}

impl From<PageWindow> for PaginationDto {
    fn from(window: PageWindow) -> Self {
        Self {
            page: window.current_page,
            total_pages: window.total_pages,
            page_size: window.page_size,
            total_items: window.total_items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListSpeciesResponseDto {
    pub species: Vec<SpeciesView>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterOptionsDto {
    pub regions: Vec<String>,
    pub kingdom: Vec<String>,
    pub phylum: Vec<String>,
    pub class: Vec<String>,
    pub order: Vec<String>,
    pub family: Vec<String>,
    pub status: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeciesResponseDto {
    pub species: SpeciesView,
    pub message: String,
}

/// Contribution payload. Extra fields are ignored rather than rejected:
/// submissions come from evolving frontends and the stored schema is
/// tolerant by contract.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateSpeciesDto {
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub conservation_status: Option<String>,
    pub description: Option<String>,
    pub primary_photo: Option<String>,
    pub photos: Option<Vec<String>>,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub full_metadata: Option<String>,
    pub taxon_sis_id: Option<i64>,
    pub inaturalist_id: Option<i64>,
    pub gbif_id: Option<i64>,
    pub top_locations: Option<String>,
    pub contributor_id: Option<String>,
    pub moderation_state: Option<String>,
}

/// Moderation decision payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModerationRequestDto {
    pub id: Option<i64>,
    pub action: Option<String>,
}
