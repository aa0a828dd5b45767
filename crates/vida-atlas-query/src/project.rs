// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use vida_atlas_model::{canonical_regions, ModerationState, SpeciesRecord, DEFAULT_IMAGE};

/// Public response shape of one record: derived convenience fields
/// (image, status, taxonomy, regions) alongside the raw stored fields, so
/// consumers needing the unprocessed form keep it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesView {
    pub id: i64,
    pub scientific_name: String,
    pub common_name: String,
    pub image: String,
    pub status: String,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub regions: Vec<String>,
    pub photos: Vec<String>,
    pub description: String,
    pub conservation_status: Option<String>,
    pub primary_photo: Option<String>,
    pub photo_1: Option<String>,
    pub photo_2: Option<String>,
    pub photo_3: Option<String>,
    pub photo_4: Option<String>,
    pub full_metadata: Option<String>,
    pub top_locations: Option<String>,
    pub taxon_sis_id: Option<i64>,
    pub inaturalist_id: Option<i64>,
    pub gbif_id: Option<i64>,
    pub contributor_id: String,
    pub moderation_state: Option<ModerationState>,
    pub created_at: String,
    pub updated_at: String,
}

fn first_non_empty<'a>(candidates: [Option<&'a str>; 2]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

/// Map one stored record into the response shape. Pure and deterministic:
/// same record in, same view out.
#[must_use]
pub fn project(record: &SpeciesRecord) -> SpeciesView {
    let image = first_non_empty([record.photo_1.as_deref(), record.primary_photo.as_deref()])
        .unwrap_or(DEFAULT_IMAGE)
        .to_string();
    let taxonomy = record.resolved_taxonomy();
    let regions: Vec<String> = record
        .top_locations
        .as_deref()
        .map(canonical_regions)
        .unwrap_or_default()
        .into_iter()
        .collect();

    SpeciesView {
        id: record.id,
        scientific_name: record.scientific_name.as_str().to_string(),
        common_name: record.common_name.clone(),
        image,
        status: record.resolved_status(),
        kingdom: taxonomy.kingdom,
        phylum: taxonomy.phylum,
        class: taxonomy.class,
        order: taxonomy.order,
        family: taxonomy.family,
        regions,
        photos: record.photos.clone(),
        description: record.description.clone(),
        conservation_status: record.conservation_status.clone(),
        primary_photo: record.primary_photo.clone(),
        photo_1: record.photo_1.clone(),
        photo_2: record.photo_2.clone(),
        photo_3: record.photo_3.clone(),
        photo_4: record.photo_4.clone(),
        full_metadata: record.full_metadata.clone(),
        top_locations: record.top_locations.clone(),
        taxon_sis_id: record.taxon_sis_id,
        inaturalist_id: record.inaturalist_id,
        gbif_id: record.gbif_id,
        contributor_id: record.contributor_id.as_str().to_string(),
        moderation_state: record.moderation_state,
        created_at: record.created_at.clone(),
        updated_at: record.updated_at.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vida_atlas_model::{ContributorId, ScientificName, NOT_ASSESSED};

    fn record() -> SpeciesRecord {
        SpeciesRecord {
            id: 7,
            scientific_name: ScientificName::parse("Panthera onca").expect("name"),
            common_name: "Jaguar".to_string(),
            conservation_status: Some("Near Threatened".to_string()),
            photos: vec!["https://example.org/a.jpg".to_string()],
            primary_photo: Some("https://example.org/primary.jpg".to_string()),
            photo_1: None,
            photo_2: None,
            photo_3: None,
            photo_4: None,
            description: "Largest cat of the Americas.".to_string(),
            kingdom: Some("Animalia".to_string()),
            phylum: None,
            class: None,
            order: None,
            family: None,
            full_metadata: Some(
                r#"{"taxonomy":{"phylum":"Chordata","family":"Felidae"}}"#.to_string(),
            ),
            top_locations: Some(r#"["Campeche (52)","Chiapas (31)"]"#.to_string()),
            taxon_sis_id: Some(15953),
            inaturalist_id: None,
            gbif_id: None,
            contributor_id: ContributorId::parse("anonymous").expect("contributor"),
            moderation_state: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn image_prefers_slot_one_then_primary_then_default() {
        let mut rec = record();
        assert_eq!(project(&rec).image, "https://example.org/primary.jpg");

        rec.photo_1 = Some("https://example.org/slot1.jpg".to_string());
        assert_eq!(project(&rec).image, "https://example.org/slot1.jpg");

        rec.photo_1 = Some(String::new());
        rec.primary_photo = None;
        assert_eq!(project(&rec).image, DEFAULT_IMAGE);
    }

    #[test]
    fn status_is_never_empty() {
        let mut rec = record();
        rec.conservation_status = None;
        rec.full_metadata = None;
        assert_eq!(project(&rec).status, NOT_ASSESSED);
    }

    #[test]
    fn derived_and_raw_fields_coexist() {
        let view = project(&record());
        assert_eq!(view.kingdom.as_deref(), Some("Animalia"));
        assert_eq!(view.phylum.as_deref(), Some("Chordata"));
        assert_eq!(view.family.as_deref(), Some("Felidae"));
        assert_eq!(view.regions, vec!["campeche".to_string(), "chiapas".to_string()]);
        // Raw serialized fields pass through untouched.
        assert_eq!(
            view.top_locations.as_deref(),
            Some(r#"["Campeche (52)","Chiapas (31)"]"#)
        );
        assert!(view.full_metadata.is_some());
    }

    #[test]
    fn projection_is_deterministic() {
        let rec = record();
        assert_eq!(project(&rec), project(&rec));
    }
}
