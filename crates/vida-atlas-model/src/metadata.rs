// SPDX-License-Identifier: Apache-2.0

use crate::species::{SpeciesRecord, NOT_ASSESSED};
use serde::Deserialize;

/// One axis of the taxonomic hierarchy.
///
/// `key` is the field name used inside the embedded metadata JSON;
/// `column` is the flat store column (quoted where the name collides with
/// an SQL keyword).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum TaxonomyAxis {
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
}

impl TaxonomyAxis {
    pub const ALL: [Self; 5] = [
        Self::Kingdom,
        Self::Phylum,
        Self::Class,
        Self::Order,
        Self::Family,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Kingdom => "kingdom",
            Self::Phylum => "phylum",
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
        }
    }

    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Kingdom => "kingdom",
            Self::Phylum => "phylum",
            Self::Class => "class",
            Self::Order => "\"order\"",
            Self::Family => "family",
        }
    }
}

/// Nested taxonomy object inside `full_metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaxonomyBlock {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
}

impl TaxonomyBlock {
    #[must_use]
    pub fn get(&self, axis: TaxonomyAxis) -> Option<&str> {
        let value = match axis {
            TaxonomyAxis::Kingdom => &self.kingdom,
            TaxonomyAxis::Phylum => &self.phylum,
            TaxonomyAxis::Class => &self.class,
            TaxonomyAxis::Order => &self.order,
            TaxonomyAxis::Family => &self.family,
        };
        non_empty(value.as_deref())
    }
}

/// Parsed form of the embedded full-metadata blob.
///
/// Unknown fields are ignored on purpose: the blob is produced by an
/// upstream enrichment step and carries far more than we read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullMetadata {
    #[serde(default)]
    pub taxonomy: Option<TaxonomyBlock>,
    #[serde(default)]
    pub conservation_status: Option<String>,
}

impl FullMetadata {
    /// Parse the serialized blob. Malformed JSON yields `None`, never an
    /// error; the record is simply treated as carrying no metadata.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Taxonomy as displayed: each axis resolved flat-then-blob, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTaxonomy {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Resolve one axis: the flat field wins when non-empty, otherwise the
/// parsed blob's taxonomy object is consulted.
#[must_use]
pub fn resolve_axis(
    flat: Option<&str>,
    metadata: Option<&FullMetadata>,
    axis: TaxonomyAxis,
) -> Option<String> {
    if let Some(value) = non_empty(flat) {
        return Some(value.to_string());
    }
    metadata
        .and_then(|m| m.taxonomy.as_ref())
        .and_then(|t| t.get(axis))
        .map(str::to_string)
}

impl SpeciesRecord {
    #[must_use]
    pub fn flat_axis(&self, axis: TaxonomyAxis) -> Option<&str> {
        match axis {
            TaxonomyAxis::Kingdom => self.kingdom.as_deref(),
            TaxonomyAxis::Phylum => self.phylum.as_deref(),
            TaxonomyAxis::Class => self.class.as_deref(),
            TaxonomyAxis::Order => self.order.as_deref(),
            TaxonomyAxis::Family => self.family.as_deref(),
        }
    }

    /// Resolve all five axes against the parsed blob (parsed once).
    #[must_use]
    pub fn resolved_taxonomy(&self) -> ResolvedTaxonomy {
        let metadata = self.full_metadata.as_deref().and_then(FullMetadata::parse);
        ResolvedTaxonomy {
            kingdom: resolve_axis(self.kingdom.as_deref(), metadata.as_ref(), TaxonomyAxis::Kingdom),
            phylum: resolve_axis(self.phylum.as_deref(), metadata.as_ref(), TaxonomyAxis::Phylum),
            class: resolve_axis(self.class.as_deref(), metadata.as_ref(), TaxonomyAxis::Class),
            order: resolve_axis(self.order.as_deref(), metadata.as_ref(), TaxonomyAxis::Order),
            family: resolve_axis(self.family.as_deref(), metadata.as_ref(), TaxonomyAxis::Family),
        }
    }

    /// Display status: flat field, else blob status, else "Not Assessed".
    #[must_use]
    pub fn resolved_status(&self) -> String {
        if let Some(status) = non_empty(self.conservation_status.as_deref()) {
            return status.to_string();
        }
        self.full_metadata
            .as_deref()
            .and_then(FullMetadata::parse)
            .and_then(|m| m.conservation_status)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NOT_ASSESSED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{ContributorId, ScientificName};

    fn record(full_metadata: Option<&str>) -> SpeciesRecord {
        SpeciesRecord {
            id: 1,
            scientific_name: ScientificName::parse("Ambystoma mexicanum").expect("name"),
            common_name: "Axolotl".to_string(),
            conservation_status: None,
            photos: Vec::new(),
            primary_photo: None,
            photo_1: None,
            photo_2: None,
            photo_3: None,
            photo_4: None,
            description: String::new(),
            kingdom: None,
            phylum: None,
            class: None,
            order: None,
            family: None,
            full_metadata: full_metadata.map(str::to_string),
            top_locations: None,
            taxon_sis_id: None,
            inaturalist_id: None,
            gbif_id: None,
            contributor_id: ContributorId::parse("anonymous").expect("contributor"),
            moderation_state: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn flat_field_wins_over_blob() {
        let mut rec = record(Some(r#"{"taxonomy":{"kingdom":"Plantae"}}"#));
        rec.kingdom = Some("Animalia".to_string());
        let resolved = rec.resolved_taxonomy();
        assert_eq!(resolved.kingdom.as_deref(), Some("Animalia"));
    }

    #[test]
    fn empty_flat_field_falls_back_to_blob() {
        let mut rec = record(Some(
            r#"{"taxonomy":{"kingdom":"Animalia","class":"Amphibia"}}"#,
        ));
        rec.kingdom = Some(String::new());
        let resolved = rec.resolved_taxonomy();
        assert_eq!(resolved.kingdom.as_deref(), Some("Animalia"));
        assert_eq!(resolved.class.as_deref(), Some("Amphibia"));
        assert_eq!(resolved.phylum, None);
    }

    #[test]
    fn malformed_blob_resolves_every_axis_to_absent() {
        let rec = record(Some("{not json"));
        let resolved = rec.resolved_taxonomy();
        for axis in TaxonomyAxis::ALL {
            assert_eq!(
                resolve_axis(rec.flat_axis(axis), FullMetadata::parse("{not json").as_ref(), axis),
                None
            );
        }
        assert_eq!(resolved, ResolvedTaxonomy::default());
    }

    #[test]
    fn axes_resolve_independently() {
        let mut rec = record(Some(r#"{"taxonomy":{"phylum":"Chordata"}}"#));
        rec.kingdom = Some("Animalia".to_string());
        let resolved = rec.resolved_taxonomy();
        assert_eq!(resolved.kingdom.as_deref(), Some("Animalia"));
        assert_eq!(resolved.phylum.as_deref(), Some("Chordata"));
        assert_eq!(resolved.family, None);
    }

    #[test]
    fn status_falls_through_to_not_assessed() {
        let rec = record(None);
        assert_eq!(rec.resolved_status(), NOT_ASSESSED);

        let rec = record(Some(r#"{"conservationStatus":"Endangered"}"#));
        assert_eq!(rec.resolved_status(), "Endangered");

        let mut rec = record(Some(r#"{"conservationStatus":"Endangered"}"#));
        rec.conservation_status = Some("Vulnerable".to_string());
        assert_eq!(rec.resolved_status(), "Vulnerable");

        let rec = record(Some("{broken"));
        assert_eq!(rec.resolved_status(), NOT_ASSESSED);
    }
}
