#![forbid(unsafe_code)]
//! Species catalog domain model.
//!
//! Pure types and resolution rules: no I/O, no wall-clock time. Serialized
//! fields (`full_metadata`, `top_locations`) are parsed here, at the
//! boundary, and parse failures are swallowed into "absent"; the stored
//! documents are tolerant by contract.

mod metadata;
mod regions;
mod species;

pub use metadata::{
    resolve_axis, FullMetadata, ResolvedTaxonomy, TaxonomyAxis, TaxonomyBlock,
};
pub use regions::{
    canonical_regions, match_canonical, normalize_region_token, parse_top_locations,
    strip_diacritics, TopLocation, CANONICAL_REGIONS,
};
pub use species::{
    ContributorId, ModerationAction, ModerationState, NewSpecies, ParseError, ScientificName,
    SpeciesRecord, CONTRIBUTOR_MAX_LEN, DEFAULT_IMAGE, NOT_ASSESSED, SCIENTIFIC_NAME_MAX_LEN,
};

pub const CRATE_NAME: &str = "vida-atlas-model";
