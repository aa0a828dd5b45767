#![forbid(unsafe_code)]
//! Wire contract of the species catalog API: response DTOs, tolerant
//! request-parameter parsing, and the typed error with its HTTP status
//! mapping.

mod dto;
mod error_mapping;
mod errors;
mod params;

pub use dto::{
    CreateSpeciesDto, FilterOptionsDto, ListSpeciesResponseDto, ModerationRequestDto,
    PaginationDto, SpeciesResponseDto,
};
pub use error_mapping::status_for;
pub use errors::{ApiError, ApiErrorCode};
pub use params::{
    parse_list_species_params, parse_moderation_request, validate_create, ListSpeciesParams,
};

pub const CRATE_NAME: &str = "vida-atlas-api";
