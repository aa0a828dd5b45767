#![forbid(unsafe_code)]
//! Listing pipeline for the species catalog: filter composition, SQL
//! building, pagination windows, and projection into the public response
//! shape. Everything here is deterministic; execution against a
//! connection lives in the store crate.

mod filters;
mod page;
mod project;
mod sql;

pub use filters::{non_blank, SpeciesFilter};
pub use page::{PageWindow, DEFAULT_PAGE_SIZE};
pub use project::{project, SpeciesView};
pub use sql::{
    build_where, count_sql, escape_like, like_contains, list_sql, metadata_regex,
    register_regexp, SELECT_COLUMNS,
};

pub const CRATE_NAME: &str = "vida-atlas-query";
