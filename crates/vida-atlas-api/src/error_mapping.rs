// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[must_use]
pub fn status_for(error: &ApiError) -> u16 {
    match error.code {
        ApiErrorCode::InvalidQueryParameter
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidModerationAction => 400,
        ApiErrorCode::SpeciesNotFound => 404,
        ApiErrorCode::DuplicateScientificName => 409,
        ApiErrorCode::StoreUnavailable => 503,
        _ => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_classes_map_to_their_http_families() {
        assert_eq!(status_for(&ApiError::invalid_param("page", "x")), 400);
        assert_eq!(status_for(&ApiError::missing_fields(&["scientific_name"])), 400);
        assert_eq!(status_for(&ApiError::invalid_moderation_action("archived")), 400);
        assert_eq!(status_for(&ApiError::species_not_found(9)), 404);
        assert_eq!(status_for(&ApiError::duplicate_scientific_name("X y")), 409);
        assert_eq!(status_for(&ApiError::store_unavailable("down")), 503);
        assert_eq!(status_for(&ApiError::internal("boom")), 500);
    }
}
