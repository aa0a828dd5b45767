// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    ValidationFailed,
    DuplicateScientificName,
    SpeciesNotFound,
    InvalidModerationAction,
    StoreUnavailable,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"field_errors": [{"parameter": name, "reason": "invalid", "value": value}]}),
        )
    }

    #[must_use]
    pub fn missing_fields(names: &[&str]) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            format!("missing required fields: {}", names.join(", ")),
            json!({"field_errors": names
                .iter()
                .map(|n| json!({"field": n, "reason": "required"}))
                .collect::<Vec<_>>()}),
        )
    }

    #[must_use]
    pub fn invalid_field(name: &str, reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            format!("invalid field: {name}"),
            json!({"field_errors": [{"field": name, "reason": reason}]}),
        )
    }

    #[must_use]
    pub fn duplicate_scientific_name(value: &str) -> Self {
        Self::new(
            ApiErrorCode::DuplicateScientificName,
            "species with this scientific name already exists",
            json!({"field": "scientific_name", "value": value}),
        )
    }

    #[must_use]
    pub fn species_not_found(id: i64) -> Self {
        Self::new(
            ApiErrorCode::SpeciesNotFound,
            "species not found",
            json!({"id": id}),
        )
    }

    #[must_use]
    pub fn invalid_moderation_action(value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidModerationAction,
            "moderation action must be 'approved' or 'rejected'",
            json!({"action": value}),
        )
    }

    #[must_use]
    pub fn store_unavailable(message: &str) -> Self {
        Self::new(
            ApiErrorCode::StoreUnavailable,
            "store unavailable",
            json!({"message": message}),
        )
    }

    #[must_use]
    pub fn internal(message: &str) -> Self {
        Self::new(
            ApiErrorCode::Internal,
            "internal error",
            json!({"message": message}),
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
