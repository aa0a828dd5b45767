// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const SCIENTIFIC_NAME_MAX_LEN: usize = 256;
pub const CONTRIBUTOR_MAX_LEN: usize = 256;

/// Image path served when a record carries no usable photo.
pub const DEFAULT_IMAGE: &str = "/images/default.png";

/// Conservation status assigned when neither the flat field nor the
/// embedded metadata carries one.
pub const NOT_ASSESSED: &str = "Not Assessed";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidValue(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidValue(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Natural unique key of a species record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ScientificName(String);

impl ScientificName {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("scientific_name"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("scientific_name"));
        }
        if input.len() > SCIENTIFIC_NAME_MAX_LEN {
            return Err(ParseError::TooLong(
                "scientific_name",
                SCIENTIFIC_NAME_MAX_LEN,
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who submitted a record: an email address or the literal "anonymous".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ContributorId(String);

impl ContributorId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("contributor_id"));
        }
        if input.len() > CONTRIBUTOR_MAX_LEN {
            return Err(ParseError::TooLong("contributor_id", CONTRIBUTOR_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Approval lifecycle tag. A record with no state at all is a legacy
/// record and counts as approved for listing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ModerationState {
    Pending,
    Approved,
    Rejected,
}

impl ModerationState {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseError::InvalidValue(
                "moderation state must be one of 'pending', 'approved', 'rejected'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// The two transitions the moderation queue may apply to a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ModerationAction {
    Approved,
    Rejected,
}

impl ModerationAction {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseError::InvalidValue(
                "moderation action must be 'approved' or 'rejected'",
            )),
        }
    }

    #[must_use]
    pub const fn as_state(self) -> ModerationState {
        match self {
            Self::Approved => ModerationState::Approved,
            Self::Rejected => ModerationState::Rejected,
        }
    }
}

/// One stored species record, as persisted.
///
/// The shape mirrors the historical document schema: several overlapping
/// photo representations, optional flat taxonomy fields with an embedded
/// serialized-JSON fallback (`full_metadata`), and a serialized locations
/// string (`top_locations`). Serialized fields stay serialized here; they
/// are parsed at the normalizer/projector boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: i64,
    pub scientific_name: ScientificName,
    pub common_name: String,
    pub conservation_status: Option<String>,
    pub photos: Vec<String>,
    pub primary_photo: Option<String>,
    pub photo_1: Option<String>,
    pub photo_2: Option<String>,
    pub photo_3: Option<String>,
    pub photo_4: Option<String>,
    pub description: String,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub full_metadata: Option<String>,
    pub top_locations: Option<String>,
    pub taxon_sis_id: Option<i64>,
    pub inaturalist_id: Option<i64>,
    pub gbif_id: Option<i64>,
    pub contributor_id: ContributorId,
    pub moderation_state: Option<ModerationState>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for a contribution submission, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpecies {
    pub scientific_name: ScientificName,
    pub common_name: String,
    pub conservation_status: String,
    pub description: String,
    pub primary_photo: String,
    pub photos: Vec<String>,
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
    pub contributor_id: ContributorId,
    pub moderation_state: ModerationState,
}

impl NewSpecies {
    /// A submission with every optional field defaulted the way the
    /// contribution endpoint defaults them.
    #[must_use]
    pub fn with_defaults(scientific_name: ScientificName, contributor_id: ContributorId) -> Self {
        Self {
            scientific_name,
            common_name: String::new(),
            conservation_status: NOT_ASSESSED.to_string(),
            description: String::new(),
            primary_photo: DEFAULT_IMAGE.to_string(),
            photos: Vec::new(),
            kingdom: None,
            phylum: None,
            class: None,
            order: None,
            family: None,
            full_metadata: None,
            taxon_sis_id: None,
            inaturalist_id: None,
            gbif_id: None,
            top_locations: None,
            contributor_id,
            moderation_state: ModerationState::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scientific_name_rejects_hidden_trimming() {
        assert!(ScientificName::parse("Panthera onca").is_ok());
        assert!(ScientificName::parse(" Panthera onca").is_err());
        assert!(ScientificName::parse("Panthera onca ").is_err());
        assert!(ScientificName::parse("").is_err());
    }

    #[test]
    fn scientific_name_enforces_max_length() {
        let too_long = "x".repeat(SCIENTIFIC_NAME_MAX_LEN + 1);
        assert!(ScientificName::parse(&too_long).is_err());
    }

    #[test]
    fn moderation_state_round_trips_its_vocabulary() {
        for state in [
            ModerationState::Pending,
            ModerationState::Approved,
            ModerationState::Rejected,
        ] {
            assert_eq!(ModerationState::parse(state.as_str()).expect("parse"), state);
        }
        assert!(ModerationState::parse("archived").is_err());
        assert!(ModerationState::parse("").is_err());
    }

    #[test]
    fn moderation_action_accepts_only_terminal_states() {
        assert_eq!(
            ModerationAction::parse("approved").expect("approved").as_state(),
            ModerationState::Approved
        );
        assert_eq!(
            ModerationAction::parse("rejected").expect("rejected").as_state(),
            ModerationState::Rejected
        );
        assert!(ModerationAction::parse("pending").is_err());
        assert!(ModerationAction::parse("archived").is_err());
    }

    #[test]
    fn defaults_match_the_contribution_contract() {
        let new = NewSpecies::with_defaults(
            ScientificName::parse("Lynx rufus").expect("name"),
            ContributorId::parse("anonymous").expect("contributor"),
        );
        assert_eq!(new.conservation_status, NOT_ASSESSED);
        assert_eq!(new.primary_photo, DEFAULT_IMAGE);
        assert_eq!(new.moderation_state, ModerationState::Pending);
        assert!(new.photos.is_empty());
    }
}
