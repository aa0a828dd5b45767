use serde::{Deserialize, Serialize};

/// The optional filter axes a listing request may carry.
///
/// Every field is independent; an absent (or blank) value contributes no
/// condition. `moderation_state` is the explicit admin-queue filter: when
/// set, it is authoritative and the implicit approved-or-legacy gate is
/// skipped. An explicit value outside the moderation vocabulary is passed
/// through as-is and simply matches nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeciesFilter {
    pub status: Option<String>,
    pub region: Option<String>,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub search: Option<String>,
    pub contributor: Option<String>,
    pub moderation_state: Option<String>,
}

impl SpeciesFilter {
    /// True when no axis is set; the composed query is then just the
    /// implicit moderation gate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_blank(&self.status).is_none()
            && non_blank(&self.region).is_none()
            && non_blank(&self.kingdom).is_none()
            && non_blank(&self.phylum).is_none()
            && non_blank(&self.class).is_none()
            && non_blank(&self.order).is_none()
            && non_blank(&self.family).is_none()
            && non_blank(&self.search).is_none()
            && non_blank(&self.contributor).is_none()
            && non_blank(&self.moderation_state).is_none()
    }
}

/// Blank-as-absent: form frontends submit empty strings for unset selects.
#[must_use]
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
