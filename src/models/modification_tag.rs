//! Epoch/index ordering tag used for monotonic admission of updates.

use serde::{Deserialize, Serialize};

/// Ordering tag attached to desired-route and endpoint observations.
///
/// Tags sharing an epoch are totally ordered by `index`. Tags from
/// different epochs are incomparable and the newer observation wins by
/// arrival, so a data-store epoch roll never wedges the table.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct ModificationTag {
    pub epoch: String,
    pub index: u32,
}

impl ModificationTag {
    pub fn new(epoch: impl Into<String>, index: u32) -> Self {
        Self {
            epoch: epoch.into(),
            index,
        }
    }

    /// Returns true when `other` is a strictly newer observation.
    ///
    /// An empty epoch on either side never blocks an update; differing
    /// epochs always admit the newcomer.
    pub fn succeeded_by(&self, other: &ModificationTag) -> bool {
        if self.epoch.is_empty() || other.epoch.is_empty() {
            return true;
        }
        self.epoch != other.epoch || self.index < other.index
    }

    /// Admission rule shared by every table mutation: an equal tag is an
    /// idempotent re-delivery, a newer tag supersedes, anything else is
    /// stale and ignored.
    pub(crate) fn admits(&self, other: &ModificationTag) -> bool {
        self == other || self.succeeded_by(other)
    }
}
