use serde::{Deserialize, Serialize};

/// Search filter criteria, read at the start of every search.
///
/// Empty strings and a zero rating mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub language: String,
    pub min_rating: u32,
    pub name_contains: String,
}

impl FilterCriteria {
    /// True when at least one filter clause is set.
    pub fn is_active(&self) -> bool {
        !self.language.is_empty() || self.min_rating > 0 || !self.name_contains.is_empty()
    }
}
