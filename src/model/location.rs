use serde::{Deserialize, Serialize};

/// A geographic cost-factor row.
///
/// An empty `city` marks the province-level default; for a given province at
/// most one such row exists. City-level rows override the province default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFactor {
    pub province: String,
    #[serde(default)]
    pub city: String,
    pub regional_factor: f64,
    pub difficulty_factor: f64,
}

impl LocationFactor {
    /// Whether this row is the province-level default.
    #[must_use]
    pub fn is_province_default(&self) -> bool {
        self.city.is_empty()
    }
}
