//! Geographic cost-factor resolution.

use crate::model::LocationFactor;

/// Resolved multiplier pair for one location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFactors {
    pub regional: f64,
    pub difficulty: f64,
}

impl Default for ResolvedFactors {
    /// Neutral factors: no adjustment.
    fn default() -> Self {
        Self {
            regional: 1.0,
            difficulty: 1.0,
        }
    }
}

/// Resolve `(province, city)` to a factor pair with ordered fallback:
///
/// 1. Exact match on `(province, city)` where the row's city is non-empty.
/// 2. The province-level default row (empty city).
/// 3. Neutral `{1, 1}`.
///
/// No partial (substring/prefix) matching is attempted. A miss is never an
/// error; estimation degrades to neutral factors.
#[must_use]
pub fn resolve(rows: &[LocationFactor], province: &str, city: &str) -> ResolvedFactors {
    let exact = rows
        .iter()
        .find(|r| !r.city.is_empty() && r.province == province && r.city == city);

    let row = exact.or_else(|| {
        rows.iter()
            .find(|r| r.is_province_default() && r.province == province)
    });

    row.map_or_else(ResolvedFactors::default, |r| ResolvedFactors {
        regional: r.regional_factor,
        difficulty: r.difficulty_factor,
    })
}

/// Distinct provinces, sorted lexicographically, for select-option lists.
#[must_use]
pub fn province_options(rows: &[LocationFactor]) -> Vec<String> {
    let mut provinces: Vec<String> = rows.iter().map(|r| r.province.clone()).collect();
    provinces.sort();
    provinces.dedup();
    provinces
}

/// Cities of the selected province, excluding the empty-city sentinel row,
/// sorted lexicographically.
#[must_use]
pub fn city_options(rows: &[LocationFactor], province: &str) -> Vec<String> {
    let mut cities: Vec<String> = rows
        .iter()
        .filter(|r| r.province == province && !r.city.is_empty())
        .map(|r| r.city.clone())
        .collect();
    cities.sort();
    cities.dedup();
    cities
}
