use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Band the adjustment factor is clamped to at the edit boundary (percent).
pub const ADJUSTMENT_MIN: f64 = 85.0;
pub const ADJUSTMENT_MAX: f64 = 115.0;

/// Building quality class; selects the base per-m² price column in the
/// Ballpark seed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingClass {
    A,
    B,
    C,
    D,
}

impl BuildingClass {
    /// Column index into the seed table's per-class price arrays.
    #[must_use]
    pub fn price_index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "Class A",
            Self::B => "Class B",
            Self::C => "Class C",
            Self::D => "Class D",
        }
    }
}

/// Derived pricing state handed into every projection call.
///
/// Recomputed whenever location, class or adjustment changes; never persisted
/// independently. The engine trusts `adjustment_factor` to be inside the
/// 85–115 band because [`PricingContext::set_adjustment_factor`] clamps it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingContext {
    pub building_class: BuildingClass,
    /// Gross floor area in m². Negative values are clamped to 0 at use.
    pub area: f64,
    pub regional_factor: f64,
    pub difficulty_factor: f64,
    /// Manual adjustment percentage, default 100.
    pub adjustment_factor: f64,
}

impl PricingContext {
    #[must_use]
    pub fn new(building_class: BuildingClass, area: f64) -> Self {
        Self {
            building_class,
            area,
            regional_factor: 1.0,
            difficulty_factor: 1.0,
            adjustment_factor: 100.0,
        }
    }

    #[must_use]
    pub fn with_factors(mut self, regional: f64, difficulty: f64) -> Self {
        self.regional_factor = regional;
        self.difficulty_factor = difficulty;
        self
    }

    /// Set the manual adjustment percentage, clamped to the 85–115 band.
    /// Non-finite input is rejected and the prior value retained.
    pub fn set_adjustment_factor(&mut self, percent: f64) {
        if percent.is_finite() {
            self.adjustment_factor = percent.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        }
    }

    /// Set the gross floor area. Non-finite or negative input is rejected.
    pub fn set_area(&mut self, area: f64) {
        if area.is_finite() && area >= 0.0 {
            self.area = area;
        }
    }
}

/// Per-leaf absolute price overrides, keyed by WBS code.
///
/// Exists only in Ballpark per-m² mode. Overrides apply to leaves only;
/// codes that address group nodes are simply never matched during the
/// leaf-only projection walk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceOverrides(HashMap<String, f64>);

impl PriceOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override. Returns `false` (no-op, prior state retained) for
    /// non-finite or negative values.
    pub fn set(&mut self, code: impl Into<String>, value: f64) -> bool {
        if !value.is_finite() || value < 0.0 {
            return false;
        }
        self.0.insert(code.into(), value);
        true
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn remove(&mut self, code: &str) -> bool {
        self.0.remove(code).is_some()
    }

    /// Reset to baseline: drop all overrides.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// User-entered quantity take-off for one leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateValue {
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub unit_price: f64,
}

/// Quantity take-off entries keyed by leaf code, used in Estimates/Detail
/// modes. Distinct from [`PriceOverrides`], which exists only in Ballpark
/// per-m² mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimateValues(HashMap<String, EstimateValue>);

impl EstimateValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a take-off entry. Returns `false` (no-op) when the volume or
    /// unit price is non-finite or negative.
    pub fn set(&mut self, code: impl Into<String>, value: EstimateValue) -> bool {
        if !value.volume.is_finite()
            || value.volume < 0.0
            || !value.unit_price.is_finite()
            || value.unit_price < 0.0
        {
            return false;
        }
        self.0.insert(code.into(), value);
        true
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&EstimateValue> {
        self.0.get(code)
    }

    pub fn remove(&mut self, code: &str) -> bool {
        self.0.remove(code).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn adjustment_factor_is_clamped_to_band() {
        let mut ctx = PricingContext::new(BuildingClass::B, 1000.0);
        ctx.set_adjustment_factor(130.0);
        assert_eq!(ctx.adjustment_factor, 115.0);
        ctx.set_adjustment_factor(50.0);
        assert_eq!(ctx.adjustment_factor, 85.0);
        ctx.set_adjustment_factor(f64::NAN);
        assert_eq!(ctx.adjustment_factor, 85.0);
    }

    #[test]
    fn invalid_area_is_rejected() {
        let mut ctx = PricingContext::new(BuildingClass::A, 500.0);
        ctx.set_area(-10.0);
        assert_eq!(ctx.area, 500.0);
        ctx.set_area(f64::INFINITY);
        assert_eq!(ctx.area, 500.0);
        ctx.set_area(750.0);
        assert_eq!(ctx.area, 750.0);
    }

    #[test]
    fn override_setter_rejects_invalid_values() {
        let mut overrides = PriceOverrides::new();
        assert!(!overrides.set("S.1", -1.0));
        assert!(!overrides.set("S.1", f64::NAN));
        assert!(overrides.is_empty());

        assert!(overrides.set("S.1", 900_000.0));
        assert_eq!(overrides.get("S.1"), Some(900_000.0));

        // A later invalid edit keeps the prior value.
        assert!(!overrides.set("S.1", f64::NEG_INFINITY));
        assert_eq!(overrides.get("S.1"), Some(900_000.0));
    }

    #[test]
    fn estimate_value_setter_validates_both_fields() {
        let mut values = EstimateValues::new();
        let bad = EstimateValue {
            volume: -2.0,
            unit: Some("m3".to_string()),
            unit_price: 100.0,
        };
        assert!(!values.set("S.1.1", bad));

        let good = EstimateValue {
            volume: 12.5,
            unit: Some("m3".to_string()),
            unit_price: 850_000.0,
        };
        assert!(values.set("S.1.1", good.clone()));
        assert_eq!(values.get("S.1.1"), Some(&good));
    }

    #[test]
    fn clear_resets_to_baseline() {
        let mut overrides = PriceOverrides::new();
        overrides.set("S.1", 1.0);
        overrides.set("A.2", 2.0);
        overrides.clear();
        assert!(overrides.is_empty());
    }
}
