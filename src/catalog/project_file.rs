//! Project file loading.
//!
//! The JSON project file is the narrow persistence contract: it carries
//! everything the relational store would otherwise supply (location factors,
//! resources, AHSP masters, user-entered maps) as already-materialized
//! values. The engine itself never performs I/O.

use std::path::Path;

use serde::Deserialize;

use crate::catalog::seed;
use crate::engine::assign::Assignments;
use crate::engine::{derive, location};
use crate::error::CatalogError;
use crate::model::{
    AhspMaster, BuildingClass, EstimateValues, LocationFactor, PriceOverrides, PricingContext,
    Resource, WorkItem,
};

fn default_adjustment() -> f64 {
    100.0
}

/// One estimation project: pricing inputs plus reference data.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub building_class: BuildingClass,
    /// Gross floor area in m².
    pub area: f64,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    /// Manual adjustment percentage; clamped to the 85–115 band on use.
    #[serde(default = "default_adjustment")]
    pub adjustment_percent: f64,
    #[serde(default)]
    pub include_interior: bool,
    #[serde(default)]
    pub include_landscape: bool,
    #[serde(default)]
    pub location_factors: Vec<LocationFactor>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub ahsp: Vec<AhspMaster>,
    #[serde(default)]
    pub overrides: PriceOverrides,
    #[serde(default)]
    pub estimate_values: EstimateValues,
    #[serde(default)]
    pub assignments: Assignments,
    /// Caller-held Estimates tree. When populated, the Estimates derivation
    /// uses it verbatim instead of re-deriving from the Ballpark tree.
    #[serde(default)]
    pub estimates: Vec<WorkItem>,
}

impl ProjectFile {
    /// Derived pricing context: location factors resolved from the bundled
    /// rows, adjustment clamped through the context setter.
    #[must_use]
    pub fn pricing_context(&self) -> PricingContext {
        let factors = location::resolve(&self.location_factors, &self.province, &self.city);
        let mut ctx = PricingContext::new(self.building_class, self.area)
            .with_factors(factors.regional, factors.difficulty);
        ctx.set_adjustment_factor(self.adjustment_percent);
        ctx
    }

    /// The Ballpark seed forest for this project's class and addon flags.
    #[must_use]
    pub fn ballpark_tree(&self) -> Vec<WorkItem> {
        derive::seed_ballpark(
            self.building_class,
            self.include_interior,
            self.include_landscape,
        )
    }

    /// The Estimates forest: the caller-held tree when populated, otherwise
    /// derived from the Ballpark tree and the static delta table.
    #[must_use]
    pub fn estimates_tree(&self, ballpark: &[WorkItem]) -> Vec<WorkItem> {
        derive::derive_estimates(&self.estimates, ballpark, seed::ESTIMATE_DELTAS)
    }
}

/// Parse and validate a project file's JSON content.
fn parse_project(content: &str) -> Result<ProjectFile, CatalogError> {
    let project: ProjectFile = serde_json::from_str(content)?;

    if project.name.trim().is_empty() {
        return Err(CatalogError::InvalidFormat {
            message: "project name must not be empty".to_string(),
        });
    }
    if !project.area.is_finite() || project.area < 0.0 {
        return Err(CatalogError::InvalidFormat {
            message: format!("area must be a non-negative number, got {}", project.area),
        });
    }

    if let Some(factor) = project.location_factors.iter().find(|f| {
        !f.regional_factor.is_finite()
            || f.regional_factor <= 0.0
            || !f.difficulty_factor.is_finite()
            || f.difficulty_factor <= 0.0
    }) {
        return Err(CatalogError::InvalidFormat {
            message: format!(
                "location factors for '{}' must be positive numbers",
                factor.province
            ),
        });
    }

    for master in &project.ahsp {
        if let Some(component) = master
            .components
            .iter()
            .find(|c| !c.coefficient.is_finite() || c.coefficient < 0.0)
        {
            return Err(CatalogError::InvalidFormat {
                message: format!(
                    "AHSP '{}' has an invalid coefficient for resource {}",
                    master.name, component.resource_id
                ),
            });
        }
    }

    // For a given province at most one row may be the province-level default.
    let mut defaults: Vec<&str> = project
        .location_factors
        .iter()
        .filter(|r| r.is_province_default())
        .map(|r| r.province.as_str())
        .collect();
    defaults.sort_unstable();
    if let Some(w) = defaults.windows(2).find(|w| w[0] == w[1]) {
        return Err(CatalogError::InvalidFormat {
            message: format!("duplicate province-level default row for '{}'", w[0]),
        });
    }

    Ok(project)
}

/// Load a project file from disk.
///
/// # Errors
///
/// Returns [`CatalogError::FileRead`] if the file cannot be read,
/// [`CatalogError::JsonParse`] if the JSON is malformed and
/// [`CatalogError::InvalidFormat`] if a catalog invariant is violated.
///
/// # Example
///
/// ```no_run
/// use rab_estimator::catalog::load_project_file;
///
/// let project = load_project_file("tower.json")?;
/// println!("{}: {} m2", project.name, project.area);
/// # Ok::<(), rab_estimator::error::CatalogError>(())
/// ```
pub fn load_project_file<P: AsRef<Path>>(path: P) -> Result<ProjectFile, CatalogError> {
    let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    parse_project(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{
        "name": "Office Tower",
        "building_class": "B",
        "area": 1250.0
    }"#;

    #[test]
    fn minimal_project_gets_defaults() {
        let project = parse_project(MINIMAL).expect("minimal project parses");
        assert_eq!(project.adjustment_percent, 100.0);
        assert!(!project.include_interior);
        assert!(project.overrides.is_empty());
        assert!(project.estimates.is_empty());

        let ctx = project.pricing_context();
        assert_eq!(ctx.regional_factor, 1.0);
        assert_eq!(ctx.adjustment_factor, 100.0);
    }

    #[test]
    fn full_project_round_trips_maps_and_factors() {
        let content = r#"{
            "name": "Bandung Clinic",
            "building_class": "C",
            "area": 800,
            "province": "Jawa Barat",
            "city": "Bandung",
            "adjustment_percent": 110,
            "include_landscape": true,
            "location_factors": [
                {"province": "Jawa Barat", "regional_factor": 0.95, "difficulty_factor": 1.02},
                {"province": "Jawa Barat", "city": "Bandung", "regional_factor": 0.96, "difficulty_factor": 1.0}
            ],
            "resources": [
                {"id": 1, "name": "Mason", "category": "labor", "price_default": 150000}
            ],
            "ahsp": [
                {"id": 7, "name": "Brickwork", "unit": "m2",
                 "components": [{"resource_id": 1, "coefficient": 0.5}]}
            ],
            "overrides": {"S.1": 900000},
            "estimate_values": {"S.3.1": {"volume": 12.0, "unit": "m3", "unit_price": 850000}},
            "assignments": {"S.3.1": 7}
        }"#;

        let project = parse_project(content).expect("full project parses");
        let ctx = project.pricing_context();
        assert_eq!(ctx.regional_factor, 0.96);
        assert_eq!(ctx.difficulty_factor, 1.0);
        assert_eq!(ctx.adjustment_factor, 110.0);
        assert_eq!(project.overrides.get("S.1"), Some(900_000.0));
        assert_eq!(project.assignments.get("S.3.1"), Some(7));

        let roots: Vec<String> = project
            .ballpark_tree()
            .iter()
            .map(|r| r.code().to_string())
            .collect();
        assert_eq!(roots, vec!["S", "A", "M", "L"]);
    }

    #[test]
    fn empty_name_is_rejected() {
        let content = r#"{"name": "  ", "building_class": "A", "area": 10}"#;
        assert!(matches!(
            parse_project(content),
            Err(CatalogError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn negative_area_is_rejected() {
        let content = r#"{"name": "X", "building_class": "A", "area": -5}"#;
        assert!(matches!(
            parse_project(content),
            Err(CatalogError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn negative_component_coefficient_is_rejected() {
        let content = r#"{
            "name": "X", "building_class": "A", "area": 10,
            "ahsp": [
                {"id": 1, "name": "Brickwork", "unit": "m2",
                 "components": [{"resource_id": 1, "coefficient": -2.0}]}
            ]
        }"#;
        assert!(matches!(
            parse_project(content),
            Err(CatalogError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn non_positive_location_multipliers_are_rejected() {
        let content = r#"{
            "name": "X", "building_class": "A", "area": 10,
            "location_factors": [
                {"province": "Bali", "regional_factor": 0.0, "difficulty_factor": 1.0}
            ]
        }"#;
        assert!(matches!(
            parse_project(content),
            Err(CatalogError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn duplicate_province_default_rows_are_rejected() {
        let content = r#"{
            "name": "X", "building_class": "A", "area": 10,
            "location_factors": [
                {"province": "Bali", "regional_factor": 1.1, "difficulty_factor": 1.0},
                {"province": "Bali", "regional_factor": 1.2, "difficulty_factor": 1.0}
            ]
        }"#;
        assert!(matches!(
            parse_project(content),
            Err(CatalogError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn malformed_json_maps_to_parse_error() {
        assert!(matches!(
            parse_project("{not json"),
            Err(CatalogError::JsonParse { .. })
        ));
    }

    #[test]
    fn populated_estimates_tree_is_used_verbatim() {
        let mut project = parse_project(MINIMAL).unwrap();
        project.estimates = vec![WorkItem::leaf("S", "Structure", "Struktur")];

        let ballpark = project.ballpark_tree();
        let estimates = project.estimates_tree(&ballpark);
        assert_eq!(estimates, project.estimates);
    }
}
