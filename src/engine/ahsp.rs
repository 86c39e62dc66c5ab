//! AHSP composition: weighted resource components into one composite unit
//! price with overhead.

use crate::model::{AhspBreakdown, AhspMaster, Resource, ResourceCategory};

/// Overhead-and-profit percentage applied when the master leaves it unset.
pub const DEFAULT_OVERHEAD_PERCENT: f64 = 10.0;

/// Compose an AHSP analysis into category subtotals and a grand total.
///
/// Each category subtotal is `Σ(resource.price_default × coefficient)` over
/// the master's components. A component whose resource id resolves to nothing
/// contributes 0 to its category; a missing reference is never an error.
///
/// This is a pure function of current component state; callers must not cache
/// the result across component edits.
#[must_use]
pub fn compose(master: &AhspMaster, resources: &[Resource]) -> AhspBreakdown {
    let overhead_percent = master.overhead_percent.unwrap_or(DEFAULT_OVERHEAD_PERCENT);

    let mut labor = 0.0;
    let mut material = 0.0;
    let mut equipment = 0.0;

    for component in &master.components {
        let Some(resource) = resources.iter().find(|r| r.id == component.resource_id) else {
            continue;
        };
        let amount = resource.price_default * component.coefficient;
        match resource.category {
            ResourceCategory::Labor => labor += amount,
            ResourceCategory::Material => material += amount,
            ResourceCategory::Equipment => equipment += amount,
        }
    }

    let subtotal = labor + material + equipment;
    let overhead = subtotal * overhead_percent / 100.0;

    AhspBreakdown {
        labor,
        material,
        equipment,
        subtotal,
        overhead,
        total: subtotal + overhead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AhspComponent;
    use pretty_assertions::assert_eq;

    fn resource(id: u64, category: ResourceCategory, price: f64) -> Resource {
        Resource {
            id,
            name: format!("Resource {id}"),
            category,
            unit: None,
            price_default: price,
        }
    }

    fn master(overhead: Option<f64>, components: Vec<AhspComponent>) -> AhspMaster {
        AhspMaster {
            id: 1,
            name: "Concrete K-300".to_string(),
            unit: "m3".to_string(),
            overhead_percent: overhead,
            components,
        }
    }

    #[test]
    fn composes_category_subtotals_overhead_and_total() {
        let resources = vec![
            resource(1, ResourceCategory::Labor, 50_000.0),
            resource(2, ResourceCategory::Material, 200_000.0),
        ];
        let master = master(
            Some(10.0),
            vec![
                AhspComponent {
                    resource_id: 1,
                    coefficient: 2.0,
                },
                AhspComponent {
                    resource_id: 2,
                    coefficient: 1.0,
                },
            ],
        );

        let breakdown = compose(&master, &resources);
        assert_eq!(breakdown.labor, 100_000.0);
        assert_eq!(breakdown.material, 200_000.0);
        assert_eq!(breakdown.equipment, 0.0);
        assert_eq!(breakdown.subtotal, 300_000.0);
        assert_eq!(breakdown.overhead, 30_000.0);
        assert_eq!(breakdown.total, 330_000.0);
    }

    #[test]
    fn overhead_defaults_to_ten_percent_when_unset() {
        let resources = vec![resource(1, ResourceCategory::Material, 100_000.0)];
        let master = master(
            None,
            vec![AhspComponent {
                resource_id: 1,
                coefficient: 1.0,
            }],
        );

        let breakdown = compose(&master, &resources);
        assert_eq!(breakdown.overhead, 10_000.0);
        assert_eq!(breakdown.total, 110_000.0);
    }

    #[test]
    fn missing_resource_reference_contributes_zero() {
        let resources = vec![resource(1, ResourceCategory::Equipment, 75_000.0)];
        let master = master(
            Some(0.0),
            vec![
                AhspComponent {
                    resource_id: 1,
                    coefficient: 2.0,
                },
                AhspComponent {
                    resource_id: 999,
                    coefficient: 5.0,
                },
            ],
        );

        let breakdown = compose(&master, &resources);
        assert_eq!(breakdown.equipment, 150_000.0);
        assert_eq!(breakdown.subtotal, 150_000.0);
        assert_eq!(breakdown.total, 150_000.0);
    }

    #[test]
    fn recomputes_after_component_edits() {
        let resources = vec![resource(1, ResourceCategory::Labor, 10_000.0)];
        let mut m = master(
            Some(0.0),
            vec![AhspComponent {
                resource_id: 1,
                coefficient: 1.0,
            }],
        );

        assert_eq!(compose(&m, &resources).total, 10_000.0);

        m.components[0].coefficient = 3.0;
        assert_eq!(compose(&m, &resources).total, 30_000.0);

        m.components.clear();
        assert_eq!(compose(&m, &resources).total, 0.0);
    }
}
