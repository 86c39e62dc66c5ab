//! RAB projection: a WBS tree plus a pricing context becomes a priced tree.
//!
//! Projections are structural folds returning fresh immutable [`PricedNode`]
//! trees bottom-up; the source tree, the override map and the estimate-value
//! map are only ever read. Rounding to whole currency units happens at the
//! point a per-m² price is adjusted and at the point a whole-project total is
//! summed, never at intermediate per-node steps.

use crate::engine::assign::Assignments;
use crate::model::{
    AhspMaster, EstimateValues, PriceOverrides, PricedNode, PricingContext, Resource, WorkItem,
};

/// Ballpark projection: per-m² leaf prices.
///
/// Each leaf price is `round(base × adjustmentFactor/100)`; a matching
/// override then replaces the adjusted price outright (overrides are never
/// re-multiplied by the adjustment factor). Group totals are bottom-up sums
/// of their children.
#[must_use]
pub fn project_ballpark(
    tree: &[WorkItem],
    ctx: &PricingContext,
    overrides: &PriceOverrides,
) -> Vec<PricedNode> {
    tree.iter()
        .map(|item| project_ballpark_node(item, ctx, overrides))
        .collect()
}

fn project_ballpark_node(
    item: &WorkItem,
    ctx: &PricingContext,
    overrides: &PriceOverrides,
) -> PricedNode {
    match item {
        WorkItem::Leaf {
            code,
            name_en,
            name_id,
            unit,
            unit_price,
            ..
        } => {
            let base = unit_price.unwrap_or(0.0);
            let adjusted = (base * ctx.adjustment_factor / 100.0).round();
            let price = overrides.get(code).unwrap_or(adjusted);
            PricedNode::Leaf {
                code: code.clone(),
                name_en: name_en.clone(),
                name_id: name_id.clone(),
                unit: unit.clone(),
                unit_price: price,
                volume: None,
                total: price,
            }
        }
        WorkItem::Group {
            code,
            name_en,
            name_id,
            children,
        } => {
            let priced: Vec<PricedNode> = children
                .iter()
                .map(|child| project_ballpark_node(child, ctx, overrides))
                .collect();
            let total = priced.iter().map(PricedNode::total).sum();
            PricedNode::Group {
                code: code.clone(),
                name_en: name_en.clone(),
                name_id: name_id.clone(),
                total,
                children: priced,
            }
        }
    }
}

/// Estimate/Detail projection: volume × unit price per leaf.
///
/// Leaf volume and unit price come from the estimate-value map. When no
/// estimate value exists, a linked AHSP analysis supplies the unit price and
/// the volume stays 0 (a linked analysis never invents a quantity); with
/// neither source the leaf contributes 0. The effective unit price is
/// `entered × regionalFactor × difficultyFactor × adjustmentFactor/100`,
/// unrounded per node.
#[must_use]
pub fn project_estimate(
    tree: &[WorkItem],
    ctx: &PricingContext,
    values: &EstimateValues,
    assignments: &Assignments,
    masters: &[AhspMaster],
    resources: &[Resource],
) -> Vec<PricedNode> {
    tree.iter()
        .map(|item| project_estimate_node(item, ctx, values, assignments, masters, resources))
        .collect()
}

fn project_estimate_node(
    item: &WorkItem,
    ctx: &PricingContext,
    values: &EstimateValues,
    assignments: &Assignments,
    masters: &[AhspMaster],
    resources: &[Resource],
) -> PricedNode {
    match item {
        WorkItem::Leaf {
            code,
            name_en,
            name_id,
            unit,
            ..
        } => {
            let multiplier =
                ctx.regional_factor * ctx.difficulty_factor * ctx.adjustment_factor / 100.0;

            let (volume, entered_price, unit) = match values.get(code) {
                Some(value) => (
                    Some(value.volume),
                    value.unit_price,
                    value.unit.clone().or_else(|| unit.clone()),
                ),
                None => match assignments.linked_price(code, masters, resources) {
                    Some((price, ahsp_unit)) => (Some(0.0), price, Some(ahsp_unit)),
                    None => (None, 0.0, unit.clone()),
                },
            };

            let effective_price = entered_price * multiplier;
            let total = volume.unwrap_or(0.0) * effective_price;
            PricedNode::Leaf {
                code: code.clone(),
                name_en: name_en.clone(),
                name_id: name_id.clone(),
                unit,
                unit_price: effective_price,
                volume,
                total,
            }
        }
        WorkItem::Group {
            code,
            name_en,
            name_id,
            children,
        } => {
            let priced: Vec<PricedNode> = children
                .iter()
                .map(|child| {
                    project_estimate_node(child, ctx, values, assignments, masters, resources)
                })
                .collect();
            let total = priced.iter().map(PricedNode::total).sum();
            PricedNode::Group {
                code: code.clone(),
                name_en: name_en.clone(),
                name_id: name_id.clone(),
                total,
                children: priced,
            }
        }
    }
}

/// Total project cost in Ballpark mode: the per-m² total of every root
/// subtree times the floor area, rounded once at the end. Negative areas are
/// clamped to 0 before multiplication.
#[must_use]
pub fn total_project_cost_ballpark(priced: &[PricedNode], area: f64) -> f64 {
    let per_m2: f64 = priced.iter().map(PricedNode::total).sum();
    (per_m2 * area.max(0.0)).round()
}

/// Total project cost in Estimate/Detail mode: root totals are already
/// volume-priced and area-independent.
#[must_use]
pub fn total_project_cost_estimate(priced: &[PricedNode]) -> f64 {
    priced.iter().map(PricedNode::total).sum::<f64>().round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AhspComponent, BuildingClass, EstimateValue, ResourceCategory, WorkItem,
    };
    use pretty_assertions::assert_eq;

    fn single_leaf_tree(price: f64) -> Vec<WorkItem> {
        vec![
            WorkItem::group("S", "Structure", "Struktur").with_children(vec![WorkItem::leaf(
                "S.1",
                "Foundation",
                "Pondasi",
            )
            .with_unit("m2")
            .with_unit_price(price)]),
        ]
    }

    fn leaf_price(priced: &[PricedNode], code: &str) -> f64 {
        fn walk(nodes: &[PricedNode], code: &str) -> Option<f64> {
            for node in nodes {
                if node.code() == code {
                    if let PricedNode::Leaf { unit_price, .. } = node {
                        return Some(*unit_price);
                    }
                }
                if let Some(p) = walk(node.children(), code) {
                    return Some(p);
                }
            }
            None
        }
        walk(priced, code).expect("leaf present")
    }

    #[test]
    fn adjustment_factor_scales_and_rounds_leaf_price() {
        let tree = single_leaf_tree(1_000_000.0);
        let mut ctx = PricingContext::new(BuildingClass::B, 100.0);
        ctx.set_adjustment_factor(110.0);

        let priced = project_ballpark(&tree, &ctx, &PriceOverrides::new());
        assert_eq!(leaf_price(&priced, "S.1"), 1_100_000.0);
    }

    #[test]
    fn override_replaces_the_adjusted_price_outright() {
        let tree = single_leaf_tree(1_000_000.0);
        let mut ctx = PricingContext::new(BuildingClass::B, 100.0);
        ctx.set_adjustment_factor(110.0);

        let mut overrides = PriceOverrides::new();
        overrides.set("S.1", 900_000.0);

        let priced = project_ballpark(&tree, &ctx, &overrides);
        // The override is never re-multiplied by the adjustment factor.
        assert_eq!(leaf_price(&priced, "S.1"), 900_000.0);
    }

    #[test]
    fn group_total_is_sum_of_children_recursively() {
        let tree = vec![WorkItem::group("S", "Structure", "Struktur").with_children(vec![
            WorkItem::leaf("S.1", "A", "A").with_unit_price(100.0),
            WorkItem::group("S.2", "B", "B").with_children(vec![
                WorkItem::leaf("S.2.1", "C", "C").with_unit_price(40.0),
                WorkItem::leaf("S.2.2", "D", "D").with_unit_price(60.0),
            ]),
        ])];
        let ctx = PricingContext::new(BuildingClass::A, 10.0);

        let priced = project_ballpark(&tree, &ctx, &PriceOverrides::new());

        fn assert_rollup(node: &PricedNode) {
            if !node.is_leaf() {
                let sum: f64 = node.children().iter().map(PricedNode::total).sum();
                assert_eq!(node.total(), sum, "rollup mismatch at {}", node.code());
                node.children().iter().for_each(assert_rollup);
            }
        }
        priced.iter().for_each(assert_rollup);
        assert_eq!(priced[0].total(), 200.0);
    }

    #[test]
    fn leaf_without_base_price_contributes_zero() {
        let tree = vec![WorkItem::leaf("S", "Structure", "Struktur")
            .with_children(vec![WorkItem::leaf("S.1", "A", "A")])];
        let ctx = PricingContext::new(BuildingClass::A, 10.0);
        let priced = project_ballpark(&tree, &ctx, &PriceOverrides::new());
        assert_eq!(priced[0].total(), 0.0);
    }

    #[test]
    fn ballpark_total_multiplies_by_clamped_area() {
        let tree = single_leaf_tree(1_000_000.0);
        let ctx = PricingContext::new(BuildingClass::B, 0.0);
        let priced = project_ballpark(&tree, &ctx, &PriceOverrides::new());

        assert_eq!(total_project_cost_ballpark(&priced, 250.0), 250_000_000.0);
        assert_eq!(total_project_cost_ballpark(&priced, -50.0), 0.0);
    }

    #[test]
    fn estimate_leaf_multiplies_volume_by_factored_price() {
        let tree = vec![
            WorkItem::group("S", "Structure", "Struktur").with_children(vec![WorkItem::leaf(
                "S.1",
                "Columns",
                "Kolom",
            )
            .with_unit("m3")]),
        ];
        let mut ctx = PricingContext::new(BuildingClass::B, 100.0).with_factors(1.1, 1.0);
        ctx.set_adjustment_factor(100.0);

        let mut values = EstimateValues::new();
        values.set(
            "S.1",
            EstimateValue {
                volume: 10.0,
                unit: Some("m3".to_string()),
                unit_price: 2_000_000.0,
            },
        );

        let priced = project_estimate(
            &tree,
            &ctx,
            &values,
            &Assignments::new(),
            &[],
            &[],
        );
        assert!((priced[0].total() - 22_000_000.0).abs() < 1e-6);
        assert_eq!(total_project_cost_estimate(&priced), 22_000_000.0);
    }

    #[test]
    fn estimate_leaf_without_entry_contributes_zero() {
        let tree = vec![WorkItem::group("S", "Structure", "Struktur")
            .with_children(vec![WorkItem::leaf("S.1", "Columns", "Kolom")])];
        let ctx = PricingContext::new(BuildingClass::B, 100.0);

        let priced = project_estimate(
            &tree,
            &ctx,
            &EstimateValues::new(),
            &Assignments::new(),
            &[],
            &[],
        );
        assert_eq!(priced[0].total(), 0.0);
        match &priced[0].children()[0] {
            PricedNode::Leaf { volume, .. } => assert_eq!(*volume, None),
            PricedNode::Group { .. } => panic!("expected leaf"),
        }
    }

    fn assignable_tree() -> Vec<WorkItem> {
        vec![
            WorkItem::group("S", "Structure", "Struktur").with_children(vec![WorkItem::group(
                "S.1",
                "Foundation",
                "Pondasi",
            )
            .with_children(vec![
                WorkItem::leaf("S.1.1", "Excavation", "Galian"),
            ])]),
        ]
    }

    fn linked_catalog() -> (Vec<AhspMaster>, Vec<Resource>) {
        let resources = vec![Resource {
            id: 1,
            name: "Mason".to_string(),
            category: ResourceCategory::Labor,
            unit: Some("oh".to_string()),
            price_default: 100_000.0,
        }];
        let masters = vec![AhspMaster {
            id: 7,
            name: "Excavation 1m".to_string(),
            unit: "m3".to_string(),
            overhead_percent: Some(10.0),
            components: vec![AhspComponent {
                resource_id: 1,
                coefficient: 2.0,
            }],
        }];
        (masters, resources)
    }

    #[test]
    fn linked_analysis_supplies_unit_price_but_no_volume() {
        let tree = assignable_tree();
        let ctx = PricingContext::new(BuildingClass::B, 100.0);
        let (masters, resources) = linked_catalog();
        let mut assignments = Assignments::new();
        assert!(assignments.assign(&tree, "S.1.1", 7));

        let priced = project_estimate(
            &tree,
            &ctx,
            &EstimateValues::new(),
            &assignments,
            &masters,
            &resources,
        );

        // 2 × 100,000 + 10% overhead = 220,000 per m3; the analysis never
        // invents a quantity, so the leaf still totals 0.
        assert_eq!(leaf_price(&priced, "S.1.1"), 220_000.0);
        match &priced[0].children()[0].children()[0] {
            PricedNode::Leaf {
                unit, volume, total, ..
            } => {
                assert_eq!(unit.as_deref(), Some("m3"));
                assert_eq!(*volume, Some(0.0));
                assert_eq!(*total, 0.0);
            }
            PricedNode::Group { .. } => panic!("expected leaf"),
        }
        assert_eq!(priced[0].total(), 0.0);
    }

    #[test]
    fn entered_estimate_value_wins_over_linked_analysis() {
        let tree = assignable_tree();
        let ctx = PricingContext::new(BuildingClass::B, 100.0);
        let (masters, resources) = linked_catalog();
        let mut assignments = Assignments::new();
        assignments.assign(&tree, "S.1.1", 7);

        let mut values = EstimateValues::new();
        values.set(
            "S.1.1",
            EstimateValue {
                volume: 5.0,
                unit: Some("m3".to_string()),
                unit_price: 300_000.0,
            },
        );

        let priced = project_estimate(&tree, &ctx, &values, &assignments, &masters, &resources);
        assert_eq!(leaf_price(&priced, "S.1.1"), 300_000.0);
        assert_eq!(priced[0].total(), 1_500_000.0);
    }

    #[test]
    fn estimate_grand_total_rounds_once_at_the_sum() {
        let tree = vec![
            WorkItem::leaf("S", "S", "S").with_children(vec![
                WorkItem::leaf("S.1", "a", "a"),
                WorkItem::leaf("S.2", "b", "b"),
            ]),
        ];
        let ctx = PricingContext::new(BuildingClass::B, 100.0);
        let mut values = EstimateValues::new();
        // Per-node totals 250.25 and 251.25 stay unrounded; only the grand
        // total (501.5) rounds, half away from zero.
        values.set(
            "S.1",
            EstimateValue {
                volume: 1.0,
                unit: None,
                unit_price: 250.25,
            },
        );
        values.set(
            "S.2",
            EstimateValue {
                volume: 1.0,
                unit: None,
                unit_price: 251.25,
            },
        );

        let priced = project_estimate(
            &tree,
            &ctx,
            &values,
            &Assignments::new(),
            &[],
            &[],
        );
        assert_eq!(priced[0].total(), 501.5);
        assert_eq!(total_project_cost_estimate(&priced), 502.0);
    }
}
