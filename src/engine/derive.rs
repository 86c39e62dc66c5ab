//! WBS tree derivation across the three abstraction levels:
//! Ballpark → Estimates → Detail.
//!
//! Every derivation builds a fresh tree; nodes are never shared by reference
//! between levels.

use crate::catalog::seed::{
    self, DeltaRow, DetailRow, SeedDiscipline, FIXED_DISCIPLINES, INTERIOR_ADDON, LANDSCAPE_ADDON,
};
use crate::model::{BuildingClass, WorkItem};

/// Build the fixed Ballpark seed forest.
///
/// S/A/M occupy positions 0–2, in that order, always. Addon disciplines
/// (Interior, Landscape) insert immediately after the SAM/addon block. Leaf
/// base prices are selected by building class from the seed table.
#[must_use]
pub fn seed_ballpark(
    class: BuildingClass,
    include_interior: bool,
    include_landscape: bool,
) -> Vec<WorkItem> {
    let mut forest: Vec<WorkItem> = FIXED_DISCIPLINES
        .iter()
        .map(|d| build_discipline(d, class))
        .collect();

    if include_interior {
        forest.push(build_discipline(&INTERIOR_ADDON, class));
    }
    if include_landscape {
        forest.push(build_discipline(&LANDSCAPE_ADDON, class));
    }

    forest
}

/// Append an "Other" discipline root with a caller-assigned code.
/// Rejected (no-op, returns `false`) when the code collides with an existing
/// root.
pub fn append_other_discipline(
    forest: &mut Vec<WorkItem>,
    code: &str,
    name_en: &str,
    name_id: &str,
) -> bool {
    if code.is_empty() || forest.iter().any(|r| r.code() == code) {
        return false;
    }
    forest.push(WorkItem::group(code, name_en, name_id));
    true
}

fn build_discipline(discipline: &SeedDiscipline, class: BuildingClass) -> WorkItem {
    let (code, name_en, name_id, rows) = discipline;
    let children = rows
        .iter()
        .map(|(leaf_code, en, id, unit, prices)| {
            WorkItem::leaf(*leaf_code, *en, *id)
                .with_unit(*unit)
                .with_unit_price(prices[class.price_index()])
        })
        .collect();
    WorkItem::group(*code, *name_en, *name_id).with_children(children)
}

/// Derive the Estimates tree: one additional depth level beneath each
/// Ballpark leaf, from the per-discipline delta table.
///
/// Fill-only and idempotent: when `current` is already populated it is
/// returned verbatim and no derivation runs.
#[must_use]
pub fn derive_estimates(
    current: &[WorkItem],
    ballpark: &[WorkItem],
    deltas: &[DeltaRow],
) -> Vec<WorkItem> {
    if !current.is_empty() {
        return current.to_vec();
    }

    ballpark
        .iter()
        .map(|root| extend_with_deltas(root, deltas))
        .collect()
}

fn extend_with_deltas(item: &WorkItem, deltas: &[DeltaRow]) -> WorkItem {
    if item.is_leaf() {
        let rows = seed::estimate_delta_for(deltas, item.code());
        if rows.is_empty() {
            return item.clone();
        }
        let children = rows
            .iter()
            .enumerate()
            .map(|(i, (en, id, unit))| {
                WorkItem::leaf(format!("{}.{}", item.code(), i + 1), *en, *id).with_unit(*unit)
            })
            .collect();
        return item.clone().with_children(children);
    }

    let children = item
        .children()
        .iter()
        .map(|child| extend_with_deltas(child, deltas))
        .collect();
    item.clone().with_children(children)
}

/// Derive the Detail tree: each Estimates leaf gains one or two levels
/// (L4/L5) from the per-discipline extension rule.
///
/// New deep leaves default to `unit_price = 0` and `volume = 0`; detail
/// derivation never fabricates a nonzero price.
#[must_use]
pub fn derive_detail(estimates: &[WorkItem]) -> Vec<WorkItem> {
    estimates
        .iter()
        .map(|root| {
            let rule = seed::detail_extension_for(root.code());
            extend_with_detail(root, rule)
        })
        .collect()
}

fn extend_with_detail(item: &WorkItem, rule: &[DetailRow]) -> WorkItem {
    if item.is_leaf() {
        let children = rule
            .iter()
            .enumerate()
            .map(|(i, row)| build_detail_node(item.code(), i, row))
            .collect();
        return item.clone().with_children(children);
    }

    let children = item
        .children()
        .iter()
        .map(|child| extend_with_detail(child, rule))
        .collect();
    item.clone().with_children(children)
}

fn build_detail_node(parent_code: &str, index: usize, row: &DetailRow) -> WorkItem {
    let (en, id, unit, sub_rows) = row;
    let code = format!("{}.{}", parent_code, index + 1);

    if sub_rows.is_empty() {
        return WorkItem::leaf(code, *en, *id)
            .with_unit(*unit)
            .with_unit_price(0.0)
            .with_volume(0.0);
    }

    let children = sub_rows
        .iter()
        .enumerate()
        .map(|(j, (sub_en, sub_id, sub_unit))| {
            WorkItem::leaf(format!("{}.{}", code, j + 1), *sub_en, *sub_id)
                .with_unit(*sub_unit)
                .with_unit_price(0.0)
                .with_volume(0.0)
        })
        .collect();
    WorkItem::group(code, *en, *id).with_children(children)
}
