//! Binding of AHSP analyses to leaf work items.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::ahsp;
use crate::model::work_item::{depth_of, find_item};
use crate::model::{AhspMaster, Resource, WorkItem};

/// Items above this depth are structural groups and never accept an
/// assignment (roots at depth 0).
const ASSIGNABLE_MIN_DEPTH: usize = 2;

/// Leaf code → AHSP id bindings. At most one analysis per leaf; re-assigning
/// overwrites the prior binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignments(HashMap<String, u64>);

impl Assignments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an AHSP analysis to a leaf. Rejected as a no-op (`false`) when
    /// the code is unknown, addresses a group, or sits in the two top
    /// structural levels.
    pub fn assign(&mut self, forest: &[WorkItem], code: &str, ahsp_id: u64) -> bool {
        let assignable = find_item(forest, code).is_some_and(WorkItem::is_leaf)
            && depth_of(forest, code).is_some_and(|d| d >= ASSIGNABLE_MIN_DEPTH);
        if !assignable {
            return false;
        }
        self.0.insert(code.to_string(), ahsp_id);
        true
    }

    /// Clear the binding; the leaf's displayed price reverts to unset
    /// (`None`, distinct from zero).
    pub fn unassign(&mut self, code: &str) -> bool {
        self.0.remove(code).is_some()
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<u64> {
        self.0.get(code).copied()
    }

    /// Composite unit price and unit of the analysis linked to a leaf.
    /// `None` when the leaf is unassigned or the id no longer resolves.
    #[must_use]
    pub fn linked_price(
        &self,
        code: &str,
        masters: &[AhspMaster],
        resources: &[Resource],
    ) -> Option<(f64, String)> {
        let id = self.get(code)?;
        let master = masters.iter().find(|m| m.id == id)?;
        let breakdown = ahsp::compose(master, resources);
        Some((breakdown.total, master.unit.clone()))
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
