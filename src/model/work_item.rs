use serde::{Deserialize, Serialize};

/// Discipline root codes that are fixed by the Ballpark template.
/// These roots are never renamed, renumbered or moved.
pub const FIXED_ROOT_CODES: &[&str] = &["S", "A", "M"];

/// A node in a WBS tree. A tree is a forest of `WorkItem` roots.
///
/// Codes are hierarchical dotted identifiers: every non-root code is
/// `<parentCode>.<positionIndex>` (1-based). Root codes come from the fixed
/// discipline alphabet (S/A/M plus addons) or are caller-assigned for "Other"
/// disciplines, and are never renumbered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkItem {
    /// Structural grouping node. Carries no intrinsic price; totals are
    /// always computed by summing descendant leaves.
    Group {
        code: String,
        name_en: String,
        name_id: String,
        children: Vec<WorkItem>,
    },
    /// Priced work item. `volume` is populated at Detail level only.
    Leaf {
        code: String,
        name_en: String,
        name_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit_price: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        volume: Option<f64>,
    },
}

impl WorkItem {
    #[must_use]
    pub fn group(code: impl Into<String>, name_en: impl Into<String>, name_id: impl Into<String>) -> Self {
        Self::Group {
            code: code.into(),
            name_en: name_en.into(),
            name_id: name_id.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn leaf(code: impl Into<String>, name_en: impl Into<String>, name_id: impl Into<String>) -> Self {
        Self::Leaf {
            code: code.into(),
            name_en: name_en.into(),
            name_id: name_id.into(),
            unit: None,
            unit_price: None,
            volume: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        if let Self::Leaf { unit: u, .. } = &mut self {
            *u = Some(unit.into());
        }
        self
    }

    #[must_use]
    pub fn with_unit_price(mut self, price: f64) -> Self {
        if let Self::Leaf { unit_price, .. } = &mut self {
            *unit_price = Some(price);
        }
        self
    }

    #[must_use]
    pub fn with_volume(mut self, vol: f64) -> Self {
        if let Self::Leaf { volume, .. } = &mut self {
            *volume = Some(vol);
        }
        self
    }

    #[must_use]
    pub fn with_children(self, children: Vec<WorkItem>) -> Self {
        match self {
            Self::Group {
                code,
                name_en,
                name_id,
                ..
            }
            | Self::Leaf {
                code,
                name_en,
                name_id,
                ..
            } => Self::Group {
                code,
                name_en,
                name_id,
                children,
            },
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Group { code, .. } | Self::Leaf { code, .. } => code,
        }
    }

    #[must_use]
    pub fn name_en(&self) -> &str {
        match self {
            Self::Group { name_en, .. } | Self::Leaf { name_en, .. } => name_en,
        }
    }

    #[must_use]
    pub fn name_id(&self) -> &str {
        match self {
            Self::Group { name_id, .. } | Self::Leaf { name_id, .. } => name_id,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Children of this node; empty slice for a leaf.
    #[must_use]
    pub fn children(&self) -> &[WorkItem] {
        match self {
            Self::Group { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }

    pub(crate) fn set_code(&mut self, new_code: String) {
        match self {
            Self::Group { code, .. } | Self::Leaf { code, .. } => *code = new_code,
        }
    }

    pub(crate) fn set_names(&mut self, en: String, id: String) {
        match self {
            Self::Group {
                name_en, name_id, ..
            }
            | Self::Leaf {
                name_en, name_id, ..
            } => {
                *name_en = en;
                *name_id = id;
            }
        }
    }

    /// Number of nodes in this subtree, including self.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(WorkItem::node_count).sum::<usize>()
    }
}

/// Find a node by code anywhere in a forest.
#[must_use]
pub fn find_item<'a>(forest: &'a [WorkItem], code: &str) -> Option<&'a WorkItem> {
    for item in forest {
        if item.code() == code {
            return Some(item);
        }
        if let Some(found) = find_item(item.children(), code) {
            return Some(found);
        }
    }
    None
}

/// Depth of the node with the given code (roots at depth 0).
#[must_use]
pub fn depth_of(forest: &[WorkItem], code: &str) -> Option<usize> {
    for item in forest {
        if item.code() == code {
            return Some(0);
        }
        if let Some(d) = depth_of(item.children(), code) {
            return Some(d + 1);
        }
    }
    None
}

/// Total number of nodes in a forest.
#[must_use]
pub fn forest_node_count(forest: &[WorkItem]) -> usize {
    forest.iter().map(WorkItem::node_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_forest() -> Vec<WorkItem> {
        vec![
            WorkItem::group("S", "Structure", "Struktur").with_children(vec![
                WorkItem::leaf("S.1", "Foundation", "Pondasi").with_unit("m2"),
                WorkItem::group("S.2", "Upper structure", "Struktur atas").with_children(vec![
                    WorkItem::leaf("S.2.1", "Columns", "Kolom"),
                ]),
            ]),
            WorkItem::leaf("A", "Architecture", "Arsitektur"),
        ]
    }

    #[test]
    fn find_item_descends_into_children() {
        let forest = sample_forest();
        assert_eq!(find_item(&forest, "S.2.1").map(WorkItem::name_en), Some("Columns"));
        assert_eq!(find_item(&forest, "S.9"), None);
    }

    #[test]
    fn depth_counts_from_root() {
        let forest = sample_forest();
        assert_eq!(depth_of(&forest, "S"), Some(0));
        assert_eq!(depth_of(&forest, "S.1"), Some(1));
        assert_eq!(depth_of(&forest, "S.2.1"), Some(2));
        assert_eq!(depth_of(&forest, "X"), None);
    }

    #[test]
    fn leaf_has_no_children() {
        let leaf = WorkItem::leaf("A", "Architecture", "Arsitektur");
        assert!(leaf.is_leaf());
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn with_children_converts_leaf_to_group() {
        let item = WorkItem::leaf("S.1", "Foundation", "Pondasi")
            .with_children(vec![WorkItem::leaf("S.1.1", "Piles", "Tiang pancang")]);
        assert!(!item.is_leaf());
        assert_eq!(item.children().len(), 1);
    }
}
