use serde::Serialize;

/// A node in a priced RAB tree, produced by the projection engine.
///
/// Mirrors the source [`WorkItem`](super::WorkItem) shape but carries computed
/// money values. Group totals are bottom-up sums of their children; they are
/// recomputed on every projection, never cached on the source tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricedNode {
    Group {
        code: String,
        name_en: String,
        name_id: String,
        total: f64,
        children: Vec<PricedNode>,
    },
    Leaf {
        code: String,
        name_en: String,
        name_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        unit_price: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        volume: Option<f64>,
        total: f64,
    },
}

impl PricedNode {
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
    pub fn total(&self) -> f64 {
        match self {
            Self::Group { total, .. } | Self::Leaf { total, .. } => *total,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Children of this node; empty slice for a leaf.
    #[must_use]
    pub fn children(&self) -> &[PricedNode] {
        match self {
            Self::Group { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }
}

/// Find a priced node by code anywhere in a forest.
#[must_use]
pub fn find_priced<'a>(nodes: &'a [PricedNode], code: &str) -> Option<&'a PricedNode> {
    for node in nodes {
        if node.code() == code {
            return Some(node);
        }
        if let Some(found) = find_priced(node.children(), code) {
            return Some(found);
        }
    }
    None
}
