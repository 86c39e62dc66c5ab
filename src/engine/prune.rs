//! Read-side depth truncation of priced trees.

use crate::model::PricedNode;

/// Truncate a priced forest so no node sits deeper than `max_depth` (roots
/// at depth 0). Pruned-away children are dropped, not summarized onto the
/// retained node: a retained group keeps only the total it already carried
/// from the full projection. The input is never mutated; the result shares
/// no state with it.
#[must_use]
pub fn prune(nodes: &[PricedNode], max_depth: usize) -> Vec<PricedNode> {
    nodes.iter().map(|node| prune_node(node, max_depth)).collect()
}

fn prune_node(node: &PricedNode, remaining: usize) -> PricedNode {
    match node {
        PricedNode::Leaf { .. } => node.clone(),
        PricedNode::Group {
            code,
            name_en,
            name_id,
            total,
            children,
        } => {
            let children = if remaining == 0 {
                Vec::new()
            } else {
                children
                    .iter()
                    .map(|child| prune_node(child, remaining - 1))
                    .collect()
            };
            PricedNode::Group {
                code: code.clone(),
                name_en: name_en.clone(),
                name_id: name_id.clone(),
                total: *total,
                children,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(code: &str, total: f64) -> PricedNode {
        PricedNode::Leaf {
            code: code.to_string(),
            name_en: code.to_string(),
            name_id: code.to_string(),
            unit: None,
            unit_price: total,
            volume: None,
            total,
        }
    }

    fn group(code: &str, total: f64, children: Vec<PricedNode>) -> PricedNode {
        PricedNode::Group {
            code: code.to_string(),
            name_en: code.to_string(),
            name_id: code.to_string(),
            total,
            children,
        }
    }

    fn four_level_tree() -> Vec<PricedNode> {
        vec![group(
            "S",
            100.0,
            vec![group(
                "S.1",
                100.0,
                vec![group(
                    "S.1.1",
                    100.0,
                    vec![leaf("S.1.1.1", 60.0), leaf("S.1.1.2", 40.0)],
                )],
            )],
        )]
    }

    fn max_depth(nodes: &[PricedNode]) -> usize {
        nodes
            .iter()
            .map(|n| {
                if n.children().is_empty() {
                    0
                } else {
                    1 + max_depth(n.children())
                }
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn prune_caps_depth_and_keeps_carried_totals() {
        let tree = four_level_tree();
        let pruned = prune(&tree, 1);

        assert_eq!(max_depth(&pruned), 1);
        // The cut node keeps the total the full projection computed; no
        // aggregate is synthesized from the dropped children.
        assert_eq!(pruned[0].total(), 100.0);
        assert_eq!(pruned[0].children()[0].total(), 100.0);
        assert!(pruned[0].children()[0].children().is_empty());
    }

    #[test]
    fn prune_to_zero_keeps_only_roots() {
        let pruned = prune(&four_level_tree(), 0);
        assert_eq!(pruned.len(), 1);
        assert!(pruned[0].children().is_empty());
    }

    #[test]
    fn prune_does_not_mutate_the_input() {
        let tree = four_level_tree();
        let _ = prune(&tree, 0);
        assert_eq!(max_depth(&tree), 3);
    }

    #[test]
    fn deep_enough_limit_is_identity() {
        let tree = four_level_tree();
        assert_eq!(prune(&tree, 10), tree);
    }
}
