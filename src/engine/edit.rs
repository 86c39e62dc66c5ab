//! Interactive tree mutation primitives.
//!
//! Every primitive preserves the structural invariants: fixed discipline
//! roots (S, A, M) are never altered, moved or removed; after any
//! insert/remove/reorder beneath a parent, that parent's children are
//! renumbered sequentially as `parentCode.1..N`; root-level items are never
//! renumbered. Invalid requests are rejected as no-ops (`false`), never
//! panics or partial mutations.

use crate::model::{WorkItem, FIXED_ROOT_CODES};

fn is_fixed_root(code: &str) -> bool {
    FIXED_ROOT_CODES.contains(&code)
}

fn find_mut<'a>(items: &'a mut [WorkItem], code: &str) -> Option<&'a mut WorkItem> {
    for item in items {
        if item.code() == code {
            return Some(item);
        }
        if let WorkItem::Group { children, .. } = item {
            if let Some(found) = find_mut(children, code) {
                return Some(found);
            }
        }
    }
    None
}

/// Locate the sibling list holding `code`. Returns the parent code (`None`
/// at root level), the containing vector and the node's index within it.
fn locate<'a>(
    items: &'a mut Vec<WorkItem>,
    code: &str,
    parent: Option<&str>,
) -> Option<(Option<String>, &'a mut Vec<WorkItem>, usize)> {
    if let Some(idx) = items.iter().position(|i| i.code() == code) {
        return Some((parent.map(str::to_string), items, idx));
    }
    for item in items.iter_mut() {
        let item_code = item.code().to_string();
        if let WorkItem::Group { children, .. } = item {
            if let Some(found) = locate(children, code, Some(&item_code)) {
                return Some(found);
            }
        }
    }
    None
}

fn renumber(item: &mut WorkItem, new_code: String) {
    item.set_code(new_code.clone());
    if let WorkItem::Group { children, .. } = item {
        for (i, child) in children.iter_mut().enumerate() {
            renumber(child, format!("{}.{}", new_code, i + 1));
        }
    }
}

fn renumber_children(parent_code: &str, children: &mut [WorkItem]) {
    for (i, child) in children.iter_mut().enumerate() {
        renumber(child, format!("{}.{}", parent_code, i + 1));
    }
}

/// Insert a new leaf as the last child of `parent_code`. A leaf parent is
/// converted to a group; its unit and price move to the aggregation level
/// below and are dropped from the node itself.
pub fn insert_child(
    forest: &mut Vec<WorkItem>,
    parent_code: &str,
    name_en: &str,
    name_id: &str,
) -> bool {
    let Some(node) = find_mut(forest, parent_code) else {
        return false;
    };

    if node.is_leaf() {
        let old = std::mem::replace(node, WorkItem::group("", "", ""));
        *node = old.with_children(Vec::new());
    }

    if let WorkItem::Group { code, children, .. } = node {
        let parent = code.clone();
        children.push(WorkItem::leaf("", name_en, name_id));
        renumber_children(&parent, children);
        return true;
    }
    false
}

/// Insert a new leaf directly above `sibling_code`. Root-level insertion is
/// rejected: root codes are fixed or manually assigned, never generated by
/// renumbering (use [`append_other_discipline`] for new disciplines).
///
/// [`append_other_discipline`]: crate::engine::derive::append_other_discipline
pub fn insert_sibling_above(
    forest: &mut Vec<WorkItem>,
    sibling_code: &str,
    name_en: &str,
    name_id: &str,
) -> bool {
    insert_sibling(forest, sibling_code, name_en, name_id, 0)
}

/// Insert a new leaf directly below `sibling_code`. Same root-level rules as
/// [`insert_sibling_above`].
pub fn insert_sibling_below(
    forest: &mut Vec<WorkItem>,
    sibling_code: &str,
    name_en: &str,
    name_id: &str,
) -> bool {
    insert_sibling(forest, sibling_code, name_en, name_id, 1)
}

fn insert_sibling(
    forest: &mut Vec<WorkItem>,
    sibling_code: &str,
    name_en: &str,
    name_id: &str,
    offset: usize,
) -> bool {
    let Some((parent, siblings, idx)) = locate(forest, sibling_code, None) else {
        return false;
    };
    let Some(parent_code) = parent else {
        return false;
    };

    siblings.insert(idx + offset, WorkItem::leaf("", name_en, name_id));
    renumber_children(&parent_code, siblings);
    true
}

/// Remove the node with the given code and its subtree. Fixed roots are
/// never removed. Removing a non-root renumbers the remaining siblings;
/// removing a non-fixed root leaves the other root codes untouched.
pub fn remove(forest: &mut Vec<WorkItem>, code: &str) -> bool {
    if is_fixed_root(code) {
        return false;
    }
    let Some((parent, siblings, idx)) = locate(forest, code, None) else {
        return false;
    };

    siblings.remove(idx);
    if let Some(parent_code) = parent {
        renumber_children(&parent_code, siblings);
    }
    true
}

/// Move a node one position up among its siblings.
pub fn move_up(forest: &mut Vec<WorkItem>, code: &str) -> bool {
    reorder(forest, code, -1)
}

/// Move a node one position down among its siblings.
pub fn move_down(forest: &mut Vec<WorkItem>, code: &str) -> bool {
    reorder(forest, code, 1)
}

fn reorder(forest: &mut Vec<WorkItem>, code: &str, direction: isize) -> bool {
    let Some((parent, siblings, idx)) = locate(forest, code, None) else {
        return false;
    };

    let target = idx as isize + direction;
    if target < 0 || target as usize >= siblings.len() {
        return false;
    }
    let target = target as usize;

    // Root level: fixed roots never move, and nothing moves through them.
    if parent.is_none()
        && (is_fixed_root(siblings[idx].code()) || is_fixed_root(siblings[target].code()))
    {
        return false;
    }

    siblings.swap(idx, target);
    if let Some(parent_code) = parent {
        renumber_children(&parent_code, siblings);
    }
    true
}

/// Rename a node's dual-language label. Fixed roots are never renamed.
pub fn rename(forest: &mut [WorkItem], code: &str, name_en: &str, name_id: &str) -> bool {
    if is_fixed_root(code) {
        return false;
    }
    let Some(node) = find_mut(forest, code) else {
        return false;
    };
    node.set_names(name_en.to_string(), name_id.to_string());
    true
}
