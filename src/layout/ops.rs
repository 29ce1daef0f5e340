//! Layout tree edits
//!
//! Pure functions over owned trees. The engine runs them on a copy of its root
//! and commits the result only when they succeed.

use super::error::LayoutError;
use super::node::{InsertPosition, LayoutNode, SplitContainer, SplitDirection, WindowId};

/// Insert `new_node` relative to the whole tree
pub fn insert_at_root(
    root: Option<LayoutNode>,
    new_node: LayoutNode,
    direction: SplitDirection,
    position: InsertPosition,
) -> LayoutNode {
    match root {
        None => new_node,
        Some(LayoutNode::Split(mut split)) if split.direction == direction => {
            // The newcomer gets an equal share; everyone else shrinks to make room
            let count = split.children.len() as f64;
            let share = split.weight_sum() / (count + 1.0);
            for weight in &mut split.weights {
                *weight *= count / (count + 1.0);
            }
            let index = match position {
                InsertPosition::Before => 0,
                InsertPosition::After => split.children.len(),
            };
            split.children.insert(index, new_node);
            split.weights.insert(index, share);
            LayoutNode::Split(split)
        }
        Some(existing) => wrap(existing, new_node, direction, position),
    }
}

/// Insert `new_node` next to the node at `target`.
///
/// A same-direction parent receives the new node as a sibling and the target's
/// weight is halved between the two. Otherwise the target is wrapped in place
/// into a new split. Returns `None` if `target` does not resolve.
pub fn insert_adjacent(
    mut root: LayoutNode,
    target: &[usize],
    new_node: LayoutNode,
    direction: SplitDirection,
    position: InsertPosition,
) -> Option<LayoutNode> {
    if let Some((&index, parent_path)) = target.split_last() {
        let LayoutNode::Split(parent) = root.get_mut(parent_path)? else {
            return None;
        };
        if index >= parent.children.len() {
            return None;
        }
        if parent.direction == direction {
            let share = parent.weights[index] / 2.0;
            parent.weights[index] = share;
            let at = match position {
                InsertPosition::Before => index,
                InsertPosition::After => index + 1,
            };
            parent.children.insert(at, new_node);
            parent.weights.insert(at, share);
            return Some(root);
        }
    }

    replace_at(root, target, |existing| {
        wrap(existing, new_node, direction, position)
    })
}

/// Two-child split holding `existing` and `new_node` with equal weights
pub fn wrap(
    existing: LayoutNode,
    new_node: LayoutNode,
    direction: SplitDirection,
    position: InsertPosition,
) -> LayoutNode {
    let children = match position {
        InsertPosition::Before => vec![new_node, existing],
        InsertPosition::After => vec![existing, new_node],
    };
    LayoutNode::Split(SplitContainer::new(direction, children, vec![1.0, 1.0]))
}

/// Replace the node at `path` with `f(node)`
fn replace_at(
    root: LayoutNode,
    path: &[usize],
    f: impl FnOnce(LayoutNode) -> LayoutNode,
) -> Option<LayoutNode> {
    let Some((&first, rest)) = path.split_first() else {
        return Some(f(root));
    };
    let LayoutNode::Split(mut split) = root else {
        return None;
    };
    if first >= split.children.len() {
        return None;
    }
    let child = split.children.remove(first);
    let replaced = replace_at(child, rest, f)?;
    split.children.insert(first, replaced);
    Some(LayoutNode::Split(split))
}

/// Remove the node at `path`.
///
/// Returns the remaining tree (`None` once nothing is left) together with the
/// removed node. Surviving siblings are rescaled to the pre-removal weight total
/// and a split left with a single child is replaced by that child.
pub fn remove_at(root: LayoutNode, path: &[usize]) -> Option<(Option<LayoutNode>, LayoutNode)> {
    let Some((&first, rest)) = path.split_first() else {
        return Some((None, root));
    };
    let LayoutNode::Split(mut split) = root else {
        return None;
    };
    if first >= split.children.len() {
        return None;
    }

    let total = split.weight_sum();
    let child = split.children.remove(first);
    let weight = split.weights.remove(first);
    let (remaining, removed) = remove_at(child, rest)?;

    match remaining {
        Some(node) => {
            split.children.insert(first, node);
            split.weights.insert(first, weight);
        }
        None => rescale(&mut split.weights, total),
    }

    Some((collapse(split), removed))
}

/// Replace singleton splits by their child; empty splits vanish
pub fn collapse(mut split: SplitContainer) -> Option<LayoutNode> {
    match split.children.len() {
        0 => None,
        1 => split.children.pop(),
        _ => Some(LayoutNode::Split(split)),
    }
}

/// Collapse singleton splits anywhere in the tree
pub fn normalize(node: LayoutNode) -> Option<LayoutNode> {
    match node {
        LayoutNode::Leaf(_) => Some(node),
        LayoutNode::Split(split) => {
            let total = split.weight_sum();
            let mut children = Vec::with_capacity(split.children.len());
            let mut weights = Vec::with_capacity(split.weights.len());
            for (child, weight) in split.children.into_iter().zip(split.weights) {
                if let Some(child) = normalize(child) {
                    children.push(child);
                    weights.push(weight);
                }
            }
            rescale(&mut weights, total);
            let mut normalized = SplitContainer::new(split.direction, children, weights);
            normalized.total_thickness = split.total_thickness;
            collapse(normalized)
        }
    }
}

/// Scale weights so they sum to `target`
pub fn rescale(weights: &mut [f64], target: f64) {
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 && target > 0.0 {
        let factor = target / sum;
        for weight in weights.iter_mut() {
            *weight *= factor;
        }
    }
}

/// Give the window at `path` weight `new_weight`, scaling its siblings so the
/// split's total is unchanged
pub fn set_weight(
    root: &mut LayoutNode,
    path: &[usize],
    window_id: &WindowId,
    new_weight: f64,
) -> Result<(), LayoutError> {
    if !new_weight.is_finite() || new_weight <= 0.0 {
        return Err(LayoutError::InvalidThickness(new_weight));
    }
    let Some((&index, parent_path)) = path.split_last() else {
        return Err(LayoutError::NotResizable(window_id.clone()));
    };
    let Some(LayoutNode::Split(parent)) = root.get_mut(parent_path) else {
        return Err(LayoutError::WindowNotFound(window_id.clone()));
    };
    if index >= parent.weights.len() {
        return Err(LayoutError::WindowNotFound(window_id.clone()));
    }

    let total = parent.weight_sum();
    if new_weight >= total {
        return Err(LayoutError::InvalidThickness(new_weight));
    }

    let siblings = total - parent.weights[index];
    let remaining = total - new_weight;
    for (i, weight) in parent.weights.iter_mut().enumerate() {
        if i == index {
            *weight = new_weight;
        } else if siblings > 0.0 {
            *weight *= remaining / siblings;
        }
    }
    Ok(())
}

/// Move `delta` weight from child `index + 1` to child `index` of the split at
/// `split_path`. Returns `false` if the path or index does not resolve.
pub fn transfer_weight(
    root: &mut LayoutNode,
    split_path: &[usize],
    index: usize,
    delta: f64,
) -> Result<bool, LayoutError> {
    let Some(LayoutNode::Split(split)) = root.get_mut(split_path) else {
        return Ok(false);
    };
    if index + 1 >= split.weights.len() {
        return Ok(false);
    }
    let first = split.weights[index] + delta;
    let second = split.weights[index + 1] - delta;
    if !first.is_finite() || first <= 0.0 {
        return Err(LayoutError::InvalidThickness(first));
    }
    if !second.is_finite() || second <= 0.0 {
        return Err(LayoutError::InvalidThickness(second));
    }
    split.weights[index] = first;
    split.weights[index + 1] = second;
    Ok(true)
}
