//! Size allocation for split containers
//!
//! Turns a container's thickness and its children's weights and minimums into
//! integer extents. Everything here is pure.

use std::cmp::Ordering;

use super::node::{LayoutNode, Rect, SplitDirection};

/// Allocate `available` pixels between children.
///
/// Each child first receives its minimum. The remaining slack is shared in
/// proportion to the weights and rounded by largest remainder, so the extents
/// sum exactly to `available` whenever it covers the minimums. When it does not,
/// every child gets exactly its minimum and the total overflows.
pub fn allocate(available: u32, weights: &[f64], minimums: &[u32]) -> Vec<u32> {
    debug_assert_eq!(weights.len(), minimums.len());
    if weights.is_empty() {
        return Vec::new();
    }

    let min_total: u64 = minimums.iter().map(|&m| m as u64).sum();
    if (available as u64) <= min_total {
        if (available as u64) < min_total {
            tracing::trace!(
                available,
                min_total,
                "minimums exceed available thickness, overflowing"
            );
        }
        return minimums.to_vec();
    }

    let slack = available - min_total as u32;
    minimums
        .iter()
        .zip(proportional_shares(slack, weights))
        .map(|(min, share)| min + share)
        .collect()
}

/// Split `slack` proportionally to `weights` using largest remainder
fn proportional_shares(slack: u32, weights: &[f64]) -> Vec<u32> {
    let count = weights.len();
    let sanitized: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect();
    let total: f64 = sanitized.iter().sum();

    let exact: Vec<f64> = if total > 0.0 {
        sanitized
            .iter()
            .map(|w| slack as f64 * (w / total))
            .collect()
    } else {
        vec![slack as f64 / count as f64; count]
    };

    let mut shares: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();
    let assigned: u64 = shares.iter().map(|&s| s as u64).sum();

    // Order by descending fractional part, lower index first on ties
    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by(|&a, &b| {
        let frac_a = exact[a] - exact[a].floor();
        let frac_b = exact[b] - exact[b].floor();
        frac_b
            .partial_cmp(&frac_a)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    if assigned <= slack as u64 {
        let remainder = (slack as u64 - assigned) as usize;
        for &i in order.iter().take(remainder.min(count)) {
            shares[i] += 1;
        }
    } else {
        // Float error pushed a floor over an integer boundary; take it back
        // from the smallest fractional parts.
        let excess = (assigned - slack as u64) as usize;
        let victims: Vec<usize> = order
            .iter()
            .rev()
            .copied()
            .filter(|&i| shares[i] > 0)
            .take(excess)
            .collect();
        for i in victims {
            shares[i] -= 1;
        }
    }

    shares
}

/// Lay consecutive child rects along `direction` using the given extents
pub fn split_rect(rect: Rect, direction: SplitDirection, extents: &[u32]) -> Vec<Rect> {
    let mut offset: u32 = 0;
    extents
        .iter()
        .map(|&extent| {
            let child = match direction {
                SplitDirection::Horizontal => Rect::new(
                    rect.x.saturating_add(offset),
                    rect.y,
                    extent,
                    rect.height,
                ),
                SplitDirection::Vertical => Rect::new(
                    rect.x,
                    rect.y.saturating_add(offset),
                    rect.width,
                    extent,
                ),
            };
            offset = offset.saturating_add(extent);
            child
        })
        .collect()
}

/// Minimum thickness of a subtree along `direction`.
///
/// Same-direction children stack, so their minimums add up; cross-direction
/// children sit side by side, so the largest one wins.
pub fn min_extent(node: &LayoutNode, direction: SplitDirection, leaf_min: u32) -> u32 {
    match node {
        LayoutNode::Leaf(_) => leaf_min,
        LayoutNode::Split(split) => {
            let child_mins = split
                .children
                .iter()
                .map(|child| min_extent(child, direction, leaf_min));
            if split.direction == direction {
                child_mins.fold(0u32, |acc, m| acc.saturating_add(m))
            } else {
                child_mins.max().unwrap_or(0)
            }
        }
    }
}
