//! Layout tree - leaf windows and split containers
//!
//! A workspace is a tree whose leaves are windows and whose inner nodes split
//! their space between ordered children along one direction.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque per-window parameters, handed to the content factory untouched
pub type Parameters = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a window within one layout tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Generate the next free `"{window_type}-{n}"` id.
///
/// `counter` is advanced past every candidate it tries, so repeated calls never
/// hand out the same id twice even if the caller forgets to mark it taken.
pub fn next_window_id(
    window_type: &str,
    counter: &mut u64,
    is_taken: impl Fn(&WindowId) -> bool,
) -> WindowId {
    loop {
        *counter += 1;
        let candidate = WindowId(format!("{}-{}", window_type, counter));
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

// ============================================================================
// Layout Primitives
// ============================================================================

/// Direction in which a split lays out its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children arranged left-to-right
    Horizontal,
    /// Children arranged top-to-bottom
    Vertical,
}

impl SplitDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitDirection::Horizontal => "horizontal",
            SplitDirection::Vertical => "vertical",
        }
    }
}

/// Where a new window goes relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    #[default]
    After,
}

/// Integer pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && (px as u64) < self.x as u64 + self.width as u64
            && py >= self.y
            && (py as u64) < self.y as u64 + self.height as u64
    }

    /// Extent along the axis a split of `direction` divides
    pub fn thickness(&self, direction: SplitDirection) -> u32 {
        match direction {
            SplitDirection::Horizontal => self.width,
            SplitDirection::Vertical => self.height,
        }
    }
}

// ============================================================================
// Layout Tree
// ============================================================================

/// A single window in the layout
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub window_id: WindowId,
    pub window_type: String,
    pub parameters: Parameters,
}

/// A container that splits space between children
#[derive(Debug, Clone, PartialEq)]
pub struct SplitContainer {
    pub direction: SplitDirection,
    pub children: Vec<LayoutNode>,
    /// Relative weights, one per child
    pub weights: Vec<f64>,
    /// Thickness assigned by the last allocation pass
    pub total_thickness: u32,
}

impl SplitContainer {
    pub fn new(direction: SplitDirection, children: Vec<LayoutNode>, weights: Vec<f64>) -> Self {
        debug_assert_eq!(children.len(), weights.len());
        Self {
            direction,
            children,
            weights,
            total_thickness: 0,
        }
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// A node in the layout tree - either a window or a split container
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Leaf(Leaf),
    Split(SplitContainer),
}

impl LayoutNode {
    pub fn leaf(
        window_id: WindowId,
        window_type: impl Into<String>,
        parameters: Parameters,
    ) -> Self {
        LayoutNode::Leaf(Leaf {
            window_id,
            window_type: window_type.into(),
            parameters,
        })
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            LayoutNode::Leaf(leaf) => Some(leaf),
            LayoutNode::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitContainer> {
        match self {
            LayoutNode::Leaf(_) => None,
            LayoutNode::Split(split) => Some(split),
        }
    }

    /// Resolve a child-index path from this node
    pub fn get(&self, path: &[usize]) -> Option<&LayoutNode> {
        let mut node = self;
        for &index in path {
            node = match node {
                LayoutNode::Split(split) => split.children.get(index)?,
                LayoutNode::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    /// Resolve a child-index path from this node, mutably
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut LayoutNode> {
        let mut node = self;
        for &index in path {
            node = match node {
                LayoutNode::Split(split) => split.children.get_mut(index)?,
                LayoutNode::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    /// Visit every leaf depth-first, with its path from this node
    pub fn visit_leaves(&self, f: &mut impl FnMut(&Leaf, &[usize])) {
        let mut path = Vec::new();
        self.visit_leaves_inner(&mut path, f);
    }

    fn visit_leaves_inner(&self, path: &mut Vec<usize>, f: &mut impl FnMut(&Leaf, &[usize])) {
        match self {
            LayoutNode::Leaf(leaf) => f(leaf, path),
            LayoutNode::Split(split) => {
                for (i, child) in split.children.iter().enumerate() {
                    path.push(i);
                    child.visit_leaves_inner(path, f);
                    path.pop();
                }
            }
        }
    }

    /// All leaves in depth-first order
    pub fn leaves(&self) -> Vec<&Leaf> {
        match self {
            LayoutNode::Leaf(leaf) => vec![leaf],
            LayoutNode::Split(split) => split.children.iter().flat_map(|c| c.leaves()).collect(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            LayoutNode::Leaf(_) => 1,
            LayoutNode::Split(split) => split.children.iter().map(|c| c.leaf_count()).sum(),
        }
    }

    /// Path from this node to the leaf holding `window_id`
    pub fn find_path(&self, window_id: &WindowId) -> Option<Vec<usize>> {
        let mut found = None;
        self.visit_leaves(&mut |leaf, path| {
            if found.is_none() && &leaf.window_id == window_id {
                found = Some(path.to_vec());
            }
        });
        found
    }

    /// First window id that occurs more than once, if any
    pub fn duplicate_window_id(&self) -> Option<WindowId> {
        let mut seen = HashSet::new();
        let mut duplicate = None;
        self.visit_leaves(&mut |leaf, _| {
            if duplicate.is_none() && !seen.insert(leaf.window_id.clone()) {
                duplicate = Some(leaf.window_id.clone());
            }
        });
        duplicate
    }

    /// True when every split has at least two children and one weight per child
    pub fn is_normalized(&self) -> bool {
        match self {
            LayoutNode::Leaf(_) => true,
            LayoutNode::Split(split) => {
                split.children.len() >= 2
                    && split.children.len() == split.weights.len()
                    && split.children.iter().all(|c| c.is_normalized())
            }
        }
    }

    /// Structural equality ignoring window ids and cached thickness.
    ///
    /// Weights are compared after scaling each split to unit sum, within `tolerance`.
    pub fn is_isomorphic(&self, other: &LayoutNode, tolerance: f64) -> bool {
        match (self, other) {
            (LayoutNode::Leaf(a), LayoutNode::Leaf(b)) => {
                a.window_type == b.window_type && a.parameters == b.parameters
            }
            (LayoutNode::Split(a), LayoutNode::Split(b)) => {
                if a.direction != b.direction
                    || a.children.len() != b.children.len()
                    || a.weights.len() != b.weights.len()
                {
                    return false;
                }
                let (sum_a, sum_b) = (a.weight_sum(), b.weight_sum());
                let weights_match = a
                    .weights
                    .iter()
                    .zip(&b.weights)
                    .all(|(wa, wb)| (wa / sum_a - wb / sum_b).abs() <= tolerance);
                weights_match
                    && a
                        .children
                        .iter()
                        .zip(&b.children)
                        .all(|(ca, cb)| ca.is_isomorphic(cb, tolerance))
            }
            _ => false,
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize, weight: Option<f64>) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let weight = weight.map(|w| format!(" [{:.3}]", w)).unwrap_or_default();
        match self {
            LayoutNode::Leaf(leaf) => {
                writeln!(f, "{}{} ({}){}", indent, leaf.window_id, leaf.window_type, weight)
            }
            LayoutNode::Split(split) => {
                writeln!(f, "{}split {}{}", indent, split.direction.as_str(), weight)?;
                for (child, w) in split.children.iter().zip(&split.weights) {
                    child.write_outline(f, depth + 1, Some(*w))?;
                }
                Ok(())
            }
        }
    }
}

/// Indented outline, one node per line
impl fmt::Display for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0, None)
    }
}
