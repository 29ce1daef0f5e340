//! Docking engine - owns the layout tree and every mutation of it
//!
//! Mutations are computed on a copy of the tree and committed in one step:
//! the root is replaced, the window index rebuilt, the version bumped, sizes
//! re-allocated and a snapshot broadcast to subscribers.

use std::collections::HashMap;
use std::sync::Arc;

use super::allocator::{allocate, min_extent, split_rect};
use super::error::LayoutError;
use super::node::{
    next_window_id, InsertPosition, Leaf, LayoutNode, Parameters, Rect, SplitDirection, WindowId,
};
use super::ops;
use crate::notify::{ChangeNotifier, Subscription, Versioned};

/// Width of splitter hit areas in pixels
pub const SPLITTER_WIDTH: u32 = 6;

/// Smallest extent a window is squeezed to before splits overflow
pub const DEFAULT_MIN_EXTENT: u32 = 80;

/// A draggable bar between two children of a split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterBar {
    /// Direction of the split this bar belongs to
    pub direction: SplitDirection,
    /// Hit-testing rectangle, centred on the boundary
    pub rect: Rect,
    /// Path from the root to the split
    pub split_path: Vec<usize>,
    /// The bar sits between child `index` and `index + 1`
    pub index: usize,
}

/// Immutable view of the layout handed to subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub version: u64,
    pub root: Option<LayoutNode>,
    pub viewport: Rect,
    pub rects: Vec<(WindowId, Rect)>,
    pub splitters: Vec<SplitterBar>,
}

impl Versioned for LayoutSnapshot {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Sizing options for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub viewport: Rect,
    pub min_extent: u32,
    pub splitter_width: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            viewport: Rect::new(0, 0, 1280, 800),
            min_extent: DEFAULT_MIN_EXTENT,
            splitter_width: SPLITTER_WIDTH,
        }
    }
}

/// Owns the layout tree
#[derive(Debug)]
pub struct DockingEngine {
    root: Option<LayoutNode>,
    window_index: HashMap<WindowId, Vec<usize>>,
    version: u64,
    options: EngineOptions,
    rects: HashMap<WindowId, Rect>,
    splitters: Vec<SplitterBar>,
    next_window_number: u64,
    notifier: ChangeNotifier<Arc<LayoutSnapshot>>,
}

impl Default for DockingEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl DockingEngine {
    /// Create an empty engine
    pub fn new(options: EngineOptions) -> Self {
        Self {
            root: None,
            window_index: HashMap::new(),
            version: 0,
            options,
            rects: HashMap::new(),
            splitters: Vec::new(),
            next_window_number: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn root(&self) -> Option<&LayoutNode> {
        self.root.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn viewport(&self) -> Rect {
        self.options.viewport
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, window_id: &WindowId) -> bool {
        self.window_index.contains_key(window_id)
    }

    pub fn window_count(&self) -> usize {
        self.window_index.len()
    }

    /// Window ids in depth-first order
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.root
            .as_ref()
            .map(|root| root.leaves().into_iter().map(|l| l.window_id.clone()).collect())
            .unwrap_or_default()
    }

    /// Path from the root to a window
    pub fn path_of(&self, window_id: &WindowId) -> Option<&[usize]> {
        self.window_index.get(window_id).map(Vec::as_slice)
    }

    pub fn leaf(&self, window_id: &WindowId) -> Option<&Leaf> {
        let path = self.window_index.get(window_id)?;
        self.root.as_ref()?.get(path)?.as_leaf()
    }

    /// Rect assigned to a window by the last allocation
    pub fn window_rect(&self, window_id: &WindowId) -> Option<Rect> {
        self.rects.get(window_id).copied()
    }

    pub fn splitters(&self) -> &[SplitterBar] {
        &self.splitters
    }

    /// Find the window at a given point (for mouse clicks)
    pub fn window_at_point(&self, x: u32, y: u32) -> Option<WindowId> {
        self.rects
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| id.clone())
    }

    /// Find the splitter bar at a given point (for drag handling)
    pub fn splitter_at_point(&self, x: u32, y: u32) -> Option<usize> {
        self.splitters
            .iter()
            .position(|splitter| splitter.rect.contains(x, y))
    }

    /// Current state as an immutable snapshot
    pub fn snapshot(&self) -> Arc<LayoutSnapshot> {
        let mut rects: Vec<(WindowId, Rect)> = self
            .window_ids()
            .into_iter()
            .filter_map(|id| self.rects.get(&id).map(|rect| (id.clone(), *rect)))
            .collect();
        rects.shrink_to_fit();
        Arc::new(LayoutSnapshot {
            version: self.version,
            root: self.root.clone(),
            viewport: self.options.viewport,
            rects,
            splitters: self.splitters.clone(),
        })
    }

    /// Subscribe to layout snapshots, one per committed mutation
    pub fn subscribe(&mut self) -> Subscription<Arc<LayoutSnapshot>> {
        self.notifier.subscribe()
    }

    pub fn notifier_mut(&mut self) -> &mut ChangeNotifier<Arc<LayoutSnapshot>> {
        &mut self.notifier
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a window next to `target`, or at the root when `target` is `None`
    pub fn add_window(
        &mut self,
        target: Option<&WindowId>,
        window_type: &str,
        parameters: Parameters,
        direction: SplitDirection,
        position: InsertPosition,
    ) -> Result<WindowId, LayoutError> {
        let target_path = match target {
            Some(id) => Some(
                self.window_index
                    .get(id)
                    .cloned()
                    .ok_or_else(|| LayoutError::WindowNotFound(id.clone()))?,
            ),
            None => None,
        };

        let mut counter = self.next_window_number;
        let window_id = next_window_id(window_type, &mut counter, |id| {
            self.window_index.contains_key(id)
        });
        let new_node = LayoutNode::leaf(window_id.clone(), window_type, parameters);

        let new_root = match (target_path, self.root.clone()) {
            (Some(path), Some(root)) => ops::insert_adjacent(root, &path, new_node, direction, position)
                .ok_or_else(|| stale_index(target))?,
            (Some(_), None) => return Err(stale_index(target)),
            (None, root) => ops::insert_at_root(root, new_node, direction, position),
        };

        self.next_window_number = counter;
        tracing::debug!(
            window = %window_id,
            window_type,
            direction = direction.as_str(),
            target = ?target,
            "adding window"
        );
        self.commit(Some(new_root));
        Ok(window_id)
    }

    /// Remove a window, collapsing any split it leaves with a single child
    pub fn close_window(&mut self, window_id: &WindowId) -> Result<Leaf, LayoutError> {
        let (remaining, removed) = self.removed_tree(window_id)?;
        let LayoutNode::Leaf(leaf) = removed else {
            return Err(stale_index(Some(window_id)));
        };
        tracing::debug!(window = %window_id, "closing window");
        self.commit(remaining);
        Ok(leaf)
    }

    /// Set a window's weight, scaling its siblings so the split total is kept
    pub fn resize(&mut self, window_id: &WindowId, new_weight: f64) -> Result<(), LayoutError> {
        let path = self
            .window_index
            .get(window_id)
            .cloned()
            .ok_or_else(|| LayoutError::WindowNotFound(window_id.clone()))?;
        let mut root = self
            .root
            .clone()
            .ok_or_else(|| LayoutError::WindowNotFound(window_id.clone()))?;

        ops::set_weight(&mut root, &path, window_id, new_weight)?;
        tracing::debug!(window = %window_id, new_weight, "resizing window");
        self.commit(Some(root));
        Ok(())
    }

    /// Move a window next to another one in a single commit
    pub fn move_window(
        &mut self,
        window_id: &WindowId,
        target: &WindowId,
        direction: SplitDirection,
        position: InsertPosition,
    ) -> Result<(), LayoutError> {
        if window_id == target {
            return Err(LayoutError::MoveOntoSelf(window_id.clone()));
        }
        if !self.window_index.contains_key(target) {
            return Err(LayoutError::WindowNotFound(target.clone()));
        }

        let (remaining, removed) = self.removed_tree(window_id)?;
        // The target is still present since it differs from the removed window
        let remaining = remaining.ok_or_else(|| stale_index(Some(target)))?;
        let target_path = remaining
            .find_path(target)
            .ok_or_else(|| stale_index(Some(target)))?;
        let new_root = ops::insert_adjacent(remaining, &target_path, removed, direction, position)
            .ok_or_else(|| stale_index(Some(target)))?;

        tracing::debug!(window = %window_id, target = %target, "moving window");
        self.commit(Some(new_root));
        Ok(())
    }

    /// Drag a splitter bar by `delta` pixels along its split's direction
    pub fn drag_splitter(&mut self, index: usize, delta: i32) -> Result<(), LayoutError> {
        let bar = self
            .splitters
            .get(index)
            .cloned()
            .ok_or(LayoutError::SplitterNotFound(index))?;
        let mut root = self
            .root
            .clone()
            .ok_or(LayoutError::SplitterNotFound(index))?;

        let Some(split) = root.get(&bar.split_path).and_then(|n| n.as_split()) else {
            return Err(LayoutError::SplitterNotFound(index));
        };
        if split.total_thickness == 0 {
            return Err(LayoutError::InvalidThickness(0.0));
        }
        let weight_delta = split.weight_sum() * delta as f64 / split.total_thickness as f64;

        if !ops::transfer_weight(&mut root, &bar.split_path, bar.index, weight_delta)? {
            return Err(LayoutError::SplitterNotFound(index));
        }
        self.commit(Some(root));
        Ok(())
    }

    /// Change the viewport and re-allocate
    pub fn set_viewport(&mut self, viewport: Rect) {
        if self.options.viewport == viewport {
            return;
        }
        self.options.viewport = viewport;
        let root = self.root.take();
        self.commit(root);
    }

    /// Replace the whole tree with a restored one
    pub fn attach(&mut self, root: Option<LayoutNode>) -> Result<(), LayoutError> {
        if let Some(duplicate) = root.as_ref().and_then(|r| r.duplicate_window_id()) {
            return Err(LayoutError::DuplicateWindowId(duplicate));
        }
        let root = root.and_then(ops::normalize);
        tracing::debug!(
            windows = root.as_ref().map(|r| r.leaf_count()).unwrap_or(0),
            "attaching layout"
        );
        self.commit(root);
        Ok(())
    }

    /// Drop every window
    pub fn reset(&mut self) {
        self.commit(None);
    }

    // =========================================================================
    // Commit and allocation
    // =========================================================================

    /// Compute the tree left after removing `window_id`, without committing
    fn removed_tree(
        &self,
        window_id: &WindowId,
    ) -> Result<(Option<LayoutNode>, LayoutNode), LayoutError> {
        let path = self
            .window_index
            .get(window_id)
            .ok_or_else(|| LayoutError::WindowNotFound(window_id.clone()))?;
        let root = self
            .root
            .clone()
            .ok_or_else(|| LayoutError::WindowNotFound(window_id.clone()))?;
        ops::remove_at(root, path).ok_or_else(|| stale_index(Some(window_id)))
    }

    fn commit(&mut self, root: Option<LayoutNode>) {
        self.root = root;
        self.reindex();
        self.version += 1;
        self.relayout();
        self.notifier.emit(self.snapshot());
    }

    fn reindex(&mut self) {
        self.window_index.clear();
        if let Some(root) = &self.root {
            let index = &mut self.window_index;
            root.visit_leaves(&mut |leaf, path| {
                index.insert(leaf.window_id.clone(), path.to_vec());
            });
        }
    }

    fn relayout(&mut self) {
        self.rects.clear();
        self.splitters.clear();
        let viewport = self.options.viewport;
        let min_extent = self.options.min_extent;
        let splitter_width = self.options.splitter_width;
        if let Some(root) = self.root.as_mut() {
            let mut path = Vec::new();
            layout_node(
                root,
                viewport,
                &mut path,
                min_extent,
                splitter_width,
                &mut self.rects,
                &mut self.splitters,
            );
        }
    }
}

/// The index pointed at a path that no longer resolves
fn stale_index(window_id: Option<&WindowId>) -> LayoutError {
    let id = window_id.cloned().unwrap_or_else(|| WindowId::new(""));
    tracing::error!(window = %id, "window index out of sync with layout tree");
    LayoutError::WindowNotFound(id)
}

/// Recursively allocate rects for a node
fn layout_node(
    node: &mut LayoutNode,
    rect: Rect,
    path: &mut Vec<usize>,
    min_extent_px: u32,
    splitter_width: u32,
    rects: &mut HashMap<WindowId, Rect>,
    splitters: &mut Vec<SplitterBar>,
) {
    match node {
        LayoutNode::Leaf(leaf) => {
            rects.insert(leaf.window_id.clone(), rect);
        }
        LayoutNode::Split(split) => {
            let direction = split.direction;
            let thickness = rect.thickness(direction);
            split.total_thickness = thickness;

            let minimums: Vec<u32> = split
                .children
                .iter()
                .map(|child| min_extent(child, direction, min_extent_px))
                .collect();
            let extents = allocate(thickness, &split.weights, &minimums);
            let child_rects = split_rect(rect, direction, &extents);
            let last = split.children.len().saturating_sub(1);

            for (i, (child, child_rect)) in split.children.iter_mut().zip(child_rects).enumerate() {
                // Add splitter bar between children (not after last child)
                if i < last {
                    splitters.push(splitter_after(child_rect, direction, splitter_width, path, i));
                }
                path.push(i);
                layout_node(
                    child,
                    child_rect,
                    path,
                    min_extent_px,
                    splitter_width,
                    rects,
                    splitters,
                );
                path.pop();
            }
        }
    }
}

fn splitter_after(
    child: Rect,
    direction: SplitDirection,
    width: u32,
    split_path: &[usize],
    index: usize,
) -> SplitterBar {
    let half = width / 2;
    let rect = match direction {
        SplitDirection::Horizontal => Rect::new(
            (child.x + child.width).saturating_sub(half),
            child.y,
            width,
            child.height,
        ),
        SplitDirection::Vertical => Rect::new(
            child.x,
            (child.y + child.height).saturating_sub(half),
            child.width,
            width,
        ),
    };
    SplitterBar {
        direction,
        rect,
        split_path: split_path.to_vec(),
        index,
    }
}
