//! Arena-backed tree model
//!
//! Nodes live in slots of a `Vec`; parent and child links are handles into
//! that arena. Removing a node frees its whole subtree and bumps each slot's
//! generation so outstanding handles stop resolving.

use std::collections::HashMap;
use std::fmt;

use super::registry::{NodeContext, TypeDefinition, TypeRegistry};
use super::view_state::TreeViewState;
use super::{NodeHandle, TreeChange, TreeError, TreeEvent, TreeItem};
use crate::notify::{ChangeNotifier, Subscription};

/// A stored item with its structural links
#[derive(Debug, Clone)]
pub struct TreeItemNode<T: TreeItem> {
    pub kind: T::Kind,
    pub item: T,
    pub children: Vec<NodeHandle>,
    pub expanded: bool,
    /// Lookup only; ownership runs parent to child
    pub parent: Option<NodeHandle>,
}

/// Text derived for one node at render time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub handle: NodeHandle,
    pub depth: usize,
    pub label: String,
    pub tooltip: Option<String>,
    pub class_name: Option<String>,
    pub expanded: bool,
    pub has_children: bool,
}

struct Slot<T: TreeItem> {
    generation: u32,
    node: Option<TreeItemNode<T>>,
}

pub struct TreeModel<T: TreeItem> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    roots: Vec<NodeHandle>,
    registry: TypeRegistry<T>,
    selected: Option<NodeHandle>,
    version: u64,
    notifier: ChangeNotifier<TreeEvent>,
}

impl<T: TreeItem> Default for TreeModel<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            roots: Vec::new(),
            registry: TypeRegistry::new(),
            selected: None,
            version: 0,
            notifier: ChangeNotifier::new(),
        }
    }
}

impl<T: TreeItem> fmt::Debug for TreeModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeModel")
            .field("len", &self.len())
            .field("roots", &self.roots)
            .field("registry", &self.registry)
            .field("selected", &self.selected)
            .field("version", &self.version)
            .finish()
    }
}

impl<T: TreeItem> TreeModel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Type registration
    // =========================================================================

    /// Register how items of `kind` are presented. A later registration for
    /// the same kind replaces the earlier one.
    pub fn register_type(&mut self, kind: T::Kind, definition: TypeDefinition<T>) {
        if self.registry.register(kind.clone(), definition) {
            tracing::debug!(kind = ?kind, "replaced tree type definition");
        }
        self.notify(TreeChange::Presentation);
    }

    pub fn registry(&self) -> &TypeRegistry<T> {
        &self.registry
    }

    fn ensure_registered(&self, kind: &T::Kind) -> Result<(), TreeError> {
        if self.registry.contains(kind) {
            Ok(())
        } else {
            Err(TreeError::UnknownType(format!("{:?}", kind)))
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Add `item` as the last child of `parent`, or as a top-level item
    pub fn add_item(&mut self, item: T, parent: Option<NodeHandle>) -> Result<NodeHandle, TreeError> {
        let kind = item.kind();
        self.ensure_registered(&kind)?;
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(stale(parent));
            }
        }

        let handle = self.allocate(TreeItemNode {
            kind,
            item,
            children: Vec::new(),
            expanded: false,
            parent,
        });
        match parent.and_then(|p| self.node_mut(p)) {
            Some(parent_node) => parent_node.children.push(handle),
            None => self.roots.push(handle),
        }

        self.notify(TreeChange::Structural);
        Ok(handle)
    }

    /// Add `item` under the node at `parent_path` (child indices from the top
    /// level), or as a top-level item when no path is given
    pub fn add_item_at(
        &mut self,
        item: T,
        parent_path: Option<&[usize]>,
    ) -> Result<NodeHandle, TreeError> {
        self.ensure_registered(&item.kind())?;
        let parent = match parent_path {
            Some(path) => Some(
                self.resolve_path(path)
                    .ok_or_else(|| TreeError::InvalidPath(format!("{:?}", path)))?,
            ),
            None => None,
        };
        self.add_item(item, parent)
    }

    /// Detach a node and discard its whole subtree, returning the node's item
    pub fn remove_item(&mut self, handle: NodeHandle) -> Result<T, TreeError> {
        let parent = self.node(handle).ok_or_else(|| stale(handle))?.parent;
        match parent.and_then(|p| self.node_mut(p)) {
            Some(parent_node) => parent_node.children.retain(|&child| child != handle),
            None => self.roots.retain(|&root| root != handle),
        }

        let mut removed = None;
        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index) else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
            if self.selected == Some(current) {
                self.selected = None;
            }
            stack.extend(node.children);
            if current == handle {
                removed = Some(node.item);
            }
        }

        self.notify(TreeChange::Structural);
        removed.ok_or_else(|| stale(handle))
    }

    /// Swap the item stored at `handle`, returning the previous one
    pub fn replace_item(&mut self, handle: NodeHandle, item: T) -> Result<T, TreeError> {
        let kind = item.kind();
        self.ensure_registered(&kind)?;
        let node = self.node_mut(handle).ok_or_else(|| stale(handle))?;
        node.kind = kind;
        let previous = std::mem::replace(&mut node.item, item);
        self.notify(TreeChange::Presentation);
        Ok(previous)
    }

    fn allocate(&mut self, node: TreeItemNode<T>) -> NodeHandle {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.node = Some(node);
                return NodeHandle {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeHandle {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    // =========================================================================
    // Presentation state
    // =========================================================================

    pub fn set_expanded(&mut self, handle: NodeHandle, expanded: bool) -> Result<(), TreeError> {
        let node = self.node_mut(handle).ok_or_else(|| stale(handle))?;
        if node.expanded != expanded {
            node.expanded = expanded;
            self.notify(TreeChange::Presentation);
        }
        Ok(())
    }

    /// Flip expansion, returning the new state
    pub fn toggle_expanded(&mut self, handle: NodeHandle) -> Result<bool, TreeError> {
        let expanded = !self.node(handle).ok_or_else(|| stale(handle))?.expanded;
        self.set_expanded(handle, expanded)?;
        Ok(expanded)
    }

    pub fn select(&mut self, handle: Option<NodeHandle>) -> Result<(), TreeError> {
        if let Some(handle) = handle {
            if !self.contains(handle) {
                return Err(stale(handle));
            }
        }
        if self.selected != handle {
            self.selected = handle;
            self.notify(TreeChange::Presentation);
        }
        Ok(())
    }

    pub fn selected(&self) -> Option<NodeHandle> {
        self.selected
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.node(handle).is_some()
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&TreeItemNode<T>> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut TreeItemNode<T>> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.node.as_mut()
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.node(handle).map(|node| &node.item)
    }

    pub fn is_expanded(&self, handle: NodeHandle) -> bool {
        self.node(handle).is_some_and(|node| node.expanded)
    }

    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    /// Children of `parent`, or the top-level items for `None`
    pub fn children(&self, parent: Option<NodeHandle>) -> &[NodeHandle] {
        match parent {
            None => &self.roots,
            Some(handle) => self
                .node(handle)
                .map(|node| node.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Resolve child indices from the top level to a node
    pub fn resolve_path(&self, path: &[usize]) -> Option<NodeHandle> {
        let (&first, rest) = path.split_first()?;
        let mut handle = *self.roots.get(first)?;
        for &index in rest {
            handle = *self.node(handle)?.children.get(index)?;
        }
        Some(handle)
    }

    /// Child indices from the top level down to `handle`
    pub fn path_of(&self, handle: NodeHandle) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = handle;
        loop {
            let node = self.node(current)?;
            let siblings = match node.parent {
                Some(parent) => &self.node(parent)?.children,
                None => &self.roots,
            };
            path.push(siblings.iter().position(|&h| h == current)?);
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }

    fn depth(&self, handle: NodeHandle) -> usize {
        let mut depth = 0;
        let mut current = self.node(handle).and_then(|node| node.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).and_then(|node| node.parent);
        }
        depth
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Derive label, tooltip and class for one node using the current
    /// definition of its kind
    pub fn render_node(&self, handle: NodeHandle) -> Option<RenderedItem> {
        let node = self.node(handle)?;
        self.render_with(handle, node, self.depth(handle))
    }

    /// Rows of the tree as displayed: top-level items and the children of
    /// expanded nodes, depth first
    pub fn visible_rows(&self) -> Vec<RenderedItem> {
        let mut rows = Vec::new();
        self.collect_visible(&self.roots, 0, &mut rows);
        rows
    }

    fn collect_visible(&self, handles: &[NodeHandle], depth: usize, rows: &mut Vec<RenderedItem>) {
        for &handle in handles {
            let Some(node) = self.node(handle) else {
                continue;
            };
            if let Some(row) = self.render_with(handle, node, depth) {
                rows.push(row);
            }
            if node.expanded {
                self.collect_visible(&node.children, depth + 1, rows);
            }
        }
    }

    fn render_with(
        &self,
        handle: NodeHandle,
        node: &TreeItemNode<T>,
        depth: usize,
    ) -> Option<RenderedItem> {
        let definition = self.registry.get(&node.kind)?;
        let context = context_for(node, depth);
        Some(RenderedItem {
            handle,
            depth,
            label: definition.label(&context, &node.item),
            tooltip: definition.tooltip(&context, &node.item),
            class_name: definition.class_name(&context, &node.item),
            expanded: node.expanded,
            has_children: !node.children.is_empty(),
        })
    }

    // =========================================================================
    // View state
    // =========================================================================

    /// Expansion and selection by key path
    pub fn save_view_state(&self) -> TreeViewState {
        let mut state = TreeViewState::default();
        let selected = self.selected;
        self.walk_keyed(&self.roots, 0, &mut Vec::new(), &mut |handle, node, path| {
            if node.expanded {
                state.expanded.push(path.to_vec());
            }
            if selected == Some(handle) {
                state.selected = Some(path.to_vec());
            }
        });
        state
    }

    /// Expand and select the nodes named by `state`.
    ///
    /// Key paths that no longer resolve are ignored. Nodes not listed keep
    /// their current expansion. Returns how many entries were applied.
    pub fn restore_view_state(&mut self, state: &TreeViewState) -> usize {
        let mut by_path: HashMap<Vec<String>, NodeHandle> = HashMap::new();
        self.walk_keyed(&self.roots, 0, &mut Vec::new(), &mut |handle, _, path| {
            by_path.entry(path.to_vec()).or_insert(handle);
        });

        let mut applied = 0;
        let mut changed = false;
        for path in &state.expanded {
            let Some(node) = by_path.get(path).and_then(|&h| self.node_mut(h)) else {
                continue;
            };
            changed |= !node.expanded;
            node.expanded = true;
            applied += 1;
        }
        if let Some(&handle) = state.selected.as_ref().and_then(|path| by_path.get(path)) {
            changed |= self.selected != Some(handle);
            self.selected = Some(handle);
            applied += 1;
        }

        if changed {
            self.notify(TreeChange::Presentation);
        }
        applied
    }

    fn walk_keyed(
        &self,
        handles: &[NodeHandle],
        depth: usize,
        prefix: &mut Vec<String>,
        visit: &mut impl FnMut(NodeHandle, &TreeItemNode<T>, &[String]),
    ) {
        for &handle in handles {
            let Some(node) = self.node(handle) else {
                continue;
            };
            let context = context_for(node, depth);
            let key = match self.registry.get(&node.kind) {
                Some(definition) => definition.key(&context, &node.item),
                None => format!("{:?}", node.kind),
            };
            prefix.push(key);
            visit(handle, node, prefix);
            self.walk_keyed(&node.children, depth + 1, prefix, visit);
            prefix.pop();
        }
    }

    // =========================================================================
    // Notification
    // =========================================================================

    pub fn subscribe(&mut self) -> Subscription<TreeEvent> {
        self.notifier.subscribe()
    }

    fn notify(&mut self, change: TreeChange) {
        self.version += 1;
        self.notifier.emit(TreeEvent {
            version: self.version,
            change,
        });
    }
}

fn context_for<T: TreeItem>(node: &TreeItemNode<T>, depth: usize) -> NodeContext {
    NodeContext {
        depth,
        expanded: node.expanded,
        child_count: node.children.len(),
    }
}

fn stale(handle: NodeHandle) -> TreeError {
    TreeError::InvalidPath(format!("stale handle {}", handle))
}
