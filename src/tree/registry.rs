//! Per-kind behaviour registered by tree consumers

use std::collections::HashMap;
use std::fmt;

use super::TreeItem;

/// Description of the rendered element a provider is asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeContext {
    /// Zero for top-level items
    pub depth: usize,
    pub expanded: bool,
    pub child_count: usize,
}

pub type Provider<T> = Box<dyn Fn(&NodeContext, &T) -> String>;

/// Behaviour for one item kind
pub struct TypeDefinition<T> {
    label: Provider<T>,
    tooltip: Option<Provider<T>>,
    class_name: Option<Provider<T>>,
    key: Option<Provider<T>>,
}

impl<T> TypeDefinition<T> {
    pub fn new(label: impl Fn(&NodeContext, &T) -> String + 'static) -> Self {
        Self {
            label: Box::new(label),
            tooltip: None,
            class_name: None,
            key: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Fn(&NodeContext, &T) -> String + 'static) -> Self {
        self.tooltip = Some(Box::new(tooltip));
        self
    }

    pub fn with_class_name(
        mut self,
        class_name: impl Fn(&NodeContext, &T) -> String + 'static,
    ) -> Self {
        self.class_name = Some(Box::new(class_name));
        self
    }

    /// Stable key used when saving expansion and selection.
    /// Without one the label is used.
    pub fn with_key(mut self, key: impl Fn(&NodeContext, &T) -> String + 'static) -> Self {
        self.key = Some(Box::new(key));
        self
    }

    pub fn label(&self, context: &NodeContext, item: &T) -> String {
        (self.label)(context, item)
    }

    pub fn tooltip(&self, context: &NodeContext, item: &T) -> Option<String> {
        self.tooltip.as_ref().map(|provider| provider(context, item))
    }

    pub fn class_name(&self, context: &NodeContext, item: &T) -> Option<String> {
        self.class_name.as_ref().map(|provider| provider(context, item))
    }

    pub fn key(&self, context: &NodeContext, item: &T) -> String {
        match &self.key {
            Some(provider) => provider(context, item),
            None => self.label(context, item),
        }
    }
}

impl<T> fmt::Debug for TypeDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("tooltip", &self.tooltip.is_some())
            .field("class_name", &self.class_name.is_some())
            .field("key", &self.key.is_some())
            .finish_non_exhaustive()
    }
}

/// Mapping from item kind to its definition
pub struct TypeRegistry<T: TreeItem> {
    definitions: HashMap<T::Kind, TypeDefinition<T>>,
}

impl<T: TreeItem> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }
}

impl<T: TreeItem> TypeRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any earlier one for the same kind.
    /// Returns true if one was replaced.
    pub fn register(&mut self, kind: T::Kind, definition: TypeDefinition<T>) -> bool {
        self.definitions.insert(kind, definition).is_some()
    }

    pub fn get(&self, kind: &T::Kind) -> Option<&TypeDefinition<T>> {
        self.definitions.get(kind)
    }

    pub fn contains(&self, kind: &T::Kind) -> bool {
        self.definitions.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<T: TreeItem> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.definitions.keys()).finish()
    }
}
