//! Window content - what a docked window displays
//!
//! The layout engine only knows a window's type and parameters. Content is
//! created from those through a [`WindowFactory`], usually a
//! [`ContentRegistry`] filled at startup.
//!
//! ## Available Content
//!
//! - **PlaceholderContent**: stand-in for window types with nothing to show yet
//! - **TreeWindow**: hosts a [`TreeModel`](crate::tree::TreeModel)

mod placeholder;
mod tree_window;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::layout::Parameters;
use crate::tree::TreeViewState;

pub use placeholder::PlaceholderContent;
pub use tree_window::TreeWindow;

/// The factory has no content for this window type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown window type: {0}")]
pub struct UnknownWindowType(pub String);

/// Creates live content for a window type
pub trait WindowFactory {
    type Content;

    fn create(
        &self,
        window_type: &str,
        parameters: &Parameters,
    ) -> Result<Self::Content, UnknownWindowType>;
}

impl<C, F> WindowFactory for F
where
    F: Fn(&str, &Parameters) -> Result<C, UnknownWindowType>,
{
    type Content = C;

    fn create(&self, window_type: &str, parameters: &Parameters) -> Result<C, UnknownWindowType> {
        self(window_type, parameters)
    }
}

/// Live content of one docked window
pub trait WindowContent: fmt::Debug {
    /// Title shown in the window's header
    fn title(&self) -> String;

    /// Tree views report expansion and selection so it can be persisted
    fn view_state(&self) -> Option<TreeViewState> {
        None
    }

    fn restore_view_state(&mut self, _state: &TreeViewState) {}
}

type Constructor = Box<dyn Fn(&Parameters) -> Box<dyn WindowContent>>;

/// Window types and how to build their content
#[derive(Default)]
pub struct ContentRegistry {
    constructors: HashMap<String, Constructor>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a placeholder for each of the given window types
    pub fn with_placeholders<'a>(window_types: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::new();
        for window_type in window_types {
            registry.register_placeholder(window_type);
        }
        registry
    }

    /// Register a constructor, replacing any earlier one for the same type
    pub fn register(
        &mut self,
        window_type: impl Into<String>,
        constructor: impl Fn(&Parameters) -> Box<dyn WindowContent> + 'static,
    ) {
        let window_type = window_type.into();
        if self
            .constructors
            .insert(window_type.clone(), Box::new(constructor))
            .is_some()
        {
            tracing::debug!(window_type = %window_type, "replaced window content constructor");
        }
    }

    pub fn register_placeholder(&mut self, window_type: &str) {
        let owned = window_type.to_string();
        self.register(window_type, move |parameters: &Parameters| -> Box<dyn WindowContent> {
            Box::new(PlaceholderContent::new(owned.clone(), parameters.clone()))
        });
    }

    pub fn contains(&self, window_type: &str) -> bool {
        self.constructors.contains_key(window_type)
    }

    /// Registered window types, sorted
    pub fn window_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl WindowFactory for ContentRegistry {
    type Content = Box<dyn WindowContent>;

    fn create(
        &self,
        window_type: &str,
        parameters: &Parameters,
    ) -> Result<Box<dyn WindowContent>, UnknownWindowType> {
        self.constructors
            .get(window_type)
            .map(|constructor| constructor(parameters))
            .ok_or_else(|| UnknownWindowType(window_type.to_string()))
    }
}

impl fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentRegistry")
            .field("window_types", &self.window_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_rejects_unknown_type() {
        let registry = ContentRegistry::with_placeholders(["console"]);
        assert!(registry.create("console", &Parameters::new()).is_ok());
        assert_eq!(
            registry.create("gpu-memory", &Parameters::new()).unwrap_err(),
            UnknownWindowType("gpu-memory".to_string())
        );
    }

    #[test]
    fn test_closures_are_factories() {
        let factory = |window_type: &str, _: &Parameters| {
            if window_type == "console" {
                Ok(1u8)
            } else {
                Err(UnknownWindowType(window_type.to_string()))
            }
        };
        assert_eq!(factory.create("console", &Parameters::new()), Ok(1));
    }
}
