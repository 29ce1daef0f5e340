//! Placeholder content for window types without a real implementation

use super::WindowContent;
use crate::layout::Parameters;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderContent {
    pub window_type: String,
    pub parameters: Parameters,
}

impl PlaceholderContent {
    pub fn new(window_type: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            window_type: window_type.into(),
            parameters,
        }
    }

    pub fn message(&self) -> String {
        format!("{} coming soon...", self.title())
    }
}

impl WindowContent for PlaceholderContent {
    /// `"host-explorer"` becomes `"Host Explorer"`
    fn title(&self) -> String {
        self.window_type
            .split(['-', '_'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_window_type() {
        let content = PlaceholderContent::new("host-explorer", Parameters::new());
        assert_eq!(content.title(), "Host Explorer");
        assert_eq!(content.message(), "Host Explorer coming soon...");
    }
}
