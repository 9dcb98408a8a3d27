//! Multi-select technology filter state.

use crate::domain::TechFilter;

/// Holder of the technologies the user has selected.
///
/// Every mutation returns the new immutable snapshot, which is the change
/// notification consumed by the event handler. Tags are not validated
/// against the catalog; whatever the presentation layer sends is forwarded.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    selected: TechFilter,
}

impl FilterSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole selection.
    pub fn set_selected<I, S>(&mut self, tags: I) -> TechFilter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = TechFilter::from_tags(tags);
        tracing::trace!(selected = ?self.selected, "selection replaced");
        self.snapshot()
    }

    /// Adds the tag if absent, removes it otherwise.
    pub fn toggle(&mut self, tag: &str) -> TechFilter {
        if !self.selected.remove(tag) {
            self.selected.insert(tag.to_string());
        }
        tracing::trace!(tag = %tag, selected = ?self.selected, "selection toggled");
        self.snapshot()
    }

    #[must_use]
    pub fn snapshot(&self) -> TechFilter {
        self.selected.clone()
    }

    #[must_use]
    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected.contains(tag)
    }
}
