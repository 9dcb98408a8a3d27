//! Static catalog of selectable technologies.
//!
//! The catalog backs the multi-select picker. It is configuration, not
//! search state: the coordinator never consults it. Its only behavior is
//! narrowing the visible entries as the user types into the picker.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Technologies offered when no catalog is configured.
pub const DEFAULT_TECHS: [&str; 6] = ["ReactJS", "React Native", "VueJS", "PHP", "Angular", "Python"];

/// One selectable technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Tag sent to the API.
    pub id: String,
    /// Label shown in the picker.
    pub name: String,
}

/// Ordered list of selectable technologies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechCatalog {
    items: Vec<CatalogItem>,
}

impl Default for TechCatalog {
    fn default() -> Self {
        Self::from_names(DEFAULT_TECHS)
    }
}

impl TechCatalog {
    /// Builds a catalog whose ids and labels coincide.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| CatalogItem {
                id: name.clone(),
                name,
            })
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Returns the items whose label fuzzy-matches every whitespace token of
    /// `query`, best match first. An empty query returns the full catalog in
    /// declaration order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return self.items.iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize, &CatalogItem)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let label = item.name.to_lowercase();
                tokens
                    .iter()
                    .map(|token| matcher.fuzzy_match(&label, token))
                    .sum::<Option<i64>>()
                    .map(|score| (score, position, item))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, item)| item).collect()
    }
}
