//! Visible-subset computation over a fetched catalog.
//!
//! A product is shown when it passes both predicates:
//! the gender selector (`all` passes everything) and the name search
//! (case-insensitive substring; an empty query passes everything).
//! Filtering never reorders the catalog.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Gender, Product};

/// Three-way gender selector shown in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderFilter {
    #[default]
    All,
    Men,
    Women,
}

impl GenderFilter {
    /// Selector options in menu order.
    pub const OPTIONS: [Self; 3] = [Self::All, Self::Men, Self::Women];

    /// Parse a query-string value. Unknown values select `All`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Gender::parse(value).map_or(Self::All, Self::from)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Men => "men",
            Self::Women => "women",
        }
    }

    /// Whether a product with `gender` passes this selector.
    #[must_use]
    pub fn admits(self, gender: Option<Gender>) -> bool {
        match self {
            Self::All => true,
            Self::Men => gender == Some(Gender::Men),
            Self::Women => gender == Some(Gender::Women),
        }
    }
}

impl From<Gender> for GenderFilter {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Men => Self::Men,
            Gender::Women => Self::Women,
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search criteria applied to every listing page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    query: String,
    gender: GenderFilter,
}

impl CatalogFilter {
    /// Build a filter. A whitespace-only query means "no query"; any other
    /// query is matched as typed, surrounding spaces included.
    #[must_use]
    pub fn new(query: &str, gender: GenderFilter) -> Self {
        Self {
            query: query.to_owned(),
            gender,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn gender(&self) -> GenderFilter {
        self.gender
    }

    /// True when neither predicate restricts anything.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        !self.has_query() && self.gender == GenderFilter::All
    }

    fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Single-product predicate. Prefer [`CatalogFilter::apply`] for lists,
    /// which lowercases the query once.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with(product, &self.query.to_lowercase())
    }

    fn matches_with(&self, product: &Product, needle: &str) -> bool {
        self.gender.admits(product.gender)
            && (!self.has_query() || product.name.to_lowercase().contains(needle))
    }

    /// The visible subset of `catalog`, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.query.to_lowercase();
        catalog
            .iter()
            .filter(|p| self.matches_with(p, &needle))
            .collect()
    }
}
