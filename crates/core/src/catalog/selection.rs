//! The selection set: products the visitor intends to order.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Ordered set of selected product ids.
///
/// Each id appears at most once. Insertion order is preserved so the order
/// request lists products in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct Selection {
    ids: Vec<ProductId>,
}

impl Selection {
    /// An empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Return a new selection with `id` removed if present, appended otherwise.
    #[must_use]
    pub fn toggle(&self, id: &ProductId) -> Self {
        let mut ids = self.ids.clone();
        if let Some(pos) = ids.iter().position(|x| x == id) {
            ids.remove(pos);
        } else {
            ids.push(id.clone());
        }
        Self { ids }
    }

    /// Add `id` if it is not selected yet. Returns whether it was added.
    pub fn insert(&mut self, id: ProductId) -> bool {
        if self.contains(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Ids as the plain strings the order endpoint expects.
    #[must_use]
    pub fn to_product_ids(&self) -> Vec<String> {
        self.ids.iter().map(ToString::to_string).collect()
    }
}

impl From<Vec<ProductId>> for Selection {
    fn from(ids: Vec<ProductId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Selection> for Vec<ProductId> {
    fn from(selection: Selection) -> Self {
        selection.ids
    }
}

impl FromIterator<ProductId> for Selection {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let empty = Selection::new();
        let one = empty.toggle(&id("1"));
        assert!(one.contains(&id("1")));
        assert_eq!(one.len(), 1);

        let back = one.toggle(&id("1"));
        assert!(back.is_empty());
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let start: Selection = [id("a"), id("b"), id("c")].into_iter().collect();
        for target in ["a", "b", "c", "z"] {
            let twice = start.toggle(&id(target)).toggle(&id(target));
            if target == "z" {
                assert_eq!(twice, start);
            } else {
                // Re-adding appends, so membership is identical.
                assert_eq!(twice.len(), start.len());
                assert!(start.ids().iter().all(|x| twice.contains(x)));
            }
        }
    }

    #[test]
    fn test_toggle_does_not_mutate_original() {
        let start = Selection::new().toggle(&id("1"));
        let _ = start.toggle(&id("2"));
        assert_eq!(start.to_product_ids(), ["1"]);
    }

    #[test]
    fn test_ids_keep_selection_order() {
        let selection = Selection::new()
            .toggle(&id("b"))
            .toggle(&id("a"))
            .toggle(&id("c"));
        assert_eq!(selection.to_product_ids(), ["b", "a", "c"]);
    }

    #[test]
    fn test_from_iter_deduplicates() {
        let selection: Selection = [id("1"), id("2"), id("1")].into_iter().collect();
        assert_eq!(selection.to_product_ids(), ["1", "2"]);
    }

    #[test]
    fn test_deserialize_enforces_uniqueness() {
        let selection: Selection = serde_json::from_str(r#"["x","y","x"]"#).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(serde_json::to_string(&selection).unwrap(), r#"["x","y"]"#);
    }
}
