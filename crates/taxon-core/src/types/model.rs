//! Items, categories and schemes.
//!
//! All three are immutable once a `Universe` has been built. Categories and
//! schemes refer to items by `ItemId`; names are resolved through the universe.

use std::hash::{Hash, Hasher};

use super::collections::{FxHashMap, Population};
use super::identifiers::{ItemId, SchemeId};

/// A named, weighted unit being classified.
///
/// Equality and hashing are by name only.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub occurrences: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, occurrences: u64) -> Self {
        Self {
            name: name.into(),
            occurrences,
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A named grouping of items within one scheme.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    items: Population,
}

impl Category {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Population::new(),
        }
    }

    /// Insert an item. Returns `false` if the item was already present.
    pub(crate) fn insert(&mut self, item: ItemId) -> bool {
        self.items.insert(item)
    }

    pub fn items(&self) -> &Population {
        &self.items
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of this category that are also in `population`.
    pub fn intersection(&self, population: &Population) -> Population {
        // Iterate the smaller side; both are ordered sets.
        if self.items.len() <= population.len() {
            self.items
                .iter()
                .filter(|id| population.contains(id))
                .copied()
                .collect()
        } else {
            population
                .iter()
                .filter(|id| self.items.contains(id))
                .copied()
                .collect()
        }
    }

    /// Number of `population` items in this category.
    pub fn count_in(&self, population: &Population) -> usize {
        if self.items.len() <= population.len() {
            self.items.iter().filter(|id| population.contains(id)).count()
        } else {
            population.iter().filter(|id| self.items.contains(id)).count()
        }
    }
}

/// An item classified into more than one category of the same scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMembership {
    pub item: ItemId,
    pub first_category: String,
    pub duplicate_category: String,
}

/// A named collection of (ideally) mutually exclusive categories.
#[derive(Debug, Clone)]
pub struct Scheme {
    pub id: SchemeId,
    pub name: String,
    categories: Vec<Category>,
    coverage: Population,
    duplicates: Vec<DuplicateMembership>,
}

impl Scheme {
    /// Assemble a scheme, computing its coverage set and duplicate report.
    pub(crate) fn assemble(id: SchemeId, name: String, categories: Vec<Category>) -> Self {
        let mut coverage = Population::new();
        let mut owner: FxHashMap<ItemId, usize> = FxHashMap::default();
        let mut duplicates = Vec::new();

        for (index, category) in categories.iter().enumerate() {
            for &item in category.items() {
                if coverage.insert(item) {
                    owner.insert(item, index);
                } else {
                    let first = owner
                        .get(&item)
                        .map(|&idx| categories[idx].name.clone())
                        .unwrap_or_default();
                    duplicates.push(DuplicateMembership {
                        item,
                        first_category: first,
                        duplicate_category: category.name.clone(),
                    });
                }
            }
        }

        Self {
            id,
            name,
            categories,
            coverage,
            duplicates,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Union of items across all categories.
    pub fn coverage(&self) -> &Population {
        &self.coverage
    }

    pub fn covers(&self, item: ItemId) -> bool {
        self.coverage.contains(&item)
    }

    /// Items that appear in more than one category, in encounter order.
    pub fn duplicates(&self) -> &[DuplicateMembership] {
        &self.duplicates
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Scheme {}
