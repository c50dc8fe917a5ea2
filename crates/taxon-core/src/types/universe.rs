//! The resident item universe and its builder.
//!
//! Ingestion collaborators feed items and memberships into a
//! `UniverseBuilder`; `build()` validates the input and freezes it.

use std::str::FromStr;

use super::collections::{FxHashMap, Population};
use super::identifiers::{ItemId, SchemeId};
use super::model::{Category, Item, Scheme};
use crate::errors::ModelError;

/// A `scheme-name:category-name` membership column header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MembershipColumn {
    pub scheme: String,
    pub category: String,
}

impl MembershipColumn {
    pub fn new(scheme: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            category: category.into(),
        }
    }

    /// Split a column header on its first `:`. Both halves must be non-empty
    /// after trimming.
    pub fn parse(column: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidMembershipColumn {
            column: column.to_string(),
        };
        let (scheme, category) = column.split_once(':').ok_or_else(invalid)?;
        let (scheme, category) = (scheme.trim(), category.trim());
        if scheme.is_empty() || category.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(scheme, category))
    }
}

impl FromStr for MembershipColumn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Accumulates items and scheme memberships before validation.
#[derive(Debug, Default)]
pub struct UniverseBuilder {
    items: Vec<Item>,
    item_index: FxHashMap<String, ItemId>,
    schemes: Vec<(String, Vec<Category>)>,
    scheme_index: FxHashMap<String, usize>,
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Names must be unique.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        occurrences: u64,
    ) -> Result<ItemId, ModelError> {
        let name = name.into();
        if self.item_index.contains_key(&name) {
            return Err(ModelError::DuplicateItem { name });
        }
        let id = ItemId::new(self.items.len());
        self.item_index.insert(name.clone(), id);
        self.items.push(Item::new(name, occurrences));
        Ok(id)
    }

    /// Ensure a scheme exists, even if it never receives a category.
    pub fn declare_scheme(&mut self, scheme: &str) -> &mut Self {
        self.scheme_slot(scheme);
        self
    }

    /// Ensure a category exists under `scheme`, even if it stays empty.
    pub fn declare_category(&mut self, scheme: &str, category: &str) -> &mut Self {
        self.category_slot(scheme, category);
        self
    }

    /// Classify an already registered item into `scheme:category`.
    ///
    /// Adding the same item to the same category twice is a data-quality
    /// warning, not an error; the repeat is dropped.
    pub fn add_membership(
        &mut self,
        scheme: &str,
        category: &str,
        item: &str,
    ) -> Result<(), ModelError> {
        let id = self
            .item_index
            .get(item)
            .copied()
            .ok_or_else(|| ModelError::UnknownItem {
                item: item.to_string(),
                scheme: scheme.to_string(),
                category: category.to_string(),
            })?;
        let (s, c) = self.category_slot(scheme, category);
        if !self.schemes[s].1[c].insert(id) {
            tracing::warn!(
                item,
                scheme,
                category,
                "item added to the same category twice; ignoring repeat"
            );
        }
        Ok(())
    }

    /// Register an item together with every column it is flagged in.
    pub fn add_item_with_memberships<'a>(
        &mut self,
        name: impl Into<String>,
        occurrences: u64,
        columns: impl IntoIterator<Item = &'a MembershipColumn>,
    ) -> Result<ItemId, ModelError> {
        let name = name.into();
        let id = self.add_item(name.clone(), occurrences)?;
        for column in columns {
            self.add_membership(&column.scheme, &column.category, &name)?;
        }
        Ok(id)
    }

    /// Validate and freeze the universe.
    pub fn build(self) -> Result<Universe, ModelError> {
        if self.items.is_empty() {
            return Err(ModelError::EmptyUniverse);
        }

        // Every population total is bounded by this one.
        let mut total_occurrences: u64 = 0;
        for item in &self.items {
            total_occurrences = total_occurrences
                .checked_add(item.occurrences)
                .ok_or_else(|| ModelError::OccurrenceOverflow {
                    item: item.name.clone(),
                })?;
        }

        let mut schemes = Vec::with_capacity(self.schemes.len());
        for (index, (name, categories)) in self.schemes.into_iter().enumerate() {
            if categories.is_empty() {
                return Err(ModelError::EmptyScheme { scheme: name });
            }
            let scheme = Scheme::assemble(SchemeId::new(index), name, categories);
            for dup in scheme.duplicates() {
                tracing::warn!(
                    scheme = %scheme.name,
                    item = %self.items[dup.item.index()].name,
                    first = %dup.first_category,
                    duplicate = %dup.duplicate_category,
                    "item is classified twice in the same scheme"
                );
            }
            schemes.push(scheme);
        }

        tracing::debug!(
            items = self.items.len(),
            schemes = schemes.len(),
            total_occurrences,
            "universe built"
        );

        Ok(Universe {
            items: self.items,
            item_index: self.item_index,
            schemes,
            total_occurrences,
        })
    }

    fn scheme_slot(&mut self, scheme: &str) -> usize {
        if let Some(&index) = self.scheme_index.get(scheme) {
            return index;
        }
        let index = self.schemes.len();
        self.schemes.push((scheme.to_string(), Vec::new()));
        self.scheme_index.insert(scheme.to_string(), index);
        index
    }

    fn category_slot(&mut self, scheme: &str, category: &str) -> (usize, usize) {
        let s = self.scheme_slot(scheme);
        let categories = &mut self.schemes[s].1;
        let c = match categories.iter().position(|c| c.name == category) {
            Some(c) => c,
            None => {
                categories.push(Category::new(category));
                categories.len() - 1
            }
        };
        (s, c)
    }
}

/// The full, validated set of items and schemes for one classification run.
#[derive(Debug, Clone)]
pub struct Universe {
    items: Vec<Item>,
    item_index: FxHashMap<String, ItemId>,
    schemes: Vec<Scheme>,
    total_occurrences: u64,
}

impl Universe {
    pub fn builder() -> UniverseBuilder {
        UniverseBuilder::new()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }

    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.item_index.get(name).copied()
    }

    pub fn occurrences(&self, id: ItemId) -> u64 {
        self.items[id.index()].occurrences
    }

    /// Occurrence total of the whole universe. Fits in `u64` by construction,
    /// so no sub-population total can overflow.
    pub fn total_occurrences(&self) -> u64 {
        self.total_occurrences
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn scheme(&self, id: SchemeId) -> &Scheme {
        &self.schemes[id.index()]
    }

    pub fn scheme_by_name(&self, name: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    /// Every item in the universe.
    pub fn all_items(&self) -> Population {
        (0..self.items.len()).map(ItemId::new).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
