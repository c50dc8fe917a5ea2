//! Set relations between schemes and populations.

use taxon_core::types::{Category, Population, Scheme};

use super::descriptive::mean;

/// Items of `population` that belong to some category of `scheme`.
/// Always a subset of `population`.
pub fn coverage(scheme: &Scheme, population: &Population) -> Population {
    population
        .iter()
        .filter(|&&id| scheme.covers(id))
        .copied()
        .collect()
}

/// Per-category count of `population` items, in category order.
///
/// With `include_empty == false`, categories with no population items are
/// dropped from the vector.
pub fn category_counts(scheme: &Scheme, population: &Population, include_empty: bool) -> Vec<f64> {
    scheme
        .categories()
        .iter()
        .map(|c| c.count_in(population) as f64)
        .filter(|&count| include_empty || count > 0.0)
        .collect()
}

/// Mean number of `population` items per category of `scheme`.
pub fn mean_category_size(scheme: &Scheme, population: &Population) -> f64 {
    mean(&category_counts(scheme, population, true))
}

/// Unique items across `categories`.
pub fn elements_in_categories<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Population {
    let mut elements = Population::new();
    for category in categories {
        elements.extend(category.items().iter().copied());
    }
    elements
}

/// Schemes whose coverage set is a superset of `population`.
///
/// Input order is preserved so downstream ranking ties stay deterministic.
pub fn find_applicable_schemes<'a, I>(schemes: I, population: &Population) -> Vec<&'a Scheme>
where
    I: IntoIterator<Item = &'a Scheme>,
{
    schemes
        .into_iter()
        .filter(|scheme| population.is_subset(scheme.coverage()))
        .collect()
}
