//! Classifier: the recursive driver that turns a universe into a tree of
//! events.
//!
//! Entry ranks every scheme against the whole universe and splits on the
//! best one. Each resulting branch then ranks only the schemes that cover
//! its whole population and have not been used on the path from the root.
//! A branch with no positive-fitness candidate emits its items as leaves.

use std::collections::BTreeSet;
use std::time::Instant;

use taxon_core::config::TaxonConfig;
use taxon_core::errors::ClassificationError;
use taxon_core::events::types::{
    BranchEnteredEvent, BranchExitedEvent, DuplicateMembershipEvent, LeafEvent,
    SchemeSelectedEvent, SchemesRankedEvent,
};
use taxon_core::events::EventDispatcher;
use taxon_core::tracing::metrics::CLASSIFY_TIME_MS;
use taxon_core::types::{Population, Scheme, SchemeId, Universe};

use crate::fitness::{FitnessCalculator, FitnessResult};
use crate::statistics::{find_applicable_schemes, occurrence_total};

/// Schemes already used on the path from the root. Each branch owns its
/// own copy, so siblings never observe each other's selections.
pub type UsedSchemes = BTreeSet<SchemeId>;

/// Counters describing one completed classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationSummary {
    /// Scheme selected at the root, if any scheme had positive fitness.
    pub root_scheme: Option<String>,
    /// Number of branch subdivisions, the root included.
    pub schemes_selected: usize,
    /// Branches emitted, the root included.
    pub branches: usize,
    /// Leaves emitted; equals the universe size.
    pub leaves: usize,
    /// Deepest branch depth reached (root = 0).
    pub max_depth: usize,
}

/// Greedy hierarchical classifier over a resident universe.
pub struct Classifier<'u> {
    universe: &'u Universe,
    calculator: FitnessCalculator,
    root_label: String,
    emit_rankings: bool,
}

impl<'u> Classifier<'u> {
    /// Create a classifier after validating `config`.
    pub fn new(universe: &'u Universe, config: &TaxonConfig) -> Result<Self, ClassificationError> {
        config.validate()?;
        Ok(Self {
            universe,
            calculator: FitnessCalculator::new(&config.fitness),
            root_label: config.classification.effective_root_label().to_string(),
            emit_rankings: config.classification.effective_emit_rankings(),
        })
    }

    pub fn with_defaults(universe: &'u Universe) -> Self {
        Self {
            universe,
            calculator: FitnessCalculator::with_defaults(),
            root_label: TaxonConfig::default()
                .classification
                .effective_root_label()
                .to_string(),
            emit_rankings: true,
        }
    }

    pub fn universe(&self) -> &'u Universe {
        self.universe
    }

    /// Run the classification, streaming tree events to `dispatcher`.
    ///
    /// Every item of the universe is emitted as exactly one leaf.
    pub fn classify(
        &self,
        dispatcher: &EventDispatcher,
    ) -> Result<ClassificationSummary, ClassificationError> {
        let started = Instant::now();
        let mut summary = ClassificationSummary::default();

        self.report_duplicates(dispatcher);

        let population = self.universe.all_items();
        self.enter(&self.root_label, &population, 0, dispatcher, &mut summary);

        let candidates: Vec<&Scheme> = self.universe.schemes().iter().collect();
        let ranked = self.rank(&candidates, &population, 0, dispatcher)?;

        match Self::best(&ranked) {
            Some(best) => {
                let scheme = self.universe.scheme(best.scheme);
                summary.root_scheme = Some(scheme.name.clone());
                let mut used = UsedSchemes::new();
                used.insert(scheme.id);
                self.subdivide(scheme, &population, used, 0, dispatcher, &mut summary)?;
            }
            None => self.emit_leaves(&population, 0, dispatcher, &mut summary),
        }

        self.exit(&self.root_label, 0, dispatcher);

        tracing::info!(
            root = summary.root_scheme.as_deref().unwrap_or("<none>"),
            branches = summary.branches,
            leaves = summary.leaves,
            max_depth = summary.max_depth,
            metric = CLASSIFY_TIME_MS,
            value = started.elapsed().as_millis() as u64,
            "classification complete"
        );

        Ok(summary)
    }

    /// Classify one category's share of the parent population.
    fn classify_branch(
        &self,
        label: &str,
        population: Population,
        mut used: UsedSchemes,
        depth: usize,
        dispatcher: &EventDispatcher,
        summary: &mut ClassificationSummary,
    ) -> Result<(), ClassificationError> {
        self.enter(label, &population, depth, dispatcher, summary);

        let mut selected = None;
        if !population.is_empty() {
            let applicable: Vec<&Scheme> =
                find_applicable_schemes(self.universe.schemes(), &population)
                    .into_iter()
                    .filter(|scheme| !used.contains(&scheme.id))
                    .collect();

            if !applicable.is_empty() {
                let ranked = self.rank(&applicable, &population, depth, dispatcher)?;
                selected = Self::best(&ranked).map(|r| r.scheme);
            }
        }

        match selected {
            Some(id) => {
                let scheme = self.universe.scheme(id);
                used.insert(id);
                self.subdivide(scheme, &population, used, depth, dispatcher, summary)?;
            }
            None => {
                tracing::debug!(label, depth, items = population.len(), "branch terminal");
                self.emit_leaves(&population, depth, dispatcher, summary);
            }
        }

        self.exit(label, depth, dispatcher);
        Ok(())
    }

    /// Split `population` by the categories of `scheme`, which the caller
    /// has already recorded in `used`.
    ///
    /// Items outside the scheme become leaves at this depth. An item in
    /// several categories goes to the first one only; empty intersections
    /// are skipped.
    fn subdivide(
        &self,
        scheme: &Scheme,
        population: &Population,
        used: UsedSchemes,
        depth: usize,
        dispatcher: &EventDispatcher,
        summary: &mut ClassificationSummary,
    ) -> Result<(), ClassificationError> {
        summary.schemes_selected += 1;
        dispatcher.emit_scheme_selected(&SchemeSelectedEvent {
            scheme: scheme.name.clone(),
            depth,
            population_size: population.len(),
            population_weight: occurrence_total(self.universe, population),
        });
        tracing::debug!(scheme = %scheme.name, depth, items = population.len(), "scheme selected");

        let uncovered: Population = population
            .iter()
            .filter(|&&id| !scheme.covers(id))
            .copied()
            .collect();
        self.emit_leaves(&uncovered, depth, dispatcher, summary);

        let mut claimed = Population::new();
        for category in scheme.categories() {
            let mut share = category.intersection(population);
            share.retain(|id| !claimed.contains(id));
            if share.is_empty() {
                continue;
            }
            claimed.extend(share.iter().copied());
            self.classify_branch(
                &category.name,
                share,
                used.clone(),
                depth + 1,
                dispatcher,
                summary,
            )?;
        }
        Ok(())
    }

    /// Rank `candidates` and publish the ranking when enabled.
    fn rank(
        &self,
        candidates: &[&Scheme],
        population: &Population,
        depth: usize,
        dispatcher: &EventDispatcher,
    ) -> Result<Vec<FitnessResult>, ClassificationError> {
        let ranked = self.calculator.rank(candidates, self.universe, population)?;
        if self.emit_rankings {
            dispatcher.emit_schemes_ranked(&SchemesRankedEvent {
                depth,
                population_size: population.len(),
                rankings: ranked.iter().map(FitnessResult::to_ranked).collect(),
            });
        }
        Ok(ranked)
    }

    /// The top-ranked result, if it is usable. A zeroed-out top entry means
    /// no scheme can subdivide the population.
    fn best(ranked: &[FitnessResult]) -> Option<&FitnessResult> {
        ranked.first().filter(|r| r.is_usable())
    }

    fn report_duplicates(&self, dispatcher: &EventDispatcher) {
        for scheme in self.universe.schemes() {
            for dup in scheme.duplicates() {
                dispatcher.emit_duplicate_membership(&DuplicateMembershipEvent {
                    scheme: scheme.name.clone(),
                    item: self.universe.item(dup.item).name.clone(),
                    first_category: dup.first_category.clone(),
                    duplicate_category: dup.duplicate_category.clone(),
                });
            }
        }
    }

    fn enter(
        &self,
        label: &str,
        population: &Population,
        depth: usize,
        dispatcher: &EventDispatcher,
        summary: &mut ClassificationSummary,
    ) {
        summary.branches += 1;
        summary.max_depth = summary.max_depth.max(depth);
        dispatcher.emit_branch_entered(&BranchEnteredEvent {
            label: label.to_string(),
            depth,
            population_size: population.len(),
            population_weight: occurrence_total(self.universe, population),
        });
    }

    fn exit(&self, label: &str, depth: usize, dispatcher: &EventDispatcher) {
        dispatcher.emit_branch_exited(&BranchExitedEvent {
            label: label.to_string(),
            depth,
        });
    }

    fn emit_leaves(
        &self,
        items: &Population,
        depth: usize,
        dispatcher: &EventDispatcher,
        summary: &mut ClassificationSummary,
    ) {
        for &id in items {
            let item = self.universe.item(id);
            summary.leaves += 1;
            dispatcher.emit_leaf(&LeafEvent {
                name: item.name.clone(),
                occurrences: item.occurrences,
                depth,
            });
        }
    }
}
