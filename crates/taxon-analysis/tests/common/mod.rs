//! Shared fixtures for taxon-analysis integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use taxon_analysis::{Classifier, TreeRecorder};
use taxon_core::events::types::*;
use taxon_core::events::{EventDispatcher, TaxonEventHandler};
use taxon_core::types::{Universe, UniverseBuilder};

/// Flattened view of the events a run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Enter { label: String, size: usize, weight: u64 },
    Leaf { name: String, weight: u64 },
    Exit,
    Selected { scheme: String, depth: usize },
    Ranked(SchemesRankedEvent),
    Duplicate(DuplicateMembershipEvent),
}

/// Handler that appends every event to a log.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<Recorded>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn leaves(&self) -> Vec<(String, u64)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Leaf { name, weight } => Some((name, weight)),
                _ => None,
            })
            .collect()
    }

    pub fn rankings(&self) -> Vec<SchemesRankedEvent> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Ranked(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Only enter / leaf / exit, in emission order.
    pub fn tree_events(&self) -> Vec<Recorded> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Recorded::Enter { .. } | Recorded::Leaf { .. } | Recorded::Exit))
            .collect()
    }

    fn push(&self, event: Recorded) {
        self.events.lock().unwrap().push(event);
    }
}

impl TaxonEventHandler for EventLog {
    fn on_branch_entered(&self, event: &BranchEnteredEvent) {
        self.push(Recorded::Enter {
            label: event.label.clone(),
            size: event.population_size,
            weight: event.population_weight,
        });
    }

    fn on_leaf(&self, event: &LeafEvent) {
        self.push(Recorded::Leaf {
            name: event.name.clone(),
            weight: event.occurrences,
        });
    }

    fn on_branch_exited(&self, _event: &BranchExitedEvent) {
        self.push(Recorded::Exit);
    }

    fn on_scheme_selected(&self, event: &SchemeSelectedEvent) {
        self.push(Recorded::Selected {
            scheme: event.scheme.clone(),
            depth: event.depth,
        });
    }

    fn on_schemes_ranked(&self, event: &SchemesRankedEvent) {
        self.push(Recorded::Ranked(event.clone()));
    }

    fn on_duplicate_membership(&self, event: &DuplicateMembershipEvent) {
        self.push(Recorded::Duplicate(event.clone()));
    }
}

/// Build a universe from `(name, occurrences)` items and
/// `(scheme, category, members)` memberships.
pub fn universe(items: &[(&str, u64)], memberships: &[(&str, &str, &[&str])]) -> Universe {
    let mut builder = UniverseBuilder::new();
    for &(name, occurrences) in items {
        builder.add_item(name, occurrences).unwrap();
    }
    for &(scheme, category, members) in memberships {
        builder.declare_category(scheme, category);
        for member in members {
            builder.add_membership(scheme, category, member).unwrap();
        }
    }
    builder.build().unwrap()
}

/// Four items split two ways: `room` partitions everything evenly,
/// `colour` leaves `D` unclassified.
pub fn rooms_and_colours() -> Universe {
    universe(
        &[("A", 5), ("B", 3), ("C", 2), ("D", 1)],
        &[
            ("room", "x", &["A", "B"]),
            ("room", "y", &["C", "D"]),
            ("colour", "red", &["A", "C"]),
            ("colour", "blue", &["B"]),
        ],
    )
}

/// Eight household objects under three full schemes and one partial one.
pub fn household() -> Universe {
    universe(
        &[
            ("cup", 5),
            ("plate", 4),
            ("fork", 3),
            ("sofa", 2),
            ("lamp", 6),
            ("towel", 1),
            ("soap", 2),
            ("tv", 3),
        ],
        &[
            ("room", "kitchen", &["cup", "plate", "fork"]),
            ("room", "living", &["sofa", "lamp", "tv"]),
            ("room", "bathroom", &["towel", "soap"]),
            ("material", "ceramic", &["cup", "plate", "soap"]),
            ("material", "metal", &["fork", "lamp", "tv"]),
            ("material", "fabric", &["sofa", "towel"]),
            ("size", "small", &["cup", "fork", "soap", "towel"]),
            ("size", "large", &["plate", "sofa", "lamp", "tv"]),
            ("partial", "a", &["cup"]),
            ("partial", "b", &["plate"]),
        ],
    )
}

/// Run a default classifier with an event log and a tree recorder attached.
pub fn run(universe: &Universe) -> (Arc<EventLog>, Arc<TreeRecorder>) {
    let log = Arc::new(EventLog::default());
    let recorder = Arc::new(TreeRecorder::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(log.clone());
    dispatcher.register(recorder.clone());
    Classifier::with_defaults(universe)
        .classify(&dispatcher)
        .unwrap();
    (log, recorder)
}
