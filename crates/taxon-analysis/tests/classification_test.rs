//! End-to-end classification tests: tree shape, event stream, and the
//! structural guarantees every run must uphold.

mod common;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use common::{household, rooms_and_colours, run, universe, EventLog, Recorded};
use taxon_analysis::{Classifier, TreeNode, TreeRecorder};
use taxon_core::config::TaxonConfig;
use taxon_core::errors::{ClassificationError, ConfigError};
use taxon_core::events::types::{BranchEnteredEvent, BranchExitedEvent, SchemeSelectedEvent};
use taxon_core::events::{EventDispatcher, TaxonEventHandler};

fn leaf_counts(log: &EventLog) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (name, _) in log.leaves() {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

// ---- Worked examples ----

#[test]
fn test_three_items_emit_three_leaves_of_total_weight_ten() {
    let u = universe(
        &[("A", 5), ("B", 3), ("C", 2)],
        &[("kind", "k1", &["A", "B"]), ("kind", "k2", &["C"])],
    );
    let (log, _) = run(&u);

    let leaves = log.leaves();
    assert_eq!(leaves.len(), 3);
    assert_eq!(leaves.iter().map(|(_, w)| w).sum::<u64>(), 10);

    match &log.events()[0] {
        Recorded::Enter { label, size, weight } => {
            assert_eq!(label, "Classification");
            assert_eq!(*size, 3);
            assert_eq!(*weight, 10);
        }
        other => panic!("expected root enter, got {other:?}"),
    }
}

#[test]
fn test_rooms_and_colours_event_stream() {
    let (log, recorder) = run(&rooms_and_colours());

    let enter = |label: &str, size, weight| Recorded::Enter {
        label: label.to_string(),
        size,
        weight,
    };
    let leaf = |name: &str, weight| Recorded::Leaf {
        name: name.to_string(),
        weight,
    };

    assert_eq!(
        log.tree_events(),
        vec![
            enter("Classification", 4, 11),
            enter("x", 2, 8),
            enter("red", 1, 5),
            leaf("A", 5),
            Recorded::Exit,
            enter("blue", 1, 3),
            leaf("B", 3),
            Recorded::Exit,
            Recorded::Exit,
            enter("y", 2, 3),
            leaf("C", 2),
            leaf("D", 1),
            Recorded::Exit,
            Recorded::Exit,
        ]
    );

    let tree = recorder.tree().unwrap();
    assert_eq!(tree.label(), "Classification");
    assert_eq!(tree.height(), 3);
    assert_eq!(
        tree.leaves(),
        vec![("A", 5), ("B", 3), ("C", 2), ("D", 1)]
    );
    let x = tree.child("x").unwrap();
    assert!(x.child("red").is_some());
    assert!(x.child("blue").is_some());
    assert!(tree.child("y").unwrap().children().iter().all(TreeNode::is_leaf));
}

#[test]
fn test_scheme_selection_events_carry_depth() {
    let (log, _) = run(&rooms_and_colours());
    let selected: Vec<Recorded> = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, Recorded::Selected { .. }))
        .collect();
    assert_eq!(
        selected,
        vec![
            Recorded::Selected { scheme: "room".into(), depth: 0 },
            Recorded::Selected { scheme: "colour".into(), depth: 1 },
        ]
    );
}

#[test]
fn test_summary_counts() {
    let u = rooms_and_colours();
    let summary = Classifier::with_defaults(&u)
        .classify(&EventDispatcher::new())
        .unwrap();
    assert_eq!(summary.root_scheme.as_deref(), Some("room"));
    assert_eq!(summary.schemes_selected, 2);
    assert_eq!(summary.branches, 5);
    assert_eq!(summary.leaves, 4);
    assert_eq!(summary.max_depth, 2);
}

// ---- Root behaviour ----

#[test]
fn test_root_uncovered_items_become_root_leaves() {
    let u = universe(
        &[("A", 5), ("B", 3), ("C", 2), ("D", 1)],
        &[("colour", "red", &["A", "C"]), ("colour", "blue", &["B"])],
    );
    let (_, recorder) = run(&u);
    let tree = recorder.tree().unwrap();

    let first = &tree.children()[0];
    assert!(first.is_leaf());
    assert_eq!(first.label(), "D");
    assert_eq!(tree.leaves().len(), 4);
}

#[test]
fn test_root_falls_back_to_leaves_when_no_scheme_qualifies() {
    let mut builder = taxon_core::types::UniverseBuilder::new();
    builder.add_item("A", 1).unwrap();
    builder.add_item("B", 2).unwrap();
    builder.declare_category("empty", "nothing");
    let u = builder.build().unwrap();

    let (log, recorder) = run(&u);
    let tree = recorder.tree().unwrap();
    assert_eq!(tree.children().len(), 2);
    assert!(tree.children().iter().all(TreeNode::is_leaf));

    let rankings = log.rankings();
    assert_eq!(rankings.len(), 1);
    assert_eq!(rankings[0].rankings[0].fitness, 0.0);

    let summary = Classifier::with_defaults(&u)
        .classify(&EventDispatcher::new())
        .unwrap();
    assert_eq!(summary.root_scheme, None);
    assert_eq!(summary.schemes_selected, 0);
}

#[test]
fn test_universe_without_schemes_is_all_leaves() {
    let u = universe(&[("solo", 4), ("pair", 2)], &[]);
    let (log, recorder) = run(&u);
    assert_eq!(leaf_counts(&log).len(), 2);
    assert_eq!(recorder.tree().unwrap().height(), 1);
}

// ---- Selection ----

#[test]
fn test_balanced_scheme_beats_skewed_one() {
    let names: Vec<String> = (0..10).map(|i| format!("i{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let items: Vec<(&str, u64)> = refs.iter().map(|&n| (n, 1)).collect();
    let u = universe(
        &items,
        &[
            ("skewed", "big", &refs[..9]),
            ("skewed", "small", &refs[9..]),
            ("even", "left", &refs[..5]),
            ("even", "right", &refs[5..]),
        ],
    );

    let (log, _) = run(&u);
    let root = &log.rankings()[0];
    assert_eq!(root.rankings[0].scheme, "even");
    assert_eq!(root.rankings[1].scheme, "skewed");
    assert_eq!(root.rankings[0].normalized_fitness, 1.0);
    assert_eq!(root.rankings[1].normalized_fitness, 0.0);
}

#[test]
fn test_tied_schemes_resolve_by_declaration_order() {
    let u = universe(
        &[("A", 1), ("B", 1), ("C", 1), ("D", 1)],
        &[
            ("first", "p", &["A", "B"]),
            ("first", "q", &["C", "D"]),
            ("second", "p", &["A", "B"]),
            ("second", "q", &["C", "D"]),
        ],
    );
    let summary = Classifier::with_defaults(&u)
        .classify(&EventDispatcher::new())
        .unwrap();
    assert_eq!(summary.root_scheme.as_deref(), Some("first"));
}

#[test]
fn test_partial_scheme_is_not_applicable_below_root() {
    let (log, _) = run(&household());
    for ranking in log.rankings().iter().filter(|r| r.depth > 0) {
        let covered_everything = ranking
            .rankings
            .iter()
            .all(|row| row.metrics.iter().any(|&(kind, v)| {
                kind == taxon_core::types::MetricKind::Coverage && v == 1.0
            }));
        assert!(covered_everything, "non-applicable scheme ranked: {ranking:?}");
    }
}

#[test]
fn test_rankings_can_be_disabled() {
    let u = rooms_and_colours();
    let config = TaxonConfig::from_toml("[classification]\nemit_rankings = false\n").unwrap();
    let log = Arc::new(EventLog::default());
    let dispatcher = EventDispatcher::with_handler(log.clone());
    Classifier::new(&u, &config)
        .unwrap()
        .classify(&dispatcher)
        .unwrap();
    assert!(log.rankings().is_empty());
    assert_eq!(log.leaves().len(), 4);
}

#[test]
fn test_custom_root_label() {
    let u = rooms_and_colours();
    let config = TaxonConfig::from_toml("[classification]\nroot_label = \"Inventory\"\n").unwrap();
    let recorder = Arc::new(TreeRecorder::new());
    let dispatcher = EventDispatcher::with_handler(recorder.clone());
    Classifier::new(&u, &config)
        .unwrap()
        .classify(&dispatcher)
        .unwrap();
    assert_eq!(recorder.tree().unwrap().label(), "Inventory");
}

#[test]
fn test_invalid_config_is_rejected() {
    let u = rooms_and_colours();
    let mut config = TaxonConfig::default();
    config.fitness.category_upper_limit = Some(1);
    let err = Classifier::new(&u, &config).err().unwrap();
    assert!(matches!(
        err,
        ClassificationError::Config(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_sequential_and_parallel_runs_agree() {
    let u = household();
    let parallel = run(&u).0.events();

    let config = TaxonConfig::from_toml("[fitness]\nparallel = false\n").unwrap();
    let log = Arc::new(EventLog::default());
    Classifier::new(&u, &config)
        .unwrap()
        .classify(&EventDispatcher::with_handler(log.clone()))
        .unwrap();
    assert_eq!(log.events(), parallel);
}

// ---- Structural guarantees ----

#[test]
fn test_every_item_is_emitted_exactly_once() {
    let u = household();
    let (log, _) = run(&u);
    let counts = leaf_counts(&log);
    assert_eq!(counts.len(), u.len());
    assert!(counts.values().all(|&c| c == 1));
}

#[test]
fn test_branches_are_well_nested_and_never_empty() {
    let (log, _) = run(&household());
    let mut depth = 0usize;
    for event in log.tree_events() {
        match event {
            Recorded::Enter { size, .. } => {
                assert!(size > 0);
                depth += 1;
            }
            Recorded::Exit => {
                assert!(depth > 0);
                depth -= 1;
            }
            Recorded::Leaf { .. } => assert!(depth > 0),
            _ => unreachable!(),
        }
    }
    assert_eq!(depth, 0);
}

/// Tracks the scheme chosen at each open branch and flags any reuse along
/// a root-to-leaf path.
#[derive(Default)]
struct PathGuard {
    state: Mutex<(Vec<Option<String>>, usize)>,
}

impl TaxonEventHandler for PathGuard {
    fn on_branch_entered(&self, _event: &BranchEnteredEvent) {
        self.state.lock().unwrap().0.push(None);
    }

    fn on_scheme_selected(&self, event: &SchemeSelectedEvent) {
        let mut state = self.state.lock().unwrap();
        let (path, violations) = &mut *state;
        if path.iter().flatten().any(|s| s == &event.scheme) {
            *violations += 1;
        }
        if let Some(slot) = path.last_mut() {
            *slot = Some(event.scheme.clone());
        }
    }

    fn on_branch_exited(&self, _event: &BranchExitedEvent) {
        self.state.lock().unwrap().0.pop();
    }
}

#[test]
fn test_no_scheme_is_reused_along_a_path() {
    let u = household();
    let guard = Arc::new(PathGuard::default());
    Classifier::with_defaults(&u)
        .classify(&EventDispatcher::with_handler(guard.clone()))
        .unwrap();
    let state = guard.state.lock().unwrap();
    assert!(state.0.is_empty());
    assert_eq!(state.1, 0);
}

#[test]
fn test_empty_categories_produce_no_branch() {
    let u = universe(
        &[("A", 1), ("B", 1)],
        &[("kind", "left", &["A"]), ("kind", "right", &["B"])],
    );
    let mut builder = taxon_core::types::UniverseBuilder::new();
    builder.add_item("A", 1).unwrap();
    builder.add_item("B", 1).unwrap();
    builder.add_membership("kind", "left", "A").unwrap();
    builder.declare_category("kind", "unused");
    builder.add_membership("kind", "right", "B").unwrap();
    let with_empty = builder.build().unwrap();

    let (plain, _) = run(&u);
    let (padded, _) = run(&with_empty);
    assert_eq!(plain.tree_events(), padded.tree_events());
}

// ---- Data quality ----

#[test]
fn test_duplicate_membership_is_reported_and_routed_once() {
    let u = universe(
        &[("A", 4), ("B", 2), ("C", 1)],
        &[
            ("kind", "first", &["A", "B"]),
            ("kind", "second", &["A", "C"]),
        ],
    );
    let (log, recorder) = run(&u);

    let duplicates: Vec<_> = log
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Recorded::Duplicate(d) => Some(d),
            _ => None,
        })
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].item, "A");
    assert_eq!(duplicates[0].first_category, "first");
    assert_eq!(duplicates[0].duplicate_category, "second");
    assert!(matches!(log.events()[0], Recorded::Duplicate(_)));

    let tree = recorder.tree().unwrap();
    assert_eq!(tree.leaves().len(), 3);
    let second = tree.child("second").unwrap();
    assert_eq!(second.leaves(), vec![("C", 1)]);
}

#[test]
fn test_sibling_branches_each_get_their_own_used_set() {
    let u = universe(
        &[("A", 1), ("B", 1), ("C", 1), ("D", 1)],
        &[
            ("side", "left", &["A", "B"]),
            ("side", "right", &["C", "D"]),
            ("colour", "red", &["A", "C"]),
            ("colour", "blue", &["B", "D"]),
        ],
    );
    let (log, recorder) = run(&u);

    let selected: Vec<Recorded> = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, Recorded::Selected { .. }))
        .collect();
    assert_eq!(
        selected,
        vec![
            Recorded::Selected { scheme: "side".into(), depth: 0 },
            Recorded::Selected { scheme: "colour".into(), depth: 1 },
            Recorded::Selected { scheme: "colour".into(), depth: 1 },
        ]
    );

    let tree = recorder.tree().unwrap();
    for side in ["left", "right"] {
        let branch = tree.child(side).unwrap();
        assert!(branch.child("red").is_some(), "{side} missing red");
        assert!(branch.child("blue").is_some(), "{side} missing blue");
    }
}

#[test]
fn test_universe_weight_at_u64_max_classifies() {
    let u = universe(
        &[("A", u64::MAX - 1), ("B", 1)],
        &[("kind", "left", &["A"]), ("kind", "right", &["B"])],
    );
    let (log, _) = run(&u);
    match &log.events()[0] {
        Recorded::Enter { weight, .. } => assert_eq!(*weight, u64::MAX),
        other => panic!("expected root enter, got {other:?}"),
    }
    assert_eq!(log.leaves().len(), 2);
}
