//! In-memory tree builder fed by classification events.

use std::sync::Mutex;

use taxon_core::events::types::{BranchEnteredEvent, BranchExitedEvent, LeafEvent};
use taxon_core::events::TaxonEventHandler;

/// A node of a recorded classification tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Branch {
        label: String,
        population_size: usize,
        population_weight: u64,
        children: Vec<TreeNode>,
    },
    Leaf {
        name: String,
        occurrences: u64,
    },
}

impl TreeNode {
    /// Branch label or leaf name.
    pub fn label(&self) -> &str {
        match self {
            Self::Branch { label, .. } => label,
            Self::Leaf { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::Branch { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// All leaves below this node in pre-order, as `(name, occurrences)`.
    pub fn leaves(&self) -> Vec<(&str, u64)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<(&'a str, u64)>) {
        match self {
            Self::Leaf { name, occurrences } => out.push((name, *occurrences)),
            Self::Branch { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Direct child branch with `label`.
    pub fn child(&self, label: &str) -> Option<&TreeNode> {
        self.children()
            .iter()
            .find(|c| !c.is_leaf() && c.label() == label)
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Default)]
struct RecorderState {
    open: Vec<TreeNode>,
    finished: Option<TreeNode>,
}

/// Event handler that assembles the tree in memory.
///
/// Expects well-nested events from a single classification run; leaves
/// outside any open branch are dropped.
#[derive(Debug, Default)]
pub struct TreeRecorder {
    state: Mutex<RecorderState>,
}

impl TreeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The completed tree, once the root branch has been exited.
    pub fn tree(&self) -> Option<TreeNode> {
        self.lock().finished.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecorderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TaxonEventHandler for TreeRecorder {
    fn on_branch_entered(&self, event: &BranchEnteredEvent) {
        let mut state = self.lock();
        if state.open.is_empty() {
            state.finished = None;
        }
        state.open.push(TreeNode::Branch {
            label: event.label.clone(),
            population_size: event.population_size,
            population_weight: event.population_weight,
            children: Vec::new(),
        });
    }

    fn on_leaf(&self, event: &LeafEvent) {
        let mut state = self.lock();
        match state.open.last_mut() {
            Some(TreeNode::Branch { children, .. }) => children.push(TreeNode::Leaf {
                name: event.name.clone(),
                occurrences: event.occurrences,
            }),
            _ => tracing::warn!(leaf = %event.name, "leaf outside any branch; dropped"),
        }
    }

    fn on_branch_exited(&self, _event: &BranchExitedEvent) {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(node) = state.open.pop() else {
            tracing::warn!("branch exit without matching enter");
            return;
        };
        match state.open.last_mut() {
            Some(TreeNode::Branch { children, .. }) => children.push(node),
            _ => state.finished = Some(node),
        }
    }
}
