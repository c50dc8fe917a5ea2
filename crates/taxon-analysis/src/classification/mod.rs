//! Classification Engine: greedy recursive scheme selection.

pub mod engine;
pub mod tree;

pub use engine::{ClassificationSummary, Classifier, UsedSchemes};
pub use tree::{TreeNode, TreeRecorder};
