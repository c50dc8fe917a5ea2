//! Statistics Engine.
//!
//! Pure functions over read-only inputs. Per-run totals travel in an
//! explicit `EvaluationContext` rather than in shared counters.

pub mod balance;
pub mod coverage;
pub mod descriptive;

pub use balance::{balance, chi_square_balance, chi_square_score, normal_balance, normal_score};
pub use coverage::{
    category_counts, coverage, elements_in_categories, find_applicable_schemes,
    mean_category_size,
};
pub use descriptive::{mean, occurrence_total, standard_deviation, FLATNESS_EPSILON};
