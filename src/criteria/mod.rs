//! Boolean criterion trees for interactive node selection.
//!
//! The consuming UI lets the user compose a selection expression out of
//! leaf predicates and `And`/`Or`/`Not` combinators; this module holds the
//! expression tree and its evaluator.
//!
//! # Key Components
//!
//! - [`CriterionTree`] - the arena-backed expression tree with
//!   arity-checked structural edits
//! - [`Criterion`] - the single-method trait every leaf predicate implements
//!   (any `Fn(&I) -> bool` qualifies)
//! - [`CriterionExecutor`] - side-effect-free evaluation over candidate
//!   item sets
//! - [`CriterionEdit`] - the edit description successful mutations return,
//!   for the host's listener plumbing
//!
//! # Arity Invariants
//!
//! The root and `Not` hold exactly one child, `And`/`Or` at least two, and
//! `Condition` leaves none. Edits that would violate these are rejected up
//! front; trees that are still under construction (an `And` with one child
//! so far) are representable but fail evaluation with a typed error.

mod executor;
mod node;
mod tree;

pub use executor::CriterionExecutor;
pub use node::{Criterion, CriterionKind, CriterionNodeId, CriterionOperator};
pub use tree::{CriterionEdit, CriterionTree};
