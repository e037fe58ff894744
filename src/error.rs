use thiserror::Error;

use crate::address::{Address, Side};
use crate::criteria::CriterionKind;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant indicates a data-integrity or structural violation that is fatal to the
/// operation which triggered it. Expected "not found" outcomes (an address with no counterpart,
/// removal of a nonexistent pair, lookup of an absent match) are never errors — those are
/// reported as `Option`/`bool` results by the individual components.
///
/// # Error Categories
///
/// ## Data Integrity Errors
/// - [`Error::EmptyPair`] - An address pair with neither side present
/// - [`Error::DuplicateMatch`] - A match inserted twice under the same key pair
/// - [`Error::ConflictingMatch`] - A second match reusing an address on one side
///
/// ## Criterion Tree Errors
/// - [`Error::CriterionArity`] - A malformed tree encountered during evaluation
/// - [`Error::IllegalEdit`] - A structural edit that violates the tree's arity rules
///
/// # Examples
///
/// ```rust
/// use diffscope::{Address, Error, MatchTable};
///
/// let mut table: MatchTable<&str> = MatchTable::new();
/// table.insert(Address::new(5), Address::new(50), "flowgraph")?;
///
/// match table.insert(Address::new(5), Address::new(50), "callgraph") {
///     Err(Error::DuplicateMatch { primary, secondary }) => {
///         eprintln!("upstream produced ({primary}, {secondary}) twice");
///     }
///     other => panic!("expected a duplicate rejection, got {other:?}"),
/// }
/// # Ok::<(), diffscope::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An address pair was constructed with neither side present.
    ///
    /// Every pair must carry at least one address; a pair with both sides
    /// absent represents nothing and indicates a bug in the upstream match
    /// computation, not a recoverable condition.
    #[error("Address pair must have at least one side present")]
    EmptyPair,

    /// A match with this exact (primary, secondary) key pair already exists.
    ///
    /// Duplicate insertion is a programmer or upstream-data error and aborts
    /// the batch load it occurs in; it is never silently ignored.
    #[error("Duplicate match for pair ({primary}, {secondary})")]
    DuplicateMatch {
        /// Primary-side address of the rejected match.
        primary: Address,
        /// Secondary-side address of the rejected match.
        secondary: Address,
    },

    /// A second match reuses an address already matched on the given side.
    ///
    /// The match table enforces at most one match per address per side at
    /// insertion time, so single-side lookups are unambiguous. A conflict
    /// means the upstream matching algorithm emitted overlapping matches.
    #[error("Address {address} already has a match on the {side} side")]
    ConflictingMatch {
        /// The address that is already matched.
        address: Address,
        /// The side on which the address is already matched.
        side: Side,
    },

    /// A criterion node violated its arity invariant during evaluation.
    ///
    /// `And`/`Or` require at least two children, `Not` exactly one, and the
    /// root exactly one. Evaluating a tree that violates these rules is
    /// fatal to the whole evaluation call, never silently skipped.
    #[error("Criterion node {kind} evaluated with {children} children")]
    CriterionArity {
        /// The kind of the offending node.
        kind: CriterionKind,
        /// The number of children the node actually had.
        children: usize,
    },

    /// A structural edit on the criterion tree was rejected.
    ///
    /// The UI is expected to query edit legality before offering an action;
    /// the tree still enforces the arity rules defensively and reports the
    /// rejected edit here.
    #[error("Illegal criterion tree edit: {0}")]
    IllegalEdit(String),
}
