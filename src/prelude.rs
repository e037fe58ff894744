//! # diffscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and functions from the diffscope library. Import it to get quick access to
//! the essential pieces of a diff session.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all diffscope operations
pub use crate::Error;

/// The result type used throughout diffscope
pub use crate::Result;

// ================================================================================================
// Addresses and Pairs
// ================================================================================================

/// A memory location in either binary
pub use crate::address::Address;

/// One unit of correspondence between the two binaries
pub use crate::address::AddressPair;

/// Selects the primary or secondary binary
pub use crate::address::Side;

// ================================================================================================
// Correspondence Stores
// ================================================================================================

/// Bidirectional sorted address index with O(log n) counterpart lookup
pub use crate::correspondence::AddressCorrespondenceIndex;

/// Dual-keyed table of match metadata records
pub use crate::correspondence::MatchTable;

// ================================================================================================
// Display Alignment
// ================================================================================================

/// The stable interleaving merge producing the side-by-side display order
pub use crate::alignment::align;

// ================================================================================================
// Criterion Trees
// ================================================================================================

/// Leaf predicate trait for selection expressions
pub use crate::criteria::Criterion;

/// Edit descriptions returned by successful tree mutations
pub use crate::criteria::CriterionEdit;

/// Side-effect-free evaluation of criterion trees
pub use crate::criteria::CriterionExecutor;

/// Node kinds and their arity rules
pub use crate::criteria::CriterionKind;

/// Strongly-typed handles into a criterion tree
pub use crate::criteria::CriterionNodeId;

/// The boolean combinators a caller can create
pub use crate::criteria::CriterionOperator;

/// The arena-backed selection expression tree
pub use crate::criteria::CriterionTree;
