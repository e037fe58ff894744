// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # diffscope
//!
//! The cross-graph correspondence core of a binary-diffing visualization tool.
//! Given two independently disassembled binaries (the *primary* and the
//! *secondary*) and the match set an upstream graph-diffing stage computed,
//! `diffscope` maintains a consistent, bidirectionally navigable
//! correspondence between the two, produces the stable merged display order
//! the side-by-side view renders, and evaluates boolean selection
//! expressions over the merged node set.
//!
//! ## Features
//!
//! - **Bidirectional address index** - O(log n) counterpart lookup in either
//!   direction over sorted parallel vectors, with atomic rebuild-on-remove
//! - **Match metadata table** - dual-keyed store with per-side uniqueness
//!   enforced at load time, so single-side lookups are never ambiguous
//! - **Stable alignment** - a single-pass merge that lines matched rows up
//!   and weaves unmatched rows in at their natural position, for any anchor
//!   side and any input
//! - **Criterion trees** - arena-backed boolean expression trees with
//!   arity-checked interactive edits and side-effect-free evaluation
//!
//! ## Quick Start
//!
//! ```rust
//! use diffscope::prelude::*;
//!
//! // the upstream diffing stage hands us the session's pairs
//! let pairs = [
//!     AddressPair::matched(Address::new(0x1000), Address::new(0x8000)),
//!     AddressPair::primary_only(Address::new(0x1400)),
//!     AddressPair::matched(Address::new(0x2000), Address::new(0x9000)),
//! ];
//!
//! let index = AddressCorrespondenceIndex::build(&pairs);
//! assert_eq!(
//!     index.opposite_address(Address::new(0x1000), Side::Primary),
//!     Some(Address::new(0x8000))
//! );
//!
//! // one total order for the side-by-side display
//! let ordered = align(&pairs, Side::Primary);
//! assert_eq!(ordered.len(), pairs.len());
//! ```
//!
//! ## Architecture
//!
//! `diffscope` is organized into three domain modules plus the usual
//! error/prelude surface:
//!
//! - [`correspondence`] - the address index and the match table
//! - [`alignment`] - the display-order merge
//! - [`criteria`] - selection expression trees and their executor
//!
//! All components are single-threaded, synchronous, and free of I/O; they
//! are built once per diff session and mutated only by rare interactive
//! edits. A multi-threaded host should guard a session behind one exclusive
//! lock rather than expecting internal synchronization.
//!
//! ## Error Handling
//!
//! Data-integrity violations (duplicate matches, empty address pairs,
//! malformed criterion trees) surface as the typed [`Error`]; expected
//! not-found outcomes are `Option`/`bool` results. Nothing is logged or
//! silently corrected.

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use diffscope::prelude::*;
///
/// let pair = AddressPair::matched(Address::new(1), Address::new(2));
/// assert!(pair.is_matched());
/// ```
pub mod prelude;

/// Addresses, sides, and address pairs - the vocabulary every other module
/// speaks.
pub mod address;

/// The display-order merge: one total order over a partially matched pair
/// set, anchored on either side.
pub mod alignment;

/// The bidirectional address index and the match metadata table.
pub mod correspondence;

/// Boolean criterion trees and their executor, for interactive node
/// selection.
pub mod criteria;

/// The main error type for all operations in this crate.
///
/// See [`error` module documentation](Error) for the error taxonomy:
/// integrity violations are typed errors, not-found outcomes are not.
pub use error::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A memory location in either binary. See [`address::Address`].
pub use address::Address;

/// One correspondence unit between the binaries. See [`address::AddressPair`].
pub use address::AddressPair;

/// Selects the primary or secondary binary. See [`address::Side`].
pub use address::Side;

/// The bidirectional sorted address index.
///
/// # Example
///
/// ```rust
/// use diffscope::{Address, AddressPair, AddressCorrespondenceIndex, Side};
///
/// let pairs = [AddressPair::matched(Address::new(1), Address::new(10))];
/// let index = AddressCorrespondenceIndex::build(&pairs);
/// assert!(index.contains_pair(Address::new(1), Address::new(10)));
/// ```
pub use correspondence::AddressCorrespondenceIndex;

/// The dual-keyed match metadata table.
pub use correspondence::MatchTable;

/// Linearizes a pair set into one anchored display order. See
/// [`alignment::align`].
pub use alignment::align;

/// Criterion tree types and the executor.
pub use criteria::{
    Criterion, CriterionEdit, CriterionExecutor, CriterionKind, CriterionNodeId,
    CriterionOperator, CriterionTree,
};
