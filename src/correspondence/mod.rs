//! Bidirectional address correspondence between the two binaries.
//!
//! This module holds the two stores that anchor a diff session:
//!
//! - [`AddressCorrespondenceIndex`] - sorted parallel vectors with binary
//!   search, answering "what is the counterpart of this address" in either
//!   direction in O(log n)
//! - [`MatchTable`] - the dual-keyed table carrying the opaque metadata
//!   record of each match (confidence, algorithm name, ...)
//!
//! Both stores are populated once per diff session from the match set the
//! upstream graph-diffing stage computed, and only shrink afterwards through
//! interactive "delete match" edits. Neither performs I/O or notifies
//! listeners; presentation concerns live entirely in the consuming UI layer.

mod index;
mod matches;

pub use index::AddressCorrespondenceIndex;
pub use matches::MatchTable;
