//! Dual-keyed table of match metadata records.
//!
//! Each match pairs one primary and one secondary address and carries an
//! opaque record supplied by the upstream matching algorithm; this crate
//! never inspects the record. The table maintains one map per side so that
//! single-side lookups stay O(1), and enforces at insertion time that no
//! address is matched twice on its side — an ambiguity the original left to
//! iterator-order luck is a loud, typed error here.

use std::collections::HashMap;

use crate::address::{Address, Side};
use crate::{Error, Result};

/// Table of all matches of one diff session, keyed by both sides.
///
/// `R` is the match-metadata record type (confidence, algorithm name, ...)
/// and is opaque to the table. Populated once at diff-load time; entries are
/// removed when the user deletes a match; cleared when the diff closes.
///
/// # Examples
///
/// ```rust
/// use diffscope::{Address, MatchTable, Side};
///
/// let mut table = MatchTable::new();
/// table.insert(Address::new(0x1000), Address::new(0x8000), "callgraph MD index")?;
///
/// assert_eq!(
///     table.get(Address::new(0x8000), Side::Secondary),
///     Some(&"callgraph MD index")
/// );
/// assert_eq!(
///     table.opposite(Address::new(0x1000), Side::Primary),
///     Some(Address::new(0x8000))
/// );
/// # Ok::<(), diffscope::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MatchTable<R> {
    /// Primary address → (secondary address, record).
    by_primary: HashMap<Address, (Address, R)>,
    /// Secondary address → primary address, mirroring `by_primary`.
    by_secondary: HashMap<Address, Address>,
}

impl<R> MatchTable<R> {
    /// Creates an empty match table.
    #[must_use]
    pub fn new() -> Self {
        MatchTable {
            by_primary: HashMap::new(),
            by_secondary: HashMap::new(),
        }
    }

    /// Inserts a match and its metadata record.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateMatch`] if this exact (primary, secondary) pair
    ///   was inserted before. This indicates an upstream bug and must abort
    ///   the batch load it occurs in.
    /// - [`Error::ConflictingMatch`] if either address already belongs to a
    ///   different match on its side. Uniqueness per (address, side) is an
    ///   invariant of the matching algorithm; enforcing it here keeps
    ///   [`get`](Self::get) unambiguous.
    pub fn insert(&mut self, primary: Address, secondary: Address, record: R) -> Result<()> {
        if let Some(&(existing, _)) = self.by_primary.get(&primary) {
            if existing == secondary {
                return Err(Error::DuplicateMatch { primary, secondary });
            }
            return Err(Error::ConflictingMatch {
                address: primary,
                side: Side::Primary,
            });
        }
        if self.by_secondary.contains_key(&secondary) {
            return Err(Error::ConflictingMatch {
                address: secondary,
                side: Side::Secondary,
            });
        }

        self.by_primary.insert(primary, (secondary, record));
        self.by_secondary.insert(secondary, primary);

        Ok(())
    }

    /// Removes a match, returning its record.
    ///
    /// `None` if no match with exactly this key pair exists; the table is
    /// left untouched in that case.
    pub fn remove(&mut self, primary: Address, secondary: Address) -> Option<R> {
        match self.by_primary.get(&primary) {
            Some(&(assigned, _)) if assigned == secondary => {}
            _ => return None,
        }

        self.by_secondary.remove(&secondary);
        self.by_primary.remove(&primary).map(|(_, record)| record)
    }

    /// Returns the record of the match involving `address` on `side`.
    ///
    /// Unambiguous because per-side uniqueness is enforced at insertion.
    #[must_use]
    pub fn get(&self, address: Address, side: Side) -> Option<&R> {
        let primary = match side {
            Side::Primary => address,
            Side::Secondary => *self.by_secondary.get(&address)?,
        };

        self.by_primary.get(&primary).map(|(_, record)| record)
    }

    /// Returns the opposite-side address of the match involving `address`.
    #[must_use]
    pub fn opposite(&self, address: Address, side: Side) -> Option<Address> {
        match side {
            Side::Primary => self.by_primary.get(&address).map(|&(s, _)| s),
            Side::Secondary => self.by_secondary.get(&address).copied(),
        }
    }

    /// Returns `true` if `address` participates in a match on `side`.
    #[must_use]
    pub fn contains(&self, address: Address, side: Side) -> bool {
        match side {
            Side::Primary => self.by_primary.contains_key(&address),
            Side::Secondary => self.by_secondary.contains_key(&address),
        }
    }

    /// Returns the number of matches in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_primary.len()
    }

    /// Returns `true` if the table holds no matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_primary.is_empty()
    }

    /// Removes every match. Used when the diff session closes.
    pub fn clear(&mut self) {
        self.by_primary.clear();
        self.by_secondary.clear();
    }

    /// Iterates over all matches as `(primary, secondary, record)`.
    ///
    /// Iteration order is unspecified; callers needing display order sort by
    /// address or go through the alignment sorter.
    pub fn iter(&self) -> impl Iterator<Item = (Address, Address, &R)> {
        self.by_primary
            .iter()
            .map(|(&primary, entry)| (primary, entry.0, &entry.1))
    }
}
