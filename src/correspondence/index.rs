//! Dual-indexed sorted address store with bidirectional lookup.
//!
//! The index keeps two pairs of parallel vectors, one pair per lookup
//! direction: a sorted vector of addresses and an index-aligned vector of
//! the addresses assigned on the opposite side. Lookups binary-search the
//! sorted vector and read the assigned vector at the found position.
//!
//! The layout is deliberately flat rather than tree-based: diff sessions can
//! contain tens of thousands of matched functions and basic blocks, lookups
//! happen on every node render and every search, and removals are rare
//! interactive edits. Binary search over a contiguous vector wins on both
//! counts, and a removal simply rebuilds the four vectors without the pair
//! and swaps them in as one step, so an interrupted removal can never leave
//! the directions misaligned.

use crate::address::{Address, AddressPair, Side};

/// Bidirectional sorted index over the address pairs of one diff session.
///
/// Built once from the session's pair set. Matched pairs are reachable from
/// both directions; unmatched pairs contribute only to the direction of
/// their present side, with a `None` sentinel as the assigned counterpart.
///
/// # Examples
///
/// ```rust
/// use diffscope::{Address, AddressPair, AddressCorrespondenceIndex, Side};
///
/// let pairs = [
///     AddressPair::matched(Address::new(0x1000), Address::new(0x8000)),
///     AddressPair::primary_only(Address::new(0x1400)),
/// ];
/// let index = AddressCorrespondenceIndex::build(&pairs);
///
/// assert_eq!(
///     index.opposite_address(Address::new(0x1000), Side::Primary),
///     Some(Address::new(0x8000))
/// );
/// assert_eq!(index.opposite_address(Address::new(0x1400), Side::Primary), None);
/// assert!(index.contains(Address::new(0x8000), Side::Secondary));
/// ```
pub struct AddressCorrespondenceIndex {
    /// Primary addresses in ascending order (the primary→secondary direction).
    primary_sorted: Vec<Address>,
    /// Secondary address assigned to the i-th smallest primary, `None` if unmatched.
    secondary_assigned: Vec<Option<Address>>,
    /// Secondary addresses in ascending order (the secondary→primary direction).
    secondary_sorted: Vec<Address>,
    /// Primary address assigned to the i-th smallest secondary, `None` if unmatched.
    primary_assigned: Vec<Option<Address>>,
}

impl AddressCorrespondenceIndex {
    /// Builds the index from the session's address pairs.
    ///
    /// Sorting is stable on the defining side's address, so pairs sharing an
    /// address keep their input order. Pairs missing a side contribute only
    /// to the other direction.
    #[must_use]
    pub fn build(pairs: &[AddressPair]) -> Self {
        let mut by_primary: Vec<(Address, Option<Address>)> = pairs
            .iter()
            .filter_map(|pair| pair.primary().map(|p| (p, pair.secondary())))
            .collect();
        by_primary.sort_by_key(|&(primary, _)| primary);

        let mut by_secondary: Vec<(Address, Option<Address>)> = pairs
            .iter()
            .filter_map(|pair| pair.secondary().map(|s| (s, pair.primary())))
            .collect();
        by_secondary.sort_by_key(|&(secondary, _)| secondary);

        AddressCorrespondenceIndex {
            primary_sorted: by_primary.iter().map(|&(p, _)| p).collect(),
            secondary_assigned: by_primary.iter().map(|&(_, s)| s).collect(),
            secondary_sorted: by_secondary.iter().map(|&(s, _)| s).collect(),
            primary_assigned: by_secondary.iter().map(|&(_, p)| p).collect(),
        }
    }

    /// Returns the position of `address` in the given side's sorted vector.
    ///
    /// Binary search over the side-appropriate vector; `None` means the
    /// address does not exist on that side. No negative insertion-point
    /// encoding leaks out of this API.
    #[must_use]
    pub fn get_index(&self, address: Address, side: Side) -> Option<usize> {
        match side {
            Side::Primary => self.primary_sorted.binary_search(&address).ok(),
            Side::Secondary => self.secondary_sorted.binary_search(&address).ok(),
        }
    }

    /// Returns the counterpart of `address` on the opposite side.
    ///
    /// `None` both when the address is unknown on the given side and when it
    /// is known but unmatched.
    #[must_use]
    pub fn opposite_address(&self, address: Address, side: Side) -> Option<Address> {
        let position = self.get_index(address, side)?;

        match side {
            Side::Primary => self.secondary_assigned[position],
            Side::Secondary => self.primary_assigned[position],
        }
    }

    /// Returns `true` if `address` exists on the given side.
    #[must_use]
    pub fn contains(&self, address: Address, side: Side) -> bool {
        self.get_index(address, side).is_some()
    }

    /// Returns `true` if the exact (primary, secondary) match exists.
    ///
    /// Verifies that the assigned counterpart at the primary position equals
    /// `secondary`, so a stale or partial pairing never reads as present.
    #[must_use]
    pub fn contains_pair(&self, primary: Address, secondary: Address) -> bool {
        match self.get_index(primary, Side::Primary) {
            Some(position) => self.secondary_assigned[position] == Some(secondary),
            None => false,
        }
    }

    /// Removes one matched pair from both directions.
    ///
    /// Returns `false` without mutation when either side's lookup fails or
    /// the two addresses are not assigned to each other. On success, all
    /// four vectors are rebuilt with the pair excised and swapped in as one
    /// step; the directions can never end up with differing lengths.
    pub fn remove(&mut self, primary: Address, secondary: Address) -> bool {
        let Some(primary_position) = self.get_index(primary, Side::Primary) else {
            return false;
        };
        let Some(secondary_position) = self.get_index(secondary, Side::Secondary) else {
            return false;
        };

        if self.secondary_assigned[primary_position] != Some(secondary)
            || self.primary_assigned[secondary_position] != Some(primary)
        {
            return false;
        }

        self.primary_sorted = excised(&self.primary_sorted, primary_position);
        self.secondary_assigned = excised(&self.secondary_assigned, primary_position);
        self.secondary_sorted = excised(&self.secondary_sorted, secondary_position);
        self.primary_assigned = excised(&self.primary_assigned, secondary_position);

        true
    }

    /// Returns the number of address pairs currently represented.
    ///
    /// Matched pairs appear in both directions but count once; pairs present
    /// only in the secondary binary show up as `None` assignments in the
    /// secondary→primary direction.
    #[must_use]
    pub fn len(&self) -> usize {
        let secondary_only = self
            .primary_assigned
            .iter()
            .filter(|assigned| assigned.is_none())
            .count();

        self.primary_sorted.len() + secondary_only
    }

    /// Returns `true` if the index holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary_sorted.is_empty() && self.secondary_sorted.is_empty()
    }

    /// Returns the number of matched pairs (both sides present).
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.secondary_assigned
            .iter()
            .filter(|assigned| assigned.is_some())
            .count()
    }

    /// Reconstructs the owned pair set in primary-sorted order.
    ///
    /// Matched and primary-only pairs come from the primary direction;
    /// secondary-only pairs follow in secondary-sorted order. This is the
    /// input handed to the alignment sorter after interactive removals.
    #[must_use]
    pub fn pairs(&self) -> Vec<AddressPair> {
        let mut result = Vec::with_capacity(self.len());

        for (position, &primary) in self.primary_sorted.iter().enumerate() {
            result.push(match self.secondary_assigned[position] {
                Some(secondary) => AddressPair::matched(primary, secondary),
                None => AddressPair::primary_only(primary),
            });
        }

        for (position, &secondary) in self.secondary_sorted.iter().enumerate() {
            if self.primary_assigned[position].is_none() {
                result.push(AddressPair::secondary_only(secondary));
            }
        }

        result
    }
}

/// Copies `source` into a new vector with the element at `index` excised.
fn excised<T: Copy>(source: &[T], index: usize) -> Vec<T> {
    let mut result = Vec::with_capacity(source.len().saturating_sub(1));
    result.extend_from_slice(&source[..index]);
    result.extend_from_slice(&source[index + 1..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(value: u64) -> Address {
        Address::new(value)
    }

    fn sample_pairs() -> Vec<AddressPair> {
        vec![
            AddressPair::matched(addr(3), addr(30)),
            AddressPair::matched(addr(1), addr(10)),
            AddressPair::primary_only(addr(2)),
            AddressPair::secondary_only(addr(20)),
        ]
    }

    #[test]
    fn bijection_for_matched_pairs() {
        let index = AddressCorrespondenceIndex::build(&sample_pairs());

        assert_eq!(
            index.opposite_address(addr(1), Side::Primary),
            Some(addr(10))
        );
        assert_eq!(
            index.opposite_address(addr(10), Side::Secondary),
            Some(addr(1))
        );
        assert_eq!(
            index.opposite_address(addr(3), Side::Primary),
            Some(addr(30))
        );
        assert_eq!(
            index.opposite_address(addr(30), Side::Secondary),
            Some(addr(3))
        );
    }

    #[test]
    fn unmatched_sides_have_no_counterpart() {
        let index = AddressCorrespondenceIndex::build(&sample_pairs());

        assert_eq!(index.opposite_address(addr(2), Side::Primary), None);
        assert_eq!(index.opposite_address(addr(20), Side::Secondary), None);
        assert!(index.contains(addr(2), Side::Primary));
        assert!(index.contains(addr(20), Side::Secondary));
        assert!(!index.contains(addr(2), Side::Secondary));
    }

    #[test]
    fn get_index_reflects_sorted_positions() {
        let index = AddressCorrespondenceIndex::build(&sample_pairs());

        assert_eq!(index.get_index(addr(1), Side::Primary), Some(0));
        assert_eq!(index.get_index(addr(2), Side::Primary), Some(1));
        assert_eq!(index.get_index(addr(3), Side::Primary), Some(2));
        assert_eq!(index.get_index(addr(30), Side::Secondary), Some(2));
        assert_eq!(index.get_index(addr(99), Side::Primary), None);
    }

    #[test]
    fn contains_pair_verifies_assignment() {
        let index = AddressCorrespondenceIndex::build(&sample_pairs());

        assert!(index.contains_pair(addr(1), addr(10)));
        assert!(!index.contains_pair(addr(1), addr(30)));
        assert!(!index.contains_pair(addr(2), addr(20)));
        assert!(!index.contains_pair(addr(99), addr(10)));
    }

    #[test]
    fn remove_excises_from_both_directions() {
        let mut index = AddressCorrespondenceIndex::build(&sample_pairs());
        assert_eq!(index.len(), 4);

        assert!(index.remove(addr(1), addr(10)));
        assert!(!index.contains_pair(addr(1), addr(10)));
        assert!(!index.contains(addr(1), Side::Primary));
        assert!(!index.contains(addr(10), Side::Secondary));
        assert_eq!(index.len(), 3);

        // second removal of the same pair is a no-op
        assert!(!index.remove(addr(1), addr(10)));
        assert_eq!(index.len(), 3);

        // the other pairs survive
        assert!(index.contains_pair(addr(3), addr(30)));
        assert!(index.contains(addr(2), Side::Primary));
        assert!(index.contains(addr(20), Side::Secondary));
    }

    #[test]
    fn remove_rejects_mismatched_addresses() {
        let mut index = AddressCorrespondenceIndex::build(&sample_pairs());

        // both addresses exist but belong to different matches
        assert!(!index.remove(addr(1), addr(30)));
        assert!(index.contains_pair(addr(1), addr(10)));
        assert!(index.contains_pair(addr(3), addr(30)));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn counts_and_pairs_roundtrip() {
        let index = AddressCorrespondenceIndex::build(&sample_pairs());

        assert_eq!(index.len(), 4);
        assert_eq!(index.matched_count(), 2);
        assert!(!index.is_empty());

        let mut rebuilt = index.pairs();
        let mut expected = sample_pairs();
        rebuilt.sort_by_key(|p| (p.primary(), p.secondary()));
        expected.sort_by_key(|p| (p.primary(), p.secondary()));
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn empty_build() {
        let index = AddressCorrespondenceIndex::build(&[]);

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.matched_count(), 0);
        assert_eq!(index.get_index(addr(1), Side::Primary), None);
        assert!(index.pairs().is_empty());
    }
}
