//! Stable interleaving of two partially matched address sequences.
//!
//! When the diff is displayed as two parallel columns, matched rows must
//! line up while rows that exist in only one binary are woven in where a
//! naive merge would place them, without disturbing either side's own order
//! of matched elements. [`align`] produces that single total order.
//!
//! # Algorithm
//!
//! The secondary-anchored case is reduced to the primary-anchored one by
//! swapping every pair on the way in and out. The pairs are then split into
//! a primary-sorted list (everything with a primary address) and a
//! secondary-sorted list (everything with a secondary address). A single
//! walk over the primary list emits each row in anchor order; before every
//! matched row, a fallback cursor flushes the secondary-only rows that
//! precede the row's counterpart in the secondary list, and whatever the
//! cursor has not flushed when the walk ends trails the output.
//!
//! The output is always a permutation of the input. Matched rows keep their
//! relative anchor-side order; each unmatched row appears exactly once,
//! between the two matched rows whose opposite-side addresses bracket it.

use std::collections::HashMap;

use crate::address::{Address, AddressPair, Side};

/// Linearizes `pairs` into one display order anchored on `anchor`.
///
/// # Examples
///
/// ```rust
/// use diffscope::{align, Address, AddressPair, Side};
///
/// let pairs = [
///     AddressPair::matched(Address::new(1), Address::new(10)),
///     AddressPair::primary_only(Address::new(2)),
///     AddressPair::secondary_only(Address::new(20)),
///     AddressPair::matched(Address::new(3), Address::new(30)),
/// ];
///
/// let ordered = align(&pairs, Side::Primary);
/// assert_eq!(
///     ordered,
///     vec![
///         AddressPair::matched(Address::new(1), Address::new(10)),
///         AddressPair::primary_only(Address::new(2)),
///         AddressPair::secondary_only(Address::new(20)),
///         AddressPair::matched(Address::new(3), Address::new(30)),
///     ]
/// );
/// ```
#[must_use]
pub fn align(pairs: &[AddressPair], anchor: Side) -> Vec<AddressPair> {
    match anchor {
        Side::Primary => align_anchored(pairs),
        Side::Secondary => {
            let swapped: Vec<AddressPair> = pairs.iter().map(AddressPair::swapped).collect();
            align_anchored(&swapped)
                .iter()
                .map(AddressPair::swapped)
                .collect()
        }
    }
}

/// The primary-anchored merge walk.
fn align_anchored(pairs: &[AddressPair]) -> Vec<AddressPair> {
    let mut primary_list: Vec<AddressPair> = pairs
        .iter()
        .copied()
        .filter(|pair| pair.primary().is_some())
        .collect();
    primary_list.sort_by_key(AddressPair::primary);

    let mut secondary_list: Vec<AddressPair> = pairs
        .iter()
        .copied()
        .filter(|pair| pair.secondary().is_some())
        .collect();
    secondary_list.sort_by_key(AddressPair::secondary);

    // one side covers everything: that side's own order is the answer
    if primary_list.len() == pairs.len() {
        return primary_list;
    }
    if secondary_list.len() == pairs.len() {
        return secondary_list;
    }

    // positions of matched rows in the secondary list; on duplicate
    // secondary addresses the first occurrence in sorted order wins
    let mut matched_position: HashMap<Address, usize> = HashMap::new();
    for (position, pair) in secondary_list.iter().enumerate() {
        if pair.is_matched() {
            if let Some(secondary) = pair.secondary() {
                matched_position.entry(secondary).or_insert(position);
            }
        }
    }

    let mut result = Vec::with_capacity(pairs.len());
    let mut cursor = 0_usize;

    for row in &primary_list {
        let Some(secondary) = row.secondary() else {
            result.push(*row);
            continue;
        };

        if let Some(&position) = matched_position.get(&secondary) {
            if position >= cursor {
                flush_unmatched(&secondary_list, cursor..position, &mut result);
                cursor = position + 1;
            }
        }
        result.push(*row);
    }

    flush_unmatched(&secondary_list, cursor..secondary_list.len(), &mut result);

    result
}

/// Appends the secondary-only rows of `secondary_list[range]` to `result`.
///
/// Matched rows inside the range are emitted by the primary walk and must
/// not be duplicated here; with a non-crossing matching the range never
/// contains any, but the walk stays a permutation even when it does.
fn flush_unmatched(
    secondary_list: &[AddressPair],
    range: std::ops::Range<usize>,
    result: &mut Vec<AddressPair>,
) {
    for pair in &secondary_list[range] {
        if !pair.is_matched() {
            result.push(*pair);
        }
    }
}
