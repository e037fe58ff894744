//! Core address types shared by every component of the correspondence model.
//!
//! A diff session compares two binaries, called the primary and the secondary.
//! Locations in either binary are identified by an [`Address`], a side is
//! selected with [`Side`], and one unit of correspondence between the two
//! binaries is an [`AddressPair`].

use std::fmt;

use strum::EnumIter;

/// A memory location in one of the two binaries under comparison.
///
/// Addresses are plain 64-bit values with a total order; the crate never
/// interprets them beyond comparison and equality. The newtype prevents
/// accidental mixing with row indices and other integers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u64);

impl Address {
    /// Creates a new address from a raw 64-bit value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Address(value)
    }

    /// Returns the raw address value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address(value)
    }
}

impl From<Address> for u64 {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{:x})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Selects one of the two binaries in a diff session.
///
/// Most operations in this crate are parameterized by `Side` and treat the
/// two binaries symmetrically except for the concrete field they access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Side {
    /// The first binary of the comparison.
    Primary,
    /// The second binary of the comparison.
    Secondary,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(&self) -> Side {
        match self {
            Side::Primary => Side::Secondary,
            Side::Secondary => Side::Primary,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Primary => write!(f, "primary"),
            Side::Secondary => write!(f, "secondary"),
        }
    }
}

/// One unit of correspondence between the two binaries.
///
/// A pair carries a primary address, a secondary address, or both. Both
/// present means the two locations were matched by the upstream diffing
/// algorithm; exactly one present means the location has no counterpart in
/// the other binary. A pair with neither side present is rejected at
/// construction, so every `AddressPair` in circulation satisfies the
/// at-least-one-side invariant.
///
/// # Examples
///
/// ```rust
/// use diffscope::{Address, AddressPair, Side};
///
/// let matched = AddressPair::matched(Address::new(0x1000), Address::new(0x2000));
/// assert!(matched.is_matched());
/// assert_eq!(matched.address(Side::Secondary), Some(Address::new(0x2000)));
///
/// let lone = AddressPair::primary_only(Address::new(0x1400));
/// assert!(!lone.is_matched());
/// assert_eq!(lone.address(Side::Secondary), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressPair {
    primary: Option<Address>,
    secondary: Option<Address>,
}

impl AddressPair {
    /// Creates a pair from two optional sides, rejecting the empty pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPair`](crate::Error::EmptyPair) if both sides
    /// are `None`.
    pub fn new(primary: Option<Address>, secondary: Option<Address>) -> crate::Result<Self> {
        if primary.is_none() && secondary.is_none() {
            return Err(crate::Error::EmptyPair);
        }

        Ok(AddressPair { primary, secondary })
    }

    /// Creates a matched pair with both sides present.
    #[must_use]
    pub const fn matched(primary: Address, secondary: Address) -> Self {
        AddressPair {
            primary: Some(primary),
            secondary: Some(secondary),
        }
    }

    /// Creates an unmatched pair that exists only in the primary binary.
    #[must_use]
    pub const fn primary_only(primary: Address) -> Self {
        AddressPair {
            primary: Some(primary),
            secondary: None,
        }
    }

    /// Creates an unmatched pair that exists only in the secondary binary.
    #[must_use]
    pub const fn secondary_only(secondary: Address) -> Self {
        AddressPair {
            primary: None,
            secondary: Some(secondary),
        }
    }

    /// Returns the address on the requested side, if present.
    #[must_use]
    pub const fn address(&self, side: Side) -> Option<Address> {
        match side {
            Side::Primary => self.primary,
            Side::Secondary => self.secondary,
        }
    }

    /// Returns the primary address, if present.
    #[must_use]
    pub const fn primary(&self) -> Option<Address> {
        self.primary
    }

    /// Returns the secondary address, if present.
    #[must_use]
    pub const fn secondary(&self) -> Option<Address> {
        self.secondary
    }

    /// Returns `true` if both sides are present.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.primary.is_some() && self.secondary.is_some()
    }

    /// Returns the pair with primary and secondary exchanged.
    ///
    /// Used by the alignment sorter to reduce the secondary-anchored case to
    /// the primary-anchored one.
    #[must_use]
    pub const fn swapped(&self) -> Self {
        AddressPair {
            primary: self.secondary,
            secondary: self.primary,
        }
    }
}

impl fmt::Display for AddressPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.primary, self.secondary) {
            (Some(p), Some(s)) => write!(f, "({p}, {s})"),
            (Some(p), None) => write!(f, "({p}, -)"),
            (None, Some(s)) => write!(f, "(-, {s})"),
            (None, None) => write!(f, "(-, -)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn address_ordering_and_value() {
        let a = Address::new(0x1000);
        let b = Address::from(0x2000);

        assert!(a < b);
        assert_eq!(a.value(), 0x1000);
        assert_eq!(u64::from(b), 0x2000);
    }

    #[test]
    fn address_display_is_hex() {
        assert_eq!(Address::new(0xdead).to_string(), "0x000000000000dead");
    }

    #[test]
    fn side_opposite_is_an_involution() {
        for side in Side::iter() {
            assert_ne!(side.opposite(), side);
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn empty_pair_is_rejected() {
        assert!(matches!(
            AddressPair::new(None, None),
            Err(crate::Error::EmptyPair)
        ));
    }

    #[test]
    fn pair_accessors() {
        let pair = AddressPair::matched(Address::new(1), Address::new(2));
        assert!(pair.is_matched());
        assert_eq!(pair.address(Side::Primary), Some(Address::new(1)));
        assert_eq!(pair.address(Side::Secondary), Some(Address::new(2)));

        let lone = AddressPair::secondary_only(Address::new(7));
        assert!(!lone.is_matched());
        assert_eq!(lone.address(Side::Primary), None);
        assert_eq!(lone.address(Side::Secondary), Some(Address::new(7)));
    }

    #[test]
    fn swapped_exchanges_sides() {
        let pair = AddressPair::matched(Address::new(1), Address::new(2));
        let swapped = pair.swapped();

        assert_eq!(swapped.primary(), Some(Address::new(2)));
        assert_eq!(swapped.secondary(), Some(Address::new(1)));
        assert_eq!(swapped.swapped(), pair);

        let lone = AddressPair::primary_only(Address::new(3)).swapped();
        assert_eq!(lone.primary(), None);
        assert_eq!(lone.secondary(), Some(Address::new(3)));
    }
}
