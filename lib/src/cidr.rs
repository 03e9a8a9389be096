use std::fmt;
use std::str::FromStr;

use crate::afi::{parse_decimal, Afi, Bits};
use crate::error::Error;

/// An inclusive range of addresses of a single family.
///
/// `start <= end` always holds. Ranges are plain intervals; they need not be
/// aligned to any CIDR boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range<A: Afi> {
    start: A::Bits,
    end: A::Bits,
}

impl<A: Afi> Range<A> {
    /// Construct a range from its inclusive bounds.
    pub fn new(start: A::Bits, end: A::Bits) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// First address of the range.
    pub fn start(&self) -> A::Bits {
        self.start
    }

    /// Last address of the range.
    pub fn end(&self) -> A::Bits {
        self.end
    }
}

/// A power-of-two aligned block of addresses in CIDR notation.
///
/// Invariant: `base` is a multiple of `2^(MAX_LENGTH - length)`, i.e. no
/// host bits are set. Parsing masks host bits off rather than rejecting
/// them, matching router behavior for prefix lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cidr<A: Afi> {
    base: A::Bits,
    length: u8,
}

impl<A: Afi> Cidr<A> {
    /// Construct a block from an aligned base address and prefix length.
    pub(crate) fn new(base: A::Bits, length: u8) -> Self {
        debug_assert!(length <= A::MAX_LENGTH);
        debug_assert!(base & A::hostmask(length) == A::Bits::ZERO);
        Self { base, length }
    }

    /// Network address of the block.
    pub fn base(&self) -> A::Bits {
        self.base
    }

    /// Prefix length of the block.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// The inclusive address range covered by the block.
    ///
    /// Computed as `base | hostmask` so that a `/0` covers the full address
    /// space without overflowing.
    pub fn range(&self) -> Range<A> {
        Range::new(self.base, self.base | A::hostmask(self.length))
    }

    /// Parse CIDR notation, masking off any host bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] unless `text` is
    /// `"<address>/<length>"` with a well formed address of family `A` and a
    /// decimal length within the family's bounds.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidPrefix {
            family: A::NAME,
            text: text.to_string(),
        };
        let (addr, length) = text.split_once('/').ok_or_else(invalid)?;
        let length = parse_decimal(length)
            .filter(|&len| len <= u64::from(A::MAX_LENGTH))
            .ok_or_else(invalid)? as u8;
        let addr = A::parse_addr(addr).map_err(|_| invalid())?;
        Ok(Self::new(addr & A::netmask(length), length))
    }
}

impl<A: Afi> fmt::Display for Cidr<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", A::format_addr(self.base), self.length)
    }
}

impl<A: Afi> FromStr for Cidr<A> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
