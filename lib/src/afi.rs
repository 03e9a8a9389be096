use std::fmt::Debug;
use std::hash::Hash;
use std::net::Ipv6Addr;
use std::ops::{Add, BitAnd, BitOr, BitXor, Not, Shl, Shr, Sub};
use std::str::FromStr;

use crate::error::Error;

/// Unsigned integer operations required by the aggregation algorithms.
///
/// Implemented for `u64` (IPv4, a safe superset of 32 bits) and `u128`
/// (IPv6). All arithmetic is exact; block sizes are always derived from bit
/// positions, never from logarithms.
pub trait Bits:
    Copy
    + Clone
    + Debug
    + Eq
    + Ord
    + Hash
    + Add<Output = Self>
    + Sub<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + 'static
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;
    /// All bits of the representation set.
    const MAX: Self;
    /// Width of the underlying representation in bits.
    const REPR_WIDTH: u32;

    /// Checked addition.
    fn checked_add(self, rhs: Self) -> Option<Self>;
    /// Checked subtraction.
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    /// Number of trailing zero bits.
    fn trailing_zeros(self) -> u32;
    /// Number of leading zero bits (relative to the representation width).
    fn leading_zeros(self) -> u32;
}

macro_rules! impl_bits {
    ( $( $ty:ty ),* ) => {
        $(
            impl Bits for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$ty>::MAX;
                const REPR_WIDTH: u32 = <$ty>::BITS;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_add(self, rhs)
                }

                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_sub(self, rhs)
                }

                fn trailing_zeros(self) -> u32 {
                    <$ty>::trailing_zeros(self)
                }

                fn leading_zeros(self) -> u32 {
                    <$ty>::leading_zeros(self)
                }
            }
        )*
    }
}

impl_bits!(u64, u128);

/// An IP address family.
///
/// Determines the integer width, the maximum prefix length and the textual
/// codec for addresses of the family. Aggregation runs are generic over this
/// trait and never mix families.
pub trait Afi: Copy + Clone + Debug + Eq + Hash + 'static {
    /// Integer type carrying addresses of this family.
    type Bits: Bits;

    /// Maximum prefix length (32 or 128).
    const MAX_LENGTH: u8;
    /// Lower-case family name, as used in log messages and help text.
    const NAME: &'static str;
    /// Prefix length of the block size used as the unit when summarizing
    /// addressable space: `/32` (single addresses) for IPv4, `/64` for IPv6
    /// by convention.
    const SUMMARY_UNIT_LENGTH: u8;

    /// Parse a bare textual address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if `text` is not a well formed
    /// address of this family.
    fn parse_addr(text: &str) -> Result<Self::Bits, Error>;

    /// Render an address in its canonical textual form.
    fn format_addr(addr: Self::Bits) -> String;

    /// Mask with the top `length` bits of the family's address width set.
    ///
    /// `length == 0` yields the empty mask, so a `/0` covers every address.
    fn netmask(length: u8) -> Self::Bits {
        debug_assert!(length <= Self::MAX_LENGTH);
        if length == 0 {
            Self::Bits::ZERO
        } else {
            Self::address_mask() & (Self::address_mask() << u32::from(Self::MAX_LENGTH - length))
        }
    }

    /// Complement of [`Self::netmask`] within the address width.
    fn hostmask(length: u8) -> Self::Bits {
        Self::netmask(length) ^ Self::address_mask()
    }

    /// Mask covering the full address width of the family.
    fn address_mask() -> Self::Bits {
        Self::Bits::MAX >> (Self::Bits::REPR_WIDTH - u32::from(Self::MAX_LENGTH))
    }
}

/// The IPv4 address family.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Ipv4 {}

/// The IPv6 address family.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Ipv6 {}

impl Afi for Ipv4 {
    type Bits = u64;

    const MAX_LENGTH: u8 = 32;
    const NAME: &'static str = "ipv4";
    const SUMMARY_UNIT_LENGTH: u8 = 32;

    fn parse_addr(text: &str) -> Result<Self::Bits, Error> {
        let invalid = || Error::InvalidAddress {
            family: Self::NAME,
            text: text.to_string(),
        };
        let mut addr: u64 = 0;
        let mut octets = 0usize;
        for part in text.split('.') {
            let octet = parse_decimal(part).ok_or_else(invalid)?;
            if octet > 255 {
                return Err(invalid());
            }
            addr = (addr << 8) | octet;
            octets += 1;
        }
        if octets == 4 {
            Ok(addr)
        } else {
            Err(invalid())
        }
    }

    fn format_addr(addr: Self::Bits) -> String {
        format!(
            "{}.{}.{}.{}",
            (addr >> 24) & 0xff,
            (addr >> 16) & 0xff,
            (addr >> 8) & 0xff,
            addr & 0xff
        )
    }
}

impl Afi for Ipv6 {
    type Bits = u128;

    const MAX_LENGTH: u8 = 128;
    const NAME: &'static str = "ipv6";
    const SUMMARY_UNIT_LENGTH: u8 = 64;

    fn parse_addr(text: &str) -> Result<Self::Bits, Error> {
        Ipv6Addr::from_str(text)
            .map(u128::from)
            .map_err(|_| Error::InvalidAddress {
                family: Self::NAME,
                text: text.to_string(),
            })
    }

    fn format_addr(addr: Self::Bits) -> String {
        Ipv6Addr::from(addr).to_string()
    }
}

/// Parse an unsigned decimal token consisting only of ASCII digits.
///
/// Stricter than `str::parse`, which tolerates a leading `+`.
pub(crate) fn parse_decimal(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
