//! Syntax predicates consumed by the aggregation core and the I/O adapters.
//!
//! All predicates are total: any input maps to `true` or `false`, never a
//! panic. They are the filtering boundary described in the error policy;
//! the algorithms behind them assume validated input.

use crate::afi::{Afi, Ipv4, Ipv6};
use crate::cidr::Cidr;

pub use crate::aspath::valid_as_path;

/// Is `text` a well formed IPv4 CIDR (`a.b.c.d/len`, len 0..=32)?
pub fn valid_ipv4_cidr(text: &str) -> bool {
    Cidr::<Ipv4>::parse(text).is_ok()
}

/// Is `text` a well formed IPv6 CIDR (`addr/len`, len 0..=128)?
pub fn valid_ipv6_cidr(text: &str) -> bool {
    Cidr::<Ipv6>::parse(text).is_ok()
}

/// Is `text` a well formed CIDR of either family?
pub fn valid_cidr(text: &str) -> bool {
    valid_ipv4_cidr(text) || valid_ipv6_cidr(text)
}

/// Is `text` a bare IPv4 address (no prefix length)?
pub fn valid_ipv4_addr(text: &str) -> bool {
    Ipv4::parse_addr(text).is_ok()
}

/// Is `text` a bare IPv6 address (no prefix length)?
pub fn valid_ipv6_addr(text: &str) -> bool {
    Ipv6::parse_addr(text).is_ok()
}

/// Is `text` a bare IP address of either family?
pub fn valid_ip_addr(text: &str) -> bool {
    valid_ipv4_addr(text) || valid_ipv6_addr(text)
}
