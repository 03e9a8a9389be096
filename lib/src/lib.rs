//! Support library for `bgputil`.
//!
//! Pure routing-table processing primitives: CIDR parsing and formatting,
//! prefix aggregation (interval merge and minimal CIDR decomposition) for
//! both address families, and Cisco IOS style AS_PATH matching. All I/O
//! lives in the adapters that feed this library.
#![doc(html_root_url = "https://docs.rs/bgputil/0.1.0")]
#![warn(missing_docs)]

/// Address families and the integer types that carry them.
pub mod afi;
/// Prefix aggregation pipeline.
pub mod aggregate;
/// AS_PATH validation and pattern matching.
pub mod aspath;
/// CIDR blocks, address ranges and their textual codec.
pub mod cidr;
/// Minimal CIDR decomposition of merged ranges.
pub mod decompose;
/// Error condition variants.
pub mod error;
/// Coalescing of overlapping and adjacent address ranges.
pub mod merge;
/// Route records, sources, sinks and shortest-path selection.
pub mod route;
/// Syntax predicates for prefixes, addresses and AS paths.
pub mod validate;

pub use self::afi::{Afi, Ipv4, Ipv6};
pub use self::aggregate::{aggregate, summary};
pub use self::aspath::{matches, MatchMode};
pub use self::cidr::{Cidr, Range};
pub use self::error::Error;
pub use self::route::{Route, RouteSink, RouteSource, RouteTable};
