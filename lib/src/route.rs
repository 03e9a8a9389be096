use std::collections::HashMap;

use crate::aspath::{shorter_as_path, valid_as_path};
use crate::error::Error;
use crate::validate::valid_cidr;

/// A validated `(prefix, AS_PATH)` record.
///
/// Construction is the validation boundary: a `Route` always carries a well
/// formed CIDR and either a well formed AS_PATH or none at all (aggregated
/// routes have no meaningful path).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    prefix: String,
    as_path: String,
}

impl Route {
    /// Build a route from raw prefix and AS_PATH strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] or [`Error::InvalidAsPath`] if
    /// either field fails validation.
    pub fn new(prefix: &str, as_path: &str) -> Result<Self, Error> {
        let prefix = prefix.trim();
        let as_path = as_path.trim();
        if !valid_cidr(prefix) {
            return Err(Error::InvalidPrefix {
                family: "ip",
                text: prefix.to_string(),
            });
        }
        if !valid_as_path(as_path) {
            return Err(Error::InvalidAsPath(as_path.to_string()));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            as_path: as_path.to_string(),
        })
    }

    /// Build a route carrying only a prefix, e.g. an aggregated block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] if the prefix fails validation.
    pub fn prefix_only(prefix: &str) -> Result<Self, Error> {
        let prefix = prefix.trim();
        if !valid_cidr(prefix) {
            return Err(Error::InvalidPrefix {
                family: "ip",
                text: prefix.to_string(),
            });
        }
        Ok(Self {
            prefix: prefix.to_string(),
            as_path: String::new(),
        })
    }

    /// The route's destination prefix in CIDR notation.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The route's AS_PATH; empty for prefix-only routes.
    pub fn as_path(&self) -> &str {
        &self.as_path
    }

    /// Is this the default route of either family?
    pub fn is_default(&self) -> bool {
        self.prefix == "0.0.0.0/0" || self.prefix == "::/0"
    }
}

/// Produce the next validated route record, or end-of-data.
///
/// Implemented by the file adapters (CSV, plain text); an external MRT
/// decoder would implement the same trait. The core consumes only this
/// interface and never touches files or wire formats.
pub trait RouteSource {
    /// Next record, `Ok(None)` at end-of-data.
    ///
    /// # Errors
    ///
    /// Implementations surface I/O failures; records that merely fail
    /// validation are expected to be skipped, not returned as errors.
    fn next_route(&mut self) -> Result<Option<Route>, Error>;
}

/// Consume validated route records.
pub trait RouteSink {
    /// Write one record.
    ///
    /// # Errors
    ///
    /// Implementations surface I/O failures.
    fn write_route(&mut self, route: &Route) -> Result<(), Error>;
}

/// An insertion-ordered route collection keyed by prefix, keeping the route
/// with the fewest AS hops for each prefix.
///
/// The first route seen for a prefix wins ties; only a strictly shorter
/// AS_PATH replaces it.
#[derive(Debug, Default)]
pub struct RouteTable {
    index: HashMap<String, usize>,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, preferring the shortest AS_PATH per prefix.
    ///
    /// Returns `true` if the table changed.
    pub fn insert(&mut self, route: Route) -> bool {
        match self.index.get(route.prefix()) {
            Some(&slot) => {
                if shorter_as_path(route.as_path(), self.routes[slot].as_path()) {
                    log::debug!(
                        "preferring shorter AS_PATH for {}: {}",
                        route.prefix(),
                        route.as_path()
                    );
                    self.routes[slot] = route;
                    true
                } else {
                    false
                }
            }
            None => {
                log::debug!("adding route {} via {}", route.prefix(), route.as_path());
                let slot = self.routes.len();
                _ = self.index.insert(route.prefix().to_string(), slot);
                self.routes.push(route);
                true
            }
        }
    }

    /// Routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of distinct prefixes held.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl IntoIterator for RouteTable {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

impl Extend<Route> for RouteTable {
    fn extend<T: IntoIterator<Item = Route>>(&mut self, iter: T) {
        for route in iter {
            _ = self.insert(route);
        }
    }
}
