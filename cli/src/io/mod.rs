//! File adapters: the route sources and sinks the core pipeline consumes.

pub(crate) mod csv;
pub(crate) mod plain;
pub(crate) mod script;
