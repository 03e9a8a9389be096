use bgputil::aggregate::aggregate;
use bgputil::aspath::{matches, MatchMode};
use bgputil::{Error, Ipv4, Ipv6, Route, RouteSink, RouteSource, RouteTable};

/// Drain a source into a route table.
///
/// Default routes are excluded, records matching none of the AS_PATH
/// patterns (when any are given) are dropped, and the table keeps the
/// shortest AS_PATH per prefix.
pub(crate) fn collect<S: RouteSource>(
    source: &mut S,
    patterns: &[String],
    mode: MatchMode,
) -> Result<RouteTable, Error> {
    let mut table = RouteTable::new();
    while let Some(route) = source.next_route()? {
        if route.is_default() {
            log::debug!("excluding default route {}", route.prefix());
            continue;
        }
        if !patterns.is_empty()
            && !patterns
                .iter()
                .any(|pattern| matches(route.as_path(), pattern, mode))
        {
            log::debug!(
                "AS_PATH filter rejected {} ({})",
                route.prefix(),
                route.as_path()
            );
            continue;
        }
        _ = table.insert(route);
    }
    log::info!("collected {} routes", table.len());
    Ok(table)
}

/// Replace a table's routes with their aggregated prefix-only equivalents.
///
/// IPv4 and IPv6 prefixes aggregate independently; the output lists IPv4
/// blocks first. Aggregated blocks have no single origin, so the resulting
/// routes carry no AS_PATH.
pub(crate) fn aggregated_routes(table: &RouteTable) -> Result<Vec<Route>, Error> {
    let mut routes = Vec::new();
    for block in aggregate::<Ipv4, _, _>(table.iter().map(Route::prefix)) {
        routes.push(Route::prefix_only(&block.to_string())?);
    }
    for block in aggregate::<Ipv6, _, _>(table.iter().map(Route::prefix)) {
        routes.push(Route::prefix_only(&block.to_string())?);
    }
    Ok(routes)
}

/// Write routes to a sink, downgrading family mismatches to warnings.
pub(crate) fn emit<'a, K, I>(sink: &mut K, routes: I) -> Result<usize, Error>
where
    K: RouteSink,
    I: IntoIterator<Item = &'a Route>,
{
    let mut written = 0;
    for route in routes {
        match sink.write_route(route) {
            Ok(()) => written += 1,
            Err(err @ Error::FamilyMismatch { .. }) => log::warn!("skipping route: {err}"),
            Err(err) => return Err(err),
        }
    }
    Ok(written)
}
