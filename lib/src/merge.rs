use crate::afi::{Afi, Bits};
use crate::cidr::Range;

/// Coalesce overlapping and adjacent ranges into a minimal covering set.
///
/// The input may be unordered and may contain duplicates. The output is
/// sorted ascending by start address, and no two output ranges overlap or
/// touch. Collapsing *adjacent* ranges (not just overlapping ones) is what
/// lets decomposition discover shorter prefixes: `10.0.0.0/25` and
/// `10.0.0.128/25` must become one range before either can become a `/24`.
pub fn merge_ranges<A: Afi>(mut ranges: Vec<Range<A>>) -> Vec<Range<A>> {
    if ranges.is_empty() {
        return ranges;
    }
    ranges.sort_by_key(Range::start);
    let mut merged = Vec::new();
    let mut cur_start = ranges[0].start();
    let mut cur_end = ranges[0].end();
    for range in &ranges[1..] {
        // `start <= cur_end + 1` means overlap or exact adjacency; the
        // checked form keeps the comparison sound when cur_end is the top
        // of the address space.
        let contiguous = match cur_end.checked_add(A::Bits::ONE) {
            Some(next) => range.start() <= next,
            None => true,
        };
        if contiguous {
            if range.end() > cur_end {
                cur_end = range.end();
            }
        } else {
            merged.push(Range::new(cur_start, cur_end));
            cur_start = range.start();
            cur_end = range.end();
        }
    }
    merged.push(Range::new(cur_start, cur_end));
    merged
}
