use crate::afi::{Afi, Bits};
use crate::cidr::Cidr;
use crate::decompose::decompose;
use crate::merge::merge_ranges;

/// Aggregate a stream of prefix strings into the minimal covering CIDR list.
///
/// Entries that do not parse as prefixes of family `A` are dropped, not
/// rejected: aggregation is best-effort over whatever valid input survives.
/// Each drop is reported through the `log` facade so adapters can surface
/// counts if they care. An input with no valid entries yields an empty list.
///
/// The output covers exactly the union of the valid input prefixes, in
/// ascending address order, with no overlaps and no two consecutive blocks
/// mergeable into a larger one.
pub fn aggregate<A, I, S>(prefixes: I) -> Vec<Cidr<A>>
where
    A: Afi,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ranges = prefixes
        .into_iter()
        .filter_map(|text| match Cidr::<A>::parse(text.as_ref()) {
            Ok(cidr) => Some(cidr.range()),
            Err(err) => {
                log::debug!("dropping entry: {err}");
                None
            }
        })
        .collect();
    merge_ranges(ranges)
        .into_iter()
        .flat_map(decompose)
        .collect()
}

/// Total addressable space covered by the aggregation of `prefixes`.
///
/// IPv4 counts individual addresses; IPv6 counts `/64`-sized blocks, the
/// conventional unit for IPv6 capacity (prefixes longer than `/64`
/// contribute nothing). The aggregated blocks are disjoint, so the sum
/// cannot overflow the family's integer type.
pub fn summary<A, I, S>(prefixes: I) -> A::Bits
where
    A: Afi,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate::<A, _, _>(prefixes)
        .iter()
        .map(|block| {
            if block.length() <= A::SUMMARY_UNIT_LENGTH {
                A::Bits::ONE << u32::from(A::SUMMARY_UNIT_LENGTH - block.length())
            } else {
                A::Bits::ZERO
            }
        })
        .fold(A::Bits::ZERO, |total, units| total + units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afi::{Ipv4, Ipv6};

    fn aggregate_v4(prefixes: &[&str]) -> Vec<String> {
        aggregate::<Ipv4, _, _>(prefixes)
            .iter()
            .map(Cidr::to_string)
            .collect()
    }

    fn aggregate_v6(prefixes: &[&str]) -> Vec<String> {
        aggregate::<Ipv6, _, _>(prefixes)
            .iter()
            .map(Cidr::to_string)
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate_v4(&[]).is_empty());
    }

    #[test]
    fn invalid_entries_are_dropped() {
        assert_eq!(
            aggregate_v4(&["not-a-prefix", "192.0.2.0/24", "2001:db8::/32"]),
            vec!["192.0.2.0/24"]
        );
        assert!(aggregate_v4(&["junk", "10.0.0.0/33"]).is_empty());
    }

    #[test]
    fn adjacent_halves_merge() {
        assert_eq!(
            aggregate_v4(&["192.168.0.0/25", "192.168.0.128/25"]),
            vec!["192.168.0.0/24"]
        );
    }

    #[test]
    fn non_adjacent_blocks_stay_apart() {
        assert_eq!(
            aggregate_v4(&["10.0.0.0/24", "10.0.2.0/24"]),
            vec!["10.0.0.0/24", "10.0.2.0/24"]
        );
    }

    #[test]
    fn both_halves_collapse_to_default() {
        assert_eq!(aggregate_v4(&["0.0.0.0/1", "128.0.0.0/1"]), vec!["0.0.0.0/0"]);
        assert_eq!(aggregate_v6(&["::/1", "8000::/1"]), vec!["::/0"]);
    }

    #[test]
    fn covered_prefix_is_absorbed() {
        assert_eq!(
            aggregate_v4(&["10.0.0.0/8", "10.1.0.0/16"]),
            vec!["10.0.0.0/8"]
        );
    }

    #[test]
    fn aggregation_is_idempotent() {
        let input = ["10.0.0.0/25", "10.0.0.128/25", "10.0.1.0/24", "172.16.0.0/16"];
        let first = aggregate_v4(&input);
        let second: Vec<String> =
            aggregate_v4(&first.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(first, second);
    }

    #[test]
    fn output_is_sorted_and_disjoint() {
        let blocks = aggregate::<Ipv4, _, _>([
            "203.0.113.0/26",
            "10.0.0.0/8",
            "192.0.2.0/24",
            "203.0.113.64/26",
        ]);
        for pair in blocks.windows(2) {
            assert!(pair[0].range().end() < pair[1].range().start());
        }
    }

    #[test]
    fn ipv6_adjacency_merges() {
        assert_eq!(
            aggregate_v6(&["2001:db8::/33", "2001:db8:8000::/33"]),
            vec!["2001:db8::/32"]
        );
    }

    #[test]
    fn summary_counts_addresses() {
        assert_eq!(summary::<Ipv4, _, _>(["192.0.2.0/24"]), 256);
        assert_eq!(
            summary::<Ipv4, _, _>(["192.168.0.0/25", "192.168.0.128/25"]),
            256
        );
        assert_eq!(summary::<Ipv4, _, _>(["0.0.0.0/1", "128.0.0.0/1"]), 1u64 << 32);
        assert_eq!(summary::<Ipv4, _, _>(Vec::<&str>::new()), 0);
    }

    #[test]
    fn summary_counts_slash_64_blocks() {
        assert_eq!(summary::<Ipv6, _, _>(["2001:db8::/32"]), 1u128 << 32);
        assert_eq!(summary::<Ipv6, _, _>(["2001:db8::/64"]), 1);
        // longer than /64 rounds down to zero
        assert_eq!(summary::<Ipv6, _, _>(["2001:db8::1/128"]), 0);
        assert_eq!(summary::<Ipv6, _, _>(["::/0"]), 1u128 << 64);
    }
}
