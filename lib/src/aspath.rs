use regex::Regex;

use crate::afi::parse_decimal;

/// AS_PATH pattern matching strategy.
///
/// Operators write Cisco IOS style filters (`_64500_`, `^64500`, `64501$`)
/// where `_` marks an AS number boundary. Two dialects of this syntax exist
/// and are observably different on some inputs, so both are kept as named
/// modes rather than guessing a unified semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Pure token automaton: the pattern is split on `_` into literal AS
    /// number tokens and matched as a contiguous window over the path, with
    /// `^`/`$` pinning the window to the start/end of the path. Fast, no
    /// dynamic pattern compilation, literal tokens only.
    #[default]
    Exact,
    /// Boundary substitution over a general regex engine: each `_` becomes
    /// an expression matching whitespace or a string boundary, and the
    /// result is compiled and searched anywhere in the space-padded path.
    /// Richer patterns, at the cost of compiling user-supplied syntax.
    Regex,
}

/// Does `path` contain a token sequence matching `pattern`?
///
/// Both modes first require the path to validate (see [`valid_as_path`]);
/// an invalid or empty path never matches. A pattern that cannot be
/// interpreted yields `false` rather than an error.
pub fn matches(path: &str, pattern: &str, mode: MatchMode) -> bool {
    if !valid_as_path(path) {
        return false;
    }
    match mode {
        MatchMode::Exact => matches_exact(path, pattern),
        MatchMode::Regex => matches_regex(path, pattern),
    }
}

/// Is every whitespace-delimited token of `path` a decimal unsigned 32-bit
/// AS number? Empty or blank paths are invalid.
pub fn valid_as_path(path: &str) -> bool {
    let mut tokens = path.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(valid_as_number)
}

/// Is `token` a decimal unsigned 32-bit AS number?
pub fn valid_as_number(token: &str) -> bool {
    parse_decimal(token).is_some_and(|value| value <= u64::from(u32::MAX))
}

/// True iff path `a` has strictly fewer hops than path `b`.
///
/// An empty or blank `a` is never shorter; an empty or blank `b` always
/// loses. Used when several routes for one prefix must be reduced to the
/// preferred one.
pub fn shorter_as_path(a: &str, b: &str) -> bool {
    if a.trim().is_empty() {
        return false;
    }
    if b.trim().is_empty() {
        return true;
    }
    hop_count(a) < hop_count(b)
}

/// Number of AS hops in a path string.
pub fn hop_count(path: &str) -> usize {
    path.split_whitespace().count()
}

fn matches_exact(path: &str, pattern: &str) -> bool {
    let anchor_start = pattern.starts_with('^');
    let anchor_end = pattern.ends_with('$');
    let mut literals = pattern;
    if let Some(rest) = literals.strip_prefix('^') {
        literals = rest;
    }
    if let Some(rest) = literals.strip_suffix('$') {
        literals = rest;
    }
    let want: Vec<&str> = literals.split('_').filter(|t| !t.is_empty()).collect();
    let have: Vec<&str> = path.split_whitespace().collect();
    let (n, m) = (have.len(), want.len());

    let last_window = if anchor_start { 0 } else { n.saturating_sub(m) };
    for i in 0..=last_window {
        if i + m > n {
            continue;
        }
        if want.iter().zip(&have[i..i + m]).all(|(w, h)| w == h) {
            if anchor_end && i + m != n {
                continue;
            }
            return true;
        }
    }
    false
}

fn matches_regex(path: &str, pattern: &str) -> bool {
    let normalized = path.split_whitespace().collect::<Vec<_>>().join(" ");
    let padded = format!(" {normalized} ");
    let translated = pattern.replace('_', r"(\s|^|$)");
    Regex::new(&translated).is_ok_and(|re| re.is_match(&padded))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: [MatchMode; 2] = [MatchMode::Exact, MatchMode::Regex];

    #[test]
    fn boundary_match_hits_whole_token_only() {
        for mode in BOTH {
            assert!(matches(
                "4242423010 4242423011 4242423947",
                "_4242423011_",
                mode
            ));
            // substring of a longer AS number is not a token match
            assert!(!matches(
                "4242423010 42424230112 4242423947",
                "_4242423011_",
                mode
            ));
        }
    }

    #[test]
    fn boundary_matches_path_edges() {
        for mode in BOTH {
            assert!(matches("4242423011", "_4242423011_", mode));
            assert!(matches("4242423011 4242423012", "_4242423011_", mode));
            assert!(matches("4242423010 4242423011", "_4242423011_", mode));
            assert!(matches("4242423011 4242423012", "_4242423011", mode));
        }
    }

    #[test]
    fn whitespace_is_normalized() {
        for mode in BOTH {
            assert!(matches(
                " 4242423010   4242423011\t4242423947 ",
                "_4242423011_",
                mode
            ));
        }
    }

    #[test]
    fn exact_mode_anchors() {
        assert!(matches("4242423947 9808", "9808$", MatchMode::Exact));
        assert!(matches("4242423947 9808", "_9808$", MatchMode::Exact));
        assert!(!matches("4242423947 309808", "9808$", MatchMode::Exact));
        assert!(!matches("1 2 3 4", "3$", MatchMode::Exact));
        assert!(!matches("1 2 33", "3$", MatchMode::Exact));
        assert!(matches("4242423947 309808 9808", "^4242423947", MatchMode::Exact));
        assert!(matches("4242423947 309808 9808", "^4242423947_", MatchMode::Exact));
        assert!(!matches("309808 4242423947", "^4242423947", MatchMode::Exact));
    }

    #[test]
    fn exact_mode_multi_token_window() {
        assert!(matches("1 2 30 3", "_3_", MatchMode::Exact));
        assert!(!matches("1 2 30 4", "_3_", MatchMode::Exact));
        assert!(matches("10 20 30", "_20_30_", MatchMode::Exact));
        assert!(!matches("10 30 20", "_20_30_", MatchMode::Exact));
        assert!(!matches("10 20", "_10_20_30_", MatchMode::Exact));
    }

    #[test]
    fn regex_mode_allows_richer_syntax() {
        assert!(matches("65000 65001 65002", "_650\\d\\d_", MatchMode::Regex));
        assert!(matches("65000 65001", "65000 65001", MatchMode::Regex));
        assert!(!matches("65000 65001", "_64500_", MatchMode::Regex));
    }

    // The two dialects are not equivalent: in regex mode the padding spaces
    // sit between the string boundary and the first/last token, so `^`/`$`
    // anchored patterns that match in exact mode find nothing.
    #[test]
    fn modes_disagree_on_anchored_patterns() {
        assert!(matches("9808 65000", "^9808", MatchMode::Exact));
        assert!(!matches("9808 65000", "^9808", MatchMode::Regex));
        assert!(matches("65000 9808", "9808$", MatchMode::Exact));
        assert!(!matches("65000 9808", "9808$", MatchMode::Regex));
    }

    #[test]
    fn invalid_as_numbers_never_match() {
        for mode in BOTH {
            assert!(!matches("4294967296 1", "_4294967296_", mode));
            assert!(!matches("-1 1", "_-1_", mode));
            assert!(!matches("abc 1", "_abc_", mode));
            assert!(!matches("12424230114242423011 4242423011", "4242423011", mode));
        }
    }

    #[test]
    fn max_u32_and_zero_are_valid() {
        for mode in BOTH {
            assert!(matches("0 4294967295 123", "_4294967295_", mode));
            assert!(matches("0 4294967295 123", "_0_", mode));
        }
    }

    #[test]
    fn unparsable_pattern_is_false_not_fatal() {
        for mode in BOTH {
            assert!(!matches("1 2 3", "(unclosed", mode));
        }
    }

    #[test]
    fn empty_path_never_matches() {
        for mode in BOTH {
            assert!(!matches("", "_1_", mode));
            assert!(!matches("   ", "_1_", mode));
        }
    }

    #[test]
    fn path_validation() {
        assert!(valid_as_path("64500"));
        assert!(valid_as_path("0 4294967295"));
        assert!(valid_as_path(" 1  2\t3 "));
        assert!(!valid_as_path(""));
        assert!(!valid_as_path("  "));
        assert!(!valid_as_path("4294967296"));
        assert!(!valid_as_path("-1"));
        assert!(!valid_as_path("+1"));
        assert!(!valid_as_path("64500 as64501"));
    }

    #[test]
    fn shorter_path_preference() {
        assert!(shorter_as_path("1 2", "1 2 3"));
        assert!(!shorter_as_path("1 2 3", "1 2"));
        assert!(!shorter_as_path("1 2", "3 4"));
        assert!(!shorter_as_path("", "1"));
        assert!(shorter_as_path("1", ""));
        assert!(!shorter_as_path("", ""));
    }
}
