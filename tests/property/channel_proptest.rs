//! Property-based tests for channel keys

use marketchat::shared::channel::{channel_includes, channel_key, parse_channel_key};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_channel_key_is_order_independent(a in 1i64..1_000_000, b in 1i64..1_000_000) {
        prop_assert_eq!(channel_key(a, b), channel_key(b, a));
    }

    #[test]
    fn test_channel_key_parses_back(a in 1i64..1_000_000, b in 1i64..1_000_000) {
        let (first, second) = parse_channel_key(&channel_key(a, b)).unwrap();
        let (a_text, b_text) = (a.to_string(), b.to_string());
        let expected = if a_text <= b_text { (a, b) } else { (b, a) };
        prop_assert_eq!((first, second), expected);
    }

    #[test]
    fn test_channel_includes_only_participants(a in 1i64..1000, b in 1i64..1000, c in 1i64..1000) {
        let key = channel_key(a, b);
        prop_assert!(channel_includes(&key, a));
        prop_assert!(channel_includes(&key, b));
        prop_assert_eq!(channel_includes(&key, c), c == a || c == b);
    }

    #[test]
    fn test_distinct_pairs_get_distinct_keys(
        a in 1i64..500, b in 1i64..500, c in 1i64..500, d in 1i64..500,
    ) {
        let same_pair = (a.min(b), a.max(b)) == (c.min(d), c.max(d));
        prop_assert_eq!(channel_key(a, b) == channel_key(c, d), same_pair);
    }

    #[test]
    fn test_arbitrary_strings_never_panic(key in ".*") {
        let _ = parse_channel_key(&key);
    }
}
