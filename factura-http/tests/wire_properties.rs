use factura_http::{Etag, MAX_PAGE_SIZE, RangeSpec};
use proptest::prelude::*;

proptest! {
    #[test]
    fn etag_round_trips(millis in 0i64..=4_102_444_800_000, id in "[a-z0-9]{1,24}") {
        let instant = chrono::DateTime::from_timestamp_millis(millis).unwrap();
        let token = Etag::new(instant, id);
        let parsed: Etag = token.to_string().parse().unwrap();
        prop_assert_eq!(parsed, token);
    }

    #[test]
    fn range_span_never_exceeds_page_cap(offset in 0u32..1_000_000, limit in 0u32..10_000) {
        let range = RangeSpec::new(offset, limit);
        prop_assert!(range.limit() <= MAX_PAGE_SIZE);

        let rendered = range.to_string();
        let span = rendered.strip_prefix("resources=").unwrap();
        let (first, last) = span.split_once('-').unwrap();
        let width = last.parse::<u64>().unwrap() - first.parse::<u64>().unwrap();
        prop_assert!(width <= u64::from(MAX_PAGE_SIZE));
    }
}
