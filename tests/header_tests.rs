//! Header filter over in-memory files: skip offsets and reader position.

use headmerge::MergeErrorKind;
use headmerge::pipeline::{HeaderFilter, HeaderMatch};
use std::io::{Cursor, Read};
use std::path::Path;

/// Run one file through the filter; returns (kind, offset, bytes that would be streamed).
fn feed(filter: &HeaderFilter, bytes: &[u8]) -> (HeaderMatch, u64, Vec<u8>) {
    let mut reader = Cursor::new(bytes.to_vec());
    let decision = filter
        .position(&mut reader, Path::new("mem.csv"))
        .unwrap();
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();
    (decision.kind, decision.offset, rest)
}

#[test]
fn test_first_file_establishes_header_and_is_kept_whole() {
    let filter = HeaderFilter::default();
    let (kind, offset, rest) = feed(&filter, b"id,name\n1,a\n");
    assert_eq!(kind, HeaderMatch::Established);
    assert_eq!(offset, 0);
    assert_eq!(rest, b"id,name\n1,a\n");
    assert_eq!(filter.header(), Some(&b"id,name"[..]));
}

#[test]
fn test_matching_header_lf_skipped() {
    let filter = HeaderFilter::default();
    feed(&filter, b"h\nx\n");
    let (kind, offset, rest) = feed(&filter, b"h\ny\n");
    assert_eq!(kind, HeaderMatch::Matched);
    assert_eq!(offset, 2);
    assert_eq!(rest, b"y\n");
}

#[test]
fn test_matching_header_crlf_skipped_as_two_bytes() {
    let filter = HeaderFilter::default();
    feed(&filter, b"h\r\nx\r\n");
    let (kind, offset, rest) = feed(&filter, b"h\r\ny\r\n");
    assert_eq!(kind, HeaderMatch::Matched);
    assert_eq!(offset, 3);
    assert_eq!(rest, b"y\r\n");
}

#[test]
fn test_header_matches_across_terminator_styles() {
    let filter = HeaderFilter::default();
    feed(&filter, b"h\r\nx\r\n");
    let (kind, offset, rest) = feed(&filter, b"h\ny\n");
    assert_eq!(kind, HeaderMatch::Matched);
    assert_eq!(offset, 2);
    assert_eq!(rest, b"y\n");
}

#[test]
fn test_terminator_skip_is_bounded() {
    let filter = HeaderFilter::default();
    feed(&filter, b"h\nx\n");
    let (_, offset, rest) = feed(&filter, b"h\n\n\ny\n");
    assert_eq!(offset, 3);
    assert_eq!(rest, b"\ny\n");

    let (_, offset, rest) = feed(&filter, b"h\r\n\r\ny\n");
    assert_eq!(offset, 3);
    assert_eq!(rest, b"\r\ny\n");
}

#[test]
fn test_different_first_line_kept_as_data() {
    let filter = HeaderFilter::default();
    feed(&filter, b"h\nx\n");
    let (kind, offset, rest) = feed(&filter, b"g\ny\n");
    assert_eq!(kind, HeaderMatch::Differs);
    assert_eq!(offset, 0);
    assert_eq!(rest, b"g\ny\n");
    assert_eq!(filter.header(), Some(&b"h"[..]));
}

#[test]
fn test_prefix_of_header_is_not_a_match() {
    let filter = HeaderFilter::default();
    feed(&filter, b"id,name\n1,a\n");
    let (kind, _, rest) = feed(&filter, b"id\n2\n");
    assert_eq!(kind, HeaderMatch::Differs);
    assert_eq!(rest, b"id\n2\n");
}

#[test]
fn test_header_only_files() {
    let filter = HeaderFilter::default();
    feed(&filter, b"h\nx\n");

    let (kind, offset, rest) = feed(&filter, b"h");
    assert_eq!(kind, HeaderMatch::Matched);
    assert_eq!(offset, 1);
    assert!(rest.is_empty());

    let (_, offset, rest) = feed(&filter, b"h\n");
    assert_eq!(offset, 2);
    assert!(rest.is_empty());
}

#[test]
fn test_empty_file_does_not_set_header() {
    let filter = HeaderFilter::default();
    let (kind, offset, rest) = feed(&filter, b"");
    assert_eq!(kind, HeaderMatch::Empty);
    assert_eq!(offset, 0);
    assert!(rest.is_empty());
    assert_eq!(filter.header(), None);

    let (kind, _, _) = feed(&filter, b"h\nx\n");
    assert_eq!(kind, HeaderMatch::Established);
}

#[test]
fn test_empty_file_after_header_is_not_a_mismatch() {
    let filter = HeaderFilter::default();
    feed(&filter, b"h\nx\n");
    let (kind, _, rest) = feed(&filter, b"");
    assert_eq!(kind, HeaderMatch::Empty);
    assert!(rest.is_empty());
}

#[test]
fn test_empty_first_line_is_a_header() {
    let filter = HeaderFilter::default();
    let (kind, _, _) = feed(&filter, b"\nx\n");
    assert_eq!(kind, HeaderMatch::Established);
    assert_eq!(filter.header(), Some(&b""[..]));

    let (kind, offset, rest) = feed(&filter, b"\ny\n");
    assert_eq!(kind, HeaderMatch::Matched);
    assert_eq!(offset, 1);
    assert_eq!(rest, b"y\n");
}

#[test]
fn test_lone_cr_does_not_end_the_line() {
    let filter = HeaderFilter::default();
    feed(&filter, b"a\rb\nx\n");
    assert_eq!(filter.header(), Some(&b"a\rb"[..]));

    let (kind, _, rest) = feed(&filter, b"a\ry\n");
    assert_eq!(kind, HeaderMatch::Differs);
    assert_eq!(rest, b"a\ry\n");
}

#[test]
fn test_header_too_long() {
    let filter = HeaderFilter::new(4);
    let mut reader = Cursor::new(b"abcdefgh\n1\n".to_vec());
    let err = filter
        .position(&mut reader, Path::new("wide.csv"))
        .unwrap_err();
    assert_eq!(err.kind(), MergeErrorKind::InputIo);
    assert!(err.to_string().contains("wide.csv"));
}

#[test]
fn test_header_at_limit_is_accepted() {
    let filter = HeaderFilter::new(4);
    let (kind, _, _) = feed(&filter, b"abcd\r\n1\r\n");
    assert_eq!(kind, HeaderMatch::Established);
    let (kind, offset, rest) = feed(&filter, b"abcd\r\n2\r\n");
    assert_eq!(kind, HeaderMatch::Matched);
    assert_eq!(offset, 6);
    assert_eq!(rest, b"2\r\n");
}
