//! Path segment encoding for request URLs.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the unreserved characters is escaped. Space becomes
/// `%20`, never `+`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Encode a path as `/seg1/seg2/...`.
///
/// An empty path encodes to the empty string.
pub fn encode_path<S: AsRef<str>>(path: &[S]) -> String {
    let mut encoded = String::new();
    for segment in path {
        encoded.push('/');
        encoded.push_str(&encode_segment(segment.as_ref()));
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_is_percent_twenty() {
        assert_eq!(encode_path(&["foo bar"]), "/foo%20bar");
    }

    #[test]
    fn test_multiple_segments() {
        let path = ["interfaces", "ethernet", "dp0s3", "description", "to core"];
        assert_eq!(
            encode_path(&path),
            "/interfaces/ethernet/dp0s3/description/to%20core"
        );
    }

    #[test]
    fn test_reserved_characters_escaped() {
        assert_eq!(encode_segment("10.0.0.1/24"), "10.0.0.1%2F24");
        assert_eq!(encode_segment("a+b"), "a%2Bb");
        assert_eq!(encode_segment("x?y&z=1"), "x%3Fy%26z%3D1");
        assert_eq!(encode_segment("un-re_se.rv~ed"), "un-re_se.rv~ed");
    }

    #[test]
    fn test_non_ascii_escaped_as_utf8() {
        assert_eq!(encode_segment("café"), "caf%C3%A9");
    }

    #[test]
    fn test_empty_path() {
        let empty: [&str; 0] = [];
        assert_eq!(encode_path(&empty), "");
    }
}
