//! Percent-encoding for identifiers interpolated into URL paths.
//!
//! Tenant ids and object ids normally are GUIDs or domain names, but both come
//! from configuration or the inbound event and are encoded before they are
//! placed in a path. A `/`, `?` or `#` in either can then never change which
//! resource is addressed.
//!
//! ```
//! use claims_engine::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("../me"), "..%2Fme");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters encoded in a single URL path segment (RFC 3986 section 3.3, plus
/// delimiters that would split or terminate the segment).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode `segment` for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
