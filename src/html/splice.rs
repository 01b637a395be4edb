//! Document splicer.
//!
//! The entry document is treated as opaque bytes with two literal anchors.
//! No HTML parsing happens here.

use thiserror::Error;

pub const HEAD_ANCHOR: &str = "</head>";
pub const BODY_ANCHOR: &str = "</body>";

/// The entry document cannot take injected tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpliceError {
    #[error("index.html does not have <head> element")]
    MissingHeadAnchor,

    #[error("index.html does not have <body> element")]
    MissingBodyAnchor,

    #[error("index.html has </body> before </head>")]
    MisorderedAnchors,
}

/// Insert `stylesheets` right before the first `head_anchor` and `scripts`
/// right before the first `body_anchor`.
///
/// Head anchor absence is reported first, even when both anchors are missing.
pub fn splice(
    document: &[u8],
    head_anchor: &str,
    body_anchor: &str,
    stylesheets: &[String],
    scripts: &[String],
) -> Result<Vec<u8>, SpliceError> {
    let head_at = find(document, head_anchor.as_bytes());
    let body_at = find(document, body_anchor.as_bytes());

    let (head_at, body_at) = match (head_at, body_at) {
        (None, _) => return Err(SpliceError::MissingHeadAnchor),
        (Some(_), None) => return Err(SpliceError::MissingBodyAnchor),
        (Some(head), Some(body)) if body < head => return Err(SpliceError::MisorderedAnchors),
        (Some(head), Some(body)) => (head, body),
    };

    let injected: usize = stylesheets.iter().chain(scripts).map(String::len).sum();
    let mut out = Vec::with_capacity(document.len() + injected);

    out.extend_from_slice(&document[..head_at]);
    for tag in stylesheets {
        out.extend_from_slice(tag.as_bytes());
    }
    out.extend_from_slice(&document[head_at..body_at]);
    for tag in scripts {
        out.extend_from_slice(tag.as_bytes());
    }
    out.extend_from_slice(&document[body_at..]);

    Ok(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
