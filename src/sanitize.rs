//! Filesystem-safe dataset directory names
//!
//! Dataset names come straight from page markup and can contain anything,
//! including path separators. The mapping here is deterministic: ASCII
//! alphanumerics, `-` and `_` pass through, spaces become `_`, and every
//! other character becomes `-`. Substituting rather than dropping keeps
//! distinct raw names distinct (`"a/b"` and `"ab"` must not collide).

/// Maps an arbitrary dataset name to a safe directory name
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            ' ' => '_',
            _ => '-',
        })
        .collect();

    if sanitized.is_empty() {
        "dataset".to_string()
    } else {
        sanitized
    }
}
