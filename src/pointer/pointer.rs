//! Pointer address construction and splitting.

/// Escapes a key for use as a pointer segment: `~` becomes `~0` and `/`
/// becomes `~1`.
pub fn escape(key: &str) -> String {
    if !key.contains('~') && !key.contains('/') {
        return key.to_string();
    }
    key.replace('~', "~0").replace('/', "~1")
}

/// Unescapes a pointer segment. `~1` is decoded before `~0` so that `~01`
/// round trips to `~1`.
pub fn unescape(segment: &str) -> String {
    if !segment.contains('~') {
        return segment.to_string();
    }
    segment.replace("~1", "/").replace("~0", "~")
}

/// Appends a raw key to a pointer, escaping the key first.
pub fn append(pointer: &str, key: &str) -> String {
    let segment = escape(key);
    if pointer.is_empty() {
        return format!("/{}", segment);
    }
    if pointer.ends_with('/') {
        return format!("{}{}", pointer, segment);
    }
    format!("{}/{}", pointer, segment)
}

/// Returns true for the root pointer `""` or any `/`-prefixed address.
pub fn is_valid(pointer: &str) -> bool {
    pointer.is_empty() || pointer.starts_with('/')
}

/// Splits a pointer into unescaped segments. The root pointer has none.
///
/// Pointers must satisfy [`is_valid`]; anything else yields no segments.
pub fn segments(pointer: &str) -> Vec<String> {
    match pointer.strip_prefix('/') {
        Some(rest) => rest.split('/').map(unescape).collect(),
        None => Vec::new(),
    }
}

/// Returns the pointer holding all but the final segment. The parent of a
/// single-segment pointer is the root pointer.
pub fn parent(pointer: &str) -> &str {
    match pointer.rfind('/') {
        Some(idx) => &pointer[..idx],
        None => "",
    }
}

/// Returns the final segment in raw, still escaped form.
pub fn last(pointer: &str) -> &str {
    match pointer.rfind('/') {
        Some(idx) => &pointer[idx + 1..],
        None => "",
    }
}

/// Returns true if the segment is a canonical decimal sequence index:
/// digits only, with no leading zero except `"0"` itself.
pub fn is_valid_index(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    let bytes = segment.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}
