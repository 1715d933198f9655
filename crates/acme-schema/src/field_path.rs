//! Conversion from JSON Pointer instance locations to client-facing field
//! paths (`data[2].title`).

/// Render a JSON Pointer (`/data/2/title`) as a field path (`data[2].title`).
///
/// Numeric segments become bracketed indices. The empty pointer maps to the
/// empty path.
pub(crate) fn from_pointer(pointer: &str) -> String {
    let mut path = String::new();
    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        push_segment(&mut path, &segment);
    }
    path
}

/// Append `segment` to `path` using the same rules as [`from_pointer`].
pub(crate) fn push_segment(path: &mut String, segment: &str) {
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        path.push('[');
        path.push_str(segment);
        path.push(']');
    } else {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(segment);
    }
}
