//! Linux-safe filename sanitization.

/// Linux NAME_MAX in bytes.
const NAME_MAX: usize = 255;

fn is_unsafe(c: char) -> bool {
    matches!(c, '\0' | '/' | '\\' | ' ' | '\t') || c.is_control()
}

/// Sanitizes a URL path segment for use as a filename on Linux.
///
/// Runs of NUL, slashes, whitespace and control characters become a single
/// `_`; leading/trailing dots and underscores are trimmed; the result is cut
/// to 255 bytes on a char boundary.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if !is_unsafe(c) {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let mut trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed = &trimmed[..take];
    }
    trimmed.to_string()
}
