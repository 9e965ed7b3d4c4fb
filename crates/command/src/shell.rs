/// Unify path separators to forward slashes.
///
/// Jest's glob layer accepts forward slashes on every host, so backslashes
/// from Windows paths are rewritten rather than quoted around.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Backslash-escape literal plus signs in a path.
///
/// A bare `+` in a file path is treated as a pattern character by the
/// filesystem glob layer and would silently match nothing.
#[must_use]
pub fn escape_plus_sign(path: &str) -> String {
    path.replace('+', "\\+")
}

/// Escape single quotes so the value survives inside a single-quoted shell
/// token (`it's` becomes `it'\''s`).
#[must_use]
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "'\\''")
}

/// Wrap a token in single quotes for shell re-parsing
#[must_use]
pub fn quote(token: &str) -> String {
    format!("'{token}'")
}

/// Strip one matching pair of surrounding quotes, if present.
///
/// Used on explicit text selections so a selected `'my test'` literal is
/// taken as the bare test name.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.len() >= 2 {
        let first = trimmed.as_bytes()[0];
        let last = trimmed.as_bytes()[trimmed.len() - 1];
        if first == last && matches!(first, b'\'' | b'"' | b'`') {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}
