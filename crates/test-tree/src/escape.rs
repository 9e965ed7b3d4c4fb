/// Backslash-escape characters with special meaning in a regular expression.
///
/// Test names end up embedded in a dynamically built pattern handed to the
/// test framework's `-t` filter, so every metacharacter in the raw display
/// name must match literally.
#[must_use]
pub fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(
            ch,
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
