//! Escape processing for double-quoted string literals.

/// Replace escape sequences in a string body (quotes already stripped).
///
/// Supported: `\n \t \r \0 \\ \" \' \``. On an unknown escape, returns the
/// byte offset of its backslash within `body`.
pub(crate) fn cook_string(body: &str) -> Result<String, usize> {
    if !body.contains('\\') {
        return Ok(body.to_string());
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let cooked = match chars.next() {
            Some((_, 'n')) => '\n',
            Some((_, 't')) => '\t',
            Some((_, 'r')) => '\r',
            Some((_, '0')) => '\0',
            Some((_, '\\')) => '\\',
            Some((_, '"')) => '"',
            Some((_, '\'')) => '\'',
            Some((_, '`')) => '`',
            _ => return Err(offset),
        };
        out.push(cooked);
    }
    Ok(out)
}
