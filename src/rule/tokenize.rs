//! Low-level tokenizing helpers for adblock-style rules.

/// Split `text` on `delimiter`, honouring `escape`.
///
/// An escaped delimiter is kept as a literal delimiter (the escape
/// character itself is dropped). A delimiter at position 0 is ignored.
/// Empty tokens are dropped unless `preserve_all_tokens` is set.
pub fn split_with_escape(
    text: &str,
    delimiter: char,
    escape: char,
    preserve_all_tokens: bool,
) -> Vec<String> {
    let mut parts = Vec::new();
    if text.is_empty() {
        return parts;
    }

    let mut current = String::new();
    let mut prev: Option<char> = None;

    for (i, c) in text.chars().enumerate() {
        if c == delimiter {
            if i == 0 {
                // leading delimiter
            } else if prev == Some(escape) {
                current.pop();
                current.push(c);
            } else if preserve_all_tokens || !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
        prev = Some(c);
    }

    if preserve_all_tokens || !current.is_empty() {
        parts.push(current);
    }

    parts
}

/// Byte offset of the last `$` in `text` that is not preceded by `\`.
pub fn find_options_separator(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    (0..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b'$' && (i == 0 || bytes[i - 1] != b'\\'))
}

/// Escape `delimiter` occurrences so that [`split_with_escape`] reads them back.
pub fn escape_delimiter(text: &str, delimiter: char, escape: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == delimiter {
            out.push(escape);
        }
        out.push(c);
    }
    out
}
