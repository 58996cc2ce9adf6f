//! Statement splitting and task-id mention scanning.

/// Characters that extend a task-id token.
fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '%' | '-')
}

/// Splits text into trimmed, non-empty statements.
///
/// Boundaries are newlines, `;`, and whitespace directly after `.`, `!`
/// or `?`. The terminating punctuation stays with its statement.
pub fn split_statements(input: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev = None;

    for (i, c) in input.char_indices() {
        let boundary = c == '\n'
            || c == ';'
            || (c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')));
        if boundary {
            pieces.push(&input[start..i]);
            start = i + c.len_utf8();
        }
        prev = Some(c);
    }
    pieces.push(&input[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Whether `id` occurs in `statement` as a whole token.
///
/// Matching is literal and case-sensitive; an occurrence only counts when
/// neither neighbor is a letter, digit, `_`, `%` or `-`.
pub fn mentions_id(statement: &str, id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    statement.match_indices(id).any(|(at, _)| {
        let before = statement[..at].chars().next_back();
        let after = statement[at + id.len()..].chars().next();
        !before.is_some_and(is_id_char) && !after.is_some_and(is_id_char)
    })
}
