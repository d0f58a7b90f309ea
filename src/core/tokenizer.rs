//! Word normalization shared by the metrics and frequency engines
//!
//! A token is a maximal run of word characters (alphanumerics and underscore)
//! after every other non-space character is stripped and the text is
//! lowercased. Punctuation-only runs vanish and apostrophes are dropped in
//! place ("don't" becomes "dont").

/// Alphanumeric (any Unicode letter or number) or underscore
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Unicode whitespace plus the ASCII information separators `\x1c`..`\x1f`
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Strip everything but word characters and whitespace, then lowercase
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|&c| is_word_char(c) || is_space(c))
        .collect::<String>()
        .to_lowercase()
}

/// Produce the normalized token sequence in text order
pub fn normalize(text: &str) -> Vec<String> {
    clean_text(text)
        .split(is_space)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Character length of a token (Unicode scalar values, not bytes)
#[inline]
pub fn token_len(token: &str) -> usize {
    token.chars().count()
}

/// Is `c` a universal line boundary
#[inline]
pub fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on universal newlines; `\r\n` is one boundary and a trailing
/// boundary does not produce an empty last line
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((pos, c)) = iter.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..pos]);
        let mut end = pos + c.len_utf8();
        if c == '\r' {
            if let Some(&(next_pos, '\n')) = iter.peek() {
                iter.next();
                end = next_pos + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
