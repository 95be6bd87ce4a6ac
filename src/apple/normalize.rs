//! Text normalization used when a catalog search comes back empty.
//!
//! The catalog search matches unannotated original-language strings best, so
//! the fallback strips everything outside a small "literal" alphabet and
//! drops a parenthesized annotation like `(Feat. X)` from the title.

use crate::types::MatchQuery;

/// Whether `c` belongs to the literal alphabet: Hangul syllables, the Hangul
/// compatibility consonants, the ASCII range `A`..=`z`, digits, space and `-`.
///
/// `A`..=`z` also admits `[ \ ] ^ _` and the backtick. Callers rely on the
/// exact set, so keep it as is.
pub fn is_literal(c: char) -> bool {
    matches!(
        c,
        '가'..='힣' | '-' | 'ㄱ'..='ㅎ' | 'A'..='z' | '0'..='9' | ' '
    )
}

pub fn contains_non_literal(text: &str) -> bool {
    text.chars().any(|c| !is_literal(c))
}

pub fn strip_non_literal(text: &str) -> String {
    text.chars().filter(|&c| is_literal(c)).collect()
}

/// Removes the first `(...)` group, shortest match, that does not span a line
/// break. Text without such a group is returned unchanged.
pub fn strip_first_parenthetical(text: &str) -> String {
    for (open, _) in text.match_indices('(') {
        let rest = &text[open + 1..];
        let Some(close) = rest.find(|c: char| c == ')' || is_line_break(c)) else {
            break;
        };
        if rest[close..].starts_with(')') {
            let end = open + 1 + close + 1;
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..open]);
            out.push_str(&text[end..]);
            return out;
        }
    }
    text.to_string()
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// The query used for the retry: the artist stripped of non-literal
/// characters, the title stripped of its first parenthetical and then of
/// non-literal characters.
pub fn normalize(query: &MatchQuery) -> MatchQuery {
    MatchQuery {
        artist: strip_non_literal(&query.artist),
        title: strip_non_literal(&strip_first_parenthetical(&query.title)),
    }
}
