//! Canonical form of movie titles.
//!
//! Stored titles are trimmed, unquoted and word-cased so that `the matrix`,
//! `"The Matrix"` and `THE  MATRIX` all land on the same row.

/// Longest accepted title, counted in chars after normalization.
pub const MAX_TITLE_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TitleError {
    Empty,
    TooLong { chars: usize },
}

// ============== Normalization ==============

/// Map raw user text to the stored form.
///
/// `normalize_title(normalize_title(x)) == normalize_title(x)` for every input.
pub fn normalize_title(raw: &str) -> String {
    let mut s = raw;
    loop {
        let next = s.trim().trim_matches('"').trim();
        if next.len() == s.len() {
            break;
        }
        s = next;
    }

    s.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize and enforce the empty / length rules.
pub fn validate_title(raw: &str) -> Result<String, TitleError> {
    let title = normalize_title(raw);
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    let chars = title.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Err(TitleError::TooLong { chars });
    }
    Ok(title)
}

fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for (idx, c) in word.chars().enumerate() {
        let lower = simple_lower(c);
        out.push(if idx == 0 { simple_upper(lower) } else { lower });
    }
    out
}

// Simple one-to-one casing. Where the full mapping expands but a single-char
// mapping exists (dotted capital I, Greek iota subscript), use that char;
// otherwise expanding chars such as 'ß' keep their original form.
fn simple_lower(c: char) -> char {
    match c {
        '\u{0130}' => 'i',
        _ => single(c.to_lowercase()).unwrap_or(c),
    }
}

fn simple_upper(c: char) -> char {
    match c {
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8).unwrap_or(c)
        }
        '\u{1FB3}' => '\u{1FBC}',
        '\u{1FC3}' => '\u{1FCC}',
        '\u{1FF3}' => '\u{1FFC}',
        _ => single(c.to_uppercase()).unwrap_or(c),
    }
}

fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    match it.next() {
        None => Some(first),
        Some(_) => None,
    }
}
