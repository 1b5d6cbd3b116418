//! String delegates.
//!
//! Indices are byte offsets into the UTF-8 text; `-1` means "not found".
//! The split family follows one rule set (see `generic_split`):
//!   - empty separator splits after every character
//!   - `n == 0` yields no pieces, `n < 0` yields all of them
//!   - `n > 0` yields at most `n`, the last one holding the unsplit remainder

use anyhow::{Result, bail};

fn position(found: Option<usize>) -> i64 {
    found.map_or(-1, |i| i as i64)
}

pub fn count(s: &str, substr: &str) -> usize {
    if substr.is_empty() {
        return s.chars().count() + 1;
    }
    s.matches(substr).count()
}

pub fn contains_any(s: &str, chars: &str) -> bool {
    s.chars().any(|c: char| chars.contains(c))
}

pub fn index(s: &str, substr: &str) -> i64 {
    position(s.find(substr))
}

pub fn last_index(s: &str, substr: &str) -> i64 {
    position(s.rfind(substr))
}

pub fn index_any(s: &str, chars: &str) -> i64 {
    position(s.find(|c: char| chars.contains(c)))
}

pub fn last_index_any(s: &str, chars: &str) -> i64 {
    position(s.rfind(|c: char| chars.contains(c)))
}

pub fn index_rune(s: &str, r: char) -> i64 {
    position(s.find(r))
}

/// `count` copies of `s`. Negative counts and oversized results are errors.
pub fn repeat(s: &str, count: i64) -> Result<String> {
    if count < 0 {
        bail!("negative repeat count");
    }
    let count = usize::try_from(count)?;
    let too_large = s
        .len()
        .checked_mul(count)
        .is_none_or(|n| n > isize::MAX as usize);
    if too_large {
        bail!("repeat count causes overflow");
    }
    Ok(s.repeat(count))
}

/// Replace the first `n` non-overlapping instances of `old`; `n < 0` replaces all.
pub fn replace(s: &str, old: &str, new: &str, n: i64) -> String {
    match usize::try_from(n) {
        Ok(n) => s.replacen(old, new, n),
        Err(_) => s.replace(old, new),
    }
}

pub fn split(s: &str, sep: &str) -> Vec<String> {
    generic_split(s, sep, false, -1)
}

pub fn split_after(s: &str, sep: &str) -> Vec<String> {
    generic_split(s, sep, true, -1)
}

pub fn split_n(s: &str, sep: &str, n: i64) -> Vec<String> {
    generic_split(s, sep, false, n)
}

pub fn split_after_n(s: &str, sep: &str, n: i64) -> Vec<String> {
    generic_split(s, sep, true, n)
}

fn generic_split(s: &str, sep: &str, keep_sep: bool, n: i64) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    if sep.is_empty() {
        return explode(s, n);
    }
    let limit = usize::try_from(n).unwrap_or_else(|_| s.matches(sep).count() + 1);

    let mut pieces = Vec::with_capacity(limit.min(s.len() + 1));
    let mut rest = s;
    while pieces.len() + 1 < limit {
        let Some(at) = rest.find(sep) else {
            break;
        };
        let end = if keep_sep { at + sep.len() } else { at };
        pieces.push(rest[..end].to_string());
        rest = &rest[at + sep.len()..];
    }
    pieces.push(rest.to_string());
    pieces
}

/// One piece per character, at most `n` pieces (`n < 0`: no limit).
fn explode(s: &str, n: i64) -> Vec<String> {
    let chars = s.chars().count();
    let limit = usize::try_from(n).map_or(chars, |n| n.min(chars));

    let mut pieces = Vec::with_capacity(limit);
    let mut rest = s;
    for _ in 1..limit {
        let Some(c) = rest.chars().next() else {
            break;
        };
        let (head, tail) = rest.split_at(c.len_utf8());
        pieces.push(head.to_string());
        rest = tail;
    }
    if limit > 0 {
        pieces.push(rest.to_string());
    }
    pieces
}

pub fn fields(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

/// Upper-case the first letter of every word.
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev = ' ';
    for c in s.chars() {
        if is_word_separator(prev) {
            out.push(title_case(c));
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

// ASCII: everything but alphanumerics and '_'. Beyond ASCII only whitespace.
fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    !c.is_alphanumeric() && c.is_whitespace()
}

pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn to_title(s: &str) -> String {
    s.chars().map(title_case).collect()
}

/// Single-character title case. The DŽ/LJ/NJ/DZ digraphs have a dedicated
/// title form; otherwise the upper-case mapping is used when it is one
/// character, and `c` is kept when it would expand (`ß` stays `ß`).
fn title_case(c: char) -> char {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => 'ǅ',
        'Ǉ' | 'ǈ' | 'ǉ' => 'ǈ',
        'Ǌ' | 'ǋ' | 'ǌ' => 'ǋ',
        'Ǳ' | 'ǲ' | 'ǳ' => 'ǲ',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        }
    }
}

pub fn trim<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_matches(|c: char| cutset.contains(c))
}

pub fn trim_left<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_start_matches(|c: char| cutset.contains(c))
}

pub fn trim_right<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_end_matches(|c: char| cutset.contains(c))
}

pub fn trim_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    s.strip_prefix(prefix).unwrap_or(s)
}

pub fn trim_suffix<'a>(s: &'a str, suffix: &str) -> &'a str {
    s.strip_suffix(suffix).unwrap_or(s)
}

pub fn trim_space(s: &str) -> &str {
    s.trim()
}
