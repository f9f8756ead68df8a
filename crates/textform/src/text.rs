//! Spreadsheet text functions
//!
//! Pure implementations of the spreadsheet text vocabulary. All positions are
//! 1-based and counted in characters, matching spreadsheet convention. Domain
//! edge cases degrade to sentinel values (`-1` for not-found, empty string for
//! invalid ranges) rather than errors, the way a formula cell would.

use crate::coerce;
use textform_expr::{TypeCoercionError, Value};

/// CONCAT(value1, value2, ...)
///
/// Coerces each value to its canonical text form and concatenates in order.
/// An empty slice yields the empty string.
pub fn concat(values: &[Value]) -> Result<String, TypeCoercionError> {
    let mut out = String::new();
    for value in values {
        out.push_str(&coerce::to_text(value)?);
    }
    Ok(out)
}

/// EXACT(a, b) - case-sensitive, byte-for-byte equality
pub fn exact(a: &str, b: &str) -> bool {
    a == b
}

/// FIND(needle, haystack, start)
///
/// Case-sensitive search beginning at 1-based `start`. Returns the 1-based
/// position of the first match at or after `start`, or `-1` when the needle
/// is absent or `start` falls outside the haystack. An empty needle matches
/// immediately at any valid start position.
pub fn find(needle: &str, haystack: &str, start: i64) -> i64 {
    let hay_len = haystack.chars().count() as i64;
    if start < 1 || start > hay_len {
        return -1;
    }

    let tail: String = haystack.chars().skip((start - 1) as usize).collect();
    match tail.find(needle) {
        Some(byte_pos) => {
            // Byte offset back to a character offset
            let char_pos = tail[..byte_pos].chars().count() as i64;
            start + char_pos
        }
        None => -1,
    }
}

/// LEFT(s, n) - first `n` characters; the whole string when `n` exceeds it
pub fn left(s: &str, n: i64) -> String {
    if n <= 0 {
        return String::new();
    }
    s.chars().take(n as usize).collect()
}

/// LEN(s) - character count
pub fn len(s: &str) -> i64 {
    s.chars().count() as i64
}

/// LOWER(s)
pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

/// MID(s, start, count)
///
/// Up to `count` characters beginning at 1-based `start`. Returns the empty
/// string when `start` is outside the string or `count` is negative;
/// truncates at the end of the string rather than padding.
pub fn mid(s: &str, start: i64, count: i64) -> String {
    if start < 1 || start > len(s) || count < 0 {
        return String::new();
    }
    s.chars()
        .skip((start - 1) as usize)
        .take(count as usize)
        .collect()
}

/// PROPER(s)
///
/// Uppercases the first letter of every maximal letter run and lowercases the
/// rest of the run. Any non-letter (spaces, punctuation, digits) is copied
/// unchanged and starts a new word.
pub fn proper(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                in_word = true;
                out.extend(ch.to_uppercase());
            }
        } else {
            in_word = false;
            out.push(ch);
        }
    }

    out
}

/// REPLACE(s, start, count, replacement)
///
/// Removes `count` characters beginning at 1-based `start` and splices in
/// `replacement`. A `start` beyond the end of the string appends with nothing
/// removed (the `start == len + 1` boundary included); `count` clamps to the
/// characters actually remaining.
pub fn replace(s: &str, start: i64, count: i64, replacement: &str) -> String {
    let total = len(s);
    let start0 = (start.max(1) - 1).min(total) as usize;
    let removed = count.max(0).min(total - start0 as i64) as usize;

    let mut out: String = s.chars().take(start0).collect();
    out.push_str(replacement);
    out.extend(s.chars().skip(start0 + removed));
    out
}

/// REPT(s, times) - `s` repeated; zero or negative counts yield ""
pub fn rept(s: &str, times: i64) -> String {
    if times <= 0 {
        return String::new();
    }
    s.repeat(times as usize)
}

/// RIGHT(s, n) - last `n` characters; the whole string when `n` exceeds it
pub fn right(s: &str, n: i64) -> String {
    if n <= 0 {
        return String::new();
    }
    let total = s.chars().count();
    if n as usize >= total {
        return s.to_string();
    }
    s.chars().skip(total - n as usize).collect()
}

/// SEARCH(needle, haystack, start)
///
/// Case-insensitive [`find`]: both operands are case-folded before the same
/// 1-based search logic applies.
pub fn search(needle: &str, haystack: &str, start: i64) -> i64 {
    find(&needle.to_lowercase(), &haystack.to_lowercase(), start)
}

/// SUBSTITUTE(src, old, new, instance)
///
/// With `instance` of zero, replaces every non-overlapping occurrence of
/// `old`. With a positive `instance`, replaces only that occurrence counted
/// left to right; an instance beyond the occurrences present, or an empty
/// `old`, leaves `src` unchanged.
pub fn substitute(src: &str, old: &str, new: &str, instance: i64) -> String {
    if old.is_empty() {
        return src.to_string();
    }
    if instance <= 0 {
        return src.replace(old, new);
    }

    let mut out = String::with_capacity(src.len());
    for (i, piece) in src.split(old).enumerate() {
        if i > 0 {
            out.push_str(if i as i64 == instance { new } else { old });
        }
        out.push_str(piece);
    }
    out
}

/// TRIM(s)
///
/// Collapses every whitespace run (tabs included, interior and boundary) to a
/// single space, then drops leading and trailing spaces. Idempotent.
pub fn trim(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// UPPER(s)
pub fn upper(s: &str) -> String {
    s.to_uppercase()
}
