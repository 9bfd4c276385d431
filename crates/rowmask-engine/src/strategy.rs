//! Masking strategies
//!
//! Pure string transforms, one per masking kind. All of them are total:
//! malformed input (no `@` in an email, a non-matching regex, an inverted
//! substring range) returns the value unchanged rather than failing. All
//! counting is by Unicode scalar value, never by byte.

use crate::rules::MaskKind;
use regex::Regex;

/// The redaction character substituted for original content
pub const MASK_CHAR: char = '*';

impl MaskKind {
    /// Apply this strategy to the text rendering of a value.
    pub fn apply(&self, raw: &str) -> String {
        match self {
            MaskKind::Full { length } => mask_full(raw, *length),
            MaskKind::Email { length } => mask_email(raw, *length),
            MaskKind::Regex { pattern } => mask_regex(pattern, raw),
            MaskKind::Substring { start, end, length } => {
                mask_substring(raw, *start, *end, *length)
            }
            MaskKind::Passthrough => raw.to_string(),
        }
    }
}

fn repeat_mask(count: usize) -> String {
    MASK_CHAR.to_string().repeat(count)
}

/// Full redaction: a fixed-length run, or one mask character per input char.
fn mask_full(raw: &str, length: Option<usize>) -> String {
    match length {
        Some(l) => repeat_mask(l),
        None => repeat_mask(raw.chars().count()),
    }
}

/// Email-aware redaction: the span before the first `@` collapses to mask
/// characters (a fixed-length run when configured), `@` and the remainder
/// stay verbatim. Without an `@` the value is returned unchanged.
fn mask_email(raw: &str, length: Option<usize>) -> String {
    let Some(at) = raw.find('@') else {
        return raw.to_string();
    };
    let run = match length {
        Some(l) => l,
        None => raw[..at].chars().count(),
    };
    format!("{}{}", repeat_mask(run), &raw[at..])
}

/// Every non-overlapping match collapses to exactly one mask character,
/// regardless of the match length.
fn mask_regex(pattern: &Regex, raw: &str) -> String {
    pattern.replace_all(raw, MASK_CHAR.to_string()).into_owned()
}

/// Redact the half-open character range `[start, end)`.
///
/// A negative or unset start is treated as 0; a negative, unset or
/// out-of-bounds end as the string length. An empty or inverted range
/// (`start >= length`, or `end - 1 <= start` using the configured end when
/// it is non-negative) is an invalid-configuration guard: the value is
/// returned unmodified. A positive fixed length replaces the redacted span
/// with exactly that many mask characters, so the output may grow or shrink.
fn mask_substring(
    raw: &str,
    start: Option<i64>,
    end: Option<i64>,
    length: Option<usize>,
) -> String {
    let char_len = raw.chars().count() as i64;
    let start = start.unwrap_or(0).max(0);
    let end_clamped = match end {
        Some(e) if e >= 0 => e.min(char_len),
        _ => char_len,
    };
    // Guard against empty and inverted ranges, using the pre-clamp end when
    // one was configured.
    let guard_end = match end {
        Some(e) if e >= 0 => e,
        _ => end_clamped,
    };
    if start >= char_len || guard_end - 1 <= start {
        return raw.to_string();
    }

    let run = match length {
        Some(l) => l,
        None => (end_clamped - start) as usize,
    };
    let prefix: String = raw.chars().take(start as usize).collect();
    let suffix: String = raw.chars().skip(end_clamped as usize).collect();
    format!("{prefix}{}{suffix}", repeat_mask(run))
}
