//! # Entry Buffer
//!
//! The in-progress price the user is typing, before it is committed with
//! the "+" key.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Entry Buffer Transitions                           │
//! │                                                                         │
//! │  Keypad 0-9 / "." ──► push(ch)        rejected: second ".", full (6)   │
//! │  Back key ─────────► backspace()      no-op when empty                  │
//! │  C key ────────────► clear()                                            │
//! │  Typing in field ──► set_input(text)  digits + first "." only          │
//! │  "+" key ──────────► take_committed() parse, round to sen, empty       │
//! │                                                                         │
//! │  INVARIANT: at most one "." and at most MAX_ENTRY_LEN characters        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating method returns `true` when the buffer changed.

use serde::{Deserialize, Deserializer, Serialize};

use crate::money::Money;
use crate::MAX_ENTRY_LEN;

/// Text buffer behind the entry field.
///
/// Serialized as a plain string. Deserializing runs the same sanitizer as
/// typed input, so a stored buffer can never break the invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryBuffer(String);

impl EntryBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        EntryBuffer(String::new())
    }

    /// Builds a buffer from free text, as if typed into the entry field.
    pub fn from_input(text: &str) -> Self {
        EntryBuffer(sanitize_input(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Appends a keypad character.
    ///
    /// ## Rules
    /// - Only `0`-`9` and `.` are accepted
    /// - A second `.` is ignored
    /// - Nothing is appended once the buffer holds [`MAX_ENTRY_LEN`] characters
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::EntryBuffer;
    ///
    /// let mut entry = EntryBuffer::new();
    /// assert!(entry.push('1'));
    /// assert!(entry.push('.'));
    /// assert!(!entry.push('.'));
    /// assert_eq!(entry.as_str(), "1.");
    /// ```
    pub fn push(&mut self, ch: char) -> bool {
        if !is_entry_char(ch) {
            return false;
        }
        if ch == '.' && self.0.contains('.') {
            return false;
        }
        if self.0.len() >= MAX_ENTRY_LEN {
            return false;
        }
        self.0.push(ch);
        true
    }

    /// Removes the last character.
    pub fn backspace(&mut self) -> bool {
        self.0.pop().is_some()
    }

    /// Empties the buffer.
    pub fn clear(&mut self) -> bool {
        let changed = !self.0.is_empty();
        self.0.clear();
        changed
    }

    /// Replaces the buffer with sanitized free text.
    pub fn set_input(&mut self, text: &str) -> bool {
        let cleaned = sanitize_input(text);
        let changed = cleaned != self.0;
        self.0 = cleaned;
        changed
    }

    /// Parses the buffer into an amount rounded to the sen.
    ///
    /// `None` when the buffer is empty or holds no digit (a lone `.`).
    pub fn parse(&self) -> Option<Money> {
        parse_amount(&self.0)
    }

    /// The buffer's worth for totals: unparseable text counts as zero.
    pub fn value(&self) -> Money {
        self.parse().unwrap_or_default()
    }

    /// Consumes the buffer for the "+" key.
    ///
    /// Returns `None` for an empty buffer. Otherwise empties the buffer and
    /// returns its [`value`](Self::value), so a lone `.` commits as zero.
    pub fn take_committed(&mut self) -> Option<Money> {
        if self.is_empty() {
            return None;
        }
        let amount = self.value();
        self.0.clear();
        Some(amount)
    }
}

impl<'de> Deserialize<'de> for EntryBuffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(EntryBuffer::from_input(&raw))
    }
}

fn is_entry_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

/// Cleans free text typed into the entry field.
///
/// ## Rules
/// 1. Drop everything except ASCII digits and `.`
/// 2. Keep the first `.` as the decimal point and squash later ones
///    (`"1..32"` becomes `"1.32"`)
/// 3. Truncate to [`MAX_ENTRY_LEN`] characters
///
/// ## Example
/// ```rust
/// use tally_core::entry::sanitize_input;
///
/// assert_eq!(sanitize_input("RM 12.50"), "12.50");
/// assert_eq!(sanitize_input("1..32"), "1.32");
/// assert_eq!(sanitize_input("1.2.3.4"), "1.234");
/// assert_eq!(sanitize_input("12345678"), "123456");
/// ```
pub fn sanitize_input(text: &str) -> String {
    let mut cleaned = String::with_capacity(MAX_ENTRY_LEN);
    let mut seen_dot = false;

    for ch in text.chars().filter(|c| is_entry_char(*c)) {
        if ch == '.' {
            if seen_dot {
                continue;
            }
            seen_dot = true;
        }
        if cleaned.len() == MAX_ENTRY_LEN {
            break;
        }
        cleaned.push(ch);
    }

    cleaned
}

/// Parses decimal ringgit text into sen, rounding half up at the third
/// decimal place.
///
/// Accepts `"12"`, `"12."`, `".5"` and `"12.345"`. Rejects empty text,
/// a lone `"."`, signs, exponents and anything else that is not
/// digits around at most one `.`. Surrounding whitespace is ignored.
///
/// ## Example
/// ```rust
/// use tally_core::entry::parse_amount;
/// use tally_core::Money;
///
/// assert_eq!(parse_amount("5.5"), Some(Money::from_sen(550)));
/// assert_eq!(parse_amount("1.005"), Some(Money::from_sen(101)));
/// assert_eq!(parse_amount("."), None);
/// ```
pub fn parse_amount(text: &str) -> Option<Money> {
    let text = text.trim();
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut sen: i64 = 0;
    for b in whole.bytes() {
        sen = sen.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }
    sen = sen.checked_mul(100)?;

    let mut frac_digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let tenths = frac_digits.next().unwrap_or(0);
    let hundredths = frac_digits.next().unwrap_or(0);
    let round_up = frac_digits.next().is_some_and(|d| d >= 5);

    sen = sen.checked_add(tenths * 10 + hundredths + i64::from(round_up))?;
    Some(Money::from_sen(sen))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> EntryBuffer {
        let mut entry = EntryBuffer::new();
        for key in keys.chars() {
            entry.push(key);
        }
        entry
    }

    #[test]
    fn test_push_rejects_second_dot() {
        let mut entry = typed("3.5");
        assert!(!entry.push('.'));
        assert_eq!(entry.as_str(), "3.5");
    }

    #[test]
    fn test_push_rejects_when_full() {
        let mut entry = typed("123456");
        assert_eq!(entry.len(), MAX_ENTRY_LEN);
        assert!(!entry.push('7'));
        assert!(!entry.push('.'));
        assert_eq!(entry.as_str(), "123456");
    }

    #[test]
    fn test_push_rejects_non_keypad_chars() {
        let mut entry = EntryBuffer::new();
        assert!(!entry.push('a'));
        assert!(!entry.push('-'));
        assert!(!entry.push('+'));
        assert!(entry.is_empty());
    }

    #[test]
    fn test_backspace() {
        let mut entry = typed("12");
        assert!(entry.backspace());
        assert_eq!(entry.as_str(), "1");
        assert!(entry.backspace());
        assert!(!entry.backspace());
        assert!(entry.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut entry = typed("9.9");
        assert!(entry.clear());
        assert!(entry.is_empty());
        assert!(!entry.clear());
    }

    #[test]
    fn test_set_input_sanitizes() {
        let mut entry = EntryBuffer::new();
        assert!(entry.set_input("a1b2"));
        assert_eq!(entry.as_str(), "12");

        assert!(entry.set_input("..5"));
        assert_eq!(entry.as_str(), ".5");

        assert!(!entry.set_input(".5"));
    }

    #[test]
    fn test_sanitize_keeps_invariant() {
        for text in ["", "....", "1.2.3.4.5.6.7", "abc", "99999999.99", "0.000001"] {
            let cleaned = sanitize_input(text);
            assert!(cleaned.len() <= MAX_ENTRY_LEN, "{text:?} -> {cleaned:?}");
            assert!(cleaned.matches('.').count() <= 1, "{text:?} -> {cleaned:?}");
        }
        assert_eq!(sanitize_input("...."), ".");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10"), Some(Money::from_sen(1000)));
        assert_eq!(parse_amount("10."), Some(Money::from_sen(1000)));
        assert_eq!(parse_amount(".5"), Some(Money::from_sen(50)));
        assert_eq!(parse_amount("0.07"), Some(Money::from_sen(7)));
        assert_eq!(parse_amount("2.344"), Some(Money::from_sen(234)));
        assert_eq!(parse_amount("2.345"), Some(Money::from_sen(235)));
        assert_eq!(parse_amount(" 4 "), Some(Money::from_sen(400)));
        assert_eq!(parse_amount("0"), Some(Money::zero()));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount("1e3"), None);
        assert_eq!(parse_amount("99999999999999999999"), None);
    }

    #[test]
    fn test_value_fails_soft() {
        assert_eq!(EntryBuffer::new().value(), Money::zero());
        assert_eq!(typed(".").value(), Money::zero());
        assert_eq!(typed("4.2").value(), Money::from_sen(420));
    }

    #[test]
    fn test_take_committed() {
        let mut entry = typed("5.555");
        assert_eq!(entry.take_committed(), Some(Money::from_sen(556)));
        assert!(entry.is_empty());

        let mut dot = typed(".");
        assert_eq!(dot.take_committed(), Some(Money::zero()));
        assert!(dot.is_empty());

        let mut empty = EntryBuffer::new();
        assert_eq!(empty.take_committed(), None);
    }

    #[test]
    fn test_deserialize_sanitizes_stored_text() {
        let entry: EntryBuffer = serde_json::from_str("\"12.3.4xyz999\"").unwrap();
        assert_eq!(entry.as_str(), "12.349");

        let json = serde_json::to_string(&typed("7.5")).unwrap();
        assert_eq!(json, "\"7.5\"");
    }
}
