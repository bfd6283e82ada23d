//! Character classes used by the password policy.
//!
//! Classification compares code points against literal ASCII ranges.
//! Nothing here is locale or Unicode aware: `'É'` is not uppercase and
//! `'٣'` is not a digit.

/// Lowest code point accepted as printable (`'!'`).
pub const PRINTABLE_MIN: u32 = 33;

/// Highest code point accepted as printable (`'~'`).
pub const PRINTABLE_MAX: u32 = 126;

/// Code point in `33..=126`. Space and all control characters are excluded.
pub fn is_ascii_printable(c: char) -> bool {
    (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&(c as u32))
}

pub fn is_upper(c: char) -> bool {
    ('A'..='Z').contains(&c)
}

pub fn is_lower(c: char) -> bool {
    ('a'..='z').contains(&c)
}

pub fn is_digit(c: char) -> bool {
    ('0'..='9').contains(&c)
}

/// Counts every code point of `s` matching `predicate`.
pub fn count(s: &str, predicate: impl Fn(char) -> bool) -> usize {
    s.chars().filter(|&c| predicate(c)).count()
}
