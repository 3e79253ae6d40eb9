//! Byte-class predicates over whole byte strings.
//!
//! Each predicate stops at the first disqualifying byte, and every one of
//! them holds for the empty string.

/// Space, `\t`, `\n`, `\r`, vertical tab and form feed.
///
/// Wider than [`u8::is_ascii_whitespace`], which leaves out the vertical tab.
pub(crate) const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Every byte is an ASCII letter or digit.
///
/// ```rust
/// use pystring::is_alphanumeric;
///
/// assert!(is_alphanumeric("Foo123"));
/// assert!(!is_alphanumeric("Foo 123"));
/// ```
#[must_use]
pub fn is_alphanumeric(text: impl AsRef<[u8]>) -> bool {
    text.as_ref().iter().all(u8::is_ascii_alphanumeric)
}

/// Every byte is an ASCII letter.
#[must_use]
pub fn is_alphabetic(text: impl AsRef<[u8]>) -> bool {
    text.as_ref().iter().all(u8::is_ascii_alphabetic)
}

/// No byte is a lower-case ASCII letter. Digits and punctuation qualify.
///
/// ```rust
/// use pystring::is_uppercase;
///
/// assert!(is_uppercase("FOO BAR 42"));
/// assert!(!is_uppercase("Foo"));
/// ```
#[must_use]
pub fn is_uppercase(text: impl AsRef<[u8]>) -> bool {
    !text.as_ref().iter().any(u8::is_ascii_lowercase)
}

/// No byte is an upper-case ASCII letter. Digits and punctuation qualify.
#[must_use]
pub fn is_lowercase(text: impl AsRef<[u8]>) -> bool {
    !text.as_ref().iter().any(u8::is_ascii_uppercase)
}

/// Every byte is an ASCII digit. Signs are not accepted.
#[must_use]
pub fn is_int(text: impl AsRef<[u8]>) -> bool {
    text.as_ref().iter().all(u8::is_ascii_digit)
}

/// Every byte is an ASCII digit, except for at most one `.`.
///
/// ```rust
/// use pystring::is_real;
///
/// assert!(is_real("3.14"));
/// assert!(is_real("42"));
/// assert!(is_real("."));
/// assert!(!is_real("1.2.3"));
/// assert!(!is_real("-1"));
/// ```
#[must_use]
pub fn is_real(text: impl AsRef<[u8]>) -> bool {
    let mut seen_point = false;
    text.as_ref().iter().all(|&byte| match byte {
        b'0'..=b'9' => true,
        b'.' if !seen_point => {
            seen_point = true;
            true
        }
        _ => false,
    })
}

/// Every byte is whitespace: space, `\t`, `\n`, `\r`, `\v` or `\f`.
#[must_use]
pub fn is_whitespace(text: impl AsRef<[u8]>) -> bool {
    text.as_ref().iter().all(|&byte| is_space(byte))
}

/// Whether `text` begins with `prefix`. The empty prefix always matches.
#[must_use]
pub fn starts_with(text: impl AsRef<[u8]>, prefix: impl AsRef<[u8]>) -> bool {
    text.as_ref().starts_with(prefix.as_ref())
}

/// Whether `text` ends with `suffix`. The empty suffix always matches.
#[must_use]
pub fn ends_with(text: impl AsRef<[u8]>, suffix: impl AsRef<[u8]>) -> bool {
    text.as_ref().ends_with(suffix.as_ref())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty(b"", true, true, true, true, true, true, true)]
    #[case::word(b"Foo", true, true, false, false, false, false, false)]
    #[case::digits(b"2024", true, false, true, true, true, true, false)]
    #[case::decimal(b"20.24", false, false, true, true, false, true, false)]
    #[case::shout(b"HEY YOU", false, false, true, false, false, false, false)]
    #[case::blank(b" \t\x0b\x0c\r\n", false, false, true, true, false, false, true)]
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    fn classification(
        #[case] text: &[u8],
        #[case] alphanumeric: bool,
        #[case] alphabetic: bool,
        #[case] uppercase: bool,
        #[case] lowercase: bool,
        #[case] int: bool,
        #[case] real: bool,
        #[case] whitespace: bool,
    ) {
        assert_eq!(is_alphanumeric(text), alphanumeric);
        assert_eq!(is_alphabetic(text), alphabetic);
        assert_eq!(is_uppercase(text), uppercase);
        assert_eq!(is_lowercase(text), lowercase);
        assert_eq!(is_int(text), int);
        assert_eq!(is_real(text), real);
        assert_eq!(is_whitespace(text), whitespace);
    }

    #[test]
    fn prefixes_and_suffixes() {
        assert!(starts_with("Hello, World", "Hello"));
        assert!(!starts_with("Hello, World", "World"));
        assert!(ends_with("Hello, World", "World"));
        assert!(!ends_with("Hi", "Hello, Hi"));
        assert!(starts_with("", ""));
        assert!(ends_with("abc", ""));
    }
}
