//! Substring and byte-class search.
//!
//! Substring search is Horspool's simplification of Boyer-Moore: a 256-entry
//! bad-character table tells how far the window may slide when its aligned
//! byte does not complete a match. Average cost is linear in the haystack,
//! worst case `O(n * m)`.
//!
//! Every search returns `Option<SliceIndex>`. A match always has length at
//! least one, because an empty pattern never matches.
use core::ops::Range;

use crate::{error::Result, index::SliceIndex};

/// Bad-character shifts for one pattern.
struct ShiftTable {
    shifts: [usize; 256],
}

impl ShiftTable {
    /// Shifts for a left-to-right scan aligned on the pattern's last byte.
    ///
    /// Every byte of the pattern except the last gets the distance from its
    /// right-most occurrence to the end of the pattern; all other bytes shift
    /// by the full pattern length.
    fn forward(pattern: &[u8]) -> Self {
        let m = pattern.len();
        let mut shifts = [m; 256];
        for (i, &byte) in pattern[..m - 1].iter().enumerate() {
            shifts[usize::from(byte)] = (m - i - 1).max(1);
        }
        Self { shifts }
    }

    /// Shifts for a right-to-left scan aligned on the pattern's first byte.
    fn backward(pattern: &[u8]) -> Self {
        let m = pattern.len();
        let mut shifts = [m; 256];
        for i in (1..m).rev() {
            shifts[usize::from(pattern[i])] = i;
        }
        Self { shifts }
    }

    #[inline]
    fn shift(&self, byte: u8) -> usize {
        self.shifts[usize::from(byte)]
    }
}

/// Left-most occurrence of `needle` entirely inside `haystack[window]`.
pub(crate) fn find_window(
    haystack: &[u8],
    needle: &[u8],
    window: Range<usize>,
) -> Option<Range<usize>> {
    let m = needle.len();
    if m == 0 || window.len() < m {
        return None;
    }

    let table = ShiftTable::forward(needle);
    let last = needle[m - 1];
    let mut cursor = window.start + m - 1;
    while cursor < window.end {
        let byte = haystack[cursor];
        if byte == last
            && haystack[cursor + 1 - m..=cursor]
                .iter()
                .rev()
                .eq(needle.iter().rev())
        {
            return Some(cursor + 1 - m..cursor + 1);
        }
        cursor += table.shift(byte);
    }
    None
}

/// Right-most occurrence of `needle` entirely inside `haystack[window]`.
pub(crate) fn rfind_window(
    haystack: &[u8],
    needle: &[u8],
    window: Range<usize>,
) -> Option<Range<usize>> {
    let m = needle.len();
    if m == 0 || window.len() < m {
        return None;
    }

    let table = ShiftTable::backward(needle);
    let first = needle[0];
    // `cursor` is the first byte of the candidate window.
    let mut cursor = window.end - m;
    loop {
        let byte = haystack[cursor];
        if byte == first && haystack[cursor..cursor + m] == *needle {
            return Some(cursor..cursor + m);
        }
        let shift = table.shift(byte);
        if cursor < window.start + shift {
            return None;
        }
        cursor -= shift;
    }
}

/// Left-most occurrence of `needle` in `haystack`.
///
/// ```rust
/// use pystring::{find, slice_index};
///
/// assert_eq!(find("Hello, World!", "World"), Some(slice_index!(7, 12)));
/// assert_eq!(find("Hello, World!", "xyz"), None);
/// ```
#[must_use]
pub fn find(haystack: impl AsRef<[u8]>, needle: impl AsRef<[u8]>) -> Option<SliceIndex> {
    let haystack = haystack.as_ref();
    find_window(haystack, needle.as_ref(), 0..haystack.len()).map(SliceIndex::from)
}

/// Left-most occurrence of `needle` that lies entirely inside `range`.
///
/// `range` is resolved against `haystack` on every call.
///
/// # Errors
///
/// [`UnsupportedStep`](crate::StringError::UnsupportedStep) if the range
/// step is not 1, [`IndexOutOfRange`](crate::StringError::IndexOutOfRange)
/// if its bounds do not fit `haystack`.
pub fn find_in_range(
    haystack: impl AsRef<[u8]>,
    needle: impl AsRef<[u8]>,
    range: SliceIndex,
) -> Result<Option<SliceIndex>> {
    let haystack = haystack.as_ref();
    let window = range.resolve_window(haystack.len())?;
    Ok(find_window(haystack, needle.as_ref(), window).map(SliceIndex::from))
}

/// Right-most occurrence of `needle` in `haystack`.
#[must_use]
pub fn rfind(haystack: impl AsRef<[u8]>, needle: impl AsRef<[u8]>) -> Option<SliceIndex> {
    let haystack = haystack.as_ref();
    rfind_window(haystack, needle.as_ref(), 0..haystack.len()).map(SliceIndex::from)
}

/// Right-most occurrence of `needle` that lies entirely inside `range`.
///
/// # Errors
///
/// Same as [`find_in_range`].
pub fn rfind_in_range(
    haystack: impl AsRef<[u8]>,
    needle: impl AsRef<[u8]>,
    range: SliceIndex,
) -> Result<Option<SliceIndex>> {
    let haystack = haystack.as_ref();
    let window = range.resolve_window(haystack.len())?;
    Ok(rfind_window(haystack, needle.as_ref(), window).map(SliceIndex::from))
}

/// First position holding `byte`, as a length-1 range.
#[must_use]
pub fn find_char(haystack: impl AsRef<[u8]>, byte: u8) -> Option<SliceIndex> {
    let haystack = haystack.as_ref();
    haystack
        .iter()
        .position(|&b| b == byte)
        .map(|i| SliceIndex::from(i..i + 1))
}

/// First position visited by `range` that holds `byte`.
///
/// Any nonzero step is accepted; with a negative step the scan runs
/// backwards and reports the first hit in visiting order.
///
/// # Errors
///
/// [`IndexOutOfRange`](crate::StringError::IndexOutOfRange) if `range` does
/// not fit `haystack`.
pub fn find_char_in_range(
    haystack: impl AsRef<[u8]>,
    byte: u8,
    range: SliceIndex,
) -> Result<Option<SliceIndex>> {
    let haystack = haystack.as_ref();
    let mut positions = range.resolve(haystack.len())?.positions(haystack.len())?;
    Ok(positions
        .find(|&i| haystack[i] == byte)
        .map(|i| SliceIndex::from(i..i + 1)))
}

/// First position holding any byte of `charset`, like the regex class
/// `[...]`.
///
/// ```rust
/// use pystring::{find_any_of, slice_index};
///
/// assert_eq!(find_any_of("Hello, World!", "Wd"), Some(slice_index!(7, 8)));
/// assert_eq!(find_any_of("Hello, World!", "xyz"), None);
/// ```
#[must_use]
pub fn find_any_of(haystack: impl AsRef<[u8]>, charset: impl AsRef<[u8]>) -> Option<SliceIndex> {
    let haystack = haystack.as_ref();
    let charset = charset.as_ref();
    haystack
        .iter()
        .position(|&b| find_char(charset, b).is_some())
        .map(|i| SliceIndex::from(i..i + 1))
}

/// First position visited by `range` holding any byte of `charset`.
///
/// # Errors
///
/// [`IndexOutOfRange`](crate::StringError::IndexOutOfRange) if `range` does
/// not fit `haystack`.
pub fn find_any_of_in_range(
    haystack: impl AsRef<[u8]>,
    charset: impl AsRef<[u8]>,
    range: SliceIndex,
) -> Result<Option<SliceIndex>> {
    let haystack = haystack.as_ref();
    let charset = charset.as_ref();
    let mut positions = range.resolve(haystack.len())?.positions(haystack.len())?;
    Ok(positions
        .find(|&i| find_char(charset, haystack[i]).is_some())
        .map(|i| SliceIndex::from(i..i + 1)))
}

/// Whether `needle` occurs in `haystack`.
#[must_use]
pub fn contains(haystack: impl AsRef<[u8]>, needle: impl AsRef<[u8]>) -> bool {
    find(haystack, needle).is_some()
}

/// Number of non-overlapping occurrences of `needle`, scanning left to right.
///
/// ```rust
/// use pystring::count;
///
/// assert_eq!(count("Hello, World", "l"), 3);
/// assert_eq!(count("Hello, World", "lo"), 1);
/// assert_eq!(count("aaaa", "aa"), 2);
/// ```
#[must_use]
pub fn count(haystack: impl AsRef<[u8]>, needle: impl AsRef<[u8]>) -> usize {
    let haystack = haystack.as_ref();
    let needle = needle.as_ref();
    let mut found = 0;
    let mut from = 0;
    while let Some(hit) = find_window(haystack, needle, from..haystack.len()) {
        found += 1;
        from = hit.end;
    }
    found
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{StringError, slice_index};

    fn naive(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[rstest]
    #[case("Hello, World!", "World", Some((7, 12)))]
    #[case("Hello, World", "l", Some((2, 3)))]
    #[case("Hello, World", "lo", Some((3, 5)))]
    #[case("Hello, World!", "xyz", None)]
    #[case("Hello, World!", "Hello, World!", Some((0, 13)))]
    #[case("Hello", "Hello, World!", None)]
    #[case("abcabcabd", "abd", Some((6, 9)))]
    #[case("aaaaab", "aab", Some((3, 6)))]
    #[case("abc", "", None)]
    #[case("", "a", None)]
    fn find_cases(
        #[case] haystack: &str,
        #[case] needle: &str,
        #[case] expected: Option<(isize, isize)>,
    ) {
        let expected = expected.map(|(start, stop)| slice_index!(start, stop));
        assert_eq!(find(haystack, needle), expected);
    }

    #[test]
    fn find_agrees_with_naive_scan() {
        let haystack = b"the quick brown fox jumps over the lazy dog; the end";
        for start in 0..haystack.len() {
            for end in start + 1..=(start + 6).min(haystack.len()) {
                let needle = &haystack[start..end];
                let expected = naive(haystack, needle)
                    .map(|i| slice_index!(i as isize, (i + needle.len()) as isize));
                assert_eq!(find(haystack, needle), expected, "needle {needle:?}");
            }
        }
    }

    #[test]
    fn find_in_range_is_bounded_by_window() {
        let text = "Hello, World";
        assert_eq!(
            find_in_range(text, "l", slice_index!(0, 4)),
            Ok(Some(slice_index!(2, 3)))
        );
        assert_eq!(find_in_range(text, "lo", slice_index!(0, 4)), Ok(None));
        assert_eq!(
            find_in_range(text, "l", slice_index!(4, 12)),
            Ok(Some(slice_index!(10, 11)))
        );
        // negative bounds resolve against the haystack
        assert_eq!(
            find_in_range(text, "o", slice_index!(-5, -1)),
            Ok(Some(slice_index!(8, 9)))
        );
        // window shorter than the pattern
        assert_eq!(find_in_range(text, "World", slice_index!(7, 11)), Ok(None));
    }

    #[test]
    fn find_in_range_requires_unit_step() {
        let range = slice_index!(0, 12, 2).unwrap();
        assert_eq!(
            find_in_range("Hello, World", "l", range),
            Err(StringError::UnsupportedStep(2))
        );
        assert_eq!(
            find_in_range("Hello", "l", slice_index!(0, 6)),
            Err(StringError::IndexOutOfRange {
                index: 6,
                length: 5
            })
        );
    }

    #[rstest]
    #[case("a,b,c", ",", Some((3, 4)))]
    #[case("aaa", "aa", Some((1, 3)))]
    #[case("abcabc", "abc", Some((3, 6)))]
    #[case("abc", "x", None)]
    #[case("ab", "abc", None)]
    fn rfind_cases(
        #[case] haystack: &str,
        #[case] needle: &str,
        #[case] expected: Option<(isize, isize)>,
    ) {
        let expected = expected.map(|(start, stop)| slice_index!(start, stop));
        assert_eq!(rfind(haystack, needle), expected);
    }

    #[test]
    fn rfind_agrees_with_naive_scan() {
        let haystack = b"abracadabra, abracadabra";
        for start in 0..haystack.len() {
            for end in start + 1..=(start + 5).min(haystack.len()) {
                let needle = &haystack[start..end];
                let expected = haystack
                    .windows(needle.len())
                    .rposition(|w| w == needle)
                    .map(|i| slice_index!(i as isize, (i + needle.len()) as isize));
                assert_eq!(rfind(haystack, needle), expected, "needle {needle:?}");
            }
        }
    }

    #[test]
    fn rfind_in_range_stays_left_of_stop() {
        assert_eq!(
            rfind_in_range("a,b,c", ",", slice_index!(0, 3)),
            Ok(Some(slice_index!(1, 2)))
        );
        assert_eq!(rfind_in_range("a,b,c", ",", slice_index!(0, 1)), Ok(None));
    }

    #[test]
    fn char_search() {
        assert_eq!(find_char("Hello, World!", b'W'), Some(slice_index!(7, 8)));
        assert_eq!(find_char("Hello, World!", b'z'), None);
        assert_eq!(
            find_char_in_range("Hello, World!", b'W', slice_index!(0, 5)),
            Ok(None)
        );
        assert_eq!(
            find_char_in_range("Hello, World!", b'o', slice_index!(-1, 0, -1).unwrap()),
            Ok(Some(slice_index!(8, 9)))
        );
    }

    #[test]
    fn char_class_search() {
        assert_eq!(
            find_any_of_in_range("Hello, World!", "Wd", slice_index!(0, 5)),
            Ok(None)
        );
        assert_eq!(
            find_any_of_in_range("Hello, World!", "Wd", slice_index!(8, 12)),
            Ok(Some(slice_index!(11, 12)))
        );
        assert_eq!(find_any_of("Hello", ""), None);
    }

    #[test]
    fn count_and_contains_agree() {
        for needle in ["l", "lo", "o, W", "z", "Hello, World!"] {
            let text = "Hello, World";
            assert_eq!(count(text, needle) == 0, !contains(text, needle), "{needle}");
        }
        assert_eq!(count("anything", ""), 0);
    }
}
