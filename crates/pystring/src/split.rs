//! Splitting byte strings into [`Pieces`] and joining them back.
//!
//! Every split borrows from its input: the returned [`Pieces`] hold slices of
//! `text`, never copies. Only [`join`] and [`replace`] allocate.
use core::ops::Range;

use crate::{
    buffer::Buffer,
    error::{Result, StringError},
    index::SliceIndex,
    pieces::Pieces,
    predicate::is_space,
    search::{find_window, rfind_window},
};

/// How many splits an operation may perform.
///
/// Built from the conventional integer limit with [`Limit::try_from`]:
/// `0` means no splitting, `-1` means unbounded, a positive `n` allows at
/// most `n` splits, and anything below `-1` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Do not split: the whole input is the single result.
    NoSplit,
    /// Split at every delimiter.
    Unbounded,
    /// Split at most this many times; the rest of the input is the last
    /// piece.
    AtMost(usize),
}

impl Limit {
    /// Remaining split budget, `None` when unbounded.
    #[must_use]
    pub fn max_splits(self) -> Option<usize> {
        match self {
            Self::NoSplit => Some(0),
            Self::Unbounded => None,
            Self::AtMost(n) => Some(n),
        }
    }
}

impl TryFrom<isize> for Limit {
    type Error = StringError;

    fn try_from(limit: isize) -> Result<Self> {
        match limit {
            0 => Ok(Self::NoSplit),
            -1 => Ok(Self::Unbounded),
            n if n > 0 => Ok(Self::AtMost(n.unsigned_abs())),
            n => {
                log::debug!("rejected split limit {n}");
                Err(StringError::InvalidLimit(n))
            }
        }
    }
}

/// Consume one split from `budget`; `false` once it is exhausted.
fn take_split(budget: &mut Option<usize>) -> bool {
    match budget {
        None => true,
        Some(0) => false,
        Some(n) => {
            *n -= 1;
            true
        }
    }
}

fn split_window<'a>(
    text: &'a [u8],
    delimiter: &[u8],
    window: Range<usize>,
    limit: Limit,
) -> Result<Pieces<'a>> {
    let mut pieces = Pieces::new();
    let mut budget = limit.max_splits();
    let mut from = window.start;
    while budget != Some(0) {
        let Some(hit) = find_window(text, delimiter, from..window.end) else {
            break;
        };
        take_split(&mut budget);
        pieces.push(&text[from..hit.start])?;
        from = hit.end;
    }
    pieces.push(&text[from..window.end])?;
    Ok(pieces)
}

/// Split `text` at each occurrence of `delimiter`, left to right.
///
/// At most `limit` splits are made (see [`Limit`]), so the result always has
/// `min(splits, occurrences) + 1` pieces. An empty delimiter never matches
/// and yields the whole input.
///
/// ```rust
/// use pystring::split;
///
/// let fruit = split("Apple, Banana, Mango, Orange", ", ", 2).unwrap();
/// assert_eq!(fruit.iter().collect::<Vec<_>>(), ["Apple", "Banana", "Mango, Orange"]);
///
/// let parts = split("Hello, World!", "o", -1).unwrap();
/// assert_eq!(parts.iter().collect::<Vec<_>>(), ["Hell", ", W", "rld!"]);
/// ```
///
/// # Errors
///
/// [`StringError::InvalidLimit`] if `limit < -1`,
/// [`StringError::AllocationFailed`] if the pieces cannot be stored.
pub fn split<'a, T>(text: &'a T, delimiter: impl AsRef<[u8]>, limit: isize) -> Result<Pieces<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    let text = text.as_ref();
    split_window(text, delimiter.as_ref(), 0..text.len(), Limit::try_from(limit)?)
}

/// Split only the part of `text` addressed by `range`, without a limit.
///
/// # Errors
///
/// [`StringError::UnsupportedStep`] if the range step is not 1,
/// [`StringError::IndexOutOfRange`] if its bounds do not fit `text`.
pub fn split_in_range<'a, T>(
    text: &'a T,
    delimiter: impl AsRef<[u8]>,
    range: SliceIndex,
) -> Result<Pieces<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    let text = text.as_ref();
    let window = range.resolve_window(text.len())?;
    split_window(text, delimiter.as_ref(), window, Limit::Unbounded)
}

/// Split `text` on `\n`.
///
/// # Errors
///
/// Same as [`split`].
pub fn split_lines<'a, T>(text: &'a T, limit: isize) -> Result<Pieces<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    split(text, b"\n", limit)
}

/// Split `text` on runs of ASCII whitespace.
///
/// Leading and trailing whitespace never produce empty pieces. Once the
/// limit is reached, whatever follows (minus its leading whitespace) is the
/// final piece. Empty or all-whitespace input gives no pieces at all, except
/// with a limit of `0`, which always returns the input unchanged.
///
/// ```rust
/// use pystring::split_whitespace;
///
/// let words = split_whitespace("  one \t two\nthree  ", 1).unwrap();
/// assert_eq!(words.iter().collect::<Vec<_>>(), ["one", "two\nthree  "]);
/// assert!(split_whitespace(" \t ", -1).unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Same as [`split`].
pub fn split_whitespace<'a, T>(text: &'a T, limit: isize) -> Result<Pieces<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    let text = text.as_ref();
    let limit = Limit::try_from(limit)?;
    let mut pieces = Pieces::new();
    if limit == Limit::NoSplit {
        pieces.push(text)?;
        return Ok(pieces);
    }

    let mut budget = limit.max_splits();
    let mut cursor = 0;
    loop {
        while cursor < text.len() && is_space(text[cursor]) {
            cursor += 1;
        }
        if cursor == text.len() {
            break;
        }
        if !take_split(&mut budget) {
            pieces.push(&text[cursor..])?;
            break;
        }
        let start = cursor;
        while cursor < text.len() && !is_space(text[cursor]) {
            cursor += 1;
        }
        pieces.push(&text[start..cursor])?;
    }
    Ok(pieces)
}

/// Split `text` at each occurrence of `delimiter`, right to left.
///
/// This is a left split of the reversed text on the reversed delimiter,
/// with every piece and the piece order reversed back. Pieces come out in
/// left-to-right order; when the limit runs out, the unsplit remainder is
/// the first piece.
///
/// ```rust
/// use pystring::rsplit;
///
/// let path = rsplit("usr/local/bin/tool", "/", 1).unwrap();
/// assert_eq!(path.iter().collect::<Vec<_>>(), ["usr/local/bin", "tool"]);
/// ```
///
/// # Errors
///
/// Same as [`split`].
pub fn rsplit<'a, T>(text: &'a T, delimiter: impl AsRef<[u8]>, limit: isize) -> Result<Pieces<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    let text = text.as_ref();
    let delimiter = delimiter.as_ref();
    let mut budget = Limit::try_from(limit)?.max_splits();
    let mut pieces = Pieces::new();
    let mut end = text.len();
    while budget != Some(0) {
        let Some(hit) = rfind_window(text, delimiter, 0..end) else {
            break;
        };
        take_split(&mut budget);
        pieces.push(&text[hit.end..end])?;
        end = hit.start;
    }
    pieces.push(&text[..end])?;
    pieces.reverse();
    Ok(pieces)
}

/// Concatenate `pieces` with `delimiter` between consecutive elements.
///
/// A single piece comes back as an unchanged copy; no pieces give an empty
/// buffer.
///
/// ```rust
/// use pystring::{join, split};
///
/// let words = split("a-b-c", "-", -1).unwrap();
/// assert_eq!(join(&words, ", ").unwrap(), "a, b, c");
/// assert_eq!(join(["solo"], "+").unwrap(), "solo");
/// ```
///
/// # Errors
///
/// [`StringError::AllocationFailed`] if the result cannot be allocated.
pub fn join<I>(pieces: I, delimiter: impl AsRef<[u8]>) -> Result<Buffer>
where
    I: IntoIterator<Item: AsRef<[u8]>>,
{
    let delimiter = delimiter.as_ref();
    let mut pieces = pieces.into_iter();
    let mut joined = Buffer::new();
    let Some(first) = pieces.next() else {
        return Ok(joined);
    };
    joined.concat_in_place(first)?;
    for piece in pieces {
        joined.concat_in_place(delimiter)?;
        joined.concat_in_place(piece)?;
    }
    Ok(joined)
}

/// Cut `text` into consecutive slices of `size` bytes; the last one may be
/// shorter.
///
/// # Errors
///
/// [`StringError::InvalidStep`] if `size` is zero,
/// [`StringError::AllocationFailed`] if the pieces cannot be stored.
pub fn chunks<'a, T>(text: &'a T, size: usize) -> Result<Pieces<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    if size == 0 {
        log::debug!("rejected chunk size 0");
        return Err(StringError::InvalidStep);
    }
    let mut pieces = Pieces::new();
    for chunk in text.as_ref().chunks(size) {
        pieces.push(chunk)?;
    }
    Ok(pieces)
}

/// Every non-overlapping occurrence of `from` replaced by `to`, scanning
/// left to right. An empty `from` matches nowhere.
///
/// ```rust
/// use pystring::replace;
///
/// assert_eq!(replace("a.b.c", ".", "::").unwrap(), "a::b::c");
/// ```
///
/// # Errors
///
/// [`StringError::AllocationFailed`] if the result cannot be allocated.
pub fn replace(
    text: impl AsRef<[u8]>,
    from: impl AsRef<[u8]>,
    to: impl AsRef<[u8]>,
) -> Result<Buffer> {
    let text = text.as_ref();
    join(&split(text, from, -1)?, to)
}
