//! Copying transformations: case mapping, reversal, trimming and padding.
//!
//! Nothing here modifies its input. Case mapping only touches ASCII letters;
//! every other byte is copied through.
use crate::{
    buffer::{Buffer, gather},
    error::Result,
    index::SliceIndex,
    predicate::is_space,
};

fn mapped(text: &[u8], map: impl FnOnce(&mut [u8])) -> Result<Buffer> {
    let mut copy = Buffer::from_bytes(text)?;
    map(copy.as_bytes_mut());
    Ok(copy)
}

/// Upper-case every ASCII letter.
///
/// # Errors
///
/// [`StringError::AllocationFailed`](crate::StringError::AllocationFailed)
/// if the copy cannot be allocated. The same holds for every function in
/// this module.
pub fn to_upper(text: impl AsRef<[u8]>) -> Result<Buffer> {
    mapped(text.as_ref(), <[u8]>::make_ascii_uppercase)
}

/// Lower-case every ASCII letter.
///
/// # Errors
///
/// See [`to_upper`].
pub fn to_lower(text: impl AsRef<[u8]>) -> Result<Buffer> {
    mapped(text.as_ref(), <[u8]>::make_ascii_lowercase)
}

/// Flip the case of every ASCII letter.
///
/// ```rust
/// use pystring::swap_case;
///
/// assert_eq!(swap_case("Foo Bar").unwrap(), "fOO bAR");
/// ```
///
/// # Errors
///
/// See [`to_upper`].
pub fn swap_case(text: impl AsRef<[u8]>) -> Result<Buffer> {
    mapped(text.as_ref(), |bytes| {
        for byte in bytes.iter_mut().filter(|byte| byte.is_ascii_alphabetic()) {
            *byte ^= 0x20;
        }
    })
}

/// Upper-case the first byte and every byte that follows whitespace. Other
/// bytes keep their case.
///
/// ```rust
/// use pystring::to_title;
///
/// assert_eq!(to_title("foo bar").unwrap(), "Foo Bar");
/// assert_eq!(to_title("mIxEd\tcase").unwrap(), "MIxEd\tCase");
/// ```
///
/// # Errors
///
/// See [`to_upper`].
pub fn to_title(text: impl AsRef<[u8]>) -> Result<Buffer> {
    mapped(text.as_ref(), |bytes| {
        let mut after_space = true;
        for byte in bytes {
            if after_space {
                byte.make_ascii_uppercase();
            }
            after_space = is_space(*byte);
        }
    })
}

/// Upper-case the first byte only.
///
/// # Errors
///
/// See [`to_upper`].
pub fn capitalize(text: impl AsRef<[u8]>) -> Result<Buffer> {
    mapped(text.as_ref(), |bytes| {
        if let Some(first) = bytes.first_mut() {
            first.make_ascii_uppercase();
        }
    })
}

/// The bytes of `text` in reverse order.
///
/// ```rust
/// use pystring::reverse;
///
/// assert_eq!(reverse("Hello, World!").unwrap(), "!dlroW ,olleH");
/// ```
///
/// # Errors
///
/// See [`to_upper`].
pub fn reverse(text: impl AsRef<[u8]>) -> Result<Buffer> {
    let text = text.as_ref();
    if text.is_empty() {
        return Ok(Buffer::new());
    }
    // (len - 1, -1, -1) visits every byte; -1 here is a literal stop, so the
    // descriptor is handed to `gather` without negative-bound resolution.
    #[allow(clippy::cast_possible_wrap)]
    let last = text.len() as isize - 1;
    gather(text, SliceIndex::new(last, -1, -1)?)
}

/// `text` without its leading whitespace.
///
/// # Errors
///
/// See [`to_upper`].
pub fn trim_left(text: impl AsRef<[u8]>) -> Result<Buffer> {
    Buffer::from_bytes(trimmed_left(text.as_ref()))
}

/// `text` without its trailing whitespace.
///
/// # Errors
///
/// See [`to_upper`].
pub fn trim_right(text: impl AsRef<[u8]>) -> Result<Buffer> {
    Buffer::from_bytes(trimmed_right(text.as_ref()))
}

/// `text` without leading or trailing whitespace. All-whitespace input
/// trims to nothing.
///
/// ```rust
/// use pystring::trim;
///
/// assert_eq!(trim(" Foo Bar  ").unwrap(), "Foo Bar");
/// assert!(trim(" \t\n").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// See [`to_upper`].
pub fn trim(text: impl AsRef<[u8]>) -> Result<Buffer> {
    Buffer::from_bytes(trimmed_left(trimmed_right(text.as_ref())))
}

fn trimmed_left(text: &[u8]) -> &[u8] {
    let start = text
        .iter()
        .position(|&byte| !is_space(byte))
        .unwrap_or(text.len());
    &text[start..]
}

fn trimmed_right(text: &[u8]) -> &[u8] {
    let end = text
        .iter()
        .rposition(|&byte| !is_space(byte))
        .map_or(0, |last| last + 1);
    &text[..end]
}

/// `left` spaces, then `text`, then `right` spaces.
///
/// # Errors
///
/// See [`to_upper`].
pub fn pad(text: impl AsRef<[u8]>, left: usize, right: usize) -> Result<Buffer> {
    pad_with(text, left, right, b' ')
}

/// [`pad`] with an arbitrary fill byte.
///
/// # Errors
///
/// See [`to_upper`].
pub fn pad_with(text: impl AsRef<[u8]>, left: usize, right: usize, fill: u8) -> Result<Buffer> {
    let text = text.as_ref();
    let total = text
        .len()
        .saturating_add(left)
        .saturating_add(right);
    let mut padded = Buffer::with_capacity(total)?;
    padded.push_repeated(fill, left)?;
    padded.concat_in_place(text)?;
    padded.push_repeated(fill, right)?;
    Ok(padded)
}

/// Centre `text` in a field of `width` bytes. When the margin is odd, the
/// extra space goes on the right. Text at least `width` long is copied
/// unchanged.
///
/// ```rust
/// use pystring::centre;
///
/// assert_eq!(centre("Foo Bar", 10).unwrap(), " Foo Bar  ");
/// assert_eq!(centre("Foo Bar", 3).unwrap(), "Foo Bar");
/// ```
///
/// # Errors
///
/// See [`to_upper`].
pub fn centre(text: impl AsRef<[u8]>, width: usize) -> Result<Buffer> {
    centre_with(text, width, b' ')
}

/// [`centre`] with an arbitrary fill byte.
///
/// # Errors
///
/// See [`to_upper`].
pub fn centre_with(text: impl AsRef<[u8]>, width: usize, fill: u8) -> Result<Buffer> {
    let text = text.as_ref();
    let margin = width.saturating_sub(text.len());
    pad_with(text, margin / 2, margin - margin / 2, fill)
}

/// `text` followed by enough spaces to fill `width` bytes.
///
/// # Errors
///
/// See [`to_upper`].
pub fn left_justify(text: impl AsRef<[u8]>, width: usize) -> Result<Buffer> {
    left_justify_with(text, width, b' ')
}

/// [`left_justify`] with an arbitrary fill byte.
///
/// # Errors
///
/// See [`to_upper`].
pub fn left_justify_with(text: impl AsRef<[u8]>, width: usize, fill: u8) -> Result<Buffer> {
    let text = text.as_ref();
    pad_with(text, 0, width.saturating_sub(text.len()), fill)
}

/// Enough spaces to fill `width` bytes, followed by `text`.
///
/// # Errors
///
/// See [`to_upper`].
pub fn right_justify(text: impl AsRef<[u8]>, width: usize) -> Result<Buffer> {
    right_justify_with(text, width, b' ')
}

/// [`right_justify`] with an arbitrary fill byte.
///
/// ```rust
/// use pystring::right_justify_with;
///
/// assert_eq!(right_justify_with("42", 5, b'0').unwrap(), "00042");
/// ```
///
/// # Errors
///
/// See [`to_upper`].
pub fn right_justify_with(text: impl AsRef<[u8]>, width: usize, fill: u8) -> Result<Buffer> {
    let text = text.as_ref();
    pad_with(text, width.saturating_sub(text.len()), 0, fill)
}
