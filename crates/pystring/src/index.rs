//! Python-style slice descriptors.
//!
//! A [`SliceIndex`] is a `(start, stop, step)` triple. Negative bounds count
//! from the end of whatever buffer the descriptor is applied to, and they are
//! resolved on every application rather than at construction, so the same
//! descriptor can address buffers of different lengths.
use core::ops::Range;

use crate::error::{Result, StringError};

/// A `(start, stop, step)` triple addressing bytes of a buffer.
///
/// `stop` is exclusive. `step` is never zero and may be negative, in which
/// case the addressed bytes are visited from `start` downwards.
///
/// # Examples
///
/// ```rust
/// use pystring::{Buffer, SliceIndex, slice_index};
///
/// let text = Buffer::from_bytes("Hello, World!").unwrap();
/// assert_eq!(text.slice(slice_index!(5)).unwrap(), "Hello");
/// assert_eq!(text.slice(slice_index!(-6, -1)).unwrap(), "World");
/// assert_eq!(text.slice(slice_index!(4, 0, -1).unwrap()).unwrap(), "olle");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSliceIndex", into = "RawSliceIndex")
)]
pub struct SliceIndex {
    start: isize,
    stop: isize,
    step: isize,
}

impl SliceIndex {
    /// The conventional `(0, 0, 1)` "no match" value.
    ///
    /// Searches in this crate return `Option<SliceIndex>`; see
    /// [`SliceIndex::or_not_found`] to collapse a result into this
    /// convention.
    pub const NOT_FOUND: Self = Self {
        start: 0,
        stop: 0,
        step: 1,
    };

    /// Build a descriptor from all three components.
    ///
    /// # Errors
    ///
    /// [`StringError::InvalidStep`] if `step` is zero.
    pub fn new(start: isize, stop: isize, step: isize) -> Result<Self> {
        if step == 0 {
            return Err(StringError::InvalidStep);
        }
        Ok(Self { start, stop, step })
    }

    /// `(0, stop, 1)`: the first `stop` bytes.
    #[must_use]
    pub const fn to(stop: isize) -> Self {
        Self {
            start: 0,
            stop,
            step: 1,
        }
    }

    /// `(start, stop, 1)`.
    #[must_use]
    pub const fn range(start: isize, stop: isize) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// First position visited (before resolution).
    #[must_use]
    pub const fn start(&self) -> isize {
        self.start
    }

    /// Exclusive end (before resolution).
    #[must_use]
    pub const fn stop(&self) -> isize {
        self.stop
    }

    /// Distance between visited positions; never zero.
    #[must_use]
    pub const fn step(&self) -> isize {
        self.step
    }

    /// Collapse a search result into the legacy `(0, 0, 1)` sentinel
    /// convention.
    #[must_use]
    pub fn or_not_found(found: Option<Self>) -> Self {
        found.unwrap_or(Self::NOT_FOUND)
    }

    /// Number of bytes addressed: `(stop - start) / step`, truncated toward
    /// zero, and zero when that quotient is negative.
    ///
    /// ```rust
    /// use pystring::{SliceIndex, slice_index};
    ///
    /// assert_eq!(slice_index!(2, 7).len(), 5);
    /// assert_eq!(slice_index!(0, 5, 2).unwrap().len(), 2);
    /// assert_eq!(slice_index!(5, 0, -1).unwrap().len(), 5);
    /// assert_eq!(slice_index!(7, 2).len(), 0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        let span = self.stop as i128 - self.start as i128;
        (span / self.step as i128).clamp(0, usize::MAX as i128) as usize
    }

    /// Whether the descriptor addresses no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve negative bounds against `length` by adding `length` once.
    ///
    /// The step is left untouched. Resolution is never cached: applying the
    /// returned descriptor to a buffer of another length means resolving the
    /// original one again.
    ///
    /// Bounds that point the wrong way for the step (`stop < start` with a
    /// positive step, `stop > start` with a negative one) are not an error:
    /// the resolved descriptor has a [`len`](Self::len) of zero and addresses
    /// an empty range.
    ///
    /// # Errors
    ///
    /// [`StringError::IndexOutOfRange`] if a resolved bound is negative or
    /// greater than `length`. Only the bounds themselves are checked, never
    /// their order.
    pub fn resolve(&self, length: usize) -> Result<Self> {
        Ok(Self {
            start: resolve_bound(self.start, length)?,
            stop: resolve_bound(self.stop, length)?,
            step: self.step,
        })
    }

    /// The byte positions this descriptor visits, in visiting order.
    ///
    /// `self` must already be resolved. Every position is checked to fall in
    /// `[0, length)` before the iterator is handed out.
    pub(crate) fn positions(self, length: usize) -> Result<impl Iterator<Item = usize>> {
        let count = self.len();
        if count > 0 {
            let last = self.start as i128 + (count as i128 - 1) * self.step as i128;
            for bound in [self.start as i128, last] {
                if bound < 0 || bound >= length as i128 {
                    #[allow(clippy::cast_possible_truncation)]
                    return Err(StringError::out_of_range(bound as isize, length));
                }
            }
        }

        let Self { start, step, .. } = self;
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        Ok((0..count).map(move |k| (start + k as isize * step) as usize))
    }

    /// The contiguous byte range of a resolved, step-1 descriptor.
    ///
    /// An inverted range (`stop < start`) is empty.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn window(self) -> Range<usize> {
        debug_assert_eq!(self.step, 1);
        debug_assert!(self.start >= 0 && self.stop >= 0);
        let start = self.start as usize;
        start..(self.stop as usize).max(start)
    }

    /// Resolve a windowed-operation range: step must be 1.
    pub(crate) fn resolve_window(&self, length: usize) -> Result<Range<usize>> {
        if self.step != 1 {
            log::debug!("windowed operation rejected step {}", self.step);
            return Err(StringError::UnsupportedStep(self.step));
        }
        Ok(self.resolve(length)?.window())
    }
}

fn resolve_bound(bound: isize, length: usize) -> Result<isize> {
    let Ok(signed_length) = isize::try_from(length) else {
        return Err(StringError::out_of_range(bound, length));
    };
    let resolved = if bound < 0 {
        bound + signed_length
    } else {
        bound
    };
    if resolved < 0 || resolved > signed_length {
        return Err(StringError::out_of_range(bound, length));
    }
    Ok(resolved)
}

impl From<Range<usize>> for SliceIndex {
    #[allow(clippy::cast_possible_wrap)]
    fn from(range: Range<usize>) -> Self {
        Self::range(range.start as isize, range.end as isize)
    }
}

/// Build a [`SliceIndex`] the way Python's slice syntax reads.
///
/// - `slice_index!(stop)` is `(0, stop, 1)`
/// - `slice_index!(start, stop)` is `(start, stop, 1)`
/// - `slice_index!(start, stop, step)` is `(start, stop, step)`
///
/// The one- and two-argument forms cannot fail and evaluate to a
/// `SliceIndex`; the three-argument form evaluates to
/// `Result<SliceIndex, StringError>` because the step may be zero.
///
/// ```rust
/// use pystring::{SliceIndex, StringError, slice_index};
///
/// assert_eq!(slice_index!(4), SliceIndex::range(0, 4));
/// assert_eq!(slice_index!(1, 4), SliceIndex::range(1, 4));
/// assert_eq!(slice_index!(1, 4, 0), Err(StringError::InvalidStep));
/// ```
#[macro_export]
macro_rules! slice_index {
    ($stop:expr $(,)?) => {
        $crate::SliceIndex::to($stop)
    };
    ($start:expr, $stop:expr $(,)?) => {
        $crate::SliceIndex::range($start, $stop)
    };
    ($start:expr, $stop:expr, $step:expr $(,)?) => {
        $crate::SliceIndex::new($start, $stop, $step)
    };
}

#[cfg(any(test, feature = "serde"))]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawSliceIndex {
    start: isize,
    stop: isize,
    step: isize,
}

#[cfg(any(test, feature = "serde"))]
impl TryFrom<RawSliceIndex> for SliceIndex {
    type Error = StringError;

    fn try_from(raw: RawSliceIndex) -> Result<Self> {
        Self::new(raw.start, raw.stop, raw.step)
    }
}

#[cfg(any(test, feature = "serde"))]
impl From<SliceIndex> for RawSliceIndex {
    fn from(index: SliceIndex) -> Self {
        Self {
            start: index.start,
            stop: index.stop,
            step: index.step,
        }
    }
}
