use alloc::vec::Vec;

use bstr::BStr;

use crate::{
    buffer::Buffer,
    error::{Result, StringError},
};

/// An ordered run of byte strings borrowed from somewhere else.
///
/// `Pieces` is what the split functions produce and what [`join`] consumes.
/// It never owns the bytes it refers to: every piece borrows from the split
/// input (or from whatever the caller [`push`](Pieces::push)ed), and the
/// lifetime `'a` keeps the collection from outliving them.
///
/// Consumption is sequential. [`Iterator::next`] hands out pieces in
/// insertion order and returns `None` once exhausted; [`Pieces::iter`] walks
/// every piece without moving the cursor.
///
/// [`join`]: crate::join
///
/// # Examples
///
/// ```rust
/// use pystring::split;
///
/// let text = String::from("Apple, Banana, Mango");
/// let mut pieces = split(&text, ", ", -1).unwrap();
/// assert_eq!(pieces.len(), 3);
/// assert_eq!(pieces.next().unwrap(), "Apple");
/// assert_eq!(pieces.remaining(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pieces<'a> {
    items: Vec<&'a BStr>,
    cursor: usize,
}

impl<'a> Pieces<'a> {
    /// An empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
        }
    }

    /// Append a borrowed piece. The allocation doubles when full.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the reference array cannot grow.
    pub fn push<T>(&mut self, piece: &'a T) -> Result<()>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let capacity = self.items.capacity();
        if self.items.len() == capacity {
            let target = capacity.saturating_mul(2).max(1);
            log::trace!("re-allocating pieces from {capacity} to {target}");
            self.items
                .try_reserve_exact(target - self.items.len())
                .map_err(|_| StringError::AllocationFailed { requested: target })?;
        }
        self.items.push(BStr::new(piece.as_ref()));
        Ok(())
    }

    /// The first piece, regardless of the cursor.
    #[must_use]
    pub fn peek_first(&self) -> Option<&'a BStr> {
        self.items.first().copied()
    }

    /// Total number of pieces, consumed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was ever pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pieces `next` has yet to return.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    /// Move the cursor back to the first piece.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Walk every piece in order without touching the cursor.
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, &'a BStr>> {
        self.items.iter().copied()
    }

    /// Copy every piece into an owned [`Buffer`], for callers that need the
    /// results to outlive the split input.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if any copy cannot be allocated.
    pub fn to_buffers(&self) -> Result<Vec<Buffer>> {
        let mut buffers = Vec::new();
        buffers
            .try_reserve_exact(self.items.len())
            .map_err(|_| StringError::AllocationFailed {
                requested: self.items.len(),
            })?;
        for piece in self.iter() {
            buffers.push(Buffer::from_bytes(piece)?);
        }
        Ok(buffers)
    }

    /// Flip insertion order; used by right-to-left producers.
    pub(crate) fn reverse(&mut self) {
        self.items.reverse();
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = &'a BStr;

    fn next(&mut self) -> Option<&'a BStr> {
        let piece = self.items.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(piece)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pieces<'_> {}

impl<'p, 'a> IntoIterator for &'p Pieces<'a> {
    type Item = &'a BStr;
    type IntoIter = core::iter::Copied<core::slice::Iter<'p, &'a BStr>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_insertion_order_then_exhausts() {
        let first = Buffer::from_bytes("Foo").unwrap();
        let second = "Bar";
        let mut pieces = Pieces::new();
        pieces.push(&first).unwrap();
        pieces.push(second).unwrap();
        pieces.push(b"Spam").unwrap();

        assert_eq!(pieces.next().unwrap(), "Foo");
        assert_eq!(pieces.next().unwrap(), "Bar");
        assert_eq!(pieces.next().unwrap(), "Spam");
        assert_eq!(pieces.next(), None);
        assert_eq!(pieces.next(), None);

        pieces.rewind();
        assert_eq!(pieces.remaining(), 3);
    }

    #[test]
    fn capacity_doubles() {
        let mut pieces = Pieces::new();
        let mut seen = alloc::vec::Vec::new();
        for _ in 0..9 {
            pieces.push("x").unwrap();
            seen.push(pieces.items.capacity());
        }
        assert_eq!(seen[0], 1);
        assert!(seen.windows(2).all(|w| w[1] == w[0] || w[1] >= 2 * w[0]));
        assert!(pieces.items.capacity() >= 9);
    }

    #[test]
    fn iter_does_not_consume() {
        let mut pieces = Pieces::new();
        pieces.push("a").unwrap();
        pieces.push("b").unwrap();
        let _ = pieces.next();
        assert_eq!(pieces.iter().count(), 2);
        assert_eq!(pieces.peek_first().unwrap(), "a");
        assert_eq!(pieces.remaining(), 1);
    }

    #[test]
    fn to_buffers_copies() {
        let mut pieces = Pieces::new();
        pieces.push("left").unwrap();
        pieces.push("right").unwrap();
        let owned = pieces.to_buffers().unwrap();
        assert_eq!(owned, ["left", "right"]);
    }
}
