/// How a [`Buffer`](crate::Buffer) sizes its allocation when an append would
/// overflow the current capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum GrowthPolicy {
    /// Over-allocate by one eighth of the requested size, rounded to a
    /// multiple of four bytes.
    ///
    /// This makes a sequence of single-byte appends O(1) amortized.
    #[default]
    Amortized,
    /// Allocate exactly the requested size.
    ///
    /// Useful when the final size is known up front and the buffer is built
    /// with a handful of large appends.
    Exact,
}

impl GrowthPolicy {
    /// The capacity to allocate so that `requested` bytes fit.
    ///
    /// ```rust
    /// use pystring::GrowthPolicy;
    ///
    /// assert_eq!(GrowthPolicy::Amortized.capacity_for(1), 4);
    /// assert_eq!(GrowthPolicy::Amortized.capacity_for(100), 116);
    /// assert_eq!(GrowthPolicy::Exact.capacity_for(100), 100);
    /// ```
    #[must_use]
    pub fn capacity_for(self, requested: usize) -> usize {
        match self {
            Self::Amortized => requested
                .saturating_add(requested >> 3)
                .saturating_add(6)
                & !3,
            Self::Exact => requested,
        }
    }
}

/// Configuration for a [`Buffer`](crate::Buffer).
///
/// # Examples
///
/// ```rust
/// use pystring::{Buffer, BufferOptions, GrowthPolicy};
///
/// let options = BufferOptions {
///     growth: GrowthPolicy::Exact,
/// };
/// let buffer = Buffer::with_options(16, options).unwrap();
/// assert!(buffer.capacity() >= 16);
/// ```
///
/// # Default
///
/// Amortized growth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub struct BufferOptions {
    /// Reallocation policy used whenever an append outgrows the capacity.
    ///
    /// # Default
    ///
    /// [`GrowthPolicy::Amortized`]
    pub growth: GrowthPolicy,
}
