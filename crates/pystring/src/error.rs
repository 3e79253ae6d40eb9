use thiserror::Error;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T, E = StringError> = core::result::Result<T, E>;

/// A violated precondition of a string operation.
///
/// Every variant is a caller-input error detected at the API boundary. None of
/// them are transient, so nothing in this crate retries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringError {
    /// A resolved index falls outside `[0, length)` of the target buffer, or a
    /// slice bound falls outside `[0, length]`.
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange {
        /// The offending index, before negative-index resolution.
        index: isize,
        /// Length of the buffer the index was applied to.
        length: usize,
    },
    /// A slice descriptor (or chunk size) with a step of zero.
    #[error("slice step cannot be zero")]
    InvalidStep,
    /// A split limit below `-1`.
    #[error("invalid split limit {0}: must be -1 (unbounded) or non-negative")]
    InvalidLimit(isize),
    /// A windowed operation received a descriptor whose step is not `1`.
    #[error("unsupported step {0}: windowed search requires a step of 1")]
    UnsupportedStep(isize),
    /// The allocator could not satisfy a growth request.
    #[error("failed to allocate room for {requested} elements")]
    AllocationFailed {
        /// The capacity that could not be reserved.
        requested: usize,
    },
}

impl StringError {
    pub(crate) fn out_of_range(index: isize, length: usize) -> Self {
        log::debug!("index {index} rejected for length {length}");
        Self::IndexOutOfRange { index, length }
    }
}
