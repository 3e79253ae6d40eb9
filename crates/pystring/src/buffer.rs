use alloc::vec::Vec;
use core::{fmt, ops::Deref};

use bstr::BStr;

use crate::{
    error::{Result, StringError},
    index::SliceIndex,
    options::BufferOptions,
};

/// An owned, growable byte string.
///
/// A `Buffer` always copies the bytes it is built from and never aliases its
/// source. Appends grow the allocation according to the buffer's
/// [`GrowthPolicy`](crate::GrowthPolicy); a failed allocation is reported as
/// [`StringError::AllocationFailed`] rather than aborting.
///
/// `Buffer` dereferences to [`BStr`], so the read-only slice API (and `bstr`'s
/// `Debug`/`Display` renderings) are available directly.
///
/// # Examples
///
/// ```rust
/// use pystring::Buffer;
///
/// let mut greeting = Buffer::from_bytes("Hello, ").unwrap();
/// greeting.concat_in_place("World").unwrap();
/// greeting.push(b'!').unwrap();
/// assert_eq!(greeting, "Hello, World!");
/// assert_eq!(greeting.byte_at(-1).unwrap(), b'!');
/// ```
#[derive(Clone, Default)]
pub struct Buffer {
    bytes: Vec<u8>,
    options: BufferOptions,
}

impl Buffer {
    /// An empty buffer that has not allocated.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            options: BufferOptions {
                growth: crate::GrowthPolicy::Amortized,
            },
        }
    }

    /// An empty buffer able to hold `capacity` bytes before reallocating.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the allocation cannot be made.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_options(capacity, BufferOptions::default())
    }

    /// An empty buffer with explicit options.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the allocation cannot be made.
    pub fn with_options(capacity: usize, options: BufferOptions) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| StringError::AllocationFailed {
                requested: capacity,
            })?;
        Ok(Self { bytes, options })
    }

    /// Copy `bytes` into a new buffer.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the allocation cannot be made.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = bytes.as_ref();
        let mut buffer = Self::with_capacity(bytes.len())?;
        buffer.bytes.extend_from_slice(bytes);
        Ok(buffer)
    }

    /// A deep copy of this buffer, keeping its options.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the allocation cannot be made.
    pub fn copy(&self) -> Result<Self> {
        let mut buffer = Self::with_options(self.len(), self.options)?;
        buffer.bytes.extend_from_slice(&self.bytes);
        Ok(buffer)
    }

    /// Number of bytes in use.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes are in use.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bytes the buffer can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// The options this buffer grows with.
    #[must_use]
    pub fn options(&self) -> BufferOptions {
        self.options
    }

    /// The bytes in use.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable access to the bytes in use. The length cannot change through
    /// this view.
    #[must_use]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// The bytes in use, as a [`BStr`].
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(&self.bytes)
    }

    /// Give up the buffer, keeping its bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// The byte at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// [`StringError::IndexOutOfRange`] unless the resolved index lies in
    /// `[0, len)`.
    pub fn byte_at(&self, index: isize) -> Result<u8> {
        let resolved = if index < 0 {
            index.checked_add_unsigned(self.len())
        } else {
            Some(index)
        };
        resolved
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| self.bytes.get(i).copied())
            .ok_or_else(|| StringError::out_of_range(index, self.len()))
    }

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the buffer had to grow and could
    /// not.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.reserve_total(self.len() + 1)?;
        self.bytes.push(byte);
        Ok(())
    }

    /// Append `count` copies of `byte`.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the buffer had to grow and could
    /// not.
    pub fn push_repeated(&mut self, byte: u8, count: usize) -> Result<()> {
        let total = self
            .len()
            .checked_add(count)
            .ok_or(StringError::AllocationFailed { requested: count })?;
        self.reserve_total(total)?;
        self.bytes.resize(total, byte);
        Ok(())
    }

    /// Append `other` to the end of this buffer.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the buffer had to grow and could
    /// not. The buffer is left unchanged in that case.
    pub fn concat_in_place(&mut self, other: impl AsRef<[u8]>) -> Result<()> {
        let other = other.as_ref();
        let total = self
            .len()
            .checked_add(other.len())
            .ok_or(StringError::AllocationFailed {
                requested: other.len(),
            })?;
        self.reserve_total(total)?;
        self.bytes.extend_from_slice(other);
        Ok(())
    }

    /// A new buffer holding this buffer followed by `other`.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the allocation cannot be made.
    pub fn concat(&self, other: impl AsRef<[u8]>) -> Result<Self> {
        let mut joined = self.copy()?;
        joined.concat_in_place(other)?;
        Ok(joined)
    }

    /// This buffer repeated `times` times. A negative count yields an empty
    /// buffer.
    ///
    /// ```rust
    /// use pystring::Buffer;
    ///
    /// let foo = Buffer::from_bytes("foo ").unwrap();
    /// assert_eq!(foo.repeat(3).unwrap(), "foo foo foo ");
    /// assert!(foo.repeat(-1).unwrap().is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailed`] if the allocation cannot be made.
    pub fn repeat(&self, times: isize) -> Result<Self> {
        let Ok(times) = usize::try_from(times) else {
            return Ok(Self::new());
        };
        let total = self
            .len()
            .checked_mul(times)
            .ok_or(StringError::AllocationFailed { requested: usize::MAX })?;
        let mut repeated = Self::with_options(total, self.options)?;
        if total == 0 {
            return Ok(repeated);
        }
        for _ in 0..times {
            repeated.bytes.extend_from_slice(&self.bytes);
        }
        Ok(repeated)
    }

    /// The bytes addressed by `index`, resolved against this buffer's length.
    ///
    /// # Errors
    ///
    /// [`StringError::IndexOutOfRange`] if the descriptor does not fit this
    /// buffer, [`StringError::AllocationFailed`] if the result cannot be
    /// allocated.
    pub fn slice(&self, index: SliceIndex) -> Result<Self> {
        slice(&self.bytes, index)
    }

    /// Ensure room for `total` bytes, growing by the configured policy.
    fn reserve_total(&mut self, total: usize) -> Result<()> {
        let capacity = self.bytes.capacity();
        if total <= capacity {
            return Ok(());
        }

        let target = self.options.growth.capacity_for(total).max(total);
        log::trace!("re-allocating buffer from {capacity} to {target}");
        self.bytes
            .try_reserve_exact(target - self.bytes.len())
            .map_err(|_| StringError::AllocationFailed { requested: target })
    }
}

/// The bytes of `text` addressed by `index`, copied into a new buffer.
///
/// Negative bounds are resolved against `text.len()` on every call.
///
/// # Errors
///
/// [`StringError::IndexOutOfRange`] if the descriptor does not fit `text`,
/// [`StringError::AllocationFailed`] if the result cannot be allocated.
pub fn slice(text: impl AsRef<[u8]>, index: SliceIndex) -> Result<Buffer> {
    let text = text.as_ref();
    gather(text, index.resolve(text.len())?)
}

/// Copy the bytes visited by an already-resolved descriptor.
pub(crate) fn gather(text: &[u8], index: SliceIndex) -> Result<Buffer> {
    let positions = index.positions(text.len())?;
    let mut gathered = Buffer::with_capacity(index.len())?;
    if index.step() == 1 {
        gathered.bytes.extend_from_slice(&text[index.window()]);
    } else {
        gathered.bytes.extend(positions.map(|i| text[i]));
    }
    Ok(gathered)
}

impl Deref for Buffer {
    type Target = BStr;

    fn deref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<BStr> for Buffer {
    fn as_ref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            options: BufferOptions::default(),
        }
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buffer: Buffer) -> Self {
        buffer.bytes
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

// Equality and ordering look at the bytes only, never at capacity or options.
impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Buffer {}

impl PartialOrd for Buffer {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Buffer {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl core::hash::Hash for Buffer {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

macro_rules! impl_partial_eq_bytes {
    ($($rhs:ty),+) => {
        $(
            impl PartialEq<$rhs> for Buffer {
                fn eq(&self, other: &$rhs) -> bool {
                    self.bytes.as_slice() == AsRef::<[u8]>::as_ref(other)
                }
            }

            impl PartialEq<Buffer> for $rhs {
                fn eq(&self, other: &Buffer) -> bool {
                    other == self
                }
            }
        )+
    };
}

impl_partial_eq_bytes!(str, &str, [u8], &[u8], Vec<u8>, BStr, &BStr);

impl<const N: usize> PartialEq<[u8; N]> for Buffer {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.bytes.as_slice() == other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Buffer {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.bytes.as_slice() == *other
    }
}

// A `Buffer` serializes as a byte string; deserializing also accepts strings
// and sequences of bytes.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use alloc::{string::String, vec::Vec};
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, SeqAccess, Visitor},
    };

    use super::Buffer;

    impl Serialize for Buffer {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_bytes(&self.bytes)
        }
    }

    /// Upper bound on what an untrusted length hint may reserve up front.
    const MAX_PREALLOCATED: usize = 4096;

    struct BufferVisitor;

    impl<'de> Visitor<'de> for BufferVisitor {
        type Value = Buffer;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a byte string")
        }

        fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Buffer::from_bytes(value).map_err(E::custom)
        }

        fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Buffer::from(value))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Buffer::from_bytes(value).map_err(E::custom)
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Buffer::from(value.into_bytes()))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let hint = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATED);
            let mut buffer = Buffer::with_capacity(hint).map_err(A::Error::custom)?;
            while let Some(byte) = seq.next_element::<u8>()? {
                buffer.push(byte).map_err(A::Error::custom)?;
            }
            Ok(buffer)
        }
    }

    impl<'de> Deserialize<'de> for Buffer {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_byte_buf(BufferVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{GrowthPolicy, slice_index};

    #[test]
    fn from_bytes_copies() {
        let mut source = vec![b'a', b'b'];
        let buffer = Buffer::from_bytes(&source).unwrap();
        source[0] = b'z';
        assert_eq!(buffer, "ab");
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn capacity_never_below_length() {
        let mut buffer = Buffer::new();
        for byte in 0..=255u8 {
            buffer.push(byte).unwrap();
            assert!(buffer.capacity() >= buffer.len());
        }
        assert_eq!(buffer.len(), 256);
    }

    #[test]
    fn amortized_growth_overallocates() {
        let mut buffer = Buffer::with_capacity(0).unwrap();
        buffer.concat_in_place([0u8; 100]).unwrap();
        assert!(buffer.capacity() >= 116);
    }

    #[test]
    fn exact_growth_matches_request() {
        let options = BufferOptions {
            growth: GrowthPolicy::Exact,
        };
        let mut buffer = Buffer::with_options(0, options).unwrap();
        buffer.concat_in_place([0u8; 100]).unwrap();
        assert_eq!(buffer.len(), 100);
        assert!(buffer.capacity() >= 100);
        assert_eq!(buffer.options(), options);
    }

    #[test]
    fn byte_at_supports_negative_indices() {
        let buffer = Buffer::from_bytes("Hello, World!").unwrap();
        assert_eq!(buffer.byte_at(0), Ok(b'H'));
        assert_eq!(buffer.byte_at(-1), Ok(b'!'));
        assert_eq!(buffer.byte_at(-13), Ok(b'H'));
        assert_eq!(
            buffer.byte_at(13),
            Err(StringError::IndexOutOfRange {
                index: 13,
                length: 13
            })
        );
        assert_eq!(
            buffer.byte_at(-14),
            Err(StringError::IndexOutOfRange {
                index: -14,
                length: 13
            })
        );
        assert!(Buffer::new().byte_at(0).is_err());
    }

    #[test]
    fn concat_leaves_inputs_alone() {
        let hello = Buffer::from_bytes("Hello, ").unwrap();
        let world = Buffer::from_bytes("World").unwrap();
        let joined = hello.concat(&world).unwrap();
        assert_eq!(joined, "Hello, World");
        assert_eq!(hello, "Hello, ");
        assert_eq!(world, "World");
    }

    #[test]
    fn repeat_counts() {
        let foo = Buffer::from_bytes("foo ").unwrap();
        assert_eq!(foo.repeat(5).unwrap(), "foo foo foo foo foo ");
        assert_eq!(foo.repeat(1).unwrap(), "foo ");
        assert!(foo.repeat(0).unwrap().is_empty());
        assert!(foo.repeat(-3).unwrap().is_empty());
    }

    #[test]
    fn repeating_nothing_returns_immediately() {
        assert!(Buffer::new().repeat(isize::MAX).unwrap().is_empty());
        assert!(Buffer::from_bytes("x").unwrap().repeat(0).unwrap().is_empty());
    }

    #[test]
    fn oversized_requests_fail_to_allocate() {
        assert!(matches!(
            Buffer::with_capacity(usize::MAX),
            Err(StringError::AllocationFailed { .. })
        ));
        assert!(matches!(
            Buffer::from_bytes("ab").unwrap().repeat(isize::MAX),
            Err(StringError::AllocationFailed { .. })
        ));
        let mut buffer = Buffer::from_bytes("ab").unwrap();
        assert!(matches!(
            buffer.push_repeated(b'-', usize::MAX),
            Err(StringError::AllocationFailed { .. })
        ));
        assert_eq!(buffer, "ab");
    }

    #[test]
    fn sequence_length_hint_is_capped() {
        use serde::de::value::{Error, SeqDeserializer};

        struct Lying<I>(I);

        impl<I: Iterator<Item = u8>> Iterator for Lying<I> {
            type Item = u8;

            fn next(&mut self) -> Option<u8> {
                self.0.next()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (usize::MAX, Some(usize::MAX))
            }
        }

        let seq: SeqDeserializer<_, Error> =
            SeqDeserializer::new(Lying(b"hi".iter().copied()));
        let buffer = <Buffer as serde::Deserialize>::deserialize(seq).unwrap();
        assert_eq!(buffer, "hi");
    }

    #[test]
    fn slicing_with_steps() {
        let text = Buffer::from_bytes("Hello, World!").unwrap();
        assert_eq!(text.slice(slice_index!(4)).unwrap(), "Hell");
        assert_eq!(text.slice(slice_index!(7, 12)).unwrap(), "World");
        assert_eq!(text.slice(slice_index!(0, 6, 2).unwrap()).unwrap(), "Hlo");
        assert_eq!(text.slice(slice_index!(-1, 6, -1).unwrap()).unwrap(), "!dlroW");
        assert!(text.slice(slice_index!(9, 3)).unwrap().is_empty());
    }

    #[test]
    fn slicing_rejects_unreachable_bounds() {
        let text = Buffer::from_bytes("abc").unwrap();
        assert_eq!(
            text.slice(slice_index!(0, 4)),
            Err(StringError::IndexOutOfRange {
                index: 4,
                length: 3
            })
        );
        assert_eq!(
            text.slice(slice_index!(3, 0, -1).unwrap()),
            Err(StringError::IndexOutOfRange {
                index: 3,
                length: 3
            })
        );
    }

    #[test]
    fn equality_ignores_capacity() {
        let small = Buffer::from_bytes("abc").unwrap();
        let mut large = Buffer::with_capacity(64).unwrap();
        large.concat_in_place("abc").unwrap();
        assert_eq!(small, large);
        assert_eq!(small, b"abc");
        assert_ne!(small, "abd");
    }

    #[test]
    fn debug_renders_as_byte_string() {
        let buffer = Buffer::from_bytes(b"a\xffb").unwrap();
        let expected = alloc::format!("{:?}", BStr::new(b"a\xffb"));
        assert_eq!(alloc::format!("{buffer:?}"), expected);
        assert!(expected.starts_with("\"a"));
    }

    #[test]
    fn serde_as_bytes() {
        let buffer = Buffer::from_bytes("hi").unwrap();
        let json = serde_json::to_string(&buffer).unwrap();
        assert_eq!(json, "[104,105]");
        let back: Buffer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buffer);
        let from_str: Buffer = serde_json::from_str(r#""hi""#).unwrap();
        assert_eq!(from_str, buffer);
    }
}
