//! Python-flavoured byte strings.
//!
//! [`Buffer`] is an owned, growable byte string; [`SliceIndex`] is a
//! `(start, stop, step)` slice with Python's negative-index rules; split
//! functions return [`Pieces`], a borrowing iterator over the input. Around
//! them sit the usual string operations: substring search (Horspool),
//! split/join, case mapping, trimming, justification and byte-class
//! predicates.
//!
//! Everything operates on bytes. Case mapping and the predicates understand
//! ASCII only; other bytes pass through untouched.
//!
//! ```rust
//! use pystring::{Buffer, find, join, slice_index, split, to_title};
//!
//! let text = Buffer::from_bytes("Apple, Banana, Mango").unwrap();
//! assert_eq!(find(&text, "Banana"), Some(slice_index!(7, 13)));
//!
//! let fruit = split(&text, ", ", -1).unwrap();
//! assert_eq!(join(&fruit, " & ").unwrap(), "Apple & Banana & Mango");
//!
//! assert_eq!(to_title("the quick fox").unwrap(), "The Quick Fox");
//! ```
//!
//! Failures are values, never panics: every fallible operation returns
//! [`Result`] with a [`StringError`], including allocation failure.
//!
//! The crate is `no_std` and needs `alloc`. It logs through the [`log`]
//! facade (`trace` on reallocation, `debug` on rejected arguments) and never
//! installs a logger itself.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod index;
mod options;
mod pieces;
mod predicate;
mod search;
mod split;
mod transform;


pub use bstr::BStr;
pub use buffer::{Buffer, slice};
pub use error::{Result, StringError};
pub use index::SliceIndex;
pub use options::{BufferOptions, GrowthPolicy};
pub use pieces::Pieces;
pub use predicate::{
    ends_with, is_alphabetic, is_alphanumeric, is_int, is_lowercase, is_real, is_uppercase,
    is_whitespace, starts_with,
};
pub use search::{
    contains, count, find, find_any_of, find_any_of_in_range, find_char, find_char_in_range,
    find_in_range, rfind, rfind_in_range,
};
pub use split::{
    Limit, chunks, join, replace, rsplit, split, split_in_range, split_lines, split_whitespace,
};
pub use transform::{
    capitalize, centre, centre_with, left_justify, left_justify_with, pad, pad_with, reverse,
    right_justify, right_justify_with, swap_case, to_lower, to_title, to_upper, trim, trim_left,
    trim_right,
};
