//! Core traits and types for Umbrasort.
//!
//! This module defines:
//! - [`KeyStore`]: The main trait users implement to sort their custom types.
//! - [`SortOptions`] / [`PivotStrategy`]: Per-call tuning knobs.
//! - KeyHandle: Internal handle/shadow-cache structure.

use std::collections::VecDeque;

/// Width in bytes of the shadow key cached alongside each handle.
pub const SHADOW_WIDTH: usize = 8;

/// Handle to a key, storing its index and the cached shadow key.
///
/// The shadow is a big-endian packed window of the key's bytes starting at
/// the depth it was last refreshed for, so `u64` ordering equals
/// lexicographic byte ordering over that window.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct KeyHandle {
    pub index: usize,
    pub shadow: u64,
}

/// How the partitioner picks its pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// Uniformly random index in the range. Bounds adversarial inputs
    /// probabilistically; the RNG is seedable via [`SortOptions::seed`].
    #[default]
    Random,
    /// Middle element of the range. Fully deterministic.
    FixedMiddle,
    /// Median of the first, middle, and last elements of the range.
    MedianOfThree,
}

/// Configuration for a single sort call.
///
/// All fields are side-effect free: they change performance and (for equal
/// keys) the output permutation, never the sortedness of the result.
///
/// # Examples
///
/// ```
/// use umbrasort::{umbrasort_with, PivotStrategy, SortOptions};
///
/// let data = vec!["banana", "apple", "cherry"];
/// let options = SortOptions {
///     pivot: PivotStrategy::MedianOfThree,
///     ..SortOptions::default()
/// };
///
/// assert_eq!(umbrasort_with(&data, &options), vec![1, 0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Bytes of key material cached in each shadow, clamped to `1..=8`.
    pub shadow_width: usize,
    /// Pivot selection strategy.
    pub pivot: PivotStrategy,
    /// Seed for the pivot RNG. `Some(seed)` derives a fresh deterministic
    /// generator per call, so repeated calls behave identically; `None`
    /// seeds from OS entropy per call. Only [`PivotStrategy::Random`]
    /// draws from the generator.
    pub seed: Option<u64>,
}

impl Default for SortOptions {
    fn default() -> Self {
        SortOptions {
            shadow_width: SHADOW_WIDTH,
            pivot: PivotStrategy::default(),
            seed: None,
        }
    }
}

impl SortOptions {
    pub(crate) fn clamped_width(&self) -> usize {
        self.shadow_width.clamp(1, SHADOW_WIDTH)
    }
}

/// A trait for accessing key data from a collection without copying.
///
/// This trait allows `umbrasort` to sort any collection where elements can
/// be represented as byte slices (e.g., `Vec<String>`, `Vec<Vec<u8>>`, or
/// custom columnar stores). Keys are owned by the collection and are never
/// mutated by the sort; only handles to them are permuted.
///
/// # Examples
///
/// Implementing for a custom struct:
///
/// ```
/// use umbrasort::core::KeyStore;
///
/// struct MyCollection {
///     data: Vec<String>,
/// }
///
/// impl KeyStore for MyCollection {
///     fn key(&self, index: usize) -> &[u8] {
///         self.data[index].as_bytes()
///     }
///
///     fn len(&self) -> usize {
///         self.data.len()
///     }
/// }
/// ```
pub trait KeyStore {
    /// Returns the key at the given index as a byte slice.
    fn key(&self, index: usize) -> &[u8];

    /// Returns the number of keys in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads the shadow key: up to `width` bytes of the key at `index`
    /// starting at `offset`, packed big-endian into a `u64` and zero-padded
    /// past the key's end. Returns 0 if `offset` is at or past the end.
    ///
    /// Implementors with specialized storage (e.g. columnar buffers) may
    /// override this with a faster path. Overrides must preserve the
    /// encoding: most-significant byte first, zero padding, and no reads
    /// past the key's declared length.
    #[inline(always)]
    fn shadow(&self, index: usize, offset: usize, width: usize) -> u64 {
        let key = self.key(index);
        let len = key.len();

        if offset >= len {
            return 0;
        }

        let remaining = len - offset;
        if width == SHADOW_WIDTH && remaining >= SHADOW_WIDTH {
            unsafe {
                let ptr = key.as_ptr().add(offset);
                let raw = std::ptr::read_unaligned(ptr as *const u64);
                u64::from_be(raw)
            }
        } else {
            let take = remaining.min(width);
            let mut buf = [0u8; SHADOW_WIDTH];
            // Safety: checked bounds above
            buf[..take].copy_from_slice(&key[offset..offset + take]);
            u64::from_be_bytes(buf)
        }
    }
}

// Blanket implementation for indexable slices of byte-ref types.
impl<T: AsRef<[u8]>> KeyStore for [T] {
    fn key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        self.len()
    }
}

// Explicit Vec impl to improve ergonomics (avoiding .as_slice()).
impl<T: AsRef<[u8]>> KeyStore for Vec<T> {
    fn key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        self.len()
    }
}

// Implementation for VecDeque.
// Provides O(1) random access, so it is suitable for Umbrasort.
impl<T: AsRef<[u8]>> KeyStore for VecDeque<T> {
    fn key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        self.len()
    }
}
