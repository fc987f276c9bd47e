//! # Umbrasort
//!
//! `umbrasort` is a cache-efficient sorting library for strings, byte arrays, and other
//! collections of byte-string keys that share common prefixes (URLs, file paths, identifiers).
//!
//! It implements a prefix-skipping quicksort: partitioning a range around a pivot also
//! discovers, from the comparisons the partition performs anyway, how many leading bytes
//! every key in the range shares. Recursive calls start that many bytes deeper, so bytes
//! matched once are never scanned again.
//!
//! ## Key Features
//!
//! - **Shadow keys**: An 8-byte window of each key at the current depth is cached directly
//!   in the sort handle, letting most comparisons resolve in CPU registers without fetching
//!   the full key from memory. Windows are refreshed whenever the known-prefix depth grows.
//! - **Prefix skipping**: The minimum matched-byte count observed during partitioning
//!   lower-bounds the prefix shared by the whole range, and descendants skip it wholesale.
//! - **Zero-copy abstraction**: The [`KeyStore`] trait sorts arbitrary data structures
//!   (e.g., columnar buffers, `Vec<Vec<u8>>`) without copying the underlying keys; only
//!   handles are permuted.
//! - **Deterministic when asked**: Pivot selection strategy and RNG seed are explicit,
//!   per-call parameters ([`SortOptions`]), so runs are reproducible under test.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! For standard collections like `Vec<String>` or `Vec<Vec<u8>>`, use [`umbrasort`]
//! (index-based) or [`umbrasort_mut`] (in-place).
//!
//! ```rust
//! use umbrasort::umbrasort_mut;
//!
//! let mut data = vec!["banana", "apple", "cherry", "date"];
//! umbrasort_mut(&mut data);
//!
//! assert_eq!(data, vec!["apple", "banana", "cherry", "date"]);
//! ```
//!
//! ### Custom Types
//!
//! To sort custom types or complex data structures without creating intermediate strings,
//! implement the [`KeyStore`] trait.
//!
//! ```rust
//! use umbrasort::{umbrasort, KeyStore};
//!
//! struct User {
//!     username: String,
//! }
//!
//! // Wrapper struct to avoid orphan rule violation (impl foreign trait on foreign type).
//! struct Users(Vec<User>);
//!
//! impl KeyStore for Users {
//!     fn key(&self, index: usize) -> &[u8] {
//!         self.0[index].username.as_bytes()
//!     }
//!
//!     fn len(&self) -> usize {
//!         self.0.len()
//!     }
//! }
//!
//! let users = Users(vec![
//!     User { username: "Alice".to_string() },
//!     User { username: "Bob".to_string() },
//! ]);
//!
//! // Returns indices: [0, 1] (Alice, Bob)
//! let indices = umbrasort(&users);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Strength**: datasets with long shared prefixes. Bytes matched during one partition
//!   are skipped by every comparison below it, and the shadow cache keeps the remaining
//!   comparisons off the key storage.
//! - **Worst Case**: O(N log N) comparisons in expectation with the default random pivot;
//!   auxiliary stack is O(log N) regardless of split skew.
//! - **Memory Overhead**: one temporary handle vector (16 bytes per item).
//! - **Not stable**: equal keys keep no particular relative order.
//!
//! The sort is single-threaded and synchronous; a call owns its handle vector exclusively
//! and runs to completion.

pub mod algo;
pub mod core;
pub use algo::{
    try_umbrasort, try_umbrasort_with, umbrasort, umbrasort_mut, umbrasort_mut_with,
    umbrasort_with,
};
pub use core::{KeyStore, PivotStrategy, SortOptions, SHADOW_WIDTH};

pub mod prelude {
    pub use crate::algo::{
        try_umbrasort, try_umbrasort_with, umbrasort, umbrasort_mut, umbrasort_mut_with,
        umbrasort_with,
    };
    pub use crate::core::{KeyStore, PivotStrategy, SortOptions};
}
