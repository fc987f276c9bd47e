//! Prefix-skipping quicksort over shadow-key handles.
//!
//! Partitioning and prefix discovery happen in one pass: every comparison a
//! partition performs against its pivot also reports how many leading bytes
//! the two keys share, and the minimum of those counts is a prefix length
//! every key in the range is guaranteed to share. Both recursive calls then
//! start that many bytes deeper and never re-scan the matched bytes.
//!
//! The main entry points are [`umbrasort`] and [`umbrasort_mut`].

use crate::core::{KeyHandle, KeyStore, PivotStrategy, SortOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::collections::TryReserveError;

/// Performs an index-based sort on the provided collection.
///
/// This function does not modify the input collection. Instead, it returns a
/// `Vec<usize>` containing the indices that would order the collection
/// ascending by lexicographic byte order. The permutation is not stable:
/// equal keys may appear in any relative order.
///
/// The input collection must implement the [`KeyStore`] trait, which
/// abstracts byte-slice access.
///
/// # Arguments
///
/// * `store` - The collection to be sorted.
///
/// # Returns
///
/// A vector of indices such that `store.key(indices[i]) <= store.key(indices[i+1])`.
///
/// # Examples
///
/// ```
/// use umbrasort::umbrasort;
///
/// let data = vec!["banana", "apple", "cherry"];
/// let indices = umbrasort(&data);
///
/// assert_eq!(indices, vec![1, 0, 2]); // apple, banana, cherry
/// ```
pub fn umbrasort<S: KeyStore + ?Sized>(store: &S) -> Vec<usize> {
    umbrasort_with(store, &SortOptions::default())
}

/// [`umbrasort`] with explicit [`SortOptions`].
///
/// # Examples
///
/// ```
/// use umbrasort::{umbrasort_with, SortOptions};
///
/// let data = vec!["bb", "ba", "ab"];
/// let options = SortOptions {
///     seed: Some(7),
///     ..SortOptions::default()
/// };
///
/// assert_eq!(umbrasort_with(&data, &options), vec![2, 1, 0]);
/// ```
pub fn umbrasort_with<S: KeyStore + ?Sized>(store: &S, options: &SortOptions) -> Vec<usize> {
    let len = store.len();
    if len == 0 {
        return vec![];
    }

    let width = options.clamped_width();

    // Initialize handles with their shadows at depth 0. Any KeyStore whose
    // len() disagrees with its key storage panics here, before the first
    // comparison.
    let mut handles: Vec<KeyHandle> = (0..len)
        .map(|index| KeyHandle {
            index,
            shadow: store.shadow(index, 0, width),
        })
        .collect();

    sort_handles(store, &mut handles, width, options);

    handles.into_iter().map(|h| h.index).collect()
}

/// Fallible variant of [`umbrasort`].
///
/// Surfaces allocation failure of the working handle array as
/// [`TryReserveError`] instead of aborting. The input collection is not
/// touched until both working allocations have succeeded.
pub fn try_umbrasort<S: KeyStore + ?Sized>(store: &S) -> Result<Vec<usize>, TryReserveError> {
    try_umbrasort_with(store, &SortOptions::default())
}

/// [`try_umbrasort`] with explicit [`SortOptions`].
pub fn try_umbrasort_with<S: KeyStore + ?Sized>(
    store: &S,
    options: &SortOptions,
) -> Result<Vec<usize>, TryReserveError> {
    let len = store.len();

    let mut handles: Vec<KeyHandle> = Vec::new();
    handles.try_reserve_exact(len)?;
    let mut out: Vec<usize> = Vec::new();
    out.try_reserve_exact(len)?;

    if len == 0 {
        return Ok(out);
    }

    let width = options.clamped_width();
    handles.extend((0..len).map(|index| KeyHandle {
        index,
        shadow: store.shadow(index, 0, width),
    }));

    sort_handles(store, &mut handles, width, options);

    out.extend(handles.iter().map(|h| h.index));
    Ok(out)
}

/// Sorts a mutable slice in-place.
///
/// This is a convenience wrapper for [`umbrasort`] which computes the sorted
/// indices and then applies the permutation to the slice.
///
/// # Arguments
///
/// * `data` - A mutable slice of items that implement `AsRef<[u8]>`.
///
/// # Examples
///
/// ```
/// use umbrasort::umbrasort_mut;
///
/// let mut data = vec!["banana", "apple", "cherry"];
/// umbrasort_mut(&mut data);
///
/// assert_eq!(data, vec!["apple", "banana", "cherry"]);
/// ```
pub fn umbrasort_mut<T: AsRef<[u8]>>(data: &mut [T]) {
    umbrasort_mut_with(data, &SortOptions::default());
}

/// [`umbrasort_mut`] with explicit [`SortOptions`].
pub fn umbrasort_mut_with<T: AsRef<[u8]>>(data: &mut [T], options: &SortOptions) {
    let indices = umbrasort_with(data, options);
    apply_permutation(data, indices);
}

fn apply_permutation<T>(data: &mut [T], mut indices: Vec<usize>) {
    for i in 0..data.len() {
        let mut current = i;
        while indices[current] != i {
            let next = indices[current];
            data.swap(current, next);
            indices[current] = current; // Mark as visited/placed
            current = next;
        }
        indices[current] = current;
    }
}

fn sort_handles<S: KeyStore + ?Sized>(
    store: &S,
    handles: &mut [KeyHandle],
    width: usize,
    options: &SortOptions,
) {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    sort_range(store, handles, 0, width, options.pivot, &mut rng);
}

/// Recursive driver.
///
/// Invariant on entry: every key in `handles` is byte-identical over
/// `[0, depth)` and every shadow was refreshed at `depth`. The smaller
/// partition is recursed into and the larger is handled by the loop, so the
/// auxiliary stack stays O(log n) even for skewed splits.
fn sort_range<S: KeyStore + ?Sized>(
    store: &S,
    mut handles: &mut [KeyHandle],
    mut depth: usize,
    width: usize,
    strategy: PivotStrategy,
    rng: &mut StdRng,
) {
    while handles.len() > 1 {
        let (j, min_shared) = partition(store, handles, depth, width, strategy, rng);
        let new_depth = depth + min_shared;

        let (left, rest) = handles.split_at_mut(j);
        let (_pivot, right) = rest.split_at_mut(1);

        if new_depth > depth {
            refresh_shadows(store, left, new_depth, width);
            refresh_shadows(store, right, new_depth, width);
        }

        if left.len() <= right.len() {
            sort_range(store, left, new_depth, width, strategy, rng);
            handles = right;
        } else {
            sort_range(store, right, new_depth, width, strategy, rng);
            handles = left;
        }
        depth = new_depth;
    }
}

/// Partitions `handles` around a pivot, returning the pivot's final position
/// and the minimum number of leading bytes (beyond `depth`) the pivot shares
/// with the keys it was compared against.
///
/// Requires `handles.len() >= 2`. Every element outside the pivot slot is
/// compared against the pivot at least once, so the returned minimum covers
/// the whole range: all keys in it agree on `depth + min_shared` leading
/// bytes. Comparisons that never happen because the scan indices crossed
/// contribute nothing.
fn partition<S: KeyStore + ?Sized>(
    store: &S,
    handles: &mut [KeyHandle],
    depth: usize,
    width: usize,
    strategy: PivotStrategy,
    rng: &mut StdRng,
) -> (usize, usize) {
    let high = handles.len() - 1;

    let pivot_idx = select_pivot(store, handles, depth, width, strategy, rng);
    handles.swap(0, pivot_idx);
    // Value copy: the slot under the pivot is overwritten by swaps below.
    let pivot = handles[0];

    let mut min_shared = usize::MAX;
    let mut i = 1;
    let mut j = high;

    loop {
        while i <= j {
            let (ordering, matched) =
                compare_and_count(store, &handles[i], &pivot, depth, width);
            min_shared = min_shared.min(matched);
            if ordering != Ordering::Less {
                break;
            }
            i += 1;
        }

        while i <= j {
            let (ordering, matched) =
                compare_and_count(store, &handles[j], &pivot, depth, width);
            min_shared = min_shared.min(matched);
            if ordering != Ordering::Greater {
                break;
            }
            j -= 1;
        }

        if i > j {
            break;
        }
        handles.swap(i, j);
        i += 1;
        j -= 1;
    }

    // Seat the pivot at its final position.
    handles.swap(0, j);

    if min_shared == usize::MAX {
        min_shared = 0;
    }
    (j, min_shared)
}

fn select_pivot<S: KeyStore + ?Sized>(
    store: &S,
    handles: &[KeyHandle],
    depth: usize,
    width: usize,
    strategy: PivotStrategy,
    rng: &mut StdRng,
) -> usize {
    let high = handles.len() - 1;
    match strategy {
        PivotStrategy::Random => rng.random_range(0..=high),
        PivotStrategy::FixedMiddle => high / 2,
        PivotStrategy::MedianOfThree => {
            let mut lo = 0;
            let mut mid = high / 2;
            let mut hi = high;
            let greater = |a: usize, b: usize| {
                compare_and_count(store, &handles[a], &handles[b], depth, width).0
                    == Ordering::Greater
            };
            if greater(lo, mid) {
                std::mem::swap(&mut lo, &mut mid);
            }
            if greater(mid, hi) {
                std::mem::swap(&mut mid, &mut hi);
                if greater(lo, mid) {
                    std::mem::swap(&mut lo, &mut mid);
                }
            }
            mid
        }
    }
}

/// Reloads shadows using the new common prefix depth.
///
/// Re-establishes the handle invariant: before any comparison at a given
/// depth, every shadow in the range was refreshed at that depth.
fn refresh_shadows<S: KeyStore + ?Sized>(
    store: &S,
    handles: &mut [KeyHandle],
    depth: usize,
    width: usize,
) {
    handles.iter_mut().for_each(|h| {
        h.shadow = store.shadow(h.index, depth, width);
    });
}

/// Orders two keys from `depth` and reports the exact count of leading bytes
/// they share beyond it.
///
/// 1. **Fast path**: shadows differ. Integer comparison decides the order;
///    the matched count is the byte position of the first differing bit in
///    `a.shadow ^ b.shadow`, resolved in registers.
/// 2. **Slow path**: shadows are equal, so the whole cached window agrees.
///    Scans byte-by-byte from `depth + width`. If one key is a prefix of the
///    other (after zero padding), the shorter key orders first.
///
/// The matched count is clamped to the shorter key's remaining length, which
/// keeps it exact for keys containing 0x00 bytes: inside the window, a zero
/// pad byte is indistinguishable from a zero content byte.
#[inline(always)]
fn compare_and_count<S: KeyStore + ?Sized>(
    store: &S,
    a: &KeyHandle,
    b: &KeyHandle,
    depth: usize,
    width: usize,
) -> (Ordering, usize) {
    if a.shadow != b.shadow {
        let matched = ((a.shadow ^ b.shadow).leading_zeros() / 8) as usize;
        let shorter = store.key(a.index).len().min(store.key(b.index).len());
        return (
            a.shadow.cmp(&b.shadow),
            matched.min(shorter.saturating_sub(depth)),
        );
    }

    let key_a = store.key(a.index);
    let key_b = store.key(b.index);
    let shorter = key_a.len().min(key_b.len());

    let mut pos = depth + width;
    while pos < shorter && key_a[pos] == key_b[pos] {
        pos += 1;
    }

    let ordering = if pos < shorter {
        key_a[pos].cmp(&key_b[pos])
    } else {
        key_a.len().cmp(&key_b.len())
    };

    let matched = (pos - depth).min(shorter.saturating_sub(depth));
    (ordering, matched)
}
