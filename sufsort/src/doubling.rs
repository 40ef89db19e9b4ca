// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::iter;

use tracing::{debug, trace};

use crate::rank_sort::sort_by_rank;

// This algorithm casts u32s to usizes for the purpose of indexing. Because of these casts, any
// target where the size of a usize is less than the size of a u32 will produce unexpected (albeit
// not undefined) behavior. To prevent this, cause a compiler error on such targets.
#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("Target pointer width must be at least 32 bits");

/// The size of the alphabet
const ALPHABET_SIZE: usize = 256;

/// The initial rank of the terminator shift. Every byte `b` starts out with rank `b + 1`.
const TERMINATOR_RANK: u32 = 0;

/// Computes the suffix array of `data` by prefix doubling over its cyclic shifts.
///
/// The shifts are those of `data` followed by a terminator that compares below every byte. The
/// terminator never appears in `data` because it is not a byte at all, so every byte value may
/// occur in the input. After round `k`, shifts sorted by rank are sorted by their first `2^k`
/// characters; rounds stop once every shift has a unique rank.
///
/// The shift starting at the terminator always sorts first and is dropped from the result, so the
/// returned array has exactly `data.len()` entries.
///
/// This runs in *O*(*n* log *n*) time.
///
/// # Panics
///
/// Panics if `data.len() >= u32::MAX`.
pub(crate) fn prefix_doubling(data: &[u8]) -> Vec<u32> {
    if data.is_empty() {
        return Vec::new();
    }
    assert!(
        data.len() < u32::MAX as usize,
        "`data` must be shorter than u32::MAX bytes",
    );

    let len = data.len() + 1;
    let mut shifts = RankedShifts::initial(data);
    let mut scratch = vec![0; len];
    let mut width = 1;
    let mut rounds = 0;

    while shifts.classes < len && width < len {
        (shifts, scratch) = shifts.double(width, scratch);
        width *= 2;
        rounds += 1;

        trace!(width, classes = shifts.classes, "finished doubling round");
    }
    debug!(len = data.len(), rounds, "sorted suffixes");

    let mut suffix_array = shifts.order;
    assert_eq!(
        suffix_array[0] as usize,
        data.len(),
        "terminator shift must sort first",
    );
    suffix_array.remove(0);

    suffix_array
}

/// The cyclic shifts of the terminated string, ordered and ranked by their first `width`
/// characters for the current round.
struct RankedShifts {
    /// Shift start indices in ascending rank order
    order: Vec<u32>,
    /// The dense rank of the shift starting at each index
    rank: Vec<u32>,
    /// The number of distinct ranks
    classes: usize,
}

impl RankedShifts {
    /// Ranks every single-character shift by its character.
    fn initial(data: &[u8]) -> Self {
        let len = data.len() + 1;
        let key: Vec<u32> = data
            .iter()
            .map(|&b| u32::from(b) + 1)
            .chain(iter::once(TERMINATOR_RANK))
            .collect();

        let starts: Vec<u32> = (0..len as u32).collect();
        let mut order = vec![0; len];
        sort_by_rank(&starts, &key, ALPHABET_SIZE + 1, &mut order);

        // The start list is no longer needed, so its buffer holds the dense ranks
        let mut rank = starts;
        let classes = assign_dense_ranks(&order, &mut rank, |shift| key[shift]);

        Self {
            order,
            rank,
            classes,
        }
    }

    /// Doubles the comparison width from `width` to `2 * width`.
    ///
    /// `scratch` must be as long as the shift list. The buffers of `self` are recycled into the
    /// returned value, and the returned `Vec` is scratch space for the following round.
    fn double(self, width: usize, mut scratch: Vec<u32>) -> (Self, Vec<u32>) {
        let len = self.order.len();

        // Walking shifts in rank order and stepping each back by `width` yields every shift
        // ordered by its second half.
        let mut by_second_half = self.order;
        for shift in &mut by_second_half {
            *shift = ((*shift as usize + len - width) % len) as u32;
        }

        // A stable sort on the first half completes the ordering by (first half, second half)
        sort_by_rank(&by_second_half, &self.rank, self.classes, &mut scratch);
        let order = scratch;

        let mut rank = by_second_half;
        let classes = assign_dense_ranks(&order, &mut rank, |shift| {
            (self.rank[shift], self.rank[(shift + width) % len])
        });

        (
            Self {
                order,
                rank,
                classes,
            },
            self.rank,
        )
    }
}

/// Writes dense ranks for `order` into `rank`, starting a new class whenever `key` changes.
///
/// Returns the number of classes.
fn assign_dense_ranks<K, F>(order: &[u32], rank: &mut [u32], key: F) -> usize
where
    K: PartialEq,
    F: Fn(usize) -> K,
{
    let mut classes = 0;
    let mut prev = None;

    for &shift in order {
        let current = key(shift as usize);
        if prev.as_ref() != Some(&current) {
            classes += 1;
            prev = Some(current);
        }
        rank[shift as usize] = classes - 1;
    }

    classes as usize
}
