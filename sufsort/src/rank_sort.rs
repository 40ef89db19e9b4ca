// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

/// Stably sorts `shifts` into `out` by the rank each shift holds in `rank`.
///
/// Every rank must be less than `classes`. Shifts with equal rank keep their relative order from
/// `shifts`, which is what lets a doubling round sort by the first half of a shift after the
/// input has already been ordered by the second half.
///
/// This is a counting sort, so it runs in *O*(`shifts.len()` + `classes`) time.
///
/// # Panics
///
/// Panics if `out` is not the same length as `shifts`.
pub(crate) fn sort_by_rank(shifts: &[u32], rank: &[u32], classes: usize, out: &mut [u32]) {
    assert_eq!(shifts.len(), out.len(), "output buffer must match input length");

    let mut bucket = vec![0usize; classes];
    for &shift in shifts {
        bucket[rank[shift as usize] as usize] += 1;
    }

    // Turn counts into the first output slot of each rank
    let mut sum = 0;
    for slot in &mut bucket {
        let count = *slot;
        *slot = sum;
        sum += count;
    }

    for &shift in shifts {
        let class = rank[shift as usize] as usize;
        out[bucket[class]] = shift;
        bucket[class] += 1;
    }
}
