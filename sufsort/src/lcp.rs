// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use tracing::debug;

use crate::{InvalidInput, validate_suffix_array};

/// Returns the rank of the suffix starting at each index of the data `suffix_array` sorts.
pub(crate) fn inverse(suffix_array: &[u32]) -> Vec<u32> {
    let mut rank = vec![0; suffix_array.len()];
    for (i, &start) in suffix_array.iter().enumerate() {
        rank[start as usize] = i as u32;
    }

    rank
}

/// Computes the LCP array of `data` from its suffix array using Kasai's algorithm.
///
/// Suffixes are visited in text order rather than rank order. Dropping the first byte of a suffix
/// shortens its common prefix with its predecessor by at most one, so the match length carried
/// over from the previous suffix only shrinks by one per step. It grows at most `n` times in total,
/// which keeps the whole computation *O*(*n*) despite the nested loop.
pub(crate) fn kasai(data: &[u8], suffix_array: &[u32]) -> Vec<u32> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }

    let rank = inverse(suffix_array);
    let mut lcp = vec![0; n - 1];
    let mut matched = 0;

    for start in 0..n {
        let current = rank[start] as usize;
        if current == 0 {
            // The smallest suffix has no predecessor to compare against
            matched = 0;
            continue;
        }

        let prev = suffix_array[current - 1] as usize;
        while start + matched < n
            && prev + matched < n
            && data[start + matched] == data[prev + matched]
        {
            matched += 1;
        }

        lcp[current - 1] = matched as u32;
        matched = matched.saturating_sub(1);
    }
    debug!(len = n, "computed LCP array");

    lcp
}

/// Builds the LCP array of `data` given its suffix array.
///
/// Entry `i` of the result is the length of the longest common prefix of the suffixes starting at
/// `suffix_array[i]` and `suffix_array[i + 1]`. The result holds `data.len() - 1` entries, or none
/// if `data` is empty.
///
/// This operation is *O*(*n*).
///
/// # Errors
///
/// Returns an error if `suffix_array` is not a permutation of the indices of `data`. The order of
/// the suffixes is not verified.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), sufsort::InvalidInput> {
/// let data = b"aabbcd";
/// let suffix_array = sufsort::build_suffix_array(data);
/// let lcp = sufsort::build_lcp_array(data, &suffix_array)?;
///
/// assert_eq!(lcp, [1, 0, 1, 0, 0]);
/// # Ok(())
/// # }
/// ```
pub fn build_lcp_array(data: &[u8], suffix_array: &[u32]) -> Result<Vec<u32>, InvalidInput> {
    validate_suffix_array(suffix_array, data.len())?;

    Ok(kasai(data, suffix_array))
}

/// Checks that `lcp` could belong to a text of length `len` sorted as `suffix_array`.
///
/// Each entry may not exceed the length of either suffix it compares.
pub(crate) fn check_bounds(
    suffix_array: &[u32],
    lcp: &[u32],
    len: usize,
) -> Result<(), InvalidInput> {
    let expected = len.saturating_sub(1);
    if lcp.len() != expected {
        return Err(InvalidInput::LengthMismatch {
            array: "LCP array",
            expected,
            found: lcp.len(),
        });
    }

    for (rank, (pair, &common)) in suffix_array.windows(2).zip(lcp).enumerate() {
        let later = pair[0].max(pair[1]) as usize;
        if common as usize > len - later {
            return Err(InvalidInput::LcpOutOfBounds { rank });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::build_suffix_array;

    fn common_prefix(a: &[u8], b: &[u8]) -> u32 {
        a.iter().zip(b).take_while(|(x, y)| x == y).count() as u32
    }

    fn naive(data: &[u8], suffix_array: &[u32]) -> Vec<u32> {
        suffix_array
            .windows(2)
            .map(|pair| common_prefix(&data[pair[0] as usize..], &data[pair[1] as usize..]))
            .collect()
    }

    #[test]
    fn empty() {
        assert_eq!(build_lcp_array(b"", &[]), Ok(Vec::new()));
    }

    #[test]
    fn single_byte() {
        assert_eq!(build_lcp_array(b"z", &[0]), Ok(Vec::new()));
    }

    #[test]
    fn aabbcd() {
        let data = b"aabbcd";
        let suffix_array = build_suffix_array(data);
        let lcp = kasai(data, &suffix_array);

        assert_eq!(lcp.len(), 5);
        assert_eq!(check_bounds(&suffix_array, &lcp, data.len()), Ok(()));
        assert_eq!(lcp, naive(data, &suffix_array));
    }

    #[test]
    fn mississippi() {
        let data = b"mississippi";
        let suffix_array = build_suffix_array(data);

        assert_eq!(kasai(data, &suffix_array), [1, 1, 4, 0, 0, 1, 0, 2, 1, 3]);
    }

    #[test]
    fn repeated_byte() {
        let data = b"aaaaa";
        let suffix_array = build_suffix_array(data);

        assert_eq!(kasai(data, &suffix_array), [1, 2, 3, 4]);
    }

    #[test]
    fn rejects_short_suffix_array() {
        assert_eq!(
            build_lcp_array(b"abc", &[0, 1]),
            Err(InvalidInput::LengthMismatch {
                array: "suffix array",
                expected: 3,
                found: 2,
            }),
        );
    }

    #[test]
    fn rejects_lcp_longer_than_suffix() {
        // The suffixes "c" and "bc" can share at most one byte
        assert_eq!(
            check_bounds(&[0, 2, 1], &[0, 2], 3),
            Err(InvalidInput::LcpOutOfBounds { rank: 1 }),
        );
    }

    #[test]
    fn qc_matches_direct_comparison() {
        fn prop(data: Vec<u8>) -> bool {
            let suffix_array = build_suffix_array(&data);
            kasai(&data, &suffix_array) == naive(&data, &suffix_array)
        }
        quickcheck(prop as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn qc_matches_direct_comparison_small_alphabet() {
        fn prop(data: Vec<bool>) -> bool {
            let data: Vec<u8> = data.into_iter().map(u8::from).collect();
            let suffix_array = build_suffix_array(&data);
            kasai(&data, &suffix_array) == naive(&data, &suffix_array)
        }
        quickcheck(prop as fn(Vec<bool>) -> bool);
    }
}
