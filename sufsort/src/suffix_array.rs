// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::cmp;

use crate::{InvalidInput, doubling, lcp};

/// A suffix array for a byte string.
///
/// Entry `i` is the start index of the `i`th smallest suffix of the associated data.
pub struct SuffixArray<'a> {
    data: &'a [u8],
    inner: Vec<u32>,
}

impl<'a> SuffixArray<'a> {
    /// Creates a new `SuffixArray` for `data`.
    ///
    /// Any byte string may be sorted. End-of-string handling is internal, so `data` does not need
    /// a sentinel appended and may contain any byte value, including `0`.
    ///
    /// This operation is *O*(*n* log *n*).
    ///
    /// # Panics
    ///
    /// Panics if `data.len() >= u32::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"banana");
    /// assert_eq!(sa.as_slice(), &[5, 3, 1, 0, 4, 2]);
    /// ```
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        let inner = doubling::prefix_doubling(data);

        Self { data, inner }
    }

    /// Returns the data this suffix array was built for.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the suffix start indices in ascending lexicographic order.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.inner
    }

    /// Returns the number of suffixes, which equals the length of the data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the suffix with lexicographic rank `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= self.len()`.
    #[must_use]
    pub fn suffix(&self, rank: usize) -> &'a [u8] {
        &self.data[self.inner[rank] as usize..]
    }

    /// Returns the inverse of this suffix array, i.e., the rank of the suffix starting at each
    /// index.
    ///
    /// This operation is *O*(*n*).
    #[must_use]
    pub fn inverse(&self) -> Vec<u32> {
        lcp::inverse(&self.inner)
    }

    /// Computes the LCP array using Kasai's algorithm.
    ///
    /// Entry `i` of the result is the length of the longest common prefix of the suffixes at ranks
    /// `i` and `i + 1`, so it holds one entry fewer than the suffix array (or none for empty
    /// data).
    ///
    /// This operation is *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"banana");
    /// assert_eq!(sa.lcp(), [1, 3, 0, 0, 2]);
    /// ```
    #[must_use]
    pub fn lcp(&self) -> Vec<u32> {
        lcp::kasai(self.data, &self.inner)
    }

    /// Returns `true` if and only if `pattern` is contained in the associated data.
    ///
    /// This operation is *O*(*m* \* log(*n*)), where `m` is `pattern.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let data = b"Hello, world!";
    /// let sa = SuffixArray::new(data);
    /// assert!(sa.contains(b"world"));
    /// ```
    #[must_use]
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.inner
            .binary_search_by(|&suffix| {
                self.data[suffix as usize..]
                    .iter()
                    .take(pattern.len())
                    .cmp(pattern.iter())
            })
            .is_ok()
    }

    /// Returns the start index of every occurrence of `pattern`, in ascending order.
    ///
    /// An empty pattern has no occurrences.
    ///
    /// This operation is *O*(*m* \* log(*n*) + *occ* \* log(*occ*)).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"mississippi");
    /// assert_eq!(sa.find(b"ssi"), [2, 5]);
    /// ```
    #[must_use]
    pub fn find(&self, pattern: &[u8]) -> Vec<u32> {
        if pattern.is_empty() {
            return Vec::new();
        }

        // Suffixes sharing `pattern` as a prefix form one contiguous block of the suffix array
        let head = |suffix: u32| {
            let suffix = &self.data[suffix as usize..];
            &suffix[..cmp::min(suffix.len(), pattern.len())]
        };
        let start = self.inner.partition_point(|&suffix| head(suffix) < pattern);
        let end = self.inner.partition_point(|&suffix| head(suffix) <= pattern);

        let mut found = self.inner[start..end].to_vec();
        found.sort_unstable();

        found
    }

    /// Consumes this suffix array, returning the underlying start indices.
    #[must_use]
    pub fn into_inner(self) -> Vec<u32> {
        self.inner
    }
}

/// Builds the suffix array of `data`.
///
/// This is a shorthand for [`SuffixArray::new()`] followed by [`SuffixArray::into_inner()`].
///
/// # Panics
///
/// Panics if `data.len() >= u32::MAX`.
///
/// # Examples
///
/// ```
/// assert_eq!(sufsort::build_suffix_array(b"abab"), [2, 0, 3, 1]);
/// ```
#[must_use]
pub fn build_suffix_array(data: &[u8]) -> Vec<u32> {
    SuffixArray::new(data).into_inner()
}

/// Checks that `suffix_array` could be the suffix array of data of length `len`, i.e., that it is
/// a permutation of `[0, len)`.
///
/// This doesn't check that the suffixes are actually sorted, which would be as expensive as
/// sorting them.
///
/// # Errors
///
/// Returns an error if `suffix_array` has the wrong length or an entry that is out of range or
/// repeated.
///
/// # Examples
///
/// ```
/// use sufsort::InvalidInput;
///
/// assert_eq!(sufsort::validate_suffix_array(&[1, 0], 2), Ok(()));
/// assert_eq!(
///     sufsort::validate_suffix_array(&[1, 1], 2),
///     Err(InvalidInput::NotAPermutation { rank: 1 }),
/// );
/// ```
pub fn validate_suffix_array(suffix_array: &[u32], len: usize) -> Result<(), InvalidInput> {
    if suffix_array.len() != len {
        return Err(InvalidInput::LengthMismatch {
            array: "suffix array",
            expected: len,
            found: suffix_array.len(),
        });
    }

    let mut seen = vec![false; len];
    for (rank, &start) in suffix_array.iter().enumerate() {
        let Some(seen) = seen.get_mut(start as usize).filter(|seen| !**seen) else {
            return Err(InvalidInput::NotAPermutation { rank });
        };
        *seen = true;
    }

    Ok(())
}
