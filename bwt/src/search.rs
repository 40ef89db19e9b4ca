// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::ops::Range;

use sufsort::SuffixArray;
use tracing::debug;

use crate::{first_last::FirstLast, transform::Bwt};

/// A substring index over the Burrows-Wheeler transform of a byte string.
///
/// Patterns are matched back to front against the last column: the rows whose last byte is the
/// current pattern byte are mapped through the first-last correspondence to the rows that begin
/// with it, which are exactly the rows beginning with the pattern suffix matched so far. Each
/// pattern byte costs a bounded number of steps regardless of how many rows match. The
/// suffix array is kept only to report where the matching rows start.
///
/// # Examples
///
/// ```
/// use bwt::BwtIndex;
///
/// let index = BwtIndex::new(b"mississippi");
///
/// assert_eq!(index.find(b"ssi"), [2, 5]);
/// assert_eq!(index.count(b"i"), 4);
/// assert!(!index.contains(b"x"));
/// ```
pub struct BwtIndex<'a> {
    suffix_array: SuffixArray<'a>,
    bwt: Bwt,
    table: FirstLast,
}

impl<'a> BwtIndex<'a> {
    /// Builds an index for `data`.
    ///
    /// This operation is *O*(*n* log *n*), dominated by suffix sorting.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() >= u32::MAX`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_suffix_array(SuffixArray::new(data))
    }

    /// Builds an index from an existing suffix array.
    ///
    /// This operation is *O*(*n*).
    #[must_use]
    pub fn from_suffix_array(suffix_array: SuffixArray<'a>) -> Self {
        let bwt = Bwt::new(&suffix_array);
        let table = FirstLast::new(&bwt);
        debug!(len = bwt.len(), "built transform index");

        Self {
            suffix_array,
            bwt,
            table,
        }
    }

    /// Returns the transform this index searches.
    #[must_use]
    pub fn bwt(&self) -> &Bwt {
        &self.bwt
    }

    /// Returns the suffix array of the indexed data.
    #[must_use]
    pub fn suffix_array(&self) -> &SuffixArray<'a> {
        &self.suffix_array
    }

    /// Returns the start index of every occurrence of `pattern`, in ascending order.
    ///
    /// An empty pattern has no occurrences.
    #[must_use]
    pub fn find(&self, pattern: &[u8]) -> Vec<u32> {
        let suffix_array = self.suffix_array.as_slice();

        // Row 0 begins with the terminator and never matches, so row `r` is suffix `r - 1`
        let mut found: Vec<u32> = self
            .rows(pattern)
            .map(|row| suffix_array[row - 1])
            .collect();
        found.sort_unstable();

        found
    }

    /// Returns the number of occurrences of `pattern`.
    #[must_use]
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.rows(pattern).len()
    }

    /// Returns `true` if and only if `pattern` is contained in the indexed data.
    #[must_use]
    pub fn contains(&self, pattern: &[u8]) -> bool {
        !self.rows(pattern).is_empty()
    }

    /// Returns the rows of the terminated transform that begin with `pattern`.
    fn rows(&self, pattern: &[u8]) -> Range<usize> {
        if pattern.is_empty() {
            return 0..0;
        }

        let mut rows = 0..self.bwt.rows();
        for &byte in pattern.iter().rev() {
            let symbol = Some(byte);
            let first = self.table.first(symbol);

            // Rows in the range ending in `byte` map, in order, to the rows starting with it
            let top = first + self.table.occ(&self.bwt, symbol, rows.start);
            let bottom = first + self.table.occ(&self.bwt, symbol, rows.end);
            if top >= bottom {
                return 0..0;
            }

            rows = top..bottom;
        }

        rows
    }
}

/// Returns the start index of every occurrence of `pattern` in `data`, in ascending order.
///
/// This builds a throwaway [`BwtIndex`]; keep one around to search the same data repeatedly.
///
/// # Examples
///
/// ```
/// assert_eq!(bwt::bwt_find(b"panamabananas", b"ana"), [1, 7, 9]);
/// assert!(bwt::bwt_find(b"panamabananas", b"").is_empty());
/// ```
#[must_use]
pub fn bwt_find(data: &[u8], pattern: &[u8]) -> Vec<u32> {
    BwtIndex::new(data).find(pattern)
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    fn brute_force(data: &[u8], pattern: &[u8]) -> Vec<u32> {
        if pattern.is_empty() || pattern.len() > data.len() {
            return Vec::new();
        }

        data.windows(pattern.len())
            .enumerate()
            .filter(|(_, window)| *window == pattern)
            .map(|(i, _)| i as u32)
            .collect()
    }

    #[test]
    fn panamabananas() {
        let data = b"panamabananas";
        let index = BwtIndex::new(data);

        assert_eq!(index.find(b"ana"), brute_force(data, b"ana"));
        assert_eq!(index.find(b"ana"), [1, 7, 9]);
        assert_eq!(index.find(b"s"), [12]);
        assert_eq!(index.find(data), [0]);
    }

    #[test]
    fn mississippi() {
        let index = BwtIndex::new(b"mississippi");

        assert_eq!(index.find(b"ssi"), [2, 5]);
        assert_eq!(index.find(b"issi"), [1, 4]);
        assert!(index.find(b"x").is_empty());
        assert_eq!(index.find(b"ssiss"), [2]);
        assert!(index.find(b"spi").is_empty());
    }

    #[test]
    fn long_text_matches_brute_force() {
        // Spans many occurrence checkpoints
        let data: Vec<u8> = b"the quick brown fox jumps over the lazy dog. "
            .iter()
            .copied()
            .cycle()
            .take(2000)
            .collect();
        let index = BwtIndex::new(&data);

        for pattern in [&b"the"[..], b"fox", b"dog. the", b"o", b"cat"] {
            assert_eq!(index.find(pattern), brute_force(&data, pattern));
        }
    }

    #[test]
    fn counts_match_alphabet() {
        let index = BwtIndex::new(b"abracadabra");

        assert_eq!(index.count(b"a"), 5);
        assert_eq!(index.count(b"b"), 2);
        assert_eq!(index.count(b"r"), 2);
        assert_eq!(index.count(b"c"), 1);
        assert_eq!(index.count(b"d"), 1);
        assert_eq!(index.count(b"z"), 0);
        assert_eq!(index.count(b"abra"), 2);
    }

    #[test]
    fn empty_pattern() {
        let index = BwtIndex::new(b"hello");

        assert!(index.find(b"").is_empty());
        assert_eq!(index.count(b""), 0);
        assert!(!index.contains(b""));
    }

    #[test]
    fn empty_data() {
        let index = BwtIndex::new(b"");

        assert!(index.find(b"a").is_empty());
        assert!(index.bwt().is_empty());
    }

    #[test]
    fn pattern_longer_than_data() {
        let index = BwtIndex::new(b"abc");

        assert!(index.find(b"abcd").is_empty());
        assert!(index.find(b"zabc").is_empty());
    }

    #[test]
    fn zero_bytes_are_searchable() {
        let data = b"\0a\0\0a";
        let index = BwtIndex::new(data);

        assert_eq!(index.find(b"\0"), [0, 2, 3]);
        assert_eq!(index.find(b"\0a"), [0, 3]);
    }

    #[test]
    fn qc_matches_brute_force() {
        fn prop(data: Vec<u8>, pattern: Vec<u8>) -> bool {
            let pattern = &pattern[..pattern.len().min(3)];
            bwt_find(&data, pattern) == brute_force(&data, pattern)
        }
        quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
    }

    #[test]
    fn qc_substrings_are_found() {
        fn prop(data: Vec<bool>, start: usize, len: usize) -> bool {
            let data: Vec<u8> = data.into_iter().map(u8::from).collect();
            if data.is_empty() {
                return true;
            }
            let start = start % data.len();
            let end = start + 1 + len % (data.len() - start);
            let pattern = &data[start..end];

            let found = bwt_find(&data, pattern);
            found.contains(&(start as u32)) && found == brute_force(&data, pattern)
        }
        quickcheck(prop as fn(Vec<bool>, usize, usize) -> bool);
    }
}
