// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use sufsort::{InvalidInput, SuffixArray};

/// A symbol of the terminated transform. `None` is the terminator, which sorts below every byte.
pub(crate) type Symbol = Option<u8>;

/// The Burrows-Wheeler transform of a byte string.
///
/// Entry `i` of the last column is the byte preceding the `i`th smallest suffix, wrapping around
/// to the final byte for the suffix starting at index 0. The row of that suffix is the primary
/// index, which stands in for the terminator and is all that inversion needs besides the last
/// column itself.
///
/// # Examples
///
/// ```
/// use bwt::Bwt;
/// use sufsort::SuffixArray;
///
/// let bwt = Bwt::new(&SuffixArray::new(b"banana"));
///
/// assert_eq!(bwt.last_column(), b"nnbaaa");
/// assert_eq!(bwt.primary_index(), 3);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Bwt {
    last_column: Vec<u8>,
    primary_index: usize,
}

impl Bwt {
    /// Computes the transform of the data sorted by `suffix_array`.
    ///
    /// This operation is *O*(*n*).
    #[must_use]
    pub fn new(suffix_array: &SuffixArray) -> Self {
        transform(suffix_array.data(), suffix_array.as_slice())
    }

    /// Creates a transform from a last column and primary index, e.g., ones read from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if `primary_index` is out of bounds for `last_column`. An empty last
    /// column must have a primary index of 0.
    pub fn from_parts(last_column: Vec<u8>, primary_index: usize) -> Result<Self, InvalidInput> {
        let len = last_column.len();
        if primary_index >= len.max(1) {
            return Err(InvalidInput::PrimaryIndexOutOfBounds {
                index: primary_index,
                len,
            });
        }

        Ok(Self {
            last_column,
            primary_index,
        })
    }

    /// Returns the last column of the sorted suffixes.
    #[must_use]
    pub fn last_column(&self) -> &[u8] {
        &self.last_column
    }

    /// Returns the row of the suffix starting at index 0.
    #[must_use]
    pub fn primary_index(&self) -> usize {
        self.primary_index
    }

    /// Returns the length of the transformed data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.last_column.len()
    }

    /// Returns `true` if the transformed data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_column.is_empty()
    }

    /// Consumes this transform, returning its last column and primary index.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, usize) {
        (self.last_column, self.primary_index)
    }

    /// Returns the last symbol of `row` of the terminated transform.
    ///
    /// The terminated transform sorts the rotations of the data followed by a terminator, so it
    /// has one more row than the data has bytes. Row 0 is the rotation starting at the terminator
    /// and ends with the final byte of the data, which is also what the last column holds at the
    /// primary index. Every later row `r` ends with entry `r - 1` of the last column, except that
    /// the row after the primary index ends with the terminator.
    pub(crate) fn symbol(&self, row: usize) -> Symbol {
        if row == 0 {
            self.last_column.get(self.primary_index).copied()
        } else if row - 1 == self.primary_index {
            None
        } else {
            Some(self.last_column[row - 1])
        }
    }

    /// Returns the number of rows in the terminated transform.
    pub(crate) fn rows(&self) -> usize {
        self.len() + 1
    }
}

/// Computes the Burrows-Wheeler transform of `data` given its suffix array.
///
/// This operation is *O*(*n*).
///
/// # Errors
///
/// Returns an error if `suffix_array` is not a permutation of the indices of `data`.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), sufsort::InvalidInput> {
/// let data = b"mississippi";
/// let suffix_array = sufsort::build_suffix_array(data);
/// let bwt = bwt::bwt_transform(data, &suffix_array)?;
///
/// assert_eq!(bwt.last_column(), b"pssmipissii");
/// # Ok(())
/// # }
/// ```
pub fn bwt_transform(data: &[u8], suffix_array: &[u32]) -> Result<Bwt, InvalidInput> {
    sufsort::validate_suffix_array(suffix_array, data.len())?;

    Ok(transform(data, suffix_array))
}

fn transform(data: &[u8], suffix_array: &[u32]) -> Bwt {
    let n = data.len();
    let mut primary_index = 0;

    let last_column = suffix_array
        .iter()
        .enumerate()
        .map(|(row, &start)| {
            if start == 0 {
                primary_index = row;
            }
            data[(start as usize + n - 1) % n]
        })
        .collect();

    Bwt {
        last_column,
        primary_index,
    }
}
