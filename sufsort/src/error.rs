// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// An error indicating that an argument passed to a builder is malformed.
///
/// The builders themselves are total over well-formed input. This error is only returned by the
/// functions that accept precomputed arrays from the caller, e.g.,
/// [`build_lcp_array()`](crate::build_lcp_array), when those arrays cannot belong to the given
/// text.
///
/// # Examples
///
/// ```
/// use sufsort::InvalidInput;
///
/// // A suffix array for a three-byte string must have three entries
/// let result = sufsort::build_lcp_array(b"abc", &[0, 1]);
///
/// assert!(matches!(result, Err(InvalidInput::LengthMismatch { .. })));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidInput {
    /// An array does not have the length required by the text it is paired with
    LengthMismatch {
        /// The name of the offending array
        array: &'static str,
        /// The required length
        expected: usize,
        /// The length actually given
        found: usize,
    },
    /// The suffix array entry at `rank` is out of range or repeats an earlier entry
    NotAPermutation {
        /// The position of the offending entry in the suffix array
        rank: usize,
    },
    /// The LCP entry at `rank` is longer than one of the two suffixes it compares
    LcpOutOfBounds {
        /// The position of the offending entry in the LCP array
        rank: usize,
    },
    /// The suffix at `rank` does not diverge from its predecessor where the LCP array says it
    /// does
    InconsistentLcp {
        /// The position of the offending suffix in the suffix array
        rank: usize,
    },
    /// The primary index of a transform does not point into its last column
    PrimaryIndexOutOfBounds {
        /// The primary index given
        index: usize,
        /// The length of the last column
        len: usize,
    },
    /// The last column and primary index do not describe the transform of any string
    CorruptTransform,
}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            InvalidInput::LengthMismatch {
                array,
                expected,
                found,
            } => write!(f, "{array} has length {found}, expected {expected}"),
            InvalidInput::NotAPermutation { rank } => {
                write!(f, "suffix array entry {rank} is out of range or repeated")
            }
            InvalidInput::LcpOutOfBounds { rank } => {
                write!(f, "LCP entry {rank} exceeds the length of a compared suffix")
            }
            InvalidInput::InconsistentLcp { rank } => {
                write!(f, "suffix at rank {rank} is inconsistent with the LCP array")
            }
            InvalidInput::PrimaryIndexOutOfBounds { index, len } => {
                write!(f, "primary index {index} is out of bounds for length {len}")
            }
            InvalidInput::CorruptTransform => write!(f, "not a valid Burrows-Wheeler transform"),
        }
    }
}

impl Error for InvalidInput {}
