// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! The Burrows-Wheeler transform, its inverse, and substring search over it.
//!
//! This crate computes the transform of arbitrary byte strings from a suffix array built by
//! [`sufsort`], inverts it without one, and finds patterns directly in the transformed data. It
//! also provides a compact, zstd-compressed stream format for storing transforms.
//!
//! # Examples
//!
//! Computing and inverting a transform:
//!
//! ```
//! # fn main() -> Result<(), sufsort::InvalidInput> {
//! use bwt::Bwt;
//! use sufsort::SuffixArray;
//!
//! let bwt = Bwt::new(&SuffixArray::new(b"abracadabra"));
//! assert_eq!(bwt::bwt_invert(&bwt)?, b"abracadabra");
//! # Ok(())
//! # }
//! ```
//!
//! Finding a pattern:
//!
//! ```
//! use bwt::BwtIndex;
//!
//! let index = BwtIndex::new(b"abracadabra");
//! assert_eq!(index.find(b"abra"), [0, 7]);
//! ```

#[cfg(feature = "decode")]
mod decode;
#[cfg(feature = "encode")]
mod encode;
mod first_last;
#[cfg(any(feature = "encode", feature = "decode"))]
mod header;
mod invert;
mod search;
mod transform;

#[cfg(feature = "decode")]
pub use decode::{DecodeError, decode, decompress};
#[cfg(feature = "encode")]
pub use encode::{EncodeConfig, compress, encode, encode_with_config};
#[doc(hidden)]
pub use invert::invert_by_sorting;
pub use invert::bwt_invert;
pub use search::{BwtIndex, bwt_find};
pub use transform::{Bwt, bwt_transform};
