// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Suffix sorting and the indices derived from it.
//!
//! This crate builds suffix arrays for arbitrary byte strings by prefix doubling, LCP arrays from
//! them with Kasai's algorithm, and path-compressed suffix trees from both.
//!
//! # Examples
//!
//! ```
//! use sufsort::{SuffixArray, SuffixTree};
//!
//! let sa = SuffixArray::new(b"mississippi");
//! assert_eq!(sa.as_slice(), &[10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
//! assert_eq!(sa.lcp(), [1, 1, 4, 0, 0, 1, 0, 2, 1, 3]);
//!
//! let tree = SuffixTree::new(&sa);
//! assert_eq!(tree.occurrences(b"ssi"), [2, 5]);
//! ```

mod doubling;
mod error;
mod lcp;
mod rank_sort;
mod suffix_array;
mod suffix_tree;

pub use error::InvalidInput;
pub use lcp::build_lcp_array;
pub use suffix_array::{SuffixArray, build_suffix_array, validate_suffix_array};
pub use suffix_tree::{Edge, Node, NodeId, SuffixTree, build_suffix_tree};
