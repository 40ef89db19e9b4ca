// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use crate::transform::{Bwt, Symbol};

/// The number of distinct symbols: every byte plus the terminator
const SYMBOLS: usize = 257;

/// The number of rows between stored occurrence counts
const CHECKPOINT_INTERVAL: usize = 128;

/// Maps rows of the last column to rows of the first column.
///
/// The `k`th occurrence of a symbol in the last column and the `k`th occurrence of the same symbol
/// in the sorted first column belong to the same position of the text, so a row ending in symbol
/// `c` maps to the row starting at that same `c`, which is one position earlier in the text. That
/// row is `C[c] + occ(c, row)`, where `C[c]` is the first row of the block of rows starting with
/// `c` and `occ(c, row)` counts the rows above `row` ending in `c`.
pub(crate) struct FirstLast {
    /// The first row of each symbol's block in the first column
    first: [u32; SYMBOLS],
    /// Occurrence counts of every symbol above each multiple of `CHECKPOINT_INTERVAL`
    checkpoints: Vec<[u32; SYMBOLS]>,
}

impl FirstLast {
    /// Builds the tables for every row of the terminated transform.
    ///
    /// This operation is *O*(*n*).
    ///
    /// # Panics
    ///
    /// Panics if the transform has `u32::MAX` or more rows.
    pub(crate) fn new(bwt: &Bwt) -> Self {
        let rows = bwt.rows();
        assert!(
            rows <= u32::MAX as usize,
            "transform must have fewer than u32::MAX rows",
        );

        let mut counts = [0u32; SYMBOLS];
        let mut checkpoints = Vec::with_capacity(rows / CHECKPOINT_INTERVAL + 1);
        // One past the last row is a valid argument to `occ`, so it needs a checkpoint too
        for row in 0..=rows {
            if row % CHECKPOINT_INTERVAL == 0 {
                checkpoints.push(counts);
            }
            if row < rows {
                counts[index(bwt.symbol(row))] += 1;
            }
        }

        let mut first = [0u32; SYMBOLS];
        let mut sum = 0;
        for (start, count) in first.iter_mut().zip(counts) {
            *start = sum;
            sum += count;
        }

        Self { first, checkpoints }
    }

    /// Returns the number of rows above `row` whose last symbol is `symbol`.
    ///
    /// `row` may be one past the last row. This scans fewer than `CHECKPOINT_INTERVAL` rows.
    pub(crate) fn occ(&self, bwt: &Bwt, symbol: Symbol, row: usize) -> usize {
        let checkpoint = row / CHECKPOINT_INTERVAL;
        let base = self.checkpoints[checkpoint][index(symbol)] as usize;
        let scanned = (checkpoint * CHECKPOINT_INTERVAL..row)
            .filter(|&above| bwt.symbol(above) == symbol)
            .count();

        base + scanned
    }

    /// Returns the first row of the block of rows starting with `symbol`.
    pub(crate) fn first(&self, symbol: Symbol) -> usize {
        self.first[index(symbol)] as usize
    }

    /// Returns the first-column row holding the symbol that ends `row`.
    pub(crate) fn lf(&self, bwt: &Bwt, row: usize) -> usize {
        let symbol = bwt.symbol(row);

        self.first(symbol) + self.occ(bwt, symbol, row)
    }
}

fn index(symbol: Symbol) -> usize {
    match symbol {
        None => 0,
        Some(byte) => usize::from(byte) + 1,
    }
}
