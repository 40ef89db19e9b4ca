// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use sufsort::InvalidInput;
use tracing::debug;

use crate::{
    first_last::FirstLast,
    transform::{Bwt, Symbol},
};

/// Reconstructs the data a transform was computed from.
///
/// No suffix array is needed. Starting from the row that begins with the terminator, each step
/// reads the byte ending the current row, which precedes the byte read before it, and follows the
/// first-last mapping to the row beginning with that byte. The data is thus rebuilt back to front.
///
/// This operation is *O*(*n*).
///
/// # Errors
///
/// Returns an error if `bwt` is not the transform of any byte string, which can only happen for a
/// transform created with [`Bwt::from_parts()`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), sufsort::InvalidInput> {
/// use bwt::Bwt;
///
/// let bwt = Bwt::from_parts(b"pssmipissii".to_vec(), 4)?;
///
/// assert_eq!(bwt::bwt_invert(&bwt)?, b"mississippi");
/// # Ok(())
/// # }
/// ```
pub fn bwt_invert(bwt: &Bwt) -> Result<Vec<u8>, InvalidInput> {
    let table = FirstLast::new(bwt);
    let mut data = vec![0; bwt.len()];
    let mut row = 0;

    for byte in data.iter_mut().rev() {
        // Reaching the terminator early means the mapping has a cycle shorter than the text
        let Some(symbol) = bwt.symbol(row) else {
            return Err(InvalidInput::CorruptTransform);
        };
        *byte = symbol;
        row = table.lf(bwt, row);
    }

    // A complete walk ends on the only row that closes with the terminator
    if bwt.symbol(row).is_some() {
        return Err(InvalidInput::CorruptTransform);
    }
    debug!(len = data.len(), "inverted transform");

    Ok(data)
}

/// Reconstructs the data a transform was computed from by repeatedly sorting rotations.
///
/// Prepending the last column to a sorted table of rotation prefixes and sorting again extends
/// every prefix by one symbol. After as many rounds as there are rows, the table holds every
/// rotation of the terminated data, and the first row is the data behind the terminator.
///
/// This is *O*(*n*^3 log *n*) and only meant for cross-checking [`bwt_invert()`]. The result is
/// unspecified if `bwt` is not the transform of any byte string.
#[doc(hidden)]
#[must_use]
pub fn invert_by_sorting(bwt: &Bwt) -> Vec<u8> {
    let column: Vec<Symbol> = (0..bwt.rows()).map(|row| bwt.symbol(row)).collect();
    let mut table: Vec<Vec<Symbol>> = vec![Vec::new(); column.len()];

    for _ in 0..column.len() {
        for (rotation, &symbol) in table.iter_mut().zip(&column) {
            rotation.insert(0, symbol);
        }
        table.sort();
    }

    table.swap_remove(0).into_iter().flatten().collect()
}
