// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use integer_encoding::VarIntWriter;
use sufsort::SuffixArray;
use tracing::debug;
use zstd::Encoder;

use crate::{
    Bwt,
    header::{MAGIC, VERSION},
};

/// Writes a transform to `out` with default options
///
/// The transform can later be read back with [`decode()`](crate::decode).
///
/// This function is a shorthand for [`encode_with_config()`] called with the default options. If
/// you want to tune the compression, see that function instead.
///
/// # Errors
///
/// Returns an error if an I/O error occurs while writing the transform.
///
/// # Examples
///
/// ```
/// # fn main() -> std::io::Result<()> {
/// use bwt::Bwt;
/// use sufsort::SuffixArray;
///
/// let bwt = Bwt::new(&SuffixArray::new(b"banana"));
/// let mut out = Vec::new();
///
/// bwt::encode(&bwt, &mut out)?;
/// # Ok(())
/// # }
/// ```
pub fn encode<W>(bwt: &Bwt, out: &mut W) -> io::Result<()>
where
    W: Write + ?Sized,
{
    encode_with_config(bwt, out, &EncodeConfig::default())
}

/// Writes a transform to `out`
///
/// The stream starts with an uncompressed magic number and format version, followed by a zstd
/// frame holding the length of the last column, the primary index, and the last column itself.
///
/// # Errors
///
/// Returns an error if an I/O error occurs while writing the transform.
///
/// # Examples
///
/// ```
/// # fn main() -> std::io::Result<()> {
/// use bwt::{Bwt, EncodeConfig};
/// use sufsort::SuffixArray;
///
/// let bwt = Bwt::new(&SuffixArray::new(b"banana"));
/// let mut out = Vec::new();
///
/// bwt::encode_with_config(&bwt, &mut out, &EncodeConfig::new().compression_threads(0))?;
/// # Ok(())
/// # }
/// ```
pub fn encode_with_config<W>(bwt: &Bwt, out: &mut W, options: &EncodeConfig) -> io::Result<()>
where
    W: Write + ?Sized,
{
    // Write the header
    out.write_u32::<LittleEndian>(MAGIC)?;
    out.write_u32::<LittleEndian>(VERSION)?;

    let mut encoder = Encoder::new(out, options.compression_level)?;
    encoder.multithread(options.compression_threads)?;

    encoder.write_varint(bwt.len())?;
    encoder.write_varint(bwt.primary_index())?;
    encoder.write_all(bwt.last_column())?;

    encoder.finish()?;
    debug!(
        len = bwt.len(),
        level = options.compression_level,
        "encoded transform",
    );

    Ok(())
}

/// Transforms `data` and writes the result to `out` with default options
///
/// This is a shorthand for building a suffix array, computing its [`Bwt`], and calling
/// [`encode()`]. With the `decode` feature, `decompress()` recovers `data`.
///
/// # Errors
///
/// Returns an error if an I/O error occurs while writing the transform.
///
/// # Panics
///
/// Panics if `data.len() >= u32::MAX`.
///
/// # Examples
///
/// ```
/// # fn main() -> std::io::Result<()> {
/// let mut out = Vec::new();
///
/// bwt::compress(b"mississippi", &mut out)?;
/// assert!(!out.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn compress<W>(data: &[u8], out: &mut W) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let bwt = Bwt::new(&SuffixArray::new(data));

    encode(&bwt, out)
}

/// Configuration for an encode operation.
///
/// The defaults should be suitable for most use cases, but you may wish to change them in
/// especially resource-constrained or powerful computing environments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct EncodeConfig {
    compression_threads: u32,
    compression_level: i32,
}

impl EncodeConfig {
    /// Creates a new configuration for encode operations
    ///
    /// This configuration can be reused across encode operations.
    pub const fn new() -> Self {
        Self {
            compression_threads: Self::DEFAULT_COMPRESSION_THREADS,
            compression_level: Self::DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets the number of threads to use for compressing the transform.
    ///
    /// A value of 0 means that compression will run on the same thread as I/O.
    pub fn compression_threads(&mut self, threads: u32) -> &mut Self {
        self.compression_threads = threads;
        self
    }

    /// Sets the compression level to use for compressing the transform.
    ///
    /// The compression level can be set to any value between -7 and 22 inclusive. Any value
    /// outside of this range will be clamped to fit inside the range.
    pub fn compression_level(&mut self, level: i32) -> &mut Self {
        self.compression_level = level;
        self
    }

    /// The default number of compression threads to create
    ///
    /// We set this to 1 to ensure I/O and compression can run concurrently.
    pub const DEFAULT_COMPRESSION_THREADS: u32 = 1;

    /// The default compression level to use
    ///
    /// A transform groups equal bytes into runs, which even fast levels compress well, so we
    /// trade some ratio for speed.
    pub const DEFAULT_COMPRESSION_LEVEL: i32 = 9;
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self::new()
    }
}
