// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, ErrorKind, Read},
};

use byteorder::{LittleEndian, ReadBytesExt};
use integer_encoding::VarIntReader;
use sufsort::InvalidInput;
use tracing::debug;
use zstd::Decoder;

use crate::{
    Bwt, bwt_invert,
    header::{MAGIC, VERSION},
};

/// An error indicating that reading a transform failed.
///
/// This error is returned by [`decode()`] and [`decompress()`] when the stream given to them
/// contains invalid metadata or reading it fails.
///
/// # Examples
///
/// ```
/// use bwt::DecodeError;
///
/// // Garbage data
/// let stream: &[u8] = &[0, 0, 0, 0];
///
/// assert!(matches!(bwt::decode(stream), Err(DecodeError::BadMagic(_))));
/// ```
#[derive(Debug)]
pub enum DecodeError {
    /// An I/O error occurred
    Io(io::Error),
    /// The stream magic is invalid
    BadMagic(u32),
    /// The stream version is unsupported
    UnsupportedVersion(u32),
    /// The stream is well-formed but does not hold a valid transform
    Invalid(InvalidInput),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DecodeError::Io(e) => write!(f, "I/O error: {e}"),
            DecodeError::BadMagic(magic) => {
                write!(f, "bad magic: expected {MAGIC:x}, found {magic:x}")
            }
            DecodeError::UnsupportedVersion(version) => {
                write!(
                    f,
                    "unsupported version: found {version}, supported versions are [{VERSION}]",
                )
            }
            DecodeError::Invalid(e) => write!(f, "invalid transform: {e}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecodeError::Io(e) => Some(e),
            DecodeError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(value: io::Error) -> Self {
        DecodeError::Io(value)
    }
}

impl From<InvalidInput> for DecodeError {
    fn from(value: InvalidInput) -> Self {
        DecodeError::Invalid(value)
    }
}

/// Reads a transform written by [`encode()`](crate::encode).
///
/// # Errors
///
/// Returns an error if an I/O error occurs while reading, if the stream metadata is invalid, or if
/// the primary index is out of bounds.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let stream = File::open("corpus.bwtz")?;
/// let bwt = bwt::decode(stream)?;
/// # Ok(())
/// # }
/// ```
pub fn decode<R>(mut stream: R) -> Result<Bwt, DecodeError>
where
    R: Read,
{
    let magic = stream.read_u32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(DecodeError::BadMagic(magic));
    }

    let version = stream.read_u32::<LittleEndian>()?;
    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let mut decoder = Decoder::new(stream)?;
    let len: usize = decoder.read_varint()?;
    let primary_index: usize = decoder.read_varint()?;

    // The length is untrusted, so let the data itself bound the allocation
    let mut last_column = Vec::new();
    decoder
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut last_column)?;
    if last_column.len() != len {
        return Err(DecodeError::Io(ErrorKind::UnexpectedEof.into()));
    }
    debug!(len, "decoded transform");

    Ok(Bwt::from_parts(last_column, primary_index)?)
}

/// Reads a transform written by [`compress()`](crate::compress) and inverts it.
///
/// # Errors
///
/// Returns an error if reading the transform fails for any reason given in [`decode()`] or if the
/// stream does not hold the transform of any byte string.
///
/// # Examples
///
/// ```no_run
/// use std::fs::{self, File};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let stream = File::open("corpus.bwtz")?;
/// fs::write("corpus.txt", bwt::decompress(stream)?)?;
/// # Ok(())
/// # }
/// ```
pub fn decompress<R>(stream: R) -> Result<Vec<u8>, DecodeError>
where
    R: Read,
{
    let bwt = decode(stream)?;

    Ok(bwt_invert(&bwt)?)
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "encode")]
    use sufsort::SuffixArray;

    use super::*;
    #[cfg(feature = "encode")]
    use crate::encode;

    #[test]
    #[cfg(feature = "encode")]
    fn round_trip() {
        let bwt = Bwt::new(&SuffixArray::new(b"panamabananas"));
        let mut stream = Vec::new();
        encode(&bwt, &mut stream).unwrap();

        assert_eq!(decode(stream.as_slice()).unwrap(), bwt);
    }

    #[test]
    fn bad_magic() {
        let stream = [0xde, 0xad, 0xbe, 0xef, 1, 0, 0, 0];

        assert!(matches!(
            decode(stream.as_slice()),
            Err(DecodeError::BadMagic(0xefbeadde)),
        ));
    }

    #[test]
    fn unsupported_version() {
        let mut stream = MAGIC.to_le_bytes().to_vec();
        stream.extend_from_slice(&7u32.to_le_bytes());

        assert!(matches!(
            decode(stream.as_slice()),
            Err(DecodeError::UnsupportedVersion(7)),
        ));
    }

    #[test]
    fn truncated_header() {
        let magic = MAGIC.to_le_bytes();

        assert!(matches!(decode(&magic[..3]), Err(DecodeError::Io(_))));
    }

    #[test]
    #[cfg(feature = "encode")]
    fn truncated_body() {
        let bwt = Bwt::new(&SuffixArray::new(b"panamabananas"));
        let mut stream = Vec::new();
        encode(&bwt, &mut stream).unwrap();
        stream.truncate(stream.len() - 4);

        assert!(matches!(decode(stream.as_slice()), Err(DecodeError::Io(_))));
    }

    #[test]
    #[cfg(feature = "encode")]
    fn corrupt_transform() {
        let bwt = Bwt::from_parts(b"ab".to_vec(), 1).unwrap();
        let mut stream = Vec::new();
        encode(&bwt, &mut stream).unwrap();

        assert!(matches!(
            decompress(stream.as_slice()),
            Err(DecodeError::Invalid(InvalidInput::CorruptTransform)),
        ));
    }
}
