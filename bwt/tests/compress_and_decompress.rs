// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]
#![cfg(all(feature = "encode", feature = "decode"))]

use std::{
    error::Error,
    fs::{self, File},
    io,
    path::Path,
};

use blake3::Hasher;
use bwt::{Bwt, BwtIndex, EncodeConfig};
use sufsort::SuffixArray;

const ORIGINAL_FILE_NAME: &str = "sonnets.txt";
const STREAM_FILE_NAME: &str = "sonnets.bwtz";
const RESTORED_FILE_NAME: &str = "sonnets-restored.txt";

const LINES: [&str; 4] = [
    "Shall I compare thee to a summer's day?\n",
    "Thou art more lovely and more temperate:\n",
    "Rough winds do shake the darling buds of May,\n",
    "And summer's lease hath all too short a date;\n",
];

fn corpus() -> Vec<u8> {
    LINES.iter().cycle().take(400).flat_map(|line| line.bytes()).collect()
}

#[test]
fn sonnets() -> Result<(), Box<dyn Error>> {
    let workspace_dir = Path::new(env!("CARGO_TARGET_TMPDIR"));
    let original_path = workspace_dir.join(ORIGINAL_FILE_NAME);
    let stream_path = workspace_dir.join(STREAM_FILE_NAME);
    let restored_path = workspace_dir.join(RESTORED_FILE_NAME);

    fs::write(&original_path, corpus())?;

    // Transform the original file into a stream
    {
        let original = fs::read(&original_path)?;
        let mut stream = File::create(&stream_path)?;
        bwt::compress(&original, &mut stream)?;
    }

    // Restore the original file from the stream
    {
        let stream = File::open(&stream_path)?;
        fs::write(&restored_path, bwt::decompress(stream)?)?;
    }

    // Verify that restoring worked correctly by comparing the hashes of the original and restored
    // files
    let mut original = File::open(&original_path)?;
    let mut restored = File::open(&restored_path)?;

    let mut original_hasher = Hasher::new();
    let mut restored_hasher = Hasher::new();
    io::copy(&mut original, &mut original_hasher)?;
    io::copy(&mut restored, &mut restored_hasher)?;

    assert_eq!(original_hasher.finalize(), restored_hasher.finalize());

    // Repetitive text should shrink once its transform is compressed
    assert!(fs::metadata(&stream_path)?.len() < fs::metadata(&original_path)?.len());

    Ok(())
}

#[test]
fn single_threaded_stream_matches_index() -> Result<(), Box<dyn Error>> {
    let data = corpus();
    let index = BwtIndex::new(&data);

    let mut stream = Vec::new();
    bwt::encode_with_config(
        index.bwt(),
        &mut stream,
        EncodeConfig::new()
            .compression_threads(0)
            .compression_level(1),
    )?;
    let decoded = bwt::decode(stream.as_slice())?;

    assert_eq!(&decoded, index.bwt());
    assert_eq!(decoded, Bwt::new(&SuffixArray::new(&data)));
    assert_eq!(bwt::bwt_invert(&decoded)?, data);
    assert_eq!(index.count(b"summer's"), 200);

    Ok(())
}
