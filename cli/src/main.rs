// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use bwt::{Bwt, BwtIndex, EncodeConfig};
use clap::{Parser, Subcommand};
use sufsort::{SuffixArray, SuffixTree};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the suffix array of a file, one start index per line
    SuffixArray { input: PathBuf },
    /// Print the LCP array of a file, one entry per line
    Lcp { input: PathBuf },
    /// Print the suffix tree of a file as indented edge labels
    Tree { input: PathBuf },
    /// Print every position at which a pattern occurs in a file
    Find { input: PathBuf, pattern: String },
    /// Write the Burrows-Wheeler transform of a file as a compressed stream
    Transform {
        input: PathBuf,
        output: PathBuf,
        /// zstd compression level
        #[arg(long, default_value_t = EncodeConfig::DEFAULT_COMPRESSION_LEVEL)]
        level: i32,
        /// Number of compression threads, 0 to compress on the I/O thread
        #[arg(long, default_value_t = EncodeConfig::DEFAULT_COMPRESSION_THREADS)]
        threads: u32,
    },
    /// Restore a file from a stream written by `transform`
    Invert { input: PathBuf, output: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().event_format(fmt::format().compact()))
        .with(EnvFilter::from_default_env())
        .try_init()?;

    let args = Args::parse();
    let mut out = BufWriter::new(io::stdout().lock());

    match args.command {
        Command::SuffixArray { input } => {
            let data = read_input(&input)?;
            let sa = SuffixArray::new(&data);

            for start in sa.as_slice() {
                writeln!(out, "{start}")?;
            }
        }
        Command::Lcp { input } => {
            let data = read_input(&input)?;
            let sa = SuffixArray::new(&data);

            for common in sa.lcp() {
                writeln!(out, "{common}")?;
            }
        }
        Command::Tree { input } => {
            let data = read_input(&input)?;
            let sa = SuffixArray::new(&data);
            let tree = SuffixTree::new(&sa);
            info!(
                nodes = tree.node_count(),
                suffixes = tree.suffix_count(),
                "built suffix tree",
            );

            write_tree(&mut out, &tree)?;
        }
        Command::Find { input, pattern } => {
            let data = read_input(&input)?;
            let index = BwtIndex::new(&data);

            for position in index.find(pattern.as_bytes()) {
                writeln!(out, "{position}")?;
            }
        }
        Command::Transform {
            input,
            output,
            level,
            threads,
        } => {
            let data = read_input(&input)?;
            let transformed = Bwt::new(&SuffixArray::new(&data));

            let mut stream = File::create(&output)
                .with_context(|| format!("Failed to create output file '{}'", output.display()))?;
            bwt::encode_with_config(
                &transformed,
                &mut stream,
                EncodeConfig::new()
                    .compression_level(level)
                    .compression_threads(threads),
            )
            .context("I/O error occurred while writing transform")?;
            info!(
                primary_index = transformed.primary_index(),
                "wrote transform",
            );
        }
        Command::Invert { input, output } => {
            let stream = File::open(&input)
                .with_context(|| format!("Failed to open input file '{}'", input.display()))?;
            let data = bwt::decompress(stream).context("Failed to restore transformed data")?;

            fs::write(&output, data)
                .with_context(|| format!("Failed to write output file '{}'", output.display()))?;
        }
    }

    out.flush().context("Failed to write to standard output")?;

    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data =
        fs::read(path).with_context(|| format!("Failed to read input file '{}'", path.display()))?;
    anyhow::ensure!(
        data.len() < u32::MAX as usize,
        "Input file '{}' is too large to index",
        path.display(),
    );

    Ok(data)
}

/// Writes every edge of `tree` depth first, indented by depth and tagged with the suffix that
/// terminates below it, if any.
fn write_tree<W>(out: &mut W, tree: &SuffixTree) -> io::Result<()>
where
    W: Write,
{
    let mut pending: Vec<_> = tree
        .node(tree.root())
        .children()
        .rev()
        .map(|edge| (edge, 0))
        .collect();

    while let Some((edge, level)) = pending.pop() {
        let child = tree.node(edge.child());
        let label = tree.edge_label(edge).escape_ascii();

        match child.suffix() {
            Some(start) => writeln!(out, "{:indent$}{label} [{start}]", "", indent = 2 * level)?,
            None => writeln!(out, "{:indent$}{label}", "", indent = 2 * level)?,
        }

        pending.extend(child.children().rev().map(|edge| (edge, level + 1)));
    }

    Ok(())
}
