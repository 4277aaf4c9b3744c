#![doc = include_str!("../README.md")]

pub use binning::{BinCounts, BinningStrategy, GeomFit};
pub use bins::{entropy, Bin, BinStats, BinTable};
pub use compressor::{compress, CompressSummary};
pub use decompressor::{decompress, DecompressSummary};
pub use freqs::FreqModel;
pub use sidx::{IndexProfile, SortedIndex};

/// the range coder itself, for callers with their own symbol streams
pub mod coder;
pub mod constants;
pub mod errors;

mod binning;
mod bins;
mod byte_reader;
mod compressor;
mod decompressor;
mod freqs;
mod sidx;

#[cfg(test)]
mod tests;
