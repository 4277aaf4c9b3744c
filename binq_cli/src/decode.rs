use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::utils;

/// Rebuild an index of representatives from a compressed file.
#[derive(Clone, Debug, Parser)]
#[command(about = "rebuild an index of representatives from a compressed file")]
pub struct DecodeOpt {
  /// Bins file produced by quantize.
  pub bins_path: PathBuf,
  /// Compressed file produced by encode.
  pub compressed_path: PathBuf,
  /// Reconstructed index to write.
  pub output_path: PathBuf,
}

pub fn decode(opt: DecodeOpt) -> Result<()> {
  let table = utils::read_bin_table(&opt.bins_path)?;

  let src = utils::open_input(&opt.compressed_path)?;
  let mut dst = utils::create_output(&opt.output_path)?;
  let summary = binq::decompress(&table, src, &mut dst)?;
  dst.commit()?;

  eprintln!(
    "restored {} floats to {}",
    summary.n_floats,
    opt.output_path.display()
  );
  Ok(())
}
