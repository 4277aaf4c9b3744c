use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use binq::constants::HEADER_LEN;

use crate::utils;

/// Entropy-code an index against a fitted bin table.
#[derive(Clone, Debug, Parser)]
#[command(about = "entropy-code an index against a fitted bin table")]
pub struct EncodeOpt {
  /// Bins file produced by quantize.
  pub bins_path: PathBuf,
  /// Index file: a 45-byte header, then binary32 values.
  pub index_path: PathBuf,
  /// Compressed file to write.
  pub compressed_path: PathBuf,
}

pub fn encode(opt: EncodeOpt) -> Result<()> {
  let table = utils::read_bin_table(&opt.bins_path)?;
  let model = table.model()?;
  eprintln!(
    "read {} bins covering {} values",
    table.num_bins(),
    model.total()
  );

  let src = utils::open_input(&opt.index_path)?;
  let mut dst = utils::create_output(&opt.compressed_path)?;
  let summary = binq::compress(&table, src, &mut dst)?;
  dst.commit()?;

  eprintln!(
    "coded {} floats into {}",
    summary.n_floats,
    opt.compressed_path.display()
  );
  eprintln!(
    "wrote {} bytes including the {}-byte header",
    summary.n_bytes, HEADER_LEN
  );
  eprintln!(
    "that is {:.4} bits/float, {:.2}% of raw binary32",
    8.0 * summary.n_bytes as f64 / summary.n_floats as f64,
    100.0 * (8.0 * summary.n_bytes as f64) / (32.0 * summary.n_floats as f64)
  );
  Ok(())
}
