use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use binq::constants::MIN_BINS;
use binq::{BinTable, BinningStrategy, SortedIndex};

use crate::utils;

/// Fit a bin table to a sorted flat index.
#[derive(Clone, Debug, Parser)]
#[command(about = "fit a bin table to a sorted flat index")]
pub struct QuantizeOpt {
  /// Number of bins to form (at least 4).
  pub num_bins: usize,
  /// Binning method: 1=FD, 2=FR, 3=GD, 4=CFR.
  pub bintype: u64,
  /// Sorted float index (.sidx).
  pub sidx_path: PathBuf,
  /// Bins file to write.
  pub bins_path: PathBuf,
}

pub fn quantize(opt: QuantizeOpt) -> Result<()> {
  if opt.num_bins < MIN_BINS {
    bail!("minimum bin count is {}, got {}", MIN_BINS, opt.num_bins);
  }
  let strategy = BinningStrategy::from_flag(opt.bintype)?;
  eprintln!(
    "quantizing with {} (bintype {}) into {} bins",
    strategy.label(),
    opt.bintype,
    opt.num_bins
  );

  let mut src = utils::open_input(&opt.sidx_path)?;
  let index = SortedIndex::read_from(&mut src)?;
  report_index(&index, opt.num_bins);

  let built = strategy.build_counts(&index.values, opt.num_bins)?;
  if let Some(fit) = built.geom_fit {
    eprintln!(
      "geom ratio   = {:.8} ({} bisection steps)",
      fit.ratio, fit.iterations
    );
  }

  let table = BinTable::from_counts(&index.values, &built.counts)?;
  report_bins(&table, &index.values);

  let mut dst = utils::create_output(&opt.bins_path)?;
  table.write_to(&mut dst)?;
  dst.commit()?;
  eprintln!(
    "wrote {} bins to {}",
    table.num_bins(),
    opt.bins_path.display()
  );
  Ok(())
}

fn report_index(index: &SortedIndex, num_bins: usize) {
  let profile = index.profile();
  eprintln!();
  eprintln!("data columns = {}", index.n_cols);
  eprintln!("data rows    = {}", index.n_rows);
  eprintln!("total values = {}", index.len());
  eprintln!("average bin  = {} values", index.len() / num_bins);
  eprintln!();
  eprintln!("min |value|  = {:.7}", profile.min_magnitude);
  eprintln!("max |value|  = {:.7}", profile.max_magnitude);
  eprintln!("negative     = {}", profile.n_negative);
  eprintln!("zero         = {}", profile.n_zero);
  eprintln!("positive     = {}", profile.n_positive);
  eprintln!();
}

// Per-bin detail to stdout, aggregates to stderr, so the table can be
// redirected without losing the summary.
fn report_bins(table: &BinTable, values: &[f32]) {
  let mut start = 0;
  for (k, bin) in table.bins().iter().enumerate() {
    if bin.count == 0 {
      println!("bin {:3} has {:7} vals", k, bin.count);
      continue;
    }
    let end = start + bin.count as usize;
    let rep = bin.rep as f64;
    let max_error = (rep - values[start] as f64).max(values[end - 1] as f64 - rep);
    println!(
      "bin {:3} has {:7} vals: {:9.6} to {:9.6}, rep {:9.6}, maxerr {:9.6}",
      k,
      bin.count,
      values[start],
      values[end - 1],
      bin.rep,
      max_error
    );
    start = end;
  }

  let stats = table.stats(values);
  if stats.empty_bins > 0 {
    eprintln!("empty bins   = {}", stats.empty_bins);
  }
  eprintln!("max error    = {:.6}", stats.max_error);
  eprintln!("mean |error| = {:.6}", stats.mean_abs_error);
  eprintln!("entropy      = {:.2} bits per bin id", stats.entropy);
}
