use std::io::Write;

use better_io::BetterBufRead;

use crate::byte_reader;
use crate::constants::{BINS_MARKER, MIN_BINS};
use crate::errors::{BinqError, BinqResult};
use crate::freqs::FreqModel;

/// One quantization bin: the last value that falls in it, the value that
/// stands in for everything in it, and how many of the quantized values it
/// received.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
  pub upper: f32,
  pub rep: f32,
  pub count: u64,
}

/// A fitted quantization model: bins in value order.
///
/// Serialized little-endian and tightly packed as
///
/// ```text
/// u64 marker; u64 num_bins;
/// (f32 upper, f32 rep) x num_bins;
/// u64 count x num_bins
/// ```
///
/// The marker is the `.sidx` column-count field reused with required value
/// 2; readers reject anything else.
#[derive(Clone, Debug, PartialEq)]
pub struct BinTable {
  bins: Vec<Bin>,
}

/// Reconstruction-quality numbers for a fitted table.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinStats {
  pub empty_bins: usize,
  pub max_error: f64,
  pub mean_abs_error: f64,
  /// Shannon entropy of the bin-id distribution, in bits per identifier.
  pub entropy: f64,
}

impl BinTable {
  /// Derives boundaries and representatives by walking the sorted values in
  /// frequency order: the bin covering `values[start..start + count)` gets
  /// the last of those values as its boundary and their mean as its
  /// representative.
  ///
  /// An empty bin inherits the last value before it, so its boundary never
  /// captures a query that a preceding bin would also accept; an empty bin
  /// before any value gets negative infinity for the same reason.
  pub fn from_counts(values: &[f32], counts: &[u64]) -> BinqResult<Self> {
    let total: u64 = counts.iter().sum();
    if total != values.len() as u64 {
      return Err(BinqError::Invariant(format!(
        "bin frequencies cover {} values but {} were quantized",
        total,
        values.len()
      )));
    }

    let mut bins = Vec::with_capacity(counts.len());
    let mut start = 0;
    for &count in counts {
      let end = start + count as usize;
      let bin = if count == 0 {
        let upper = if start == 0 {
          f32::NEG_INFINITY
        } else {
          values[start - 1]
        };
        Bin {
          upper,
          rep: upper,
          count,
        }
      } else {
        let slice = &values[start..end];
        let mean = slice.iter().map(|&v| v as f64).sum::<f64>() / count as f64;
        Bin {
          upper: slice[slice.len() - 1],
          rep: mean as f32,
          count,
        }
      };
      bins.push(bin);
      start = end;
    }
    Ok(Self { bins })
  }

  pub fn bins(&self) -> &[Bin] {
    &self.bins
  }

  pub fn num_bins(&self) -> usize {
    self.bins.len()
  }

  pub fn model(&self) -> BinqResult<FreqModel> {
    FreqModel::new(self.bins.iter().map(|bin| bin.count))
  }

  /// The smallest bin index whose upper boundary is `>= f`.
  ///
  /// Values above the top boundary were not part of the quantized
  /// population, so they are an invariant violation rather than a bin.
  pub fn bin_for(&self, f: f32) -> BinqResult<usize> {
    let bins = &self.bins;
    if f > bins[bins.len() - 1].upper {
      return Err(BinqError::Invariant(format!(
        "value {} exceeds the top bin boundary {}",
        f,
        bins[bins.len() - 1].upper
      )));
    }
    let mut lo = 0;
    let mut hi = bins.len() - 1;
    while lo < hi {
      let mid = lo + (hi - lo) / 2;
      if f <= bins[mid].upper {
        hi = mid;
      } else {
        lo = mid + 1;
      }
    }
    debug_assert!(lo == 0 || bins[lo - 1].upper < f);
    debug_assert!(f <= bins[lo].upper);
    Ok(lo)
  }

  /// Measures reconstruction error against the values the table was fitted
  /// to.
  pub fn stats(&self, values: &[f32]) -> BinStats {
    let mut empty_bins = 0;
    let mut max_error = 0.0_f64;
    let mut abs_error_sum = 0.0_f64;
    let mut start = 0;
    for bin in &self.bins {
      if bin.count == 0 {
        empty_bins += 1;
        continue;
      }
      let end = start + bin.count as usize;
      let rep = bin.rep as f64;
      let bin_error = (rep - values[start] as f64).max(values[end - 1] as f64 - rep);
      max_error = max_error.max(bin_error);
      for &v in &values[start..end] {
        abs_error_sum += (v as f64 - rep).abs();
      }
      start = end;
    }
    BinStats {
      empty_bins,
      max_error,
      mean_abs_error: abs_error_sum / values.len() as f64,
      entropy: entropy(self.bins.iter().map(|bin| bin.count)),
    }
  }

  pub fn write_to<W: Write>(&self, dst: &mut W) -> BinqResult<()> {
    dst.write_all(&BINS_MARKER.to_le_bytes())?;
    dst.write_all(&(self.bins.len() as u64).to_le_bytes())?;
    for bin in &self.bins {
      dst.write_all(&bin.upper.to_le_bytes())?;
      dst.write_all(&bin.rep.to_le_bytes())?;
    }
    for bin in &self.bins {
      dst.write_all(&bin.count.to_le_bytes())?;
    }
    Ok(())
  }

  pub fn read_from<R: BetterBufRead>(src: &mut R) -> BinqResult<Self> {
    let marker = byte_reader::read_u64(src)?;
    if marker != BINS_MARKER {
      return Err(BinqError::Format(format!(
        "bins file starts with {} instead of the marker {}",
        marker, BINS_MARKER
      )));
    }
    let num_bins = byte_reader::read_u64(src)? as usize;
    if num_bins < MIN_BINS {
      return Err(BinqError::Format(format!(
        "bins file declares {} bins; the minimum is {}",
        num_bins, MIN_BINS
      )));
    }

    let mut bins = Vec::with_capacity(num_bins);
    for _ in 0..num_bins {
      let upper = byte_reader::read_f32(src)?;
      let rep = byte_reader::read_f32(src)?;
      bins.push(Bin {
        upper,
        rep,
        count: 0,
      });
    }
    for bin in &mut bins {
      bin.count = byte_reader::read_u64(src)?;
    }

    // the bin search depends on sorted boundaries
    for i in 1..num_bins {
      if bins[i].upper < bins[i - 1].upper {
        return Err(BinqError::Format(format!(
          "bin boundaries decrease at index {}",
          i
        )));
      }
    }
    Ok(Self { bins })
  }
}

/// Shannon entropy of a frequency distribution, in bits per symbol. Empty
/// entries contribute nothing.
pub fn entropy<I: IntoIterator<Item = u64>>(counts: I) -> f64 {
  let counts: Vec<u64> = counts.into_iter().collect();
  let total: u64 = counts.iter().sum();
  if total == 0 {
    return 0.0;
  }
  let total = total as f64;
  let mut bits = 0.0;
  for &count in &counts {
    if count > 0 {
      bits += count as f64 * (total / count as f64).log2();
    }
  }
  bits / total
}
