use crate::constants::{BIN_EPS, GEOM_BIN1, GEOM_RATIO_HI, GEOM_RATIO_LO, MIN_BINS};
use crate::errors::{BinqError, BinqResult};

/// How the sorted values get partitioned into bins.
///
/// Every strategy produces a frequency vector whose entries sum to the
/// number of values, so the bin table derived from it tiles the data
/// exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinningStrategy {
  /// Equal value counts per bin.
  FixedDomain,
  /// Equal slices of the value range per bin.
  FixedRange,
  /// Bin counts grow toward the middle and shrink again as a fitted
  /// geometric progression.
  GeometricDomain,
  /// Fixed range over the middle of the data, with a quarter of the bins at
  /// each end holding one extreme value apiece.
  CentralFixedRange,
}

/// Outcome of the geometric-ratio bisection.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeomFit {
  pub ratio: f64,
  pub iterations: usize,
}

/// Bin frequencies plus any strategy-specific fit information.
#[derive(Clone, Debug)]
pub struct BinCounts {
  pub counts: Vec<u64>,
  pub geom_fit: Option<GeomFit>,
}

impl BinningStrategy {
  /// Maps the CLI's numeric bintype to a strategy.
  pub fn from_flag(flag: u64) -> BinqResult<Self> {
    match flag {
      1 => Ok(BinningStrategy::FixedDomain),
      2 => Ok(BinningStrategy::FixedRange),
      3 => Ok(BinningStrategy::GeometricDomain),
      4 => Ok(BinningStrategy::CentralFixedRange),
      _ => Err(BinqError::InvalidArgument(format!(
        "invalid binning method {} (1=FD, 2=FR, 3=GD, 4=CFR)",
        flag
      ))),
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      BinningStrategy::FixedDomain => "FD",
      BinningStrategy::FixedRange => "FR",
      BinningStrategy::GeometricDomain => "GD",
      BinningStrategy::CentralFixedRange => "CFR",
    }
  }

  /// Computes the bin frequencies for `values`, which must be sorted
  /// non-decreasing.
  pub fn build_counts(self, values: &[f32], num_bins: usize) -> BinqResult<BinCounts> {
    if num_bins < MIN_BINS {
      return Err(BinqError::InvalidArgument(format!(
        "minimum bin count is {}, got {}",
        MIN_BINS, num_bins
      )));
    }
    if values.len() < num_bins {
      return Err(BinqError::InvalidArgument(format!(
        "{} values cannot fill {} bins",
        values.len(),
        num_bins
      )));
    }

    let mut geom_fit = None;
    let counts = match self {
      BinningStrategy::FixedDomain => fixed_domain_counts(values.len(), num_bins),
      BinningStrategy::FixedRange => fixed_range_counts(values, num_bins),
      BinningStrategy::GeometricDomain => {
        let (counts, fit) = geometric_domain_counts(values.len(), num_bins);
        geom_fit = Some(fit);
        counts
      }
      BinningStrategy::CentralFixedRange => central_fixed_range_counts(values, num_bins),
    };
    debug_assert_eq!(
      counts.iter().sum::<u64>(),
      values.len() as u64
    );
    Ok(BinCounts { counts, geom_fit })
  }
}

// Whatever the outer bins leave over goes to the one or two middle bins;
// with an even bin count the lower middle bin takes the floor half.
fn spread_middle(counts: &mut [u64], leftover: u64) {
  let num_bins = counts.len();
  if num_bins % 2 == 0 {
    counts[num_bins / 2 - 1] = leftover / 2;
    counts[num_bins / 2] = leftover - leftover / 2;
  } else {
    counts[num_bins / 2] = leftover;
  }
}

fn fixed_domain_counts(n: usize, num_bins: usize) -> Vec<u64> {
  let n = n as u64;
  let step = n / num_bins as u64;
  let mut counts = vec![0; num_bins];
  let mut assigned = 0;
  for i in 0..(num_bins - 1) / 2 {
    counts[i] = step;
    counts[num_bins - 1 - i] = step;
    assigned += 2 * step;
  }
  spread_middle(&mut counts, n - assigned);
  counts
}

fn fixed_range_counts(values: &[f32], num_bins: usize) -> Vec<u64> {
  // widen by epsilon on both sides so the extreme values are interior
  let lo = values[0] as f64 - BIN_EPS;
  let hi = values[values.len() - 1] as f64 + BIN_EPS;
  let width = (hi - lo) / num_bins as f64;

  let mut counts = vec![0; num_bins];
  let mut i = 0;
  for (k, count) in counts.iter_mut().enumerate() {
    let bound = lo + (k + 1) as f64 * width;
    // the top bin absorbs anything rounding strands above the last bound
    let last = k == num_bins - 1;
    while i < values.len() && (last || (values[i] as f64) < bound) {
      *count += 1;
      i += 1;
    }
  }
  counts
}

fn geometric_domain_counts(n: usize, num_bins: usize) -> (Vec<u64>, GeomFit) {
  // Fit the ratio so that one half of the symmetric progression sums to
  // n/2, bisecting until the bracket collapses.
  let half_total = n as f64 / 2.0;
  let half_bins = num_bins as f64 / 2.0;
  let mut lo = GEOM_RATIO_LO;
  let mut hi = GEOM_RATIO_HI;
  let mut ratio = (lo + hi) / 2.0;
  let mut iterations = 0;
  while hi - lo >= BIN_EPS {
    ratio = (lo + hi) / 2.0;
    let half_sum = GEOM_BIN1 * (ratio.powf(half_bins) - 1.0) / (ratio - 1.0);
    iterations += 1;
    if half_sum < half_total {
      lo = ratio;
    } else {
      hi = ratio;
    }
  }

  let mut counts = vec![0; num_bins];
  counts[0] = GEOM_BIN1 as u64;
  counts[num_bins - 1] = GEOM_BIN1 as u64;
  let mut size = GEOM_BIN1;
  let mut assigned = 2 * (GEOM_BIN1 as u64);
  for i in 1..(num_bins - 1) / 2 {
    size *= ratio;
    counts[i] = size as u64;
    counts[num_bins - 1 - i] = counts[i];
    assigned += 2 * counts[i];
  }
  spread_middle(&mut counts, n as u64 - assigned);
  (counts, GeomFit { ratio, iterations })
}

fn central_fixed_range_counts(values: &[f32], num_bins: usize) -> Vec<u64> {
  // a quarter of the bins at each end hold exactly one extreme value
  let singles = num_bins / 4;
  let n = values.len();
  let mut counts = vec![1; num_bins];
  let middle = fixed_range_counts(
    &values[singles..n - singles],
    num_bins - 2 * singles,
  );
  counts[singles..num_bins - singles].copy_from_slice(&middle);
  counts
}
