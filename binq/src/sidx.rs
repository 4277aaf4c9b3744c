use std::io::Write;

use better_io::BetterBufRead;

use crate::byte_reader;
use crate::errors::{BinqError, BinqResult};

/// The float block of a dense vector index, flattened and sorted
/// non-decreasing, plus the original matrix dimensions.
///
/// On disk (`.sidx`, little-endian): `u64 ncols; u64 nrows;` then
/// `ncols * nrows` binary32 values.
#[derive(Clone, Debug, PartialEq)]
pub struct SortedIndex {
  pub n_cols: u64,
  pub n_rows: u64,
  pub values: Vec<f32>,
}

/// Value distribution numbers, reported before quantizing.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexProfile {
  pub min_magnitude: f32,
  pub max_magnitude: f32,
  pub n_negative: u64,
  pub n_zero: u64,
  pub n_positive: u64,
}

impl SortedIndex {
  /// Loads and validates a sorted index. Quantization assumes sortedness
  /// throughout, so a decreasing pair is rejected here, once, at the door.
  pub fn read_from<R: BetterBufRead>(src: &mut R) -> BinqResult<Self> {
    let n_cols = byte_reader::read_u64(src)?;
    let n_rows = byte_reader::read_u64(src)?;
    let n = n_cols
      .checked_mul(n_rows)
      .and_then(|n| usize::try_from(n).ok())
      .ok_or_else(|| {
        BinqError::Format(format!(
          "index dimensions {} x {} overflow",
          n_cols, n_rows
        ))
      })?;

    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
      values.push(byte_reader::read_f32(src)?);
    }
    for i in 1..values.len() {
      if values[i] < values[i - 1] {
        return Err(BinqError::Invariant(format!(
          "values are not sorted: value {} decreases",
          i
        )));
      }
    }

    Ok(Self {
      n_cols,
      n_rows,
      values,
    })
  }

  pub fn write_to<W: Write>(&self, dst: &mut W) -> BinqResult<()> {
    dst.write_all(&self.n_cols.to_le_bytes())?;
    dst.write_all(&self.n_rows.to_le_bytes())?;
    for v in &self.values {
      dst.write_all(&v.to_le_bytes())?;
    }
    Ok(())
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn profile(&self) -> IndexProfile {
    let mut profile = IndexProfile {
      min_magnitude: f32::INFINITY,
      ..Default::default()
    };
    for &v in &self.values {
      profile.min_magnitude = profile.min_magnitude.min(v.abs());
      profile.max_magnitude = profile.max_magnitude.max(v.abs());
      if v < 0.0 {
        profile.n_negative += 1;
      } else if v > 0.0 {
        profile.n_positive += 1;
      } else {
        profile.n_zero += 1;
      }
    }
    profile
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_round_trips_through_bytes() -> BinqResult<()> {
    let index = SortedIndex {
      n_cols: 2,
      n_rows: 3,
      values: vec![-1.5, -0.25, 0.0, 0.0, 0.5, 2.0],
    };
    let mut bytes = Vec::new();
    index.write_to(&mut bytes)?;
    assert_eq!(bytes.len(), 16 + 6 * 4);
    let recovered = SortedIndex::read_from(&mut bytes.as_slice())?;
    assert_eq!(recovered, index);
    Ok(())
  }

  #[test]
  fn test_rejects_unsorted_values() {
    let index = SortedIndex {
      n_cols: 1,
      n_rows: 3,
      values: vec![0.0, 2.0, 1.0],
    };
    let mut bytes = Vec::new();
    index.write_to(&mut bytes).unwrap();
    assert!(SortedIndex::read_from(&mut bytes.as_slice()).is_err());
  }

  #[test]
  fn test_rejects_short_value_block() {
    let mut bytes = Vec::new();
    bytes.extend(2_u64.to_le_bytes());
    bytes.extend(2_u64.to_le_bytes());
    bytes.extend(1.0_f32.to_le_bytes());
    assert!(SortedIndex::read_from(&mut bytes.as_slice()).is_err());
  }

  #[test]
  fn test_profile() {
    let index = SortedIndex {
      n_cols: 2,
      n_rows: 3,
      values: vec![-1.5, -0.25, 0.0, 0.0, 0.5, 2.0],
    };
    let profile = index.profile();
    assert_eq!(profile.n_negative, 2);
    assert_eq!(profile.n_zero, 2);
    assert_eq!(profile.n_positive, 2);
    assert_eq!(profile.min_magnitude, 0.0);
    assert_eq!(profile.max_magnitude, 2.0);
  }
}
