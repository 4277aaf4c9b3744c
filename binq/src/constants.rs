// Working precision of the range coder: seven bytes, strictly less than
// eight so that every low/range product stays within a u64.
pub const BBYTES: usize = 7;
pub const BBITS: u32 = 8 * BBYTES as u32;
pub const FULL: u64 = (1 << BBITS) - 1;
pub const PART: u64 = 1 << (BBITS - 8);
pub const MINR: u64 = 1 << (BBITS - 15);
pub const FULL_BYTE: u8 = 0xff;

// file framing
pub const HEADER_LEN: usize = 45; // opaque index header, copied through verbatim
pub const BINS_MARKER: u64 = 2; // the .sidx column-count field, reused
pub const MIN_BINS: usize = 4;

// quantizer numerics
pub const BIN_EPS: f64 = 1e-10;
pub const GEOM_BIN1: f64 = 1.0; // values in the smallest geometric bin
pub const GEOM_RATIO_LO: f64 = 1.00000001;
pub const GEOM_RATIO_HI: f64 = 1000.0;

#[cfg(test)]
mod tests {
  use crate::constants::*;

  #[test]
  fn test_coder_precision() {
    // One byte must shift cleanly between the partial and full thresholds,
    // and the frequency budget must leave room for the scale division.
    assert_eq!(PART << 8, FULL + 1);
    assert!(MINR < PART);
    assert!(BBITS < 64);
  }

  #[test]
  fn test_freq_budget_fits_u64() {
    // low * scale <= total * (FULL / total) <= FULL for any total < MINR
    let max_total = MINR - 1;
    let scale = FULL / max_total;
    assert!(max_total.checked_mul(scale).unwrap() <= FULL);
  }
}
