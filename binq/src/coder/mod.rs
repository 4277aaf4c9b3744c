pub use decoder::Decoder;
pub use encoder::Encoder;

mod decoder;
mod encoder;

#[cfg(test)]
mod tests {
  use crate::coder::{Decoder, Encoder};
  use crate::constants::BBYTES;
  use crate::errors::BinqResult;
  use crate::freqs::FreqModel;

  fn assert_recovers(counts: &[u64], symbols: &[usize]) -> BinqResult<Vec<u8>> {
    let model = FreqModel::new(counts.to_vec())?;

    let mut encoder = Encoder::new(Vec::new());
    for &symbol in symbols {
      encoder.encode(symbol, &model)?;
    }
    let (compressed, n_bytes) = encoder.finish()?;
    assert_eq!(compressed.len() as u64, n_bytes);
    assert!(compressed.len() >= BBYTES);

    let mut decoder = Decoder::new(compressed.as_slice())?;
    for (i, &expected) in symbols.iter().enumerate() {
      assert_eq!(decoder.decode(&model)?, expected, "at {}", i);
    }
    Ok(compressed)
  }

  #[test]
  fn test_short_sequence() -> BinqResult<()> {
    assert_recovers(&[3, 3, 3], &[0, 1, 2, 2, 2, 1, 0])?;
    Ok(())
  }

  #[test]
  fn test_empty_sequence() -> BinqResult<()> {
    let compressed = assert_recovers(&[1, 1], &[])?;
    assert_eq!(compressed.len(), BBYTES);
    Ok(())
  }

  #[test]
  fn test_degenerate_alphabet() -> BinqResult<()> {
    // one symbol of probability 1 never shrinks the range below a byte
    let compressed = assert_recovers(&[9], &[0; 100])?;
    assert_eq!(compressed.len(), BBYTES);
    Ok(())
  }

  #[test]
  fn test_skewed_model_carries() -> BinqResult<()> {
    // Coding the top symbol repeatedly drives `low` toward the upper end of
    // the range, forcing long 0xff runs and carry propagation through them.
    let mut symbols = vec![1; 4000];
    for i in (0..4000).step_by(37) {
      symbols[i] = 0;
    }
    assert_recovers(&[1, 1 << 14], &symbols)?;
    Ok(())
  }

  #[test]
  fn test_alternating_extremes() -> BinqResult<()> {
    let symbols: Vec<usize> = (0..3000).map(|i| (i % 2) * 2).collect();
    assert_recovers(&[7, 1, 7], &symbols)?;
    Ok(())
  }

  #[test]
  fn test_zero_frequency_symbols_are_never_decoded() -> BinqResult<()> {
    // symbols 1 and 3 have zero frequency; the coded stream only ever
    // resolves to the others
    assert_recovers(&[2, 0, 5, 0, 2], &[0, 2, 4, 2, 2, 0, 4])?;
    Ok(())
  }

  #[test]
  fn test_compression_tracks_entropy() -> BinqResult<()> {
    // 3/4 vs 1/4 split: about 0.811 bits/symbol, so 8000 symbols should
    // land near 811 bytes, nowhere near the 1000 of a flat bit per symbol
    let symbols: Vec<usize> = (0..8000).map(|i| usize::from(i % 4 == 0)).collect();
    let compressed = assert_recovers(&[3, 1], &symbols)?;
    let n_bytes = compressed.len() as f64;
    assert!(n_bytes > 780.0 && n_bytes < 840.0, "got {}", n_bytes);
    Ok(())
  }
}
