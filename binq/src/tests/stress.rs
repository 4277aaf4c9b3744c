use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::coder::{Decoder, Encoder};
use crate::entropy;
use crate::errors::BinqResult;
use crate::freqs::FreqModel;

// A Zipf-shaped frequency vector over `n_symbols` summing to roughly `n`.
fn zipf_counts(n_symbols: usize, n: usize) -> Vec<u64> {
  let harmonic: f64 = (1..=n_symbols).map(|k| 1.0 / k as f64).sum();
  (1..=n_symbols)
    .map(|k| ((n as f64 / harmonic) / k as f64).ceil() as u64)
    .collect()
}

#[test]
fn test_zipf_stress() -> BinqResult<()> {
  let counts = zipf_counts(256, 1_000_000);
  let model = FreqModel::new(counts.clone())?;

  // every symbol exactly as often as the model says, in a seeded random order
  let mut symbols = Vec::with_capacity(model.total() as usize);
  for (symbol, &count) in counts.iter().enumerate() {
    symbols.extend(std::iter::repeat(symbol).take(count as usize));
  }
  let mut rng = StdRng::seed_from_u64(1729);
  symbols.shuffle(&mut rng);

  let mut encoder = Encoder::new(Vec::new());
  for &symbol in &symbols {
    encoder.encode(symbol, &model)?;
  }
  let (compressed, n_bytes) = encoder.finish()?;
  assert_eq!(compressed.len() as u64, n_bytes);

  // the coded size must sit within 1% of the empirical entropy bound
  let ideal_bytes = entropy(counts) * symbols.len() as f64 / 8.0;
  assert!(
    (compressed.len() as f64) < ideal_bytes * 1.01,
    "{} bytes vs ideal {}",
    compressed.len(),
    ideal_bytes
  );
  assert!((compressed.len() as f64) > ideal_bytes * 0.99);

  let mut decoder = Decoder::new(compressed.as_slice())?;
  for (i, &expected) in symbols.iter().enumerate() {
    assert_eq!(decoder.decode(&model)?, expected, "at {}", i);
  }
  Ok(())
}

#[test]
fn test_uniform_random_stress() -> BinqResult<()> {
  let n_symbols = 300;
  let counts = vec![7_u64; n_symbols];
  let model = FreqModel::new(counts)?;

  let mut symbols: Vec<usize> = (0..n_symbols)
    .flat_map(|s| std::iter::repeat(s).take(7))
    .collect();
  let mut rng = StdRng::seed_from_u64(42);
  symbols.shuffle(&mut rng);

  let mut encoder = Encoder::new(Vec::new());
  for &symbol in &symbols {
    encoder.encode(symbol, &model)?;
  }
  let (compressed, _) = encoder.finish()?;

  let mut decoder = Decoder::new(compressed.as_slice())?;
  for &expected in &symbols {
    assert_eq!(decoder.decode(&model)?, expected);
  }
  Ok(())
}
