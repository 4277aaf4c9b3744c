use better_io::BetterBufRead;

use crate::constants::{BBYTES, FULL, PART};
use crate::errors::BinqResult;
use crate::freqs::FreqModel;

/// The input half of the range coder.
///
/// `window` tracks the encoded value minus the lower bound the encoder had
/// implied so far, so it stays within `[0, range]` and takes in one byte per
/// renormalization, mirroring the encoder's output.
pub struct Decoder<R: BetterBufRead> {
  src: R,
  window: u64,
  range: u64,
}

impl<R: BetterBufRead> Decoder<R> {
  /// Primes the window with the first `BBYTES` bytes of coder output.
  pub fn new(mut src: R) -> BinqResult<Self> {
    let mut window = 0;
    for _ in 0..BBYTES {
      window = (window << 8) + Self::next_byte(&mut src)? as u64;
    }
    Ok(Self {
      src,
      window,
      range: FULL,
    })
  }

  // Reads past end-of-file as zero bytes. The encoder's close sequence makes
  // this safe for any number of trailing renormalizations.
  fn next_byte(src: &mut R) -> BinqResult<u8> {
    src.fill_or_eof(1)?;
    let buffer = src.buffer();
    if buffer.is_empty() {
      return Ok(0);
    }
    let byte = buffer[0];
    src.consume(1);
    Ok(byte)
  }

  pub fn decode(&mut self, model: &FreqModel) -> BinqResult<usize> {
    let total = model.total();
    debug_assert!(self.range > total);

    let scale = self.range / total;
    // rounding slack at the top of the range belongs to the last symbol
    let target = (self.window / scale).min(total - 1);
    let symbol = model.search(target);
    let (low_cum, high_cum) = model.interval(symbol);

    self.window -= low_cum * scale;
    self.range = if high_cum < total {
      (high_cum - low_cum) * scale
    } else {
      self.range - low_cum * scale
    };
    debug_assert!(self.window <= self.range);

    while self.range < PART {
      self.range <<= 8;
      self.window = ((self.window << 8) & FULL) + Self::next_byte(&mut self.src)? as u64;
    }

    Ok(symbol)
  }

  pub fn into_src(self) -> R {
    self.src
  }
}
