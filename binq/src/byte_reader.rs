use better_io::BetterBufRead;

use crate::errors::{BinqError, BinqResult};

#[inline]
pub fn read_array<R: BetterBufRead, const N: usize>(src: &mut R) -> BinqResult<[u8; N]> {
  src.fill_or_eof(N)?;
  let buffer = src.buffer();
  if buffer.len() < N {
    return Err(BinqError::Truncated {
      expected: N,
      found: buffer.len(),
    });
  }
  let mut bytes = [0; N];
  bytes.copy_from_slice(&buffer[..N]);
  src.consume(N);
  Ok(bytes)
}

#[inline]
pub fn read_u64<R: BetterBufRead>(src: &mut R) -> BinqResult<u64> {
  Ok(u64::from_le_bytes(read_array(src)?))
}

#[inline]
pub fn read_f32<R: BetterBufRead>(src: &mut R) -> BinqResult<f32> {
  Ok(f32::from_le_bytes(read_array(src)?))
}

/// Returns `None` at a clean end of input, or an error if the stream ends
/// partway through a value.
#[inline]
pub fn try_read_f32<R: BetterBufRead>(src: &mut R) -> BinqResult<Option<f32>> {
  src.fill_or_eof(4)?;
  let buffer = src.buffer();
  if buffer.is_empty() {
    return Ok(None);
  }
  if buffer.len() < 4 {
    return Err(BinqError::Truncated {
      expected: 4,
      found: buffer.len(),
    });
  }
  let mut bytes = [0; 4];
  bytes.copy_from_slice(&buffer[..4]);
  src.consume(4);
  Ok(Some(f32::from_le_bytes(bytes)))
}

pub fn read_vec<R: BetterBufRead>(src: &mut R, n: usize) -> BinqResult<Vec<u8>> {
  src.fill_or_eof(n)?;
  let buffer = src.buffer();
  if buffer.len() < n {
    return Err(BinqError::Truncated {
      expected: n,
      found: buffer.len(),
    });
  }
  let bytes = buffer[..n].to_vec();
  src.consume(n);
  Ok(bytes)
}
