use std::io::Write;

use better_io::BetterBufRead;

use crate::bins::BinTable;
use crate::byte_reader;
use crate::coder::Encoder;
use crate::constants::HEADER_LEN;
use crate::errors::{BinqError, BinqResult};

/// What [`compress`] did, for reporting.
#[derive(Clone, Copy, Debug)]
pub struct CompressSummary {
  pub n_floats: u64,
  /// Output size including the copied header.
  pub n_bytes: u64,
}

/// Entropy-codes an index file against a fitted bin table.
///
/// The input is `HEADER_LEN` opaque bytes, copied to the output verbatim,
/// followed by binary32 values until end-of-file. Each value is mapped to
/// its bin identifier and coded.
///
/// The stream must contain exactly the population the table was fitted to:
/// the decoder recovers the float count from the table's frequency total,
/// so a count mismatch here would produce an undecodable file. That
/// mismatch is only detectable at end-of-file, so the coded stream is
/// buffered and `dst` sees no bytes at all unless the whole input checks
/// out.
pub fn compress<R: BetterBufRead, W: Write>(
  table: &BinTable,
  mut src: R,
  dst: &mut W,
) -> BinqResult<CompressSummary> {
  let model = table.model()?;

  let header = byte_reader::read_vec(&mut src, HEADER_LEN)?;

  let mut encoder = Encoder::new(Vec::new());
  let mut n_floats = 0;
  while let Some(f) = byte_reader::try_read_f32(&mut src)? {
    let bin = table.bin_for(f)?;
    encoder.encode(bin, &model)?;
    n_floats += 1;
  }
  let (coded, coder_bytes) = encoder.finish()?;

  if n_floats != model.total() {
    return Err(BinqError::Invariant(format!(
      "index holds {} floats but the bin frequencies cover {}",
      n_floats,
      model.total()
    )));
  }

  dst.write_all(&header)?;
  dst.write_all(&coded)?;

  Ok(CompressSummary {
    n_floats,
    n_bytes: HEADER_LEN as u64 + coder_bytes,
  })
}
