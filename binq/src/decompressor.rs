use std::io::Write;

use better_io::BetterBufRead;

use crate::bins::BinTable;
use crate::byte_reader;
use crate::coder::Decoder;
use crate::constants::HEADER_LEN;
use crate::errors::BinqResult;

/// What [`decompress`] did, for reporting.
#[derive(Clone, Copy, Debug)]
pub struct DecompressSummary {
  pub n_floats: u64,
}

/// Rebuilds the representative stream from a compressed index.
///
/// Copies the opaque header through, then emits one binary32 representative
/// per coded bin identifier. The float count is the bin table's frequency
/// total, which by construction is the size of the quantized population.
pub fn decompress<R: BetterBufRead, W: Write>(
  table: &BinTable,
  mut src: R,
  dst: &mut W,
) -> BinqResult<DecompressSummary> {
  let model = table.model()?;

  let header = byte_reader::read_vec(&mut src, HEADER_LEN)?;
  dst.write_all(&header)?;

  let mut decoder = Decoder::new(src)?;
  for _ in 0..model.total() {
    let bin = decoder.decode(&model)?;
    dst.write_all(&table.bins()[bin].rep.to_le_bytes())?;
  }

  Ok(DecompressSummary {
    n_floats: model.total(),
  })
}
