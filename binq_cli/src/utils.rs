use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use better_io::BetterBufReader;

use binq::BinTable;

pub fn open_input(path: &Path) -> Result<BetterBufReader<File>> {
  let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;
  Ok(BetterBufReader::from_read_simple(file))
}

pub fn read_bin_table(path: &Path) -> Result<BinTable> {
  let mut src = open_input(path)?;
  let table = BinTable::read_from(&mut src)
    .with_context(|| format!("malformed bins file {}", path.display()))?;
  Ok(table)
}

/// An output that only appears at its destination once [`OutputFile::commit`]
/// succeeds.
///
/// Bytes go to a sibling temp file that is renamed over the destination at
/// commit time, so a tool that fails partway leaves nothing at the requested
/// path. Dropping without committing removes the temp file.
pub struct OutputFile {
  writer: BufWriter<File>,
  tmp_path: PathBuf,
  dst_path: PathBuf,
  committed: bool,
}

pub fn create_output(path: &Path) -> Result<OutputFile> {
  let tmp_path = tmp_sibling(path);
  let file = OpenOptions::new()
    .write(true)
    .create(true)
    .truncate(true)
    .open(&tmp_path)
    .with_context(|| format!("unable to create {}", tmp_path.display()))?;
  Ok(OutputFile {
    writer: BufWriter::new(file),
    tmp_path,
    dst_path: path.to_path_buf(),
    committed: false,
  })
}

fn tmp_sibling(path: &Path) -> PathBuf {
  let mut name = path
    .file_name()
    .map(|name| name.to_os_string())
    .unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}

impl OutputFile {
  /// Flushes and moves the finished file into place.
  pub fn commit(mut self) -> Result<()> {
    self.writer.flush()?;
    fs::rename(&self.tmp_path, &self.dst_path)
      .with_context(|| format!("unable to move output to {}", self.dst_path.display()))?;
    self.committed = true;
    Ok(())
  }
}

impl Write for OutputFile {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.writer.write(buf)
  }

  fn flush(&mut self) -> io::Result<()> {
    self.writer.flush()
  }
}

impl Drop for OutputFile {
  fn drop(&mut self) {
    if !self.committed {
      let _ = fs::remove_file(&self.tmp_path);
    }
  }
}
