use anyhow::Result;
use clap::Parser;

use binq_cli::decode::{decode, DecodeOpt};

fn main() -> Result<()> {
  decode(DecodeOpt::parse())
}
