use anyhow::Result;
use clap::Parser;

use binq_cli::encode::{encode, EncodeOpt};

fn main() -> Result<()> {
  encode(EncodeOpt::parse())
}
