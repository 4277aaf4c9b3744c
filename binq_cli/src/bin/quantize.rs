use anyhow::Result;
use clap::Parser;

use binq_cli::quantize::{quantize, QuantizeOpt};

fn main() -> Result<()> {
  quantize(QuantizeOpt::parse())
}
