//! soj-build: builds the SPI-over-JTAG bridge bitstream for one FPGA part.
//!
//! The part identifier selects the family, the vendor toolchain and the
//! package constraints. The bitstream is built in `tmp_<part>` and, for
//! Vivado parts, published gzip-compressed as `spiOverJtag_<part>.bit.gz`.

#![warn(missing_docs)]

mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::Parser;

/// Builds a spiOverJtag bridge bitstream.
#[derive(Parser, Debug)]
#[command(name = "soj-build", version, about = "spiOverJtag bitstream builder")]
pub struct Cli {
    /// FPGA part identifier (e.g. `xc7a35tcsg324`, `10cl025256`, `t20f256`).
    pub part: String,

    /// Suppress all output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a `soj.toml` configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the resolved build plan as JSON and exit without building.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match pipeline::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
