//! # Pharmacy Dashboard CLI
//!
//! ```text
//! pharma-dashboard dashboard [--limit N]
//! pharma-dashboard inventory [--search TERM] [--status low-stock,expired]
//! pharma-dashboard sell --invoice INV-1 --customer NAME [--payment upi] --item ID=QTY...
//! pharma-dashboard medicine add|update ID|delete ID [--name ..] [--mrp ..]
//! pharma-dashboard health
//! pharma-dashboard config show|init|path
//! ```
//!
//! Tables go to stdout; logs and errors go to stderr.

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    pharma_dashboard::init_tracing();

    if let Err(error) = cli.run().await {
        eprintln!("error: {error}");
        process::exit(1);
    }
}
