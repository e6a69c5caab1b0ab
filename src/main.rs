//! Entry point for the logseal command-line tool.
//!
//! ```bash
//! logseal verify testdata/sealed.log
//! logseal reseal edited.log -o edited.fixed.log
//! logseal seal "21|2024-01-15T10:30:15.123|12345678|Player|1001|Attack|87654321|EnemyA|0000|1500" --seq 7
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    logseal::logging::init()?;

    let cli = cli::Cli::parse();
    cli::run_command(cli.command)
}
