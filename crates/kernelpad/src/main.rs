//! Entry point wiring that stitches together the CLI surface, logging, and
//! the preview-window runtime in `run.rs`.
//!
//! Types:
//!
//! - None; this module only orchestrates submodules.
//!
//! Functions:
//!
//! - `main` parses CLI input, initialises tracing, and dispatches to `run`.

mod cli;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();
    run::run(cli)
}
