//! Command-line front end
//!
//! Reads a reply body from a file argument (or stdin when absent), runs
//! the extraction pipeline, and prints the result as pretty JSON. Handy
//! for eyeballing what a given backend reply will render as.

use anyhow::{Context, Result};
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let result = chatviz::process(&input);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
