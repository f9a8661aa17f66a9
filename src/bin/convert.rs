//! Convert a plain text lyrics file into a skeleton KXLRC array.
//!
//! Usage: cargo run --bin kxlrc-convert

use std::io;

use anyhow::{Context, Result};
use kxlrc::config::Config;
use kxlrc::input::{expand_path, prompt, prompt_file_stem};
use kxlrc::lyrics::codec;
use kxlrc::logging;
use kxlrc::services::convert;

fn main() -> Result<()> {
    let _guard = logging::init();
    let config = Config::load()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let path = expand_path(&prompt(&mut input, &mut output, "Enter file path: ")?);
    let timeline = convert::read_text(&path, &config.entry_template())
        .with_context(|| format!("Failed to read lyrics text from {}", path.display()))?;

    println!("Saving to a new file...");
    let stem = prompt_file_stem(&mut input, &mut output)?;
    let target = convert::output_path(&config.output_dir, &stem);
    codec::save(&target, &timeline)
        .with_context(|| format!("Failed to save {}", target.display()))?;

    println!("Saved {} lines to {}", timeline.len(), target.display());
    Ok(())
}
