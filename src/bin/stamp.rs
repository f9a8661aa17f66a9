//! Timestamp the lines or words of a KXLRC file while the song plays.
//!
//! Usage: cargo run --bin kxlrc-stamp
//!
//! Progress is kept in memory only. Quitting before the final save discards it.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use kxlrc::audio::{RodioTransport, Transport};
use kxlrc::config::Config;
use kxlrc::error::Error;
use kxlrc::input::{expand_path, prompt, prompt_file_stem, SaveChoice, TerminalKeys};
use kxlrc::lyrics::codec;
use kxlrc::logging;
use kxlrc::services::{convert, stamper};
use kxlrc::stamping::{StampMode, StampSession};
use kxlrc::types::SystemClock;
use kxlrc::ui::{self, terminal};

fn main() -> Result<()> {
    let _guard = logging::init();
    let config = Config::load()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let lyrics_path = expand_path(&prompt(&mut input, &mut output, "Enter lyrics file path: ")?);
    let song_path = expand_path(&prompt(&mut input, &mut output, "Enter song file path: ")?);

    let timeline = codec::load(&lyrics_path)
        .with_context(|| format!("Failed to load lyrics from {}", lyrics_path.display()))?;

    for mode in StampMode::all() {
        println!("{}: {}", mode.selector(), mode.description());
    }
    let mode: StampMode = prompt(&mut input, &mut output, "Enter option: ")?.parse()?;

    let mut transport = RodioTransport::open(&song_path, config.fade_in)
        .with_context(|| format!("Failed to open {}", song_path.display()))?;

    ui::countdown(&mut output, config.countdown_secs, Duration::from_secs(1))?;
    transport.play();

    let mut session = StampSession::new(timeline, mode, config.user.clone());

    terminal::install_panic_hook();
    let mut tui = terminal::setup_terminal()?;
    let result = stamper::run_stamping(&mut session, &transport, &mut TerminalKeys, &SystemClock, |view| {
        tui.draw(|f| ui::draw_stamping(f, view))?;
        Ok(())
    });

    // Restore terminal
    if let Err(e) = terminal::cleanup_terminal(&mut tui) {
        eprintln!("Error cleaning up terminal: {e:?}");
    }

    transport.fade_out(config.fade_out);

    match result {
        Ok(()) => {}
        Err(Error::Aborted) => {
            let (done, total) = session.progress();
            println!("Aborted after {done} of {total}. Nothing was saved.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let timeline = session.into_timeline();
    println!("Done! Writing to file...");
    println!("1: Overwrite");
    println!("2: Save to new file");

    let target = match SaveChoice::from_answer(&prompt(&mut input, &mut output, "Enter option: ")?) {
        SaveChoice::Overwrite => lyrics_path,
        SaveChoice::NewFile => {
            println!("Saving to a new file...");
            let stem = prompt_file_stem(&mut input, &mut output)?;
            convert::output_path(&config.output_dir, &stem)
        }
    };

    codec::save(&target, &timeline).with_context(|| format!("Failed to save {}", target.display()))?;
    println!("Saved {} lines to {}", timeline.len(), target.display());
    Ok(())
}
