//! Play an audio file while showing its time-synced lyrics.
//!
//! Usage: cargo run --bin kxlrc-play

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use kxlrc::audio::{RodioTransport, Transport};
use kxlrc::config::Config;
use kxlrc::input::{expand_path, prompt, TerminalKeys};
use kxlrc::lyrics::codec;
use kxlrc::logging;
use kxlrc::services::playback::{self, PlaybackEnd};
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
    let timeline = playback::prepare(&timeline);

    let mut transport = RodioTransport::open(&song_path, config.fade_in)
        .with_context(|| format!("Failed to open {}", song_path.display()))?;

    ui::countdown(&mut output, config.countdown_secs, Duration::from_secs(1))?;

    terminal::install_panic_hook();
    let mut tui = terminal::setup_terminal()?;
    let result = playback::run_playback(
        &timeline,
        &mut transport,
        &mut TerminalKeys,
        config.poll_interval,
        |frame| {
            tui.draw(|f| ui::draw_playback(f, frame))?;
            Ok(())
        },
    );

    // Restore terminal
    if let Err(e) = terminal::cleanup_terminal(&mut tui) {
        eprintln!("Error cleaning up terminal: {e:?}");
    }

    if result? == PlaybackEnd::Stopped {
        transport.fade_out(config.fade_out);
        println!("Playback stopped.");
    } else {
        transport.stop();
    }

    Ok(())
}
