//! Time-synced lyric playback loop.
//!
//! Polls the transport for its position, looks up the active line, renders, and
//! waits one poll interval for a stop key. Runs until the audio ends or the user
//! stops it.

use std::time::Duration;

use crate::audio::Transport;
use crate::error::Result;
use crate::input::{AdvanceSignal, SignalSource};
use crate::lyrics::Timeline;
use crate::ui::PlaybackFrame;

/// Why playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The audio finished.
    Finished,
    /// The user stopped playback.
    Stopped,
}

/// Restrict `timeline` to what the lookup can search: stamped lines only.
pub fn prepare(timeline: &Timeline) -> Timeline {
    let stamped = timeline.stamped();
    if stamped.len() < timeline.len() {
        tracing::warn!(
            "{} of {} lines have no timestamp and will not be shown",
            timeline.len() - stamped.len(),
            timeline.len()
        );
    }
    if !stamped.is_sorted_by_timestamp() {
        tracing::warn!("Line timestamps are out of order; the displayed line may be wrong");
    }
    stamped
}

/// Play `transport` while rendering the active line of `timeline`.
///
/// `timeline` should come from [`prepare`].
pub fn run_playback<T, S, R>(
    timeline: &Timeline,
    transport: &mut T,
    signals: &mut S,
    poll_interval: Duration,
    mut render: R,
) -> Result<PlaybackEnd>
where
    T: Transport,
    S: SignalSource,
    R: FnMut(&PlaybackFrame<'_>) -> Result<()>,
{
    transport.play();

    while transport.is_busy() {
        let position = transport.position_ms();
        let index = timeline.lookup_index(position);
        let frame = PlaybackFrame {
            current: index.and_then(|i| timeline.get(i)),
            next: timeline.get(index.map_or(0, |i| i + 1)),
            position,
        };
        render(&frame)?;

        if signals.poll(poll_interval)? == Some(AdvanceSignal::Abort) {
            tracing::info!("Playback stopped at {position} ms");
            return Ok(PlaybackEnd::Stopped);
        }
    }

    Ok(PlaybackEnd::Finished)
}
