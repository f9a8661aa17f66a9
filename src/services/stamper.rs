//! Interactive stamping loop.
//!
//! Renders the session, blocks for the next key, and stamps the current unit with
//! the transport's position. Nothing is written to disk here; progress lives only
//! in the session until the caller saves it, so an aborted run loses everything.

use crate::audio::Transport;
use crate::error::{Error, Result};
use crate::input::{AdvanceSignal, SignalSource};
use crate::stamping::{StampSession, StampView};
use crate::types::Clock;

/// Drive `session` to completion.
///
/// Returns [`Error::Aborted`] if the user aborts; the session then holds whatever
/// was stamped before the abort.
pub fn run_stamping<T, S, C, R>(
    session: &mut StampSession,
    transport: &T,
    signals: &mut S,
    clock: &C,
    mut render: R,
) -> Result<()>
where
    T: Transport,
    S: SignalSource,
    C: Clock,
    R: FnMut(&StampView<'_>) -> Result<()>,
{
    while !session.is_finished() {
        render(&session.view())?;

        match signals.wait()? {
            AdvanceSignal::Advance => {
                session.advance(transport.position_ms(), clock.now_millis());
            }
            AdvanceSignal::Abort => {
                let (done, total) = session.progress();
                tracing::warn!("Stamping aborted after {done} of {total} units");
                return Err(Error::Aborted);
            }
        }
    }

    render(&session.view())?;
    tracing::info!("Stamped {} units in {} mode", session.progress().1, session.mode());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use std::cell::Cell;

    use super::*;
    use crate::lyrics::{EntryTemplate, Timeline};
    use crate::services::testing::{CountingClock, ScriptedSignals, SteppingTransport};
    use crate::stamping::StampMode;
    use crate::types::UserId;

    fn session(text: &str, mode: StampMode) -> StampSession {
        StampSession::new(Timeline::from_text(text, &EntryTemplate::default()), mode, UserId::new("ed"))
    }

    #[test]
    fn test_line_mode_uses_transport_positions() {
        let mut s = session("a\nb\nc", StampMode::Line);
        let transport = SteppingTransport::new(150, i64::MAX);
        transport.position.set(100);
        let mut signals = ScriptedSignals::new([Some(AdvanceSignal::Advance); 3]);
        let clock = CountingClock(Cell::new(1000));
        let mut renders = 0;

        run_stamping(&mut s, &transport, &mut signals, &clock, |_| {
            renders += 1;
            Ok(())
        })
        .unwrap();

        let stamps: Vec<_> = s.timeline().iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, [Some(100), Some(250), Some(400)]);
        let edits: Vec<_> = s.timeline().iter().map(|e| e.edited.timestamp_millis()).collect();
        assert_eq!(edits, [Some(1000), Some(1001), Some(1002)]);
        assert_eq!(renders, 4);
    }

    #[test]
    fn test_ignored_polls_do_not_stamp() {
        let mut s = session("a b", StampMode::WordAndLine);
        let transport = SteppingTransport::new(30, i64::MAX);
        let mut signals = ScriptedSignals::new([
            None,
            Some(AdvanceSignal::Advance),
            None,
            Some(AdvanceSignal::Advance),
        ]);
        let clock = CountingClock(Cell::new(0));

        run_stamping(&mut s, &transport, &mut signals, &clock, |_| Ok(())).unwrap();

        let entry = &s.timeline().entries()[0];
        assert_eq!(entry.timestamp, Some(0));
        assert_eq!(entry.words[1].timestamp, Some(30));
    }

    #[test]
    fn test_abort_returns_error_and_keeps_progress_in_memory() {
        let mut s = session("a\nb", StampMode::Line);
        let transport = SteppingTransport::new(10, i64::MAX);
        let mut signals = ScriptedSignals::new([Some(AdvanceSignal::Advance), Some(AdvanceSignal::Abort)]);
        let clock = CountingClock(Cell::new(0));

        let result = run_stamping(&mut s, &transport, &mut signals, &clock, |_| Ok(()));

        assert!(matches!(result, Err(Error::Aborted)));
        assert_eq!(s.progress(), (1, 2));
        assert!(!s.is_finished());
    }

    #[test]
    fn test_render_errors_propagate() {
        let mut s = session("a", StampMode::Line);
        let transport = SteppingTransport::new(10, i64::MAX);
        let mut signals = ScriptedSignals::silent();
        let clock = CountingClock(Cell::new(0));

        let result = run_stamping(&mut s, &transport, &mut signals, &clock, |_| Err(Error::from("draw failed")));
        assert!(matches!(result, Err(Error::Msg(_))));
        assert_eq!(s.progress(), (0, 1));
    }
}
