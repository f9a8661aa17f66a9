//! Scripted collaborators for service tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::Duration;

use crate::audio::Transport;
use crate::error::{Error, Result};
use crate::input::{AdvanceSignal, SignalSource};
use crate::types::{Clock, Millis};

/// Transport whose position moves forward by `step` each time it is read.
pub struct SteppingTransport {
    pub position: Cell<Millis>,
    pub step: Millis,
    pub length: Millis,
    pub playing: bool,
}

impl SteppingTransport {
    pub fn new(step: Millis, length: Millis) -> Self {
        Self { position: Cell::new(0), step, length, playing: false }
    }
}

impl Transport for SteppingTransport {
    fn play(&mut self) {
        self.playing = true;
    }

    fn position_ms(&self) -> Millis {
        let now = self.position.get();
        self.position.set(now + self.step);
        now
    }

    fn is_busy(&self) -> bool {
        self.playing && self.position.get() <= self.length
    }

    fn fade_out(&mut self, _duration: Duration) {
        self.stop();
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}

/// Signal source replaying a fixed script. Polls return `None` once the script
/// is exhausted; waits fail.
pub struct ScriptedSignals(pub VecDeque<Option<AdvanceSignal>>);

impl ScriptedSignals {
    pub fn new(script: impl IntoIterator<Item = Option<AdvanceSignal>>) -> Self {
        Self(script.into_iter().collect())
    }

    pub fn silent() -> Self {
        Self(VecDeque::new())
    }
}

impl SignalSource for ScriptedSignals {
    fn wait(&mut self) -> Result<AdvanceSignal> {
        while let Some(next) = self.0.pop_front() {
            if let Some(signal) = next {
                return Ok(signal);
            }
        }
        Err(Error::Msg("signal script exhausted".to_string()))
    }

    fn poll(&mut self, _timeout: Duration) -> Result<Option<AdvanceSignal>> {
        Ok(self.0.pop_front().flatten())
    }
}

/// Clock that counts up by one on every read.
pub struct CountingClock(pub Cell<i64>);

impl Clock for CountingClock {
    fn now_millis(&self) -> i64 {
        let now = self.0.get();
        self.0.set(now + 1);
        now
    }
}
