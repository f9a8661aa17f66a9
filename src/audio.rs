//! Audio transport used by the player and the stamper.
//!
//! The lyric logic only ever needs the current playback position, so playback is
//! hidden behind the [`Transport`] trait and can be replaced in tests.

use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::constants::playback::FADE_STEPS;
use crate::error::{Error, Result};
use crate::types::Millis;

/// Minimal playback control.
pub trait Transport {
    /// Start or resume playback.
    fn play(&mut self);

    /// Position of playback in milliseconds. Increases monotonically while playing.
    fn position_ms(&self) -> Millis;

    /// Whether audio is still playing.
    fn is_busy(&self) -> bool;

    /// Lower the volume to silence over `duration`, then stop.
    fn fade_out(&mut self, duration: Duration);

    /// Stop playback immediately.
    fn stop(&mut self);
}

/// Transport playing a decoded audio file through the default output device.
pub struct RodioTransport {
    // Dropping the stream silences the sink, so it lives as long as the transport.
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
}

impl RodioTransport {
    /// Open `path` on the default output device, paused.
    ///
    /// Playback fades in over `fade_in` once started.
    pub fn open(path: &Path, fade_in: Duration) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().map_err(Error::audio)?;
        let sink = Sink::try_new(&handle).map_err(Error::audio)?;

        let file = fs_err::File::open(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| Error::audio(format!("{}: {e}", path.display())))?;

        sink.pause();
        sink.append(source.fade_in(fade_in));

        tracing::info!("Opened audio file {}", path.display());
        Ok(Self { _stream: stream, _handle: handle, sink })
    }
}

impl Transport for RodioTransport {
    fn play(&mut self) {
        self.sink.play();
    }

    fn position_ms(&self) -> Millis {
        Millis::try_from(self.sink.get_pos().as_millis()).unwrap_or(Millis::MAX)
    }

    fn is_busy(&self) -> bool {
        !self.sink.empty()
    }

    #[allow(clippy::cast_precision_loss)]
    fn fade_out(&mut self, duration: Duration) {
        let start = self.sink.volume();
        let step = duration / FADE_STEPS;
        for i in (0..FADE_STEPS).rev() {
            self.sink.set_volume(start * i as f32 / FADE_STEPS as f32);
            thread::sleep(step);
        }
        self.stop();
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}
