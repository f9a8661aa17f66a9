//! Service modules driving the three tools.
//!
//! Each service runs one tool's flow against the collaborator traits
//! (`Transport`, `SignalSource`, `Clock`) so the flows can be tested without a
//! terminal or audio device.

pub mod convert;
pub mod playback;
pub mod stamper;

#[cfg(test)]
pub(crate) mod testing;
