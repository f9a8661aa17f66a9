//! `KXLRC` - tools for time-synced lyric files.
//!
//! This crate provides the lyric timeline model behind the `kxlrc-convert`,
//! `kxlrc-play` and `kxlrc-stamp` tools: conversion from plain text, the
//! timestamp lookup used during playback, and incremental stamping.

// Re-export public modules for use by the binaries and integration tests
pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod logging;
pub mod lyrics;
pub mod services;
pub mod stamping;
pub mod types;
pub mod ui;

pub use error::{Error, Result};
pub use lyrics::{LyricEntry, Timeline, WordEntry};
pub use stamping::{StampMode, StampSession};
