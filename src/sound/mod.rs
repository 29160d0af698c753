//! Sound subsystem
//!
//! Only the mixer lives here; decoding and device output belong to the
//! embedding application.

pub mod mixer;

pub use mixer::{AudioMixer, AudioSample, MixerError, PlaybackParams};
