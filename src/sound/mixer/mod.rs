// mod.rs - Audio mixer module

//! Software audio mixer.
//!
//! Plays decoded PCM samples on a fixed pool of channels, resampling each
//! one to the output rate with a cubic interpolator and summing them into
//! an interleaved signed 16-bit stream. The host audio device drives
//! [`AudioMixer::mix_audio`] from its callback.
//!
//! # Architecture
//!
//! - `types` - Constants, errors and sample formats
//! - `sample` - Decoded PCM data shared between channels
//! - `resample` - Fixed-point cubic interpolation
//! - `channel` - One playback slot with volume, balance and looping
//! - `mix` - The channel pool and mixing callback
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use exult_rust::sound::mixer::{AudioMixer, AudioSample, PlaybackParams};
//!
//! let mixer = AudioMixer::new(22050, true, 8);
//! let beep = Arc::new(AudioSample::from_u8(false, 11025, vec![128, 255, 128, 0]).unwrap());
//! let id = mixer.play_sample(beep, PlaybackParams::default().priority(2)).unwrap();
//! assert!(mixer.is_playing(id));
//!
//! let mut out = vec![0i16; 512];
//! mixer.mix_audio(&mut out);
//! ```

pub mod channel;
pub mod mix;
pub mod resample;
pub mod sample;
pub mod types;

pub use channel::{calculate_2d_volume, AudioChannel, PlaybackParams};
pub use mix::AudioMixer;
pub use resample::CubicInterpolator;
pub use sample::AudioSample;
pub use types::{
    range_redux, MixerError, SampleFormat, AUDIO_DEF_PITCH, AUDIO_MAX_BALANCE, AUDIO_MAX_DISTANCE,
    AUDIO_MAX_VOLUME, DEFAULT_CHANNELS, LOOP_FOREVER, SINT16_MAX, SINT16_MIN,
};
