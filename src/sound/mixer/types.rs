// types.rs - Core types and constants for the audio mixer

//! Core types and constants for the software audio mixer.
//!
//! Volumes are integers in `0..=256`, pitch shifts and resampling positions
//! are 16.16 fixed point.

/// Pitch shift value meaning "play at the sample's own rate"
pub const AUDIO_DEF_PITCH: u32 = 0x10000;

/// Full volume
pub const AUDIO_MAX_VOLUME: i32 = 256;

/// Distance at and beyond which a positioned sound is silent
pub const AUDIO_MAX_DISTANCE: i32 = 256;

/// Balance range is `-AUDIO_MAX_BALANCE..=AUDIO_MAX_BALANCE`, negative is left
pub const AUDIO_MAX_BALANCE: i32 = 256;

/// Loop count that repeats a sample until stopped
pub const LOOP_FOREVER: i32 = -1;

/// Default number of mixing channels
pub const DEFAULT_CHANNELS: usize = 8;

/// Maximum value for 16-bit signed integer
pub const SINT16_MAX: i32 = 32767;

/// Minimum value for 16-bit signed integer
pub const SINT16_MIN: i32 = -32768;

/// Scale input samples by 27/32 so cubic overshoot between two full-scale
/// samples stays inside the 16-bit range.
#[inline]
pub const fn range_redux(x: i32) -> i32 {
    (x * 27) >> 5
}

/// Mixer errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MixerError {
    #[error("mixer has no channels")]
    NotReady,

    #[error("no channel available for priority {0}")]
    NoChannelAvailable(i32),

    #[error("no channel is playing instance {0}")]
    UnknownInstance(i32),

    #[error("invalid sample data: {0}")]
    InvalidSample(String),
}

/// Stored sample width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// 8-bit unsigned, 128 is silence
    U8,
    /// 16-bit signed, native endian
    S16,
}

impl SampleFormat {
    pub fn bytes(self) -> usize {
        match self {
            SampleFormat::U8 => 1,
            SampleFormat::S16 => 2,
        }
    }

    pub fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_redux() {
        assert_eq!(range_redux(0), 0);
        assert_eq!(range_redux(32), 27);
        assert_eq!(range_redux(SINT16_MAX), 27647);
        assert_eq!(range_redux(SINT16_MIN), -27648);
    }

    #[test]
    fn test_sample_format_sizes() {
        assert_eq!(SampleFormat::U8.bytes(), 1);
        assert_eq!(SampleFormat::S16.bits(), 16);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(MixerError::UnknownInstance(7).to_string(), "no channel is playing instance 7");
        assert_eq!(
            MixerError::NoChannelAvailable(3).to_string(),
            "no channel available for priority 3"
        );
    }
}
