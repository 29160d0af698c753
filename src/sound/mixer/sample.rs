// sample.rs - Decoded PCM sample data

//! Decoded PCM samples shared between mixer channels.
//!
//! An [`AudioSample`] is immutable once built and is handed to the mixer as
//! an `Arc`, so the same sound can play on several channels at once.

use crate::sound::mixer::types::{range_redux, MixerError, SampleFormat};

/// Raw PCM data with its format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    format: SampleFormat,
    stereo: bool,
    rate: u32,
    data: Vec<u8>,
}

impl AudioSample {
    /// Wrap raw PCM bytes. The data must hold at least one whole frame and
    /// no partial trailing frame.
    pub fn new(format: SampleFormat, stereo: bool, rate: u32, data: Vec<u8>) -> Result<Self, MixerError> {
        if rate == 0 {
            return Err(MixerError::InvalidSample("sample rate is zero".into()));
        }
        let frame = format.bytes() * if stereo { 2 } else { 1 };
        if data.is_empty() || data.len() % frame != 0 {
            return Err(MixerError::InvalidSample(format!(
                "{} bytes is not a whole number of {}-byte frames",
                data.len(),
                frame
            )));
        }
        Ok(Self {
            format,
            stereo,
            rate,
            data,
        })
    }

    /// 8-bit unsigned samples
    pub fn from_u8(stereo: bool, rate: u32, data: Vec<u8>) -> Result<Self, MixerError> {
        Self::new(SampleFormat::U8, stereo, rate, data)
    }

    /// 16-bit signed samples
    pub fn from_i16(stereo: bool, rate: u32, samples: &[i16]) -> Result<Self, MixerError> {
        let data = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        Self::new(SampleFormat::S16, stereo, rate, data)
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn is_stereo(&self) -> bool {
        self.stereo
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn channels(&self) -> usize {
        if self.stereo {
            2
        } else {
            1
        }
    }

    /// Length in frames
    pub fn frames(&self) -> usize {
        self.data.len() / (self.format.bytes() * self.channels())
    }

    /// Length in milliseconds
    pub fn length_ms(&self) -> u32 {
        (self.frames() as u64 * 1000 / self.rate as u64) as u32
    }

    /// Range reduced 16-bit value of channel `ch` in frame `frame`.
    /// Mono samples return the same value for either channel.
    pub fn value(&self, frame: usize, ch: usize) -> i32 {
        let ch = if self.stereo { ch.min(1) } else { 0 };
        let index = frame * self.channels() + ch;
        let raw = match self.format {
            SampleFormat::U8 => {
                let c = self.data[index] as i32;
                (c | (c << 8)) - 32768
            }
            SampleFormat::S16 => {
                let off = index * 2;
                i16::from_ne_bytes([self.data[off], self.data[off + 1]]) as i32
            }
        };
        range_redux(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_partial_frames() {
        assert!(AudioSample::from_u8(true, 11025, vec![1, 2, 3]).is_err());
        assert!(AudioSample::from_u8(false, 11025, vec![]).is_err());
        assert!(AudioSample::from_u8(false, 0, vec![1]).is_err());
        assert!(AudioSample::new(SampleFormat::S16, false, 22050, vec![0; 3]).is_err());
    }

    #[test]
    fn test_u8_expansion() {
        let s = AudioSample::from_u8(false, 11025, vec![0, 128, 255]).unwrap();
        assert_eq!(s.frames(), 3);
        assert_eq!(s.value(0, 0), -27648);
        assert_eq!(s.value(1, 0), 108);
        assert_eq!(s.value(2, 0), 27647);
    }

    #[test]
    fn test_stereo_channels() {
        let s = AudioSample::from_i16(true, 22050, &[100, -100, 320, -320]).unwrap();
        assert_eq!(s.frames(), 2);
        assert_eq!(s.value(1, 0), 270);
        assert_eq!(s.value(1, 1), -270);
        assert_eq!(s.length_ms(), 0);
    }

    #[test]
    fn test_length_ms() {
        let s = AudioSample::from_u8(false, 1000, vec![128; 2500]).unwrap();
        assert_eq!(s.length_ms(), 2500);
    }
}
