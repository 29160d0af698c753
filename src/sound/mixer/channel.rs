// channel.rs - A single playback slot of the mixer

//! One mixer channel: the sample it plays, its playback parameters and the
//! resampler state that converts the sample to the output rate and layout.

use std::sync::Arc;

use crate::sound::mixer::resample::CubicInterpolator;
use crate::sound::mixer::sample::AudioSample;
use crate::sound::mixer::types::*;

const FP_ONE: u32 = 0x10000;

/// Parameters for starting playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackParams {
    /// Extra repetitions after the first play, [`LOOP_FOREVER`] to repeat
    /// until stopped
    pub loop_count: i32,
    /// Higher priorities may preempt lower ones when all channels are busy
    pub priority: i32,
    pub paused: bool,
    /// 16.16 pitch factor, [`AUDIO_DEF_PITCH`] plays at the sample's rate
    pub pitch_shift: u32,
    pub lvol: i32,
    pub rvol: i32,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            loop_count: 0,
            priority: 0,
            paused: false,
            pitch_shift: AUDIO_DEF_PITCH,
            lvol: AUDIO_MAX_VOLUME,
            rvol: AUDIO_MAX_VOLUME,
        }
    }
}

impl PlaybackParams {
    pub fn looped(mut self, loop_count: i32) -> Self {
        self.loop_count = loop_count;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn pitch(mut self, pitch_shift: u32) -> Self {
        self.pitch_shift = pitch_shift;
        self
    }

    pub fn volume(mut self, lvol: i32, rvol: i32) -> Self {
        self.lvol = lvol;
        self.rvol = rvol;
        self
    }
}

/// Apply distance attenuation and balance to a volume pair.
///
/// Distances past 255 are silent. Negative balance attenuates the right
/// side, positive balance the left.
pub fn calculate_2d_volume(lvol: i32, rvol: i32, distance: i32, balance: i32) -> (i32, i32) {
    if distance > AUDIO_MAX_DISTANCE - 1 {
        return (0, 0);
    }

    let mut lbal = AUDIO_MAX_BALANCE;
    let mut rbal = AUDIO_MAX_BALANCE;
    if balance < 0 {
        rbal = (balance + AUDIO_MAX_BALANCE).max(0);
    } else if balance > 0 {
        lbal = (AUDIO_MAX_BALANCE - balance).max(0);
    }

    let atten = AUDIO_MAX_DISTANCE - distance;
    (lvol * atten * lbal / 65536, rvol * atten * rbal / 65536)
}

#[inline]
fn mix_into(slot: &mut i16, value: i32) {
    *slot = (*slot as i32 + value).clamp(SINT16_MIN, SINT16_MAX) as i16;
}

/// A mixer channel
#[derive(Debug, Clone)]
pub struct AudioChannel {
    out_rate: u32,
    out_stereo: bool,

    sample: Option<Arc<AudioSample>>,
    loop_count: i32,
    priority: i32,
    paused: bool,
    pitch_shift: u32,
    lvol: i32,
    rvol: i32,
    distance: i32,
    balance: i32,
    instance_id: i32,

    // Next frame to feed into the interpolators
    cursor: usize,
    // Frames until the interpolation window runs past the queued data
    frames_left: usize,
    // Frames advanced since playback started
    played: u64,
    fp_pos: u32,
    fp_speed: u32,
    interp: [CubicInterpolator; 2],
}

impl AudioChannel {
    pub fn new(out_rate: u32, out_stereo: bool) -> Self {
        Self {
            out_rate: out_rate.max(1),
            out_stereo,
            sample: None,
            loop_count: 0,
            priority: 0,
            paused: false,
            pitch_shift: AUDIO_DEF_PITCH,
            lvol: 0,
            rvol: 0,
            distance: 0,
            balance: 0,
            instance_id: -1,
            cursor: 0,
            frames_left: 0,
            played: 0,
            fp_pos: 0,
            fp_speed: 0,
            interp: [CubicInterpolator::new(); 2],
        }
    }

    /// Start playing `sample`, replacing whatever was playing.
    pub fn play(&mut self, sample: Arc<AudioSample>, params: PlaybackParams, instance_id: i32) {
        self.loop_count = params.loop_count;
        self.priority = params.priority;
        self.paused = params.paused;
        self.pitch_shift = params.pitch_shift;
        self.lvol = params.lvol;
        self.rvol = params.rvol;
        self.instance_id = instance_id;
        self.distance = 0;
        self.balance = 0;

        self.cursor = 0;
        self.frames_left = sample.frames();
        self.played = 0;
        self.fp_pos = 0;
        self.fp_speed = self.speed_for(&sample);

        // Prime the window with the first three frames
        let first = self.pull(&sample);
        let second = self.pull(&sample);
        let third = self.pull(&sample);
        for ch in 0..2 {
            let a = first.map_or(0, |f| sample.value(f, ch));
            let b = second.map_or(a, |f| sample.value(f, ch));
            let c = third.map_or(2 * b - a, |f| sample.value(f, ch));
            self.interp[ch].init3(a, b, c);
        }

        self.sample = Some(sample);
    }

    pub fn stop(&mut self) {
        self.sample = None;
    }

    pub fn is_playing(&self) -> bool {
        self.sample.is_some()
    }

    pub fn sample(&self) -> Option<&Arc<AudioSample>> {
        self.sample.as_ref()
    }

    pub fn instance_id(&self) -> i32 {
        self.instance_id
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn loop_count(&self) -> i32 {
        self.loop_count
    }

    pub fn set_loop(&mut self, loop_count: i32) {
        self.loop_count = loop_count;
    }

    pub fn pitch_shift(&self) -> u32 {
        self.pitch_shift
    }

    pub fn set_pitch_shift(&mut self, pitch_shift: u32) {
        self.pitch_shift = pitch_shift;
    }

    pub fn volume(&self) -> (i32, i32) {
        (self.lvol, self.rvol)
    }

    pub fn set_volume(&mut self, lvol: i32, rvol: i32) {
        self.lvol = lvol;
        self.rvol = rvol;
    }

    pub fn position_2d(&self) -> (i32, i32) {
        (self.distance, self.balance)
    }

    pub fn set_2d_position(&mut self, distance: i32, balance: i32) {
        self.distance = distance;
        self.balance = balance;
    }

    /// Length of the playing sample in milliseconds
    pub fn playback_length_ms(&self) -> Option<u32> {
        self.sample.as_ref().map(|s| s.length_ms())
    }

    /// Position inside the current pass over the sample, in milliseconds
    pub fn playback_position_ms(&self) -> Option<u32> {
        let sample = self.sample.as_ref()?;
        let frames = (self.played % sample.frames() as u64) * 1000;
        Some((frames / sample.rate() as u64) as u32)
    }

    fn speed_for(&self, sample: &AudioSample) -> u32 {
        (self.pitch_shift as u64 * sample.rate() as u64 / self.out_rate as u64) as u32
    }

    /// Next frame index to feed, rewinding for loops
    fn pull(&mut self, sample: &AudioSample) -> Option<usize> {
        if self.cursor >= sample.frames() {
            if self.loop_count == 0 {
                return None;
            }
            if self.loop_count > 0 {
                self.loop_count -= 1;
            }
            self.cursor = 0;
            self.frames_left += sample.frames();
        }
        let frame = self.cursor;
        self.cursor += 1;
        Some(frame)
    }

    /// Advance the window by one source frame. Returns `false` once the
    /// sample is exhausted.
    fn step(&mut self, sample: &AudioSample) -> bool {
        self.fp_pos -= FP_ONE;
        self.played += 1;
        self.frames_left -= 1;
        if self.frames_left == 0 {
            return false;
        }
        match self.pull(sample) {
            Some(frame) => {
                for ch in 0..2 {
                    self.interp[ch].feed(sample.value(frame, ch));
                }
            }
            None => {
                for interp in &mut self.interp {
                    interp.feed_extrapolated();
                }
            }
        }
        true
    }

    /// Resample and add this channel into `out`, interleaved at the output
    /// layout. Stops the channel when the sample runs out.
    pub fn mix(&mut self, out: &mut [i16]) {
        let Some(sample) = self.sample.clone() else {
            return;
        };
        if self.paused {
            return;
        }

        self.fp_speed = self.speed_for(&sample);
        let (lvol, rvol) = calculate_2d_volume(self.lvol, self.rvol, self.distance, self.balance);
        let out_channels = if self.out_stereo { 2 } else { 1 };

        for frame in out.chunks_exact_mut(out_channels) {
            while self.fp_pos >= FP_ONE {
                if !self.step(&sample) {
                    self.sample = None;
                    return;
                }
            }

            let left = self.interp[0].interpolate(self.fp_pos);
            match (sample.is_stereo(), self.out_stereo) {
                (false, true) => {
                    mix_into(&mut frame[0], left * lvol / 256);
                    mix_into(&mut frame[1], left * rvol / 256);
                }
                (false, false) => {
                    let volume = (lvol + rvol) / 2;
                    mix_into(&mut frame[0], left * volume / 256);
                }
                (true, true) => {
                    let right = self.interp[1].interpolate(self.fp_pos);
                    mix_into(&mut frame[0], left * lvol / 256);
                    mix_into(&mut frame[1], right * rvol / 256);
                }
                (true, false) => {
                    let right = self.interp[1].interpolate(self.fp_pos);
                    mix_into(&mut frame[0], (left * lvol + right * rvol) / 512);
                }
            }
            self.fp_pos += self.fp_speed;
        }
    }
}
