// mix.rs - Channel pool and mixing

//! The audio mixer: a fixed pool of channels behind one lock.
//!
//! Control calls from the game and the periodic [`AudioMixer::mix_audio`]
//! callback from the audio device all take the same `parking_lot` mutex, so
//! a channel is never changed halfway through being mixed.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::sound::mixer::channel::{AudioChannel, PlaybackParams};
use crate::sound::mixer::sample::AudioSample;
use crate::sound::mixer::types::*;

/// Mutable mixer state
#[derive(Debug)]
struct MixerState {
    channels: Vec<AudioChannel>,
    id_counter: i32,
}

impl MixerState {
    fn channel(&self, instance_id: i32) -> Option<&AudioChannel> {
        if instance_id < 0 {
            return None;
        }
        self.channels.iter().find(|c| c.instance_id() == instance_id)
    }

    fn channel_mut(&mut self, instance_id: i32) -> Result<&mut AudioChannel, MixerError> {
        if instance_id < 0 {
            return Err(MixerError::UnknownInstance(instance_id));
        }
        self.channels
            .iter_mut()
            .find(|c| c.instance_id() == instance_id)
            .ok_or(MixerError::UnknownInstance(instance_id))
    }

    fn next_id(&mut self) -> i32 {
        self.id_counter = self.id_counter.wrapping_add(1);
        if self.id_counter < 0 {
            self.id_counter = 0;
        }
        self.id_counter
    }
}

/// Software mixer producing interleaved signed 16-bit output
#[derive(Debug)]
pub struct AudioMixer {
    sample_rate: u32,
    stereo: bool,
    state: Mutex<MixerState>,
}

impl AudioMixer {
    /// Mixer producing `sample_rate` Hz output with `num_channels`
    /// simultaneous sounds.
    pub fn new(sample_rate: u32, stereo: bool, num_channels: usize) -> Self {
        log::info!(
            "Creating audio mixer: {} Hz, {} output, {} channels",
            sample_rate,
            if stereo { "stereo" } else { "mono" },
            num_channels
        );
        let channels = (0..num_channels)
            .map(|_| AudioChannel::new(sample_rate, stereo))
            .collect();
        Self {
            sample_rate,
            stereo,
            state: Mutex::new(MixerState {
                channels,
                id_counter: 0,
            }),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_stereo(&self) -> bool {
        self.stereo
    }

    pub fn num_channels(&self) -> usize {
        self.state.lock().channels.len()
    }

    /// Stop every channel
    pub fn reset(&self) {
        log::info!("Resetting audio mixer");
        for channel in &mut self.state.lock().channels {
            channel.stop();
        }
    }

    /// Start `sample` on a free channel and return its instance id.
    ///
    /// Takes the first idle channel; when all are busy, the lowest priority
    /// channel is taken over if its priority is below `params.priority`.
    pub fn play_sample(&self, sample: Arc<AudioSample>, params: PlaybackParams) -> Result<i32, MixerError> {
        let mut state = self.state.lock();
        if state.channels.is_empty() {
            return Err(MixerError::NotReady);
        }

        let slot = state
            .channels
            .iter()
            .position(|c| !c.is_playing())
            .or_else(|| {
                state
                    .channels
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| a.priority().cmp(&b.priority()))
                    .map(|(i, _)| i)
            })
            .ok_or(MixerError::NotReady)?;

        let busy = state.channels[slot].is_playing();
        let current = state.channels[slot].priority();
        if busy && current >= params.priority {
            log::debug!(
                "No channel for priority {}, lowest busy priority is {}",
                params.priority,
                current
            );
            return Err(MixerError::NoChannelAvailable(params.priority));
        }
        if busy {
            log::debug!(
                "Preempting instance {} (priority {}) for priority {}",
                state.channels[slot].instance_id(),
                current,
                params.priority
            );
        }

        let id = state.next_id();
        state.channels[slot].play(sample, params, id);
        Ok(id)
    }

    pub fn is_playing(&self, instance_id: i32) -> bool {
        self.state
            .lock()
            .channel(instance_id)
            .is_some_and(|c| c.is_playing())
    }

    /// Whether any channel is playing `sample`
    pub fn is_sample_playing(&self, sample: &Arc<AudioSample>) -> bool {
        self.state
            .lock()
            .channels
            .iter()
            .any(|c| c.sample().is_some_and(|s| Arc::ptr_eq(s, sample)))
    }

    pub fn stop(&self, instance_id: i32) -> Result<(), MixerError> {
        self.state.lock().channel_mut(instance_id)?.stop();
        Ok(())
    }

    /// Stop every channel playing `sample`
    pub fn stop_sample(&self, sample: &Arc<AudioSample>) {
        for channel in &mut self.state.lock().channels {
            if channel.sample().is_some_and(|s| Arc::ptr_eq(s, sample)) {
                channel.stop();
            }
        }
    }

    pub fn set_paused(&self, instance_id: i32, paused: bool) -> Result<(), MixerError> {
        self.state.lock().channel_mut(instance_id)?.set_paused(paused);
        Ok(())
    }

    pub fn is_paused(&self, instance_id: i32) -> bool {
        self.state
            .lock()
            .channel(instance_id)
            .is_some_and(|c| c.is_paused())
    }

    pub fn set_paused_all(&self, paused: bool) {
        for channel in &mut self.state.lock().channels {
            channel.set_paused(paused);
        }
    }

    pub fn set_volume(&self, instance_id: i32, lvol: i32, rvol: i32) -> Result<(), MixerError> {
        self.state.lock().channel_mut(instance_id)?.set_volume(lvol, rvol);
        Ok(())
    }

    /// Left and right volume of an instance
    pub fn volume(&self, instance_id: i32) -> Option<(i32, i32)> {
        self.state.lock().channel(instance_id).map(|c| c.volume())
    }

    pub fn set_loop(&self, instance_id: i32, loop_count: i32) -> Result<(), MixerError> {
        self.state.lock().channel_mut(instance_id)?.set_loop(loop_count);
        Ok(())
    }

    pub fn loop_count(&self, instance_id: i32) -> Option<i32> {
        self.state.lock().channel(instance_id).map(|c| c.loop_count())
    }

    pub fn set_pitch_shift(&self, instance_id: i32, pitch_shift: u32) -> Result<(), MixerError> {
        self.state
            .lock()
            .channel_mut(instance_id)?
            .set_pitch_shift(pitch_shift);
        Ok(())
    }

    /// Place an instance at `distance` (0..=256) and `balance`
    /// (-256..=256). Returns whether the instance is still playing.
    pub fn set_2d_position(&self, instance_id: i32, distance: i32, balance: i32) -> bool {
        match self.state.lock().channel_mut(instance_id) {
            Ok(channel) => {
                channel.set_2d_position(distance, balance);
                channel.is_playing()
            }
            Err(_) => false,
        }
    }

    /// Distance and balance of an instance
    pub fn position_2d(&self, instance_id: i32) -> Option<(i32, i32)> {
        self.state.lock().channel(instance_id).map(|c| c.position_2d())
    }

    pub fn playback_length_ms(&self, instance_id: i32) -> Option<u32> {
        self.state
            .lock()
            .channel(instance_id)
            .and_then(|c| c.playback_length_ms())
    }

    pub fn playback_position_ms(&self, instance_id: i32) -> Option<u32> {
        self.state
            .lock()
            .channel(instance_id)
            .and_then(|c| c.playback_position_ms())
    }

    /// Fill `out` with the next block of interleaved output.
    pub fn mix_audio(&self, out: &mut [i16]) {
        out.fill(0);
        let mut state = self.state.lock();
        for channel in state.channels.iter_mut().filter(|c| c.is_playing()) {
            channel.mix(out);
        }
    }
}
