//! Mixer driven the way an audio callback and a game thread share it

use std::sync::Arc;

use exult_rust::sound::mixer::{AudioMixer, AudioSample, MixerError, PlaybackParams};

fn u8_sample(value: u8, frames: usize, rate: u32) -> Arc<AudioSample> {
    Arc::new(AudioSample::from_u8(false, rate, vec![value; frames]).unwrap())
}

#[test]
fn balance_pans_an_8bit_sample() {
    let mixer = AudioMixer::new(22050, true, 4);
    let id = mixer.play_sample(u8_sample(255, 256, 22050), PlaybackParams::default()).unwrap();
    assert!(mixer.set_2d_position(id, 0, -128));

    let mut out = vec![0i16; 32];
    mixer.mix_audio(&mut out);
    for frame in out.chunks(2) {
        assert_eq!(frame, [27647, 13823]);
    }
}

#[test]
fn looped_8bit_sample_plays_twice() {
    let mixer = AudioMixer::new(8000, false, 2);
    let id = mixer
        .play_sample(u8_sample(200, 10, 8000), PlaybackParams::default().looped(1))
        .unwrap();
    assert_eq!(mixer.playback_length_ms(id), Some(1));

    let mut out = vec![0i16; 32];
    mixer.mix_audio(&mut out);
    assert_eq!(&out[..20], &[15720; 20]);
    assert_eq!(&out[20..], &[0; 12]);
    assert!(!mixer.is_playing(id));
}

#[test]
fn busy_mixer_refuses_equal_priority() {
    let mixer = AudioMixer::new(8000, false, 2);
    let sample = u8_sample(128, 800, 8000);
    let params = PlaybackParams::default().priority(3);
    mixer.play_sample(sample.clone(), params).unwrap();
    mixer.play_sample(sample.clone(), params).unwrap();
    assert_eq!(
        mixer.play_sample(sample.clone(), params),
        Err(MixerError::NoChannelAvailable(3))
    );

    mixer.stop_sample(&sample);
    assert!(mixer.play_sample(sample, params).is_ok());
}

#[test]
fn control_and_mix_threads_share_the_mixer() {
    let mixer = AudioMixer::new(11025, true, 4);
    let tone = Arc::new(AudioSample::from_i16(false, 11025, &[500; 300]).unwrap());
    let forever = u8_sample(180, 50, 22050);

    let ids = crossbeam::scope(|s| {
        s.spawn(|_| {
            let mut block = vec![0i16; 128];
            for _ in 0..200 {
                mixer.mix_audio(&mut block);
            }
        });

        let control = s.spawn(|_| {
            let mut ids = Vec::new();
            for i in 0..50 {
                let params = PlaybackParams::default().priority(i % 5);
                if let Ok(id) = mixer.play_sample(tone.clone(), params) {
                    ids.push(id);
                }
                if i % 7 == 0 {
                    let id = mixer
                        .play_sample(forever.clone(), PlaybackParams::default().looped(-1).priority(10))
                        .unwrap_or(-1);
                    if id >= 0 {
                        ids.push(id);
                        let _ = mixer.set_volume(id, 64, 64);
                        let _ = mixer.stop(id);
                    }
                }
            }
            ids
        });
        control.join().unwrap()
    })
    .unwrap();

    assert!(!ids.is_empty());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(ids.iter().all(|&id| id > 0));

    mixer.reset();
    let mut out = vec![1i16; 64];
    mixer.mix_audio(&mut out);
    assert!(out.iter().all(|&s| s == 0));
    assert!(!mixer.is_sample_playing(&tone));
}
