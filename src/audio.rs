use std::{
    error::Error,
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, FromSample, Sample, StreamConfig,
};

/// One message from an engine to the synth thread. A tone of frequency 0
/// is silence.
pub enum Signal {
    Tone(f32),
    Chord(Vec<f32>),
}

/// The default output device plus a fixed small buffer, so tones track the
/// frame loop instead of lagging behind it.
pub struct AudioPlayer {
    device: Device,
    config: StreamConfig,
}

impl AudioPlayer {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no default audio output device")?;
        let mut config: StreamConfig = device.default_output_config()?.into();
        config.buffer_size = cpal::BufferSize::Fixed(128);
        Ok(Self { device, config })
    }

    /// Spawns the synth thread: it owns the output stream and keeps playing
    /// whatever frequencies were last sent until new ones arrive. Unpark the
    /// returned handle's thread to shut it down.
    pub fn spawn(&self) -> (Sender<Signal>, JoinHandle<()>) {
        let (tx, rx): (Sender<Signal>, Receiver<Signal>) = mpsc::channel();
        let config = self.config.clone();
        let device = self.device.clone();

        let frequencies = Arc::new(Mutex::new(Vec::new()));
        let phases = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let frequencies = Arc::clone(&frequencies);
            let phases = Arc::clone(&phases);
            thread::spawn(move || {
                let sample_rate = config.sample_rate.0 as f32;
                let channels = config.channels as usize;
                let mut next_sample =
                    voice_bank(sample_rate, frequencies.clone(), phases.clone());
                let err_fn = |err| eprintln!("audio stream error: {}", err);

                let stream = device.build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        while let Ok(signal) = rx.try_recv() {
                            let new_frequencies = match signal {
                                Signal::Tone(f) => vec![f],
                                Signal::Chord(fs) => fs,
                            };
                            let mut freq_lock = frequencies.lock().unwrap();
                            let mut phase_lock = phases.lock().unwrap();
                            if phase_lock.len() != new_frequencies.len() {
                                *phase_lock = vec![0.0; new_frequencies.len()];
                            }
                            *freq_lock = new_frequencies;
                            drop(freq_lock);
                            drop(phase_lock);

                            next_sample =
                                voice_bank(sample_rate, frequencies.clone(), phases.clone());
                        }
                        fill_frames(data, channels, &mut next_sample);
                    },
                    err_fn,
                    None,
                );

                match stream {
                    Ok(stream) => {
                        if stream.play().is_err() {
                            return;
                        }
                        // Stay alive to keep the stream open.
                        thread::park();
                    }
                    Err(err) => eprintln!("audio stream error: {}", err),
                }
            })
        };

        (tx, handle)
    }
}

/// Phase-continuous additive voices: a fundamental plus a half-amplitude
/// octave per frequency, phases written back so retriggering never clicks.
fn voice_bank(
    sample_rate: f32,
    frequencies: Arc<Mutex<Vec<f32>>>,
    phases: Arc<Mutex<Vec<f32>>>,
) -> impl FnMut() -> f32 + Send + 'static {
    let mut clocks: Vec<f32> = phases.lock().unwrap().clone();
    let increments: Vec<f32> = frequencies
        .lock()
        .unwrap()
        .iter()
        .map(|&f| f * 2.0 * std::f32::consts::PI / sample_rate)
        .collect();
    let voices = increments.len().max(1) as f32;
    move || {
        let mut value = 0.0;
        for (i, &increment) in increments.iter().enumerate() {
            let fundamental = (clocks[i] * increment).sin();
            let octave = (clocks[i] * increment * 2.0).sin() * 0.5;
            value += (fundamental + octave) / voices;
            clocks[i] = (clocks[i] + increment) % (2.0 * std::f32::consts::PI);
        }
        if let Ok(mut lock) = phases.lock() {
            for (i, &clock) in clocks.iter().enumerate() {
                if i < lock.len() {
                    lock[i] = clock;
                }
            }
        }
        value * 0.6
    }
}

fn fill_frames<T>(output: &mut [T], channels: usize, next_sample: &mut dyn FnMut() -> f32)
where
    T: Sample + FromSample<f32>,
{
    for frame in output.chunks_mut(channels) {
        let value: T = T::from_sample(next_sample());
        for sample in frame.iter_mut() {
            *sample = value;
        }
    }
}
