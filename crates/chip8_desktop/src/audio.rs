use tinyaudio::prelude::*;

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.1;

/// Plays a square tone while the sound timer runs
pub struct Device {
    inner: Option<Box<dyn BaseAudioOutputDevice>>,
    params: OutputDeviceParameters
}
impl Device {
    pub fn new(params: OutputDeviceParameters) -> Self {
        Self {
            inner: None,
            params
        }
    }
    pub fn is_playing(&self) -> bool {
        self.inner.is_some()
    }
    pub fn beep(&mut self) {
        if self.inner.is_some() { return }
        let params = self.params;
        let device = run_output_device(
            params,
            {
                let mut clock = 0f32;
                move |data| {
                    for samples in data.chunks_mut(params.channels_count) {
                        clock = (clock + 1.0) % params.sample_rate as f32;
                        let phase = clock * TONE_HZ / params.sample_rate as f32;
                        let val = if phase.fract() < 0.5 { VOLUME } else { -VOLUME };
                        for sample in samples {
                            *sample = val;
                        }
                    }
                }
            }
        );
        match device {
            Ok(device) => self.inner = Some(device),
            Err(e) => log::warn!("audio device unavailable: {}", e),
        }
    }
    pub fn stop(&mut self) {
        self.inner.take();
    }
}

pub fn get_device() -> Device {
    let params = OutputDeviceParameters {
        channels_count: 2,
        sample_rate: 44100,
        channel_sample_count: 4410
    };
    Device::new(params)
}
