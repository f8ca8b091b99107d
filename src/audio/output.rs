//! Lazily opened audio output.
//!
//! Nothing touches the audio device until something actually needs to be played.
//! If opening the device fails the error is returned and the next call tries again.

use std::sync::Arc;

use anyhow::Context;
use cpal::{
    traits::{DeviceTrait, StreamTrait},
    FromSample, SampleFormat, SizedSample, Stream, StreamConfig,
};
use log::{error, info, warn};
use parking_lot::Mutex;

use crate::coding::schedule::Schedule;

use super::{devices, player::Player};

pub struct AudioOutput {
    device: String,
    gain: f32,
    player: Arc<Mutex<Player>>,
    stream: Option<Stream>,
}

impl AudioOutput {
    pub fn new(device: String, frequency: f32, gain: f32) -> Self {
        Self {
            device,
            gain,
            player: Arc::new(Mutex::new(Player::new(frequency))),
            stream: None,
        }
    }

    /// Opens the output device and starts the stream, if it isn't running already.
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let device = devices::output_device(&self.device)?;
        let supported = device
            .default_output_config()
            .context("No default output config")?;
        let format = supported.sample_format();
        let config = StreamConfig::from(supported);
        self.player.lock().set_sample_rate(config.sample_rate.0);

        let stream = match format {
            SampleFormat::F32 => self.build::<f32>(&device, &config),
            SampleFormat::I16 => self.build::<i16>(&device, &config),
            SampleFormat::U16 => self.build::<u16>(&device, &config),
            SampleFormat::I32 => self.build::<i32>(&device, &config),
            format => anyhow::bail!("Unsupported sample format: {format:?}"),
        }?;
        stream.play().context("Error starting output stream")?;

        info!(
            "Output hooked into `{}` ({}Hz)",
            device.name().unwrap_or_else(|_| "unknown".into()),
            config.sample_rate.0
        );
        self.stream = Some(stream);
        Ok(())
    }

    fn build<T>(&self, device: &cpal::Device, config: &StreamConfig) -> anyhow::Result<Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = config.channels as usize;
        let player = self.player.clone();
        let gain = self.gain;

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _info: &cpal::OutputCallbackInfo| {
                    // Same sample on every channel
                    let mut player = player.lock();
                    for frame in data.chunks_mut(channels) {
                        let value = T::from_sample(player.next_sample() * gain);
                        frame.iter_mut().for_each(|x| *x = value);
                    }
                },
                move |err| error!("Output stream error: {err}"),
                None,
            )
            .context("Error building output stream")
    }

    /// Plays a schedule, cutting off anything still playing.
    pub fn play(&mut self, schedule: &Schedule) -> anyhow::Result<()> {
        self.start()?;
        self.player.lock().play(schedule);
        Ok(())
    }

    pub fn key_down(&mut self) -> anyhow::Result<()> {
        self.start()?;
        self.player.lock().key_down();
        Ok(())
    }

    pub fn key_up(&mut self) {
        self.player.lock().key_up();
    }

    pub fn stop(&mut self) {
        self.player.lock().stop();
    }

    pub fn is_playing(&self) -> bool {
        self.player.lock().is_playing()
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.stop();
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                warn!("Error stopping output stream: {err}");
            }
        }
    }
}
