//! The sample source behind the output stream.
//! Plays schedules and the live sidetone while the key is held.

use log::debug;

use crate::coding::schedule::Schedule;

use super::{sequence::Sequence, tone::SmoothTone};

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Sidetone fade in and out, in milliseconds.
const SIDETONE_RAMP: u32 = 5;

pub struct Player {
    frequency: f32,
    sample_rate: u32,

    sequence: Option<Sequence>,
    sidetone: Option<SmoothTone>,
}

impl Player {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            sample_rate: DEFAULT_SAMPLE_RATE,
            sequence: None,
            sidetone: None,
        }
    }

    /// Anything already playing keeps the rate it was started with.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    /// Starts playing a schedule.
    /// A schedule that is still playing is cut off, they are never mixed.
    pub fn play(&mut self, schedule: &Schedule) {
        if self.sequence.is_some() {
            debug!("Cutting off playback for `{}`", schedule.word);
        }

        self.sequence = Some(Sequence::new(schedule, self.frequency, self.sample_rate));
    }

    /// Silences everything immediately.
    pub fn stop(&mut self) {
        self.sequence = None;
        self.sidetone = None;
    }

    pub fn is_playing(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn key_down(&mut self) {
        match self.sidetone {
            Some(tone) if !tone.is_released() => {}
            _ => {
                let ramp = (self.sample_rate * SIDETONE_RAMP / 1000) as usize;
                self.sidetone = Some(SmoothTone::new(self.frequency, self.sample_rate).ramp(ramp));
            }
        }
    }

    pub fn key_up(&mut self) {
        if let Some(tone) = &mut self.sidetone {
            tone.release();
        }
    }

    pub fn next_sample(&mut self) -> f32 {
        let mut out = 0.0;

        if let Some(sequence) = &mut self.sequence {
            match sequence.next() {
                Some(i) => out += i,
                None => self.sequence = None,
            }
        }

        if let Some(tone) = &mut self.sidetone {
            match tone.next() {
                Some(i) => out += i,
                None => self.sidetone = None,
            }
        }

        out.clamp(-1.0, 1.0)
    }
}
