//! Tone sequencer.

use std::collections::VecDeque;

use crate::coding::schedule::{Schedule, SegmentKind};

use super::tone::SmoothTone;

/// A [`Schedule`] rendered to samples.
/// Each segment is played after the one before it has finished, so tones never overlap.
pub struct Sequence {
    parts: VecDeque<Part>,
}

enum Part {
    Tone(SmoothTone),
    Silence(usize),
}

impl Sequence {
    pub fn new(schedule: &Schedule, frequency: f32, sample_rate: u32) -> Self {
        let samples = |ms: u64| (ms * sample_rate as u64 / 1000) as usize;
        let parts = schedule
            .iter()
            .map(|x| match x.kind {
                SegmentKind::Tone => Part::Tone(
                    SmoothTone::new(frequency, sample_rate).duration(samples(x.duration)),
                ),
                SegmentKind::Silence => Part::Silence(samples(x.duration)),
            })
            .collect();

        Self { parts }
    }
}

impl Iterator for Sequence {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.parts.front_mut()? {
                Part::Tone(tone) => {
                    if let Some(i) = tone.next() {
                        return Some(i);
                    }
                }
                Part::Silence(left) if *left > 0 => {
                    *left -= 1;
                    return Some(0.0);
                }
                Part::Silence(_) => {}
            }

            self.parts.pop_front();
        }
    }
}
