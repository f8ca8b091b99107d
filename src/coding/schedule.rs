//! Playback schedules.
//! A word becomes a list of tone and silence segments that are played back to back.

use serde::Serialize;

use super::{
    morse::{self, Symbol},
    timing::Timing,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Tone,
    Silence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Length in milliseconds
    pub duration: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub word: String,
    pub segments: Vec<Segment>,
}

impl Segment {
    pub fn tone(duration: u64) -> Self {
        Self {
            kind: SegmentKind::Tone,
            duration,
        }
    }

    pub fn silence(duration: u64) -> Self {
        Self {
            kind: SegmentKind::Silence,
            duration,
        }
    }
}

impl Schedule {
    /// Builds the schedule for a word.
    /// The word is normalized first, characters without a code are skipped.
    /// Symbols of one character are separated by one dot of silence, characters by a letter gap.
    /// There is no silence before the first tone or after the last one.
    pub fn from_word(word: &str, timing: Timing) -> Self {
        let word = morse::normalize(word);
        let codes = word.chars().filter_map(morse::encode).collect::<Vec<_>>();

        let mut segments = Vec::new();
        for (i, code) in codes.iter().enumerate() {
            if i > 0 {
                segments.push(Segment::silence(timing.letter_gap()));
            }

            for (j, symbol) in code.chars().filter_map(Symbol::from_char).enumerate() {
                if j > 0 {
                    segments.push(Segment::silence(timing.intra_symbol_gap()));
                }

                segments.push(Segment::tone(match symbol {
                    Symbol::Dit => timing.dot(),
                    Symbol::Dah => timing.dash(),
                }));
            }
        }

        Self { word, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total length in milliseconds.
    pub fn duration(&self) -> u64 {
        self.segments.iter().map(|x| x.duration).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}
