//! Audio utilities.
//! Tone generation, sequencing and the output stream.

pub mod devices;
pub mod output;
pub mod player;
pub mod sequence;
pub mod tone;
