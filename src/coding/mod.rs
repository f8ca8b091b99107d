//! Morse coding.
//! The code table, timing, and both directions of the trainer:
//! keyed presses into text ([`session`]) and text into tone schedules ([`schedule`]).

pub mod classify;
pub mod morse;
pub mod schedule;
pub mod session;
pub mod timing;
