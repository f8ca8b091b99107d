use clap::ArgMatches;

use crate::{audio::output::AudioOutput, coding::timing::Timing};

pub mod encode;
pub mod exercise;
pub mod receive;
pub mod transmit;

pub trait Module {
    fn name(&self) -> &'static str;
    /// Runs until the user quits.
    fn run(&mut self) -> anyhow::Result<()>;
}

pub struct InitContext {
    /// Arguments of the module's subcommand
    pub args: ArgMatches,
    pub timing: Timing,
    pub audio: AudioOutput,
}
