//! Listen to a word in morse and type it back.

use std::{
    io::{self, BufRead},
    thread,
    time::{Duration, Instant},
};

use clap::ValueEnum;
use crossbeam::{
    channel::{self, Receiver},
    select,
};
use log::warn;
use rand::rngs::ThreadRng;

use super::{
    exercise::{Exercise, Feedback},
    InitContext, Module,
};
use crate::{
    audio::output::AudioOutput,
    coding::{schedule::Schedule, timing::Timing},
};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    Fast,
    Slow,
}

impl Speed {
    pub fn dot(&self) -> u64 {
        match self {
            Self::Fast => 100,
            Self::Slow => 200,
        }
    }
}

/// What a line typed by the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    /// Play the current word again
    Replay,
    /// Gave up on a word, a new one is picked
    Skipped(String),
    Checked(Feedback),
    Quit,
}

pub struct Receive {
    timing: Timing,
    audio: AudioOutput,
    exercise: Exercise<ThreadRng>,
    start: Instant,
}

impl Receive {
    pub fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let timing = match ctx.args.get_one::<Speed>("speed") {
            Some(speed) => Timing::new(speed.dot())?,
            None => ctx.timing,
        };

        Ok(Self {
            timing,
            audio: ctx.audio,
            exercise: Exercise::new(rand::thread_rng()),
            start: Instant::now(),
        })
    }

    fn now(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Plays the current word from the start.
    fn play(&mut self) {
        let schedule = Schedule::from_word(self.exercise.target(), self.timing);
        match self.audio.play(&schedule) {
            Ok(()) => println!("[*] Playing..."),
            Err(err) => warn!("Can't play audio, press enter to try again: {err:#}"),
        }
    }

    fn next_word(&mut self) {
        self.exercise.next_word();
        self.play();
    }

    fn handle_line(&mut self, line: &str, now: u64) -> Reply {
        match line {
            "" => Reply::Replay,
            ":q" | ":quit" => Reply::Quit,
            ":new" => {
                let old = self.exercise.target().to_owned();
                self.exercise.next_word();
                Reply::Skipped(old)
            }
            guess => Reply::Checked(self.exercise.check(guess, now)),
        }
    }

    /// Acts on a reply. Returns false when the user wants to quit.
    fn respond(&mut self, reply: Reply) -> bool {
        match reply {
            Reply::Replay => self.play(),
            Reply::Skipped(word) => {
                println!("[*] The word was `{word}`");
                self.play();
            }
            Reply::Checked(Feedback::Correct) => println!("[*] Correct"),
            Reply::Checked(_) => println!("[-] Incorrect"),
            Reply::Quit => return false,
        }

        true
    }
}

impl Module for Receive {
    fn name(&self) -> &'static str {
        "receive"
    }

    fn run(&mut self) -> anyhow::Result<()> {
        println!("[*] Type what you hear. Enter on its own replays, `:new` skips, `:quit` quits.");
        let lines = stdin_lines();
        self.next_word();

        loop {
            // Only wait on the advance timer while one is pending
            let advance = match self.exercise.advance_at() {
                Some(at) => channel::at(self.start + Duration::from_millis(at)),
                None => channel::never(),
            };

            let running = select! {
                recv(lines) -> line => match line {
                    Ok(line) => {
                        let reply = self.handle_line(line.trim(), self.now());
                        self.respond(reply)
                    }
                    Err(_) => false,
                },
                recv(advance) -> _ => {
                    if self.exercise.poll(self.now()) {
                        self.next_word();
                    }
                    true
                }
            };

            if !running {
                break;
            }
        }

        self.audio.stop();
        Ok(())
    }
}

/// Reads stdin on its own thread so the main loop can wait on it alongside timers.
/// The channel disconnects when stdin is closed.
fn stdin_lines() -> Receiver<String> {
    let (tx, rx) = channel::unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}

#[cfg(test)]
mod test {
    use super::{Receive, Reply, Speed};
    use crate::{
        args::command,
        audio::output::AudioOutput,
        coding::timing::Timing,
        modules::{exercise::Feedback, InitContext},
    };

    fn receive(extra: &[&str]) -> Receive {
        let args = ["morse-trainer", "receive"].iter().chain(extra).copied();
        let matches = command().try_get_matches_from(args).unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        let mut receive = Receive::new(InitContext {
            args: sub.to_owned(),
            timing: Timing::new(100).unwrap(),
            audio: AudioOutput::new("default".to_owned(), 800.0, 0.3),
        })
        .unwrap();
        receive.exercise.next_word();
        receive
    }

    #[test]
    fn test_speed_overrides_dot() {
        assert_eq!(receive(&[]).timing.dot(), 100);
        assert_eq!(receive(&["--speed", "slow"]).timing.dot(), 200);
    }

    #[test]
    fn test_empty_line_replays() {
        let mut r = receive(&[]);
        let target = r.exercise.target().to_owned();
        assert_eq!(r.handle_line("", 0), Reply::Replay);
        assert_eq!(r.exercise.target(), target);
        assert_eq!(r.exercise.feedback(), Feedback::None);
    }

    #[test]
    fn test_quit() {
        let mut r = receive(&[]);
        assert_eq!(r.handle_line(":quit", 0), Reply::Quit);
        assert_eq!(r.handle_line(":q", 0), Reply::Quit);
        assert!(!r.respond(Reply::Quit));
    }

    #[test]
    fn test_guesses() {
        let mut r = receive(&[]);
        assert_eq!(
            r.handle_line("qqqqqqqq", 0),
            Reply::Checked(Feedback::Incorrect)
        );
        assert_eq!(r.exercise.advance_at(), None);

        let target = r.exercise.target().to_uppercase();
        assert_eq!(r.handle_line(&target, 500), Reply::Checked(Feedback::Correct));
        assert_eq!(r.exercise.advance_at(), Some(1300));
    }

    #[test]
    fn test_new_cancels_advance() {
        let mut r = receive(&[]);
        let target = r.exercise.target().to_owned();
        r.handle_line(&target, 0);
        assert!(r.exercise.advance_at().is_some());

        assert_eq!(r.handle_line(":new", 100), Reply::Skipped(target));
        assert_eq!(r.exercise.advance_at(), None);
        assert_eq!(r.exercise.feedback(), Feedback::None);
        assert!(!r.exercise.poll(10_000));
    }

    #[test]
    fn test_speed() {
        assert_eq!(Speed::Fast.dot(), 100);
        assert_eq!(Speed::Slow.dot(), 200);
    }
}
