//! Key morse with the spacebar.
//! The presses are decoded live and every finished word is checked against the target.

use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use rand::rngs::ThreadRng;

use super::{
    exercise::{Exercise, Feedback},
    InitContext, Module,
};
use crate::{
    audio::output::AudioOutput,
    coding::session::{GapState, TickEvent, TransmitSession},
    console::Console,
};

/// Cells on each side of the dit / dah boundary in the press meter.
const METER_HALF: u64 = 5;

pub struct Transmit {
    // == Settings ==
    free: bool,
    poll: Duration,
    dash: u64,

    // == Systems ==
    audio: AudioOutput,
    session: TransmitSession,
    submitted: Receiver<String>,
    exercise: Exercise<ThreadRng>,
    start: Instant,
}

/// What the main loop has to do after a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Continue,
    /// Start the sidetone
    KeyDown,
    /// Stop the sidetone
    KeyUp,
    /// Print a line above the status
    Line(String),
    Quit,
}

impl Transmit {
    pub fn new(ctx: InitContext) -> Self {
        let free = ctx.args.get_flag("free");
        let poll = *ctx.args.get_one::<u64>("poll").unwrap();

        // Words come out of the session through its callback
        let (tx, submitted) = channel::unbounded();
        let session = TransmitSession::new(ctx.timing, move |x| {
            let _ = tx.send(x);
        });

        Self {
            free,
            poll: Duration::from_millis(poll),
            dash: ctx.timing.dash(),
            audio: ctx.audio,
            session,
            submitted,
            exercise: Exercise::new(rand::thread_rng()),
            start: Instant::now(),
        }
    }

    fn now(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Throws away whatever was keyed and picks the next target.
    /// Returns the line announcing it, or nothing in free mode.
    fn new_word(&mut self) -> Option<String> {
        if self.free {
            return None;
        }

        self.session.clear();
        let word = self.exercise.next_word().to_uppercase();
        Some(format!("[*] Send `{word}`"))
    }

    /// Moves on to the next word once a correct answer has been on screen long enough.
    fn advance(&mut self, now: u64) -> Option<String> {
        match self.exercise.poll(now) {
            true => self.new_word(),
            false => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: u64) -> Action {
        match (key.code, key.kind) {
            (KeyCode::Char(' '), KeyEventKind::Press) => match self.session.press(now) {
                true => Action::KeyDown,
                false => Action::Continue,
            },
            (KeyCode::Char(' '), KeyEventKind::Release) => {
                if let Some(symbol) = self.session.release(now) {
                    debug!("Keyed {symbol}");
                }
                Action::KeyUp
            }
            (KeyCode::Char('c'), KeyEventKind::Press)
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Action::Quit
            }
            (KeyCode::Char('q') | KeyCode::Esc, KeyEventKind::Press) => Action::Quit,
            (KeyCode::Char('c'), KeyEventKind::Press) => {
                self.session.clear();
                Action::Continue
            }
            (KeyCode::Char('n'), KeyEventKind::Press) => match self.new_word() {
                Some(line) => Action::Line(line),
                None => Action::Continue,
            },
            _ => Action::Continue,
        }
    }

    /// Checks a submitted word and returns the line to show for it.
    /// In free mode the word is just echoed.
    fn submit(&mut self, text: &str, now: u64) -> String {
        if self.free {
            return format!("[*] {text}");
        }

        match self.exercise.check(text, now) {
            Feedback::Correct => format!("[*] {text} - Correct"),
            _ => format!("[-] {text} - Incorrect"),
        }
    }

    fn status_line(&self, now: u64) -> String {
        let mut out = match self.session.held_for(now) {
            Some(held) => format!("# {} ", meter(held, self.dash)),
            None => "  ".to_owned(),
        };

        out.push_str(self.session.decoded());
        if !self.session.symbols().is_empty() {
            out.push_str(&format!(" [{}]", self.session.symbols()));
        }

        if self.session.state() == GapState::Idle
            && !self.session.is_pressed()
            && self.session.decoded().is_empty()
        {
            out.push_str("(hold space to key)");
        }

        if !self.free && self.exercise.feedback() == Feedback::Correct {
            out.push_str(" - next word coming up");
        }

        out
    }
}

/// Shows how long the key has been held against the dit / dah boundary at the `|`.
/// The end turns into a `!` once the press is too long to count.
fn meter(held: u64, dash: u64) -> String {
    let filled = (held * METER_HALF * 2 / dash).min(METER_HALF * 2);
    let cells = |n: u64| "=".repeat(n as usize) + &" ".repeat((METER_HALF - n) as usize);

    format!(
        "[{}|{}{}",
        cells(filled.min(METER_HALF)),
        cells(filled.saturating_sub(METER_HALF)),
        if held > dash { '!' } else { ']' }
    )
}

impl Module for Transmit {
    fn name(&self) -> &'static str {
        "transmit"
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let console = Console::enable()?;
        console.line("[*] Hold space to key. `c` clears, `n` skips the word, `q` quits.")?;
        if let Some(line) = self.new_word() {
            console.line(&line)?;
        }
        console.status(&self.status_line(self.now()))?;

        loop {
            let mut redraw = false;

            // The poll timeout doubles as the gap check cadence
            if event::poll(self.poll)? {
                if let Event::Key(key) = event::read()? {
                    match self.handle_key(key, self.now()) {
                        Action::Continue => {}
                        Action::KeyDown => {
                            if let Err(err) = self.audio.key_down() {
                                warn!("No sidetone: {err:#}");
                            }
                        }
                        Action::KeyUp => self.audio.key_up(),
                        Action::Line(line) => console.line(&line)?,
                        Action::Quit => break,
                    }
                }
                redraw = true;
            }

            let now = self.now();
            match self.session.tick(now) {
                TickEvent::Nothing => {}
                TickEvent::Wiped => {
                    console.line("[-] Unknown character, starting the word over")?;
                    redraw = true;
                }
                _ => redraw = true,
            }

            while let Ok(text) = self.submitted.try_recv() {
                let line = self.submit(&text, now);
                console.line(&line)?;
                redraw = true;
            }

            if let Some(line) = self.advance(now) {
                console.line(&line)?;
                redraw = true;
            }

            // Keep the meter moving while the key is down
            if redraw || self.session.is_pressed() {
                console.status(&self.status_line(now))?;
            }
        }

        self.audio.stop();
        Ok(())
    }
}
