//! Decodes keyed morse.
//!
//! A [`TransmitSession`] is fed key presses and releases along with periodic ticks.
//! Releases are classified into symbols, ticks watch the silence since the last release:
//! a letter gap turns the pending symbols into a character and a clear gap hands the
//! whole word to the callback and starts over.
//! All timestamps are milliseconds from any fixed point.

use std::mem;

use log::{debug, trace};

use super::{classify::classify, morse, morse::Symbol, timing::Timing};

pub struct TransmitSession {
    // == Config ==
    timing: Timing,
    callback: Box<dyn FnMut(String) + Send + 'static>,

    // == Internal ==
    state: GapState,
    pressed_at: Option<u64>,
    symbols: String,
    decoded: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapState {
    /// Nothing has been released since the last reset
    Idle,
    /// Measuring the silence since the last release
    Waiting { released_at: u64 },
}

/// What a call to [`TransmitSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Nothing changed
    Nothing,
    /// The pending symbols were a character and it was added to the decoded text
    Letter(char),
    /// The pending symbols were not a character, the decoded text was thrown away
    Wiped,
    /// The decoded text was handed to the callback
    Submitted,
    /// A clear gap passed with nothing to submit
    Reset,
}

impl TransmitSession {
    pub fn new(timing: Timing, callback: impl FnMut(String) + Send + 'static) -> Self {
        Self {
            timing,
            callback: Box::new(callback),
            state: GapState::Idle,
            pressed_at: None,
            symbols: String::new(),
            decoded: String::new(),
        }
    }

    /// Key down.
    /// Returns false if the key was already down (key repeat).
    pub fn press(&mut self, now: u64) -> bool {
        if self.pressed_at.is_some() {
            return false;
        }

        self.pressed_at = Some(now);
        true
    }

    /// Key up.
    /// Returns the symbol that was added, if the press was short enough to be one.
    /// Too long presses are dropped but still restart the gap timer.
    pub fn release(&mut self, now: u64) -> Option<Symbol> {
        let start = self.pressed_at.take()?;
        let duration = now.saturating_sub(start);
        self.state = GapState::Waiting { released_at: now };

        let symbol = classify(duration, self.timing);
        match symbol {
            Some(i) => self.symbols.push(i.as_char()),
            None => trace!("Ignoring {duration}ms press"),
        }

        symbol
    }

    /// Checks the silence since the last release against the letter and clear gaps.
    /// Call this regularly, a few times per dot is plenty.
    pub fn tick(&mut self, now: u64) -> TickEvent {
        if self.pressed_at.is_some() {
            return TickEvent::Nothing;
        }

        let GapState::Waiting { released_at } = self.state else {
            return TickEvent::Nothing;
        };

        let gap = now.saturating_sub(released_at);
        if gap >= self.timing.clear_gap() && !self.decoded.is_empty() {
            let text = mem::take(&mut self.decoded);
            self.symbols.clear();
            self.state = GapState::Idle;

            debug!("Submitting `{text}`");
            (self.callback)(text);
            return TickEvent::Submitted;
        }

        if gap >= self.timing.letter_gap() && !self.symbols.is_empty() {
            let symbols = mem::take(&mut self.symbols);
            return match morse::decode(&symbols) {
                Some(chr) => {
                    self.decoded.push(chr);
                    TickEvent::Letter(chr)
                }
                None => {
                    debug!("`{symbols}` is not a character, dropping `{}`", self.decoded);
                    self.decoded.clear();
                    TickEvent::Wiped
                }
            };
        }

        if gap >= self.timing.clear_gap() {
            self.state = GapState::Idle;
            return TickEvent::Reset;
        }

        TickEvent::Nothing
    }

    /// Throws away everything without calling the callback.
    pub fn clear(&mut self) {
        self.state = GapState::Idle;
        self.symbols.clear();
        self.decoded.clear();
    }

    /// Symbols of the character currently being keyed.
    pub fn symbols(&self) -> &str {
        &self.symbols
    }

    /// Characters decoded so far.
    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    pub fn state(&self) -> GapState {
        self.state
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// How long the key has been down, if it is.
    pub fn held_for(&self, now: u64) -> Option<u64> {
        self.pressed_at.map(|x| now.saturating_sub(x))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::{GapState, TickEvent, TransmitSession};
    use crate::coding::{morse::Symbol, timing::Timing};

    fn session() -> (TransmitSession, Arc<Mutex<Vec<String>>>) {
        let out = Arc::new(Mutex::new(Vec::new()));
        let sink = out.clone();
        let session = TransmitSession::new(Timing::new(100).unwrap(), move |x| sink.lock().push(x));
        (session, out)
    }

    /// Keys `symbols` starting at `start`, one dot apart, and returns the time of the last release.
    fn key(session: &mut TransmitSession, start: u64, symbols: &str) -> u64 {
        let mut now = start;
        for i in symbols.chars() {
            let length = match i {
                '.' => 80,
                _ => 250,
            };
            session.press(now);
            session.release(now + length);
            now += length + 100;
        }
        now - 100
    }

    #[test]
    fn test_press_release() {
        let (mut session, _) = session();
        assert!(session.press(0));
        assert!(!session.press(20));
        assert!(session.is_pressed());
        assert_eq!(session.release(90), Some(Symbol::Dit));
        assert_eq!(session.release(95), None);
        assert_eq!(session.state(), GapState::Waiting { released_at: 90 });
        assert_eq!(session.symbols(), ".");
    }

    #[test]
    fn test_held_for() {
        let (mut session, _) = session();
        assert_eq!(session.held_for(100), None);
        session.press(100);
        assert_eq!(session.held_for(100), Some(0));
        assert_eq!(session.held_for(350), Some(250));
        // Clock readings from before the press don't underflow
        assert_eq!(session.held_for(50), Some(0));
        session.release(400);
        assert_eq!(session.held_for(500), None);
    }

    #[test]
    fn test_long_press_ignored() {
        let (mut session, _) = session();
        session.press(0);
        assert_eq!(session.release(301), None);
        assert_eq!(session.symbols(), "");
        assert_eq!(session.state(), GapState::Waiting { released_at: 301 });
    }

    #[test]
    fn test_letter_gap_finalize() {
        let (mut session, out) = session();
        let end = key(&mut session, 0, "..");
        assert_eq!(session.symbols(), "..");

        assert_eq!(session.tick(end + 299), TickEvent::Nothing);
        assert_eq!(session.tick(end + 300), TickEvent::Letter('I'));
        assert_eq!(session.decoded(), "I");
        assert_eq!(session.symbols(), "");

        // The same gap can't finalize twice
        assert_eq!(session.tick(end + 400), TickEvent::Nothing);
        assert_eq!(session.decoded(), "I");
        assert!(out.lock().is_empty());
    }

    #[test]
    fn test_no_tick_while_pressed() {
        let (mut session, _) = session();
        let end = key(&mut session, 0, "-");
        session.press(end + 100);
        assert_eq!(session.tick(end + 10_000), TickEvent::Nothing);
        assert_eq!(session.symbols(), "-");
    }

    #[test]
    fn test_bad_sequence_wipes() {
        let (mut session, out) = session();
        let end = key(&mut session, 0, "...");
        assert_eq!(session.tick(end + 300), TickEvent::Letter('S'));
        let end = key(&mut session, end + 400, "---");
        assert_eq!(session.tick(end + 300), TickEvent::Letter('O'));
        assert_eq!(session.decoded(), "SO");

        let end = key(&mut session, end + 400, ".......");
        assert_eq!(session.tick(end + 300), TickEvent::Wiped);
        assert_eq!(session.decoded(), "");
        assert_eq!(session.symbols(), "");

        // Nothing left to submit
        assert_eq!(session.tick(end + 5000), TickEvent::Reset);
        assert_eq!(session.state(), GapState::Idle);
        assert!(out.lock().is_empty());
    }

    #[test]
    fn test_clear_gap_submits_once() {
        let (mut session, out) = session();
        let mut end = 0;
        for code in ["....", ".", ".-..", ".-..", "---"] {
            end = key(&mut session, end + 400, code);
            session.tick(end + 300);
        }
        assert_eq!(session.decoded(), "HELLO");

        assert_eq!(session.tick(end + 4999), TickEvent::Nothing);
        assert_eq!(session.tick(end + 5000), TickEvent::Submitted);
        assert_eq!(session.tick(end + 6000), TickEvent::Nothing);
        assert_eq!(session.tick(end + 60_000), TickEvent::Nothing);

        assert_eq!(*out.lock(), ["HELLO"]);
        assert_eq!(session.decoded(), "");
        assert_eq!(session.symbols(), "");
        assert_eq!(session.state(), GapState::Idle);
    }

    #[test]
    fn test_scenario_presses_one_letter() {
        // Releases 350ms apart, but each next press starts before a letter gap has passed
        let (mut session, out) = session();
        let mut now = 0;
        for (press, release) in [(0, 80), (350, 430), (520, 780)] {
            while now < press {
                session.tick(now);
                now += 10;
            }
            session.press(press);
            session.release(release);
            now = release;
        }
        assert_eq!(session.symbols(), "..-");

        while now <= 780 + 5000 {
            session.tick(now);
            now += 10;
        }

        assert_eq!(*out.lock(), ["U"]);
        assert_eq!(session.decoded(), "");
    }

    #[test]
    fn test_scenario_unmatched_sequence() {
        let (mut session, out) = session();
        let end = key(&mut session, 0, ".-");
        assert_eq!(session.tick(end + 300), TickEvent::Letter('A'));

        let end = key(&mut session, end + 500, "..--");
        assert_eq!(session.tick(end + 300), TickEvent::Wiped);
        assert_eq!(session.tick(end + 5000), TickEvent::Reset);
        assert!(out.lock().is_empty());
    }

    #[test]
    fn test_manual_clear() {
        let (mut session, out) = session();
        let end = key(&mut session, 0, "-");
        session.tick(end + 300);
        key(&mut session, end + 500, "..");
        session.clear();
        assert_eq!(session.decoded(), "");
        assert_eq!(session.symbols(), "");
        assert_eq!(session.tick(end + 100_000), TickEvent::Nothing);
        assert!(out.lock().is_empty());
    }
}
