//! Raw mode terminal for keying.

use std::{
    io::{stdout, Write},
    panic,
};

use anyhow::{bail, Context};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue, style,
    terminal::{self, ClearType},
};

/// Puts the terminal in raw mode with key release reporting.
/// Everything is put back when this is dropped, or if the program panics.
pub struct Console {
    _private: (),
}

impl Console {
    pub fn enable() -> anyhow::Result<Self> {
        // Without release events there is no way to time a press
        if !terminal::supports_keyboard_enhancement().unwrap_or(false) {
            bail!(
                "This terminal doesn't report key releases. \
                 Try one that supports the kitty keyboard protocol (kitty, foot, WezTerm, Alacritty)."
            );
        }

        terminal::enable_raw_mode().context("Error enabling raw mode")?;

        // The terminal is unusable if we panic while in raw mode
        let hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore();
            hook(info);
        }));

        // Dropped on error, which puts the terminal back
        let console = Self { _private: () };
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES),
            cursor::Hide
        )?;

        Ok(console)
    }

    /// Prints a line that stays, above the status line.
    pub fn line(&self, text: &str) -> anyhow::Result<()> {
        let mut stdout = stdout().lock();
        queue!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(text),
            style::Print("\r\n")
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Replaces the status line.
    pub fn status(&self, text: &str) -> anyhow::Result<()> {
        let mut stdout = stdout().lock();
        queue!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(text)
        )?;
        stdout.flush()?;
        Ok(())
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        restore();
        let _ = panic::take_hook();
    }
}

fn restore() {
    let _ = execute!(
        stdout(),
        PopKeyboardEnhancementFlags,
        cursor::Show,
        style::Print("\r\n")
    );
    let _ = terminal::disable_raw_mode();
}
