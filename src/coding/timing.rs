//! Morse timing.
//! Every interval is a multiple of the length of one dot, in milliseconds.

use anyhow::bail;

pub const DEFAULT_DOT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    dot: u64,
}

impl Timing {
    pub fn new(dot: u64) -> anyhow::Result<Self> {
        if dot == 0 {
            bail!("Dot length must be at least 1ms");
        }

        Ok(Self { dot })
    }

    pub fn dot(&self) -> u64 {
        self.dot
    }

    /// Three dots.
    pub fn dash(&self) -> u64 {
        self.dot * 3
    }

    /// Silence between the symbols of one character.
    pub fn intra_symbol_gap(&self) -> u64 {
        self.dot
    }

    /// Silence that ends a character.
    pub fn letter_gap(&self) -> u64 {
        self.dot * 3
    }

    /// Silence that ends the whole word and resets the transmit session.
    pub fn clear_gap(&self) -> u64 {
        self.dot * 50
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self { dot: DEFAULT_DOT }
    }
}
