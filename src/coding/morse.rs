//! The Morse code table.
//! Maps letters and digits to their dot / dash sequences and back.

use std::{fmt, sync::OnceLock};

use hashbrown::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// The smallest unit of time in morse code
    Dit,
    /// Three times the length of a dit
    Dah,
}

impl Symbol {
    pub fn as_char(&self) -> char {
        match self {
            Self::Dit => '.',
            Self::Dah => '-',
        }
    }

    pub fn from_char(chr: char) -> Option<Self> {
        Some(match chr {
            '.' => Self::Dit,
            '-' => Self::Dah,
            _ => return None,
        })
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Looks up the dot / dash sequence for a character.
/// Lowercase letters are accepted, anything outside of A-Z and 0-9 is not.
pub fn encode(chr: char) -> Option<&'static str> {
    let index = match chr.to_ascii_uppercase() {
        e @ 'A'..='Z' => e as u8 - b'A',
        e @ '0'..='9' => e as u8 - b'0' + 26,
        _ => return None,
    };

    Some(MORSE_ENCODING[index as usize].1)
}

/// Looks up the character a dot / dash sequence stands for.
pub fn decode(symbols: &str) -> Option<char> {
    static DECODING: OnceLock<HashMap<&'static str, char>> = OnceLock::new();
    DECODING
        .get_or_init(|| MORSE_ENCODING.iter().map(|&(c, s)| (s, c)).collect())
        .get(symbols)
        .copied()
}

/// Uppercases the text and drops everything the table can't encode.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Every character in the table, in table order.
pub fn characters() -> impl Iterator<Item = char> {
    MORSE_ENCODING.iter().map(|x| x.0)
}

const MORSE_ENCODING: [(char, &str); 36] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];
