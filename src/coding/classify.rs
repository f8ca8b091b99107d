//! Turns the length of a key press into a morse symbol.

use super::{morse::Symbol, timing::Timing};

/// Classifies a press of `duration` milliseconds.
/// Presses longer than a dash are not symbols at all and return `None`.
/// Anything shorter than half a dash is a dit, the rest are dahs.
pub fn classify(duration: u64, timing: Timing) -> Option<Symbol> {
    let dash = timing.dash();
    if duration > dash {
        return None;
    }

    // duration < dash / 2, kept exact for odd dash lengths
    Some(match duration * 2 < dash {
        true => Symbol::Dit,
        false => Symbol::Dah,
    })
}

#[cfg(test)]
mod test {
    use super::classify;
    use crate::coding::{morse::Symbol, timing::Timing};

    #[test]
    fn test_threshold_boundaries() {
        let timing = Timing::new(100).unwrap();
        assert_eq!(classify(0, timing), Some(Symbol::Dit));
        assert_eq!(classify(149, timing), Some(Symbol::Dit));
        assert_eq!(classify(150, timing), Some(Symbol::Dah));
        assert_eq!(classify(300, timing), Some(Symbol::Dah));
        assert_eq!(classify(301, timing), None);
    }

    #[test]
    fn test_odd_dash_length() {
        // Dash is 303ms, so the midpoint is 151.5ms
        let timing = Timing::new(101).unwrap();
        assert_eq!(classify(151, timing), Some(Symbol::Dit));
        assert_eq!(classify(152, timing), Some(Symbol::Dah));
        assert_eq!(classify(303, timing), Some(Symbol::Dah));
        assert_eq!(classify(304, timing), None);
    }
}
