use std::f32::consts::PI;

/// An endless sine wave.
#[derive(Clone, Copy, Debug)]
pub struct Tone {
    i: usize,
    frequency: f32,
    sample_rate: f32,
}

/// A sine wave that fades in and out to avoid clicks.
/// Without a length it plays until [`SmoothTone::release`] is called.
#[derive(Clone, Copy, Debug)]
pub struct SmoothTone {
    inner: Tone,
    length: Option<usize>,
    ramp: usize,
}

impl Tone {
    pub fn new(frequency: f32, sample_rate: u32) -> Self {
        Self {
            i: 0,
            frequency,
            sample_rate: sample_rate as f32,
        }
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.i += 1;
        Some((self.i as f32 * self.frequency * 2.0 * PI / self.sample_rate).sin())
    }
}

impl SmoothTone {
    /// The fades default to one period of the tone.
    pub fn new(frequency: f32, sample_rate: u32) -> Self {
        let period = (sample_rate as f32 / frequency) as usize;
        Self {
            inner: Tone::new(frequency, sample_rate),
            length: None,
            ramp: period.max(1),
        }
    }

    /// Length in samples, including the fades.
    pub fn duration(mut self, samples: usize) -> Self {
        self.length = Some(samples);
        self
    }

    /// Length of the fade in and fade out in samples.
    pub fn ramp(mut self, samples: usize) -> Self {
        self.ramp = samples.max(1);
        self
    }

    /// Starts fading out now.
    /// Never makes a tone with a set length any longer.
    pub fn release(&mut self) {
        let end = self.inner.i.saturating_add(self.ramp);
        self.length = Some(self.length.map_or(end, |x| x.min(end)));
    }

    pub fn is_released(&self) -> bool {
        self.length.is_some()
    }
}

impl Iterator for SmoothTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.inner.i;
        let mut gain = ((pos + 1) as f32 / self.ramp as f32).min(1.0);

        if let Some(length) = self.length {
            if pos >= length {
                return None;
            }

            gain = gain.min((length - pos) as f32 / self.ramp as f32);
        }

        Some(self.inner.next()? * gain)
    }
}

#[cfg(test)]
mod test {
    use super::{SmoothTone, Tone};

    #[test]
    fn test_tone_period() {
        // 1kHz at 8kHz is eight samples a period
        let samples = Tone::new(1000.0, 8000).take(8).collect::<Vec<_>>();
        assert!((samples[1] - 1.0).abs() < 1e-5);
        assert!(samples[7].abs() < 1e-5);
    }

    #[test]
    fn test_smooth_tone_length() {
        let tone = SmoothTone::new(800.0, 48000).duration(4800);
        assert_eq!(tone.count(), 4800);
    }

    #[test]
    fn test_smooth_tone_fades() {
        let samples = SmoothTone::new(1000.0, 8000)
            .ramp(100)
            .duration(1000)
            .collect::<Vec<_>>();

        let peak = |x: &[f32]| x.iter().fold(0.0_f32, |a, b| a.max(b.abs()));
        assert!(peak(&samples[..8]) < 0.1);
        assert!(peak(&samples[500..508]) > 0.99);
        assert!(peak(&samples[992..]) < 0.1);
    }

    #[test]
    fn test_smooth_tone_release() {
        let mut tone = SmoothTone::new(800.0, 48000).ramp(60);
        assert!(tone.by_ref().take(1000).all(|x| x.abs() <= 1.0));
        assert!(!tone.is_released());

        tone.release();
        assert!(tone.is_released());
        assert_eq!(tone.count(), 60);
    }

    #[test]
    fn test_smooth_tone_release_huge_ramp() {
        // A 0Hz tone has an endless period, so its default ramp is as long as it gets
        let mut tone = SmoothTone::new(0.0, 44100);
        tone.next();
        tone.release();
        assert!(tone.is_released());
    }
}
