//! Prints (and optionally plays) the morse for some text.

use std::{thread, time::Duration};

use anyhow::bail;

use super::{InitContext, Module};
use crate::{
    audio::output::AudioOutput,
    coding::{
        morse,
        schedule::{Schedule, SegmentKind},
        timing::Timing,
    },
};

pub struct Encode {
    text: String,
    json: bool,
    play: bool,
    timing: Timing,
    audio: AudioOutput,
}

impl Encode {
    pub fn new(ctx: InitContext) -> Self {
        Self {
            text: ctx.args.get_one::<String>("text").unwrap().to_owned(),
            json: ctx.args.get_flag("json"),
            play: ctx.args.get_flag("play"),
            timing: ctx.timing,
            audio: ctx.audio,
        }
    }
}

impl Module for Encode {
    fn name(&self) -> &'static str {
        "encode"
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let schedule = Schedule::from_word(&self.text, self.timing);
        if schedule.is_empty() {
            bail!("Nothing in `{}` can be sent in morse", self.text);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        } else {
            print!("{}", describe(&schedule));
        }

        if self.play {
            self.audio.play(&schedule)?;
            while self.audio.is_playing() {
                thread::sleep(Duration::from_millis(10));
            }
        }

        Ok(())
    }
}

fn describe(schedule: &Schedule) -> String {
    let mut out = String::new();
    for chr in schedule.word.chars() {
        if let Some(code) = morse::encode(chr) {
            out.push_str(&format!("{chr} {code}\n"));
        }
    }

    out.push('\n');
    for segment in schedule.iter() {
        let kind = match segment.kind {
            SegmentKind::Tone => "tone",
            SegmentKind::Silence => "silence",
        };
        out.push_str(&format!("{kind:<8}{}ms\n", segment.duration));
    }

    out.push_str(&format!("total   {}ms\n", schedule.duration()));
    out
}

#[cfg(test)]
mod test {
    use super::describe;
    use crate::coding::{schedule::Schedule, timing::Timing};

    #[test]
    fn test_describe() {
        let schedule = Schedule::from_word("n e", Timing::new(100).unwrap());
        assert_eq!(
            describe(&schedule),
            "N -.\nE .\n\ntone    300ms\nsilence 100ms\ntone    100ms\nsilence 300ms\ntone    100ms\ntotal   900ms\n"
        );
    }

    #[test]
    fn test_json() {
        let schedule = Schedule::from_word("t", Timing::new(100).unwrap());
        assert_eq!(
            serde_json::to_string(&schedule).unwrap(),
            r#"{"word":"T","segments":[{"kind":"tone","duration":300}]}"#
        );
    }
}
