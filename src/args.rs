use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::{
    audio::output::AudioOutput,
    coding::timing::Timing,
    modules::{
        encode::Encode,
        receive::{Receive, Speed},
        transmit::Transmit,
        InitContext, Module,
    },
};

pub fn command() -> Command {
    Command::new("morse-trainer")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .subcommand_required(true)
        .args([
            Arg::new("dot")
                .long("dot")
                .global(true)
                .value_parser(value_parser!(u64).range(1..=10_000))
                .default_value("100")
                .help("Length of one dot in milliseconds. Everything else is a multiple of it."),
            Arg::new("frequency")
                .long("frequency")
                .short('f')
                .global(true)
                .value_parser(parse_frequency)
                .default_value("800")
                .help("Tone frequency in Hz."),
            Arg::new("gain")
                .long("gain")
                .short('g')
                .global(true)
                .value_parser(parse_gain)
                .default_value("0.3")
                .help("Output volume, 0 to 1."),
            Arg::new("output-device")
                .long("output-device")
                .short('o')
                .global(true)
                .default_value("default")
                .help("Audio output device. Picks the device with the closest name."),
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More logging, repeat for even more."),
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("No logging at all."),
        ])
        .subcommands([
            Command::new("transmit")
                .alias("t")
                .about("Key words with the spacebar and have them decoded.")
                .args([
                    Arg::new("free")
                        .long("free")
                        .action(ArgAction::SetTrue)
                        .help("No target word, just decode whatever is keyed."),
                    Arg::new("poll")
                        .long("poll")
                        .value_parser(value_parser!(u64).range(1..=1000))
                        .default_value("10")
                        .help("How often the silence between presses is checked, in milliseconds."),
                ]),
            Command::new("receive")
                .alias("r")
                .about("Listen to words in morse and type what you heard.")
                .arg(
                    Arg::new("speed")
                        .long("speed")
                        .short('s')
                        .value_parser(value_parser!(Speed))
                        .help("Preset speed, overrides --dot."),
                ),
            Command::new("encode")
                .alias("e")
                .about("Print the morse code and playback schedule for some text.")
                .args([
                    Arg::new("text").required(true),
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the schedule as JSON."),
                    Arg::new("play")
                        .long("play")
                        .action(ArgAction::SetTrue)
                        .help("Also play it."),
                ]),
        ])
}

fn parse_frequency(raw: &str) -> Result<f32, String> {
    let frequency = raw.parse::<f32>().map_err(|e| e.to_string())?;
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(format!("`{raw}` is not a positive frequency"));
    }

    Ok(frequency)
}

fn parse_gain(raw: &str) -> Result<f32, String> {
    let gain = raw.parse::<f32>().map_err(|e| e.to_string())?;
    if !(0.0..=1.0).contains(&gain) {
        return Err(format!("`{raw}` is not between 0 and 1"));
    }

    Ok(gain)
}

pub fn module(args: &ArgMatches) -> anyhow::Result<Box<dyn Module>> {
    let ic = |x: &ArgMatches| -> anyhow::Result<InitContext> {
        let audio = AudioOutput::new(
            args.get_one::<String>("output-device").unwrap().to_owned(),
            *args.get_one::<f32>("frequency").unwrap(),
            *args.get_one::<f32>("gain").unwrap(),
        );

        Ok(InitContext {
            args: x.to_owned(),
            timing: Timing::new(*args.get_one::<u64>("dot").unwrap())?,
            audio,
        })
    };

    let module: Box<dyn Module> = match args.subcommand() {
        Some(("transmit", m)) => Box::new(Transmit::new(ic(m)?)),
        Some(("receive", m)) => Box::new(Receive::new(ic(m)?)?),
        Some(("encode", m)) => Box::new(Encode::new(ic(m)?)),
        _ => anyhow::bail!("Invalid subcommand"),
    };

    Ok(module)
}

#[cfg(test)]
mod test {
    use super::command;
    use crate::modules::receive::Speed;

    #[test]
    fn test_command() {
        command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let m = command()
            .try_get_matches_from(["morse-trainer", "receive", "--dot", "60", "-s", "slow"])
            .unwrap();
        assert_eq!(m.get_one::<u64>("dot"), Some(&60));
        assert_eq!(m.get_one::<f32>("frequency"), Some(&800.0));

        let (_, sub) = m.subcommand().unwrap();
        assert_eq!(sub.get_one::<Speed>("speed"), Some(&Speed::Slow));
    }

    #[test]
    fn test_rejects_zero_dot() {
        assert!(command()
            .try_get_matches_from(["morse-trainer", "--dot", "0", "transmit"])
            .is_err());
    }

    #[test]
    fn test_rejects_bad_frequency() {
        for frequency in ["0", "-5", "NaN", "inf", "loud"] {
            assert!(command()
                .try_get_matches_from(["morse-trainer", "--frequency", frequency, "transmit"])
                .is_err());
        }

        let m = command()
            .try_get_matches_from(["morse-trainer", "-f", "650.5", "transmit"])
            .unwrap();
        assert_eq!(m.get_one::<f32>("frequency"), Some(&650.5));
    }

    #[test]
    fn test_rejects_bad_gain() {
        for gain in ["NaN", "-0.1", "1.5"] {
            assert!(command()
                .try_get_matches_from(["morse-trainer", "--gain", gain, "transmit"])
                .is_err());
        }

        let m = command()
            .try_get_matches_from(["morse-trainer", "--gain", "1", "transmit"])
            .unwrap();
        assert_eq!(m.get_one::<f32>("gain"), Some(&1.0));
    }
}
