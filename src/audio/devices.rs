//! Picks the output device.

use anyhow::Context;
use cpal::{
    traits::{DeviceTrait, HostTrait},
    Device,
};
use hashbrown::HashMap;
use log::debug;

/// Finds the output device called `wanted`, or the default device for `default`.
/// Note: Names are compared by string similarity (dice coefficient), so the closest match wins.
pub fn output_device(wanted: &str) -> anyhow::Result<Device> {
    let host = cpal::default_host();
    if wanted.eq_ignore_ascii_case("default") {
        return host
            .default_output_device()
            .context("No default output device");
    }

    let wanted = wanted.to_lowercase();
    let (score, device) = host
        .output_devices()
        .context("Error listing output devices")?
        .filter_map(|x| Some((similarity(&x.name().ok()?.to_lowercase(), &wanted), x)))
        .reduce(|a, b| if a.0 >= b.0 { a } else { b })
        .context("No output device found")?;

    debug!("Matched `{wanted}` with score {score:.2}");
    Ok(device)
}

/// Dice coefficient over character bigrams, ignoring spaces.
fn similarity(a: &str, b: &str) -> f64 {
    let a = a.chars().filter(|x| *x != ' ').collect::<Vec<_>>();
    let b = b.chars().filter(|x| *x != ' ').collect::<Vec<_>>();

    if a == b {
        return 1.0;
    }

    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams = HashMap::<(char, char), usize>::new();
    for i in a.windows(2) {
        *bigrams.entry((i[0], i[1])).or_default() += 1;
    }

    let mut intersection = 0;
    for i in b.windows(2) {
        match bigrams.get_mut(&(i[0], i[1])) {
            Some(count) if *count > 0 => {
                *count -= 1;
                intersection += 1;
            }
            _ => {}
        }
    }

    (2.0 * intersection as f64) / (a.len() + b.len() - 2) as f64
}
