//! tr909 - play a drum pattern on the default output device
//!
//! Run with: cargo run -- [bpm]
//!
//! While playing, type `<path> <value>` to change a parameter, e.g.
//! `bassdrum/decay 0.9` or `global/volume 0.6`. `quit` stops.

use std::io::BufRead;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tr909::io::AudioOutput;
use tr909::params::{ParamId, ParameterMessage};
use tr909::sequencing::{Groove, Instrument, Pattern, PatternChain, PatternError};
use tr909::{EngineConfig, Machine};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bpm = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<f64>().wrap_err_with(|| format!("invalid bpm '{}'", arg))?,
        None => 126.0,
    };

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let engine_config = EngineConfig::default().with_sample_rate(sample_rate).with_bpm(bpm);
    let mut machine = Machine::new(engine_config, chain()?)?;
    machine.play();

    let (mut tx, mut rx) = RingBuffer::<ParameterMessage>::new(64);
    let mut output = AudioOutput::new(engine_config.block_size);

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            machine.apply_messages(&mut rx);
            output.render_interleaved(&mut machine, data, channels);
        },
        |err| eprintln!("Audio error: {}", err),
        None,
    )?;
    stream.play()?;

    info!(bpm, sample_rate, channels, "playing, type '<path> <value>' or 'quit'");

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line == "quit" {
            break;
        }
        let Some((path, value)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        let id = match ParamId::from_path(path) {
            Ok(id) => id,
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };
        match value.trim().parse::<f32>() {
            Ok(value) => {
                if tx.push(ParameterMessage::new(id, value)).is_err() {
                    warn!("parameter queue full");
                }
            }
            Err(_) => warn!(value, "expected a number between 0 and 1"),
        }
    }

    Ok(())
}

/// Two bars of house: a straight main pattern and a fill with flams.
fn chain() -> Result<PatternChain, PatternError> {
    let main = Pattern::new()
        .with_row(Instrument::BassDrum, "X... x... X... x...")?
        .with_row(Instrument::Clap, ".... X... .... X...")?
        .with_row(Instrument::Hihat, "x.o. x.o. x.o. x.ox")?
        .with_row(Instrument::Ride, "..x. ..x. ..x. ..x.")?
        .with_groove(Groove::swing(0.3));

    let mut fill = main
        .clone()
        .with_row(Instrument::SnareDrum, ".... .... o.x. oXoX")?
        .with_row(Instrument::TomLow, ".... .... .... x...")?
        .with_row(Instrument::TomMid, ".... .... ..x. ....")?
        .with_row(Instrument::TomHi, ".... .... x... ....")?
        .with_flam_delay(3)?;
    fill.set_accent(12, true)?;

    let crash = main.clone().with_row(Instrument::Crash, "X... .... .... ....")?;

    Ok(PatternChain::new(crash).repeat(main, 2).then(fill))
}
