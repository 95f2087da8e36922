use tr909::engine::PlayEvent;
use tr909::io::AudioOutput;
use tr909::params::{ParamId, Parameters};
use tr909::sequencing::{ChannelId, Instrument, Pattern, PatternChain, Step};
use tr909::voices::{SampleVoice, Voice, VoiceFactory, Waveform};
use tr909::{EngineConfig, Machine};

/// Plays a single full-scale sample per trigger, so triggers show up as
/// impulses in the channel output.
struct Impulse {
    waveform: Waveform,
    sample_rate: f32,
}

impl Impulse {
    fn new(sample_rate: f32) -> Self {
        Self {
            waveform: Waveform::new(vec![1.0, 0.0], sample_rate),
            sample_rate,
        }
    }
}

impl VoiceFactory for Impulse {
    fn create_voice(&self, event: &PlayEvent, _params: &Parameters) -> Voice {
        Voice::Sample(SampleVoice::new(
            event.instrument,
            self.waveform.clone(),
            0.0,
            1.0,
            1.0,
            self.sample_rate,
        ))
    }
}

fn impulses<P: tr909::sequencing::PatternProvider>(
    machine: &mut Machine<P, Impulse>,
    channel: ChannelId,
    blocks: usize,
) -> Vec<usize> {
    let block = machine.config().block_size;
    let mut output = AudioOutput::new(block);
    let mut found = Vec::new();
    for index in 0..blocks {
        output.render(machine, block);
        for (frame, sample) in output.channel(channel).iter().enumerate() {
            if *sample != 0.0 {
                found.push(index * block + frame);
            }
        }
    }
    found
}

#[test]
fn bassdrum_on_step_zero_repeats_every_bar() {
    let config = EngineConfig::default();
    assert_eq!(config.sample_rate, 44_100.0);
    assert_eq!(config.block_size, 128);
    assert_eq!(config.bpm, 120.0);

    let mut pattern = Pattern::new();
    pattern.set(Instrument::BassDrum, 0, Step::Full).unwrap();
    let mut machine = Machine::with_factory(config, pattern, Impulse::new(44_100.0)).unwrap();
    machine.play();

    // a bar of 4/4 at 120 bpm is two seconds
    let hits = impulses(&mut machine, ChannelId::BassDrum, 1_400);
    assert_eq!(hits, vec![0, 88_200, 176_400]);
}

#[test]
fn every_sixteenth_lands_on_its_frame() {
    let mut pattern = Pattern::new();
    for step in 0..16 {
        pattern.set(Instrument::Hihat, step, Step::Active).unwrap();
    }
    let mut machine = Machine::with_factory(EngineConfig::default(), pattern, Impulse::new(44_100.0)).unwrap();
    machine.play();

    // a sixteenth is 5512.5 frames, so odd steps may round either way
    let hits = impulses(&mut machine, ChannelId::Hihat, 689);
    assert_eq!(hits.len(), 16);
    for (step, hit) in hits.iter().enumerate() {
        let expected = step as f64 * 5_512.5;
        assert!((*hit as f64 - expected).abs() <= 1.0, "step {} at {}", step, hit);
    }
}

#[test]
fn chain_switches_at_cycle_end() {
    let mut first = Pattern::new().with_last_step(4).unwrap();
    first.set(Instrument::Rim, 0, Step::Active).unwrap();
    let mut second = Pattern::new().with_last_step(4).unwrap();
    second.set(Instrument::Clap, 2, Step::Active).unwrap();

    let chain = PatternChain::new(first).then(second);
    let mut machine = Machine::with_factory(EngineConfig::default(), chain, Impulse::new(44_100.0)).unwrap();
    machine.play();

    // rim on the first step of even cycles, clap on step 2 of odd ones
    let hits = impulses(&mut machine, ChannelId::RimClap, 700);
    let expected: Vec<usize> = [0, 6, 8, 14, 16].iter().map(|step| step * 11_025 / 2).collect();
    assert_eq!(hits, expected);
}

#[test]
fn full_kit_renders_finite_bounded_audio() {
    let mut pattern = Pattern::new().with_flam_delay(5).unwrap();
    for instrument in Instrument::ALL {
        pattern.set(instrument, 0, Step::Extra).unwrap();
        pattern.set(instrument, 4, Step::Active).unwrap();
        pattern.set(instrument, 8, Step::Full).unwrap();
        pattern.set(instrument, 12, Step::Extra).unwrap();
    }
    pattern.set_accent(8, true).unwrap();
    let mut machine = Machine::new(EngineConfig::default(), pattern).unwrap();
    machine.set_parameter(ParamId::BassDrumDecay, 1.0);
    machine.play();

    let mut output = AudioOutput::new(128);
    let mut peak = 0.0f32;
    for _ in 0..2_000 {
        output.render(&mut machine, 128);
        for id in ChannelId::ALL {
            for sample in output.channel(id) {
                assert!(sample.is_finite());
                peak = peak.max(sample.abs());
            }
        }
    }
    assert!(peak > 0.1);
    assert!(peak < 8.0);
}

#[test]
fn renders_are_deterministic() {
    let render = || {
        let pattern = Pattern::new()
            .with_row(Instrument::SnareDrum, "o... x... X... o...")
            .unwrap()
            .with_row(Instrument::Hihat, "xoxo xoxo xoxo xoxo")
            .unwrap();
        let mut machine = Machine::new(EngineConfig::default(), pattern).unwrap();
        machine.play();
        let mut data = vec![0.0f32; 44_100 * 2];
        AudioOutput::new(128).render_interleaved(&mut machine, &mut data, 2);
        data
    };
    assert_eq!(render(), render());
}
