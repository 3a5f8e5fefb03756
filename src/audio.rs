//! Procedural sound effects.
//!
//! Each effect is a short fundsp graph rendered once to a sample buffer at
//! startup; playback hands a copy of the buffer to rodio and detaches.

use fundsp::prelude::*;
use log::{debug, warn};
use rodio::{OutputStream, OutputStreamHandle, buffer::SamplesBuffer};

const SAMPLE_RATE: u32 = 44100;

fn render(mut unit: impl AudioUnit, seconds: f32) -> Vec<f32> {
    let n = (SAMPLE_RATE as f32 * seconds) as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

fn ramp(from: f32, to: f32, t: f32, over: f32) -> f32 {
    from + (to - from) * (t / over).min(1.0)
}

/// Falling sawtooth, 400Hz → 80Hz.
fn crash_samples() -> Vec<f32> {
    let freq = lfo(|t: f32| ramp(400.0, 80.0, t, 0.4));
    let gain = lfo(|t: f32| ramp(0.15, 0.0, t, 0.5));
    render((freq >> saw()) * gain, 0.5)
}

/// Short rising chirp.
fn flap_samples() -> Vec<f32> {
    let freq = lfo(|t: f32| ramp(520.0, 780.0, t, 0.08));
    let gain = lfo(|t: f32| ramp(0.12, 0.0, t, 0.1));
    render((freq >> sine::<f32>()) * gain, 0.1)
}

/// Two-note ding.
fn point_samples() -> Vec<f32> {
    let freq = lfo(|t: f32| -> f32 { if t < 0.06 { 880.0 } else { 1320.0 } });
    let gain = lfo(|t: f32| ramp(0.12, 0.0, t, 0.18));
    render((freq >> sine::<f32>()) * gain, 0.18)
}

struct Output {
    // Dropping the stream stops all playback.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

pub struct Sounds {
    output: Option<Output>,
    flap: Vec<f32>,
    point: Vec<f32>,
    crash: Vec<f32>,
}

impl Sounds {
    /// Open the default output device. Falls back to silence if there is none.
    pub fn open() -> Self {
        let output = match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Output {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                warn!("no audio output, playing silently: {e}");
                None
            }
        };
        Self::with_output(output)
    }

    pub fn muted() -> Self {
        Self::with_output(None)
    }

    fn with_output(output: Option<Output>) -> Self {
        let (flap, point, crash) = if output.is_some() {
            (flap_samples(), point_samples(), crash_samples())
        } else {
            Default::default()
        };
        Self {
            output,
            flap,
            point,
            crash,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    fn play(&self, samples: &[f32]) {
        let Some(output) = &self.output else { return };
        let source = SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec());
        if let Err(e) = output.handle.play_raw(source) {
            debug!("sound dropped: {e}");
        }
    }

    pub fn flap(&self) {
        self.play(&self.flap);
    }

    pub fn point(&self) {
        self.play(&self.point);
    }

    pub fn crash(&self) {
        self.play(&self.crash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_clamps() {
        assert_eq!(ramp(400.0, 80.0, 0.0, 0.4), 400.0);
        assert_eq!(ramp(400.0, 80.0, 0.2, 0.4), 240.0);
        assert_eq!(ramp(400.0, 80.0, 5.0, 0.4), 80.0);
    }

    #[test]
    fn test_effect_lengths() {
        assert_eq!(crash_samples().len(), 22050);
        assert_eq!(flap_samples().len(), 4410);
        assert_eq!(point_samples().len(), 7938);
    }

    #[test]
    fn test_effects_are_quiet_and_audible() {
        for samples in [crash_samples(), flap_samples(), point_samples()] {
            let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
            assert!(peak > 0.01, "effect is silent");
            assert!(peak <= 0.2, "effect too loud: {peak}");
        }
    }

    #[test]
    fn test_muted_is_silent_noop() {
        let sounds = Sounds::muted();
        assert!(!sounds.is_enabled());
        sounds.flap();
        sounds.point();
        sounds.crash();
    }
}
