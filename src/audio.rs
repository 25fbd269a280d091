//! Audio system
//!
//! Procedurally generated sound cues - no external files needed!
//! Each cue is a short list of tones; a `ToneBackend` turns tones into sound
//! (Web Audio oscillators in the browser).

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Target found
    Success,
    /// Clutter clicked
    Error,
    /// Level cleared
    Fanfare,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// How a parameter moves toward its end value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Linear,
    Exponential,
}

/// One oscillator note with a gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Seconds after the cue starts
    pub offset: f64,
    /// Seconds
    pub duration: f64,
    /// Start frequency (Hz)
    pub freq: f32,
    /// Exponential sweep target, if the pitch moves
    pub freq_end: Option<f32>,
    pub gain: f32,
    pub gain_end: f32,
    pub envelope: Ramp,
}

impl Tone {
    /// Same tone, louder or quieter
    pub fn scaled(mut self, volume: f32) -> Self {
        self.gain *= volume;
        self.gain_end *= volume;
        // Exponential ramps can't reach zero
        if self.envelope == Ramp::Exponential {
            self.gain = self.gain.max(1e-4);
            self.gain_end = self.gain_end.max(1e-4);
        }
        self
    }

    /// Time the tone stops, relative to the cue start
    pub fn end(&self) -> f64 {
        self.offset + self.duration
    }
}

fn note(freq: f32, offset: f64, duration: f64) -> Tone {
    Tone {
        waveform: Waveform::Triangle,
        offset,
        duration,
        freq,
        freq_end: None,
        gain: 0.1,
        gain_end: 0.01,
        envelope: Ramp::Exponential,
    }
}

/// Tones making up a cue
pub fn cue_tones(cue: SoundCue) -> Vec<Tone> {
    match cue {
        // Descending A5 -> A4 blip
        SoundCue::Success => vec![Tone {
            waveform: Waveform::Sine,
            offset: 0.0,
            duration: 0.1,
            freq: 880.0,
            freq_end: Some(440.0),
            gain: 0.1,
            gain_end: 0.01,
            envelope: Ramp::Exponential,
        }],
        // Low A2 buzz
        SoundCue::Error => vec![Tone {
            waveform: Waveform::Square,
            offset: 0.0,
            duration: 0.2,
            freq: 110.0,
            freq_end: None,
            gain: 0.05,
            gain_end: 0.0,
            envelope: Ramp::Linear,
        }],
        // C5 E5 G5 arpeggio
        SoundCue::Fanfare => vec![
            note(523.25, 0.0, 0.1),
            note(659.25, 0.1, 0.1),
            note(783.99, 0.2, 0.3),
        ],
    }
}

/// Tone synthesis capability
pub trait ToneBackend {
    /// Acquire (first use) and wake the output. False when audio is unavailable.
    fn ensure_ready(&mut self) -> bool;
    /// Start a tone relative to now
    fn schedule(&mut self, tone: &Tone);
}

/// Backend that never makes a sound
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl ToneBackend for SilentBackend {
    fn ensure_ready(&mut self) -> bool {
        false
    }

    fn schedule(&mut self, _tone: &Tone) {}
}

/// Sound engine for the game
pub struct SoundEngine<B: ToneBackend> {
    backend: B,
    volume: f32,
    muted: bool,
}

impl<B: ToneBackend> SoundEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Play a cue (fire-and-forget, overlapping cues are fine)
    pub fn play(&mut self, cue: SoundCue) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        if !self.backend.ensure_ready() {
            return;
        }
        for tone in cue_tones(cue) {
            self.backend.schedule(&tone.scaled(self.volume));
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{Ramp, Tone, ToneBackend, Waveform};

    /// Web Audio backend. The context is created lazily because browsers
    /// only allow audio after a user gesture.
    #[derive(Default)]
    pub struct WebAudioBackend {
        ctx: Option<AudioContext>,
        unavailable: bool,
    }

    impl WebAudioBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl ToneBackend for WebAudioBackend {
        fn ensure_ready(&mut self) -> bool {
            if self.unavailable {
                return false;
            }
            if self.ctx.is_none() {
                match AudioContext::new() {
                    Ok(ctx) => {
                        log::info!("AudioContext created");
                        self.ctx = Some(ctx);
                    }
                    Err(e) => {
                        log::warn!("Failed to create AudioContext - audio disabled: {:?}", e);
                        self.unavailable = true;
                        return false;
                    }
                }
            }
            let Some(ctx) = &self.ctx else { return false };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            true
        }

        fn schedule(&mut self, tone: &Tone) {
            let Some(ctx) = &self.ctx else { return };
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.offset;
            let end = t + tone.duration;

            osc.frequency().set_value_at_time(tone.freq, t).ok();
            if let Some(freq_end) = tone.freq_end {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(freq_end, end)
                    .ok();
            }

            gain.gain().set_value_at_time(tone.gain, t).ok();
            match tone.envelope {
                Ramp::Exponential => gain
                    .gain()
                    .exponential_ramp_to_value_at_time(tone.gain_end, end)
                    .ok(),
                Ramp::Linear => gain
                    .gain()
                    .linear_ramp_to_value_at_time(tone.gain_end, end)
                    .ok(),
            };

            osc.start_with_when(t).ok();
            osc.stop_with_when(end).ok();
        }
    }

    impl Drop for WebAudioBackend {
        fn drop(&mut self) {
            if let Some(ctx) = self.ctx.take() {
                let _ = ctx.close();
            }
        }
    }
}

/// Test double recording every backend call
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub ready_calls: usize,
    pub tones: Vec<Tone>,
    pub fail: bool,
}

#[cfg(test)]
impl ToneBackend for RecordingBackend {
    fn ensure_ready(&mut self) -> bool {
        self.ready_calls += 1;
        !self.fail
    }

    fn schedule(&mut self, tone: &Tone) {
        self.tones.push(*tone);
    }
}
