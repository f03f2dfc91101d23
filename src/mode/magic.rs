//! Magic mode
//!
//! Pulsing purple/teal wash on the strip with the UV channel pinned at
//! its absolute maximum drive (deliberately ignoring the shared
//! ceiling) and the red channel at 70% of the ceiling. A phase
//! accumulator sweeps 0..=255 and flips direction on every wrap; hue
//! slides between the two endpoints as the phase advances, with small
//! per-pixel sine offsets on hue and brightness.

use embassy_time::{Duration, Instant};
use libm::sinf;

use super::{Frame, Mode};
use crate::{
    LampConfig,
    channel::{MAX_DUTY, PwmChannel},
    color::{Hsv, Rgb, hsv2rgb},
    math8::percent8,
    rand::SplitMix64,
};

/// Minimum spacing between animation steps (~30 Hz).
const UPDATE_INTERVAL: Duration = Duration::from_millis(33);

/// Phase advance per step; one full sweep every ~4.2 s.
const PHASE_STEP: u8 = 2;

/// Peak of the sine-derived brightness pulse.
const PULSE_MAX: f32 = 150.0;

/// Hue endpoints of the sweep (purple and teal on the 0-255 wheel).
const HUE_PURPLE: f32 = 192.0;
const HUE_TEAL: f32 = 128.0;

/// Per-pixel offset amplitudes.
const HUE_WAVE: f32 = 6.0;
const BRIGHTNESS_WAVE: f32 = 20.0;

const RED_PERCENT: u8 = 70;

#[derive(Debug, Clone)]
pub struct MagicMode {
    phase: u8,
    forward: bool,
    last_update: Instant,
    red_duty: u8,
}

impl MagicMode {
    pub fn new(config: LampConfig) -> Self {
        Self {
            phase: 0,
            forward: true,
            last_update: Instant::from_millis(0),
            red_duty: percent8(config.max_brightness, RED_PERCENT),
        }
    }

    fn write_channels(&self, frame: &mut Frame<'_>) {
        frame.channels.set(PwmChannel::White1, 0);
        frame.channels.set(PwmChannel::White2, 0);
        frame.channels.set(PwmChannel::Red, self.red_duty);
        frame.channels.set(PwmChannel::Uv, MAX_DUTY);
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn render(&self, pixels: &mut [Rgb]) {
        let phase = f32::from(self.phase);
        let pulse = sinf(core::f32::consts::PI * phase / 255.0);
        let brightness = pulse * PULSE_MAX;

        let travel = phase * (HUE_PURPLE - HUE_TEAL) / 255.0;
        let base_hue = if self.forward {
            HUE_PURPLE - travel
        } else {
            HUE_TEAL + travel
        };

        for (i, pixel) in pixels.iter_mut().enumerate() {
            let wave = sinf(phase * 0.05 + i as f32 * 0.6);
            let hue = (base_hue + wave * HUE_WAVE).clamp(0.0, 255.0) as u8;
            let val = (brightness + wave * BRIGHTNESS_WAVE).clamp(0.0, 255.0) as u8;
            *pixel = hsv2rgb(Hsv {
                hue,
                sat: 255,
                val,
            });
        }
    }
}

impl Mode for MagicMode {
    fn enter(&mut self, now: Instant, _rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        self.phase = 0;
        self.forward = true;
        self.last_update = now;
        self.write_channels(frame);
        self.render(frame.pixels);
    }

    fn update(&mut self, now: Instant, _rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        if now - self.last_update < UPDATE_INTERVAL {
            return;
        }
        self.last_update = now;

        let (advanced, wrapped) = self.phase.overflowing_add(PHASE_STEP);
        if wrapped {
            self.phase = 0;
            self.forward = !self.forward;
        } else {
            self.phase = advanced;
        }

        self.write_channels(frame);
        self.render(frame.pixels);
    }

    fn exit(&mut self, frame: &mut Frame<'_>) {
        frame.channels.set(PwmChannel::White1, 0);
        frame.channels.set(PwmChannel::White2, 0);
        frame.channels.set(PwmChannel::Red, 0);
        frame.channels.set(PwmChannel::Uv, 0);
        frame.pixels.fill(Rgb::default());
    }
}
