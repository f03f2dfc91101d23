//! Candle mode
//!
//! Flickering flame on the two white channels and the red channel,
//! modeled as two weather states. While calm the per-channel target
//! takes a small random walk around its base brightness; while
//! disturbed it jumps anywhere within a third of the base. The live
//! duty chases the target with an exponential blend, faster while
//! disturbed. The UV channel is forced off.

use embassy_time::{Duration, Instant};

use super::{Frame, Mode};
use crate::{
    LampConfig,
    channel::PwmChannel,
    math8::{blend8, percent8},
    rand::SplitMix64,
};

/// Minimum spacing between animation steps (~60 Hz).
const UPDATE_INTERVAL: Duration = Duration::from_millis(16);

const CALM_DWELL_MS: (u64, u64) = (3000, 8000);
const DISTURBED_DWELL_MS: (u64, u64) = (500, 1500);

/// Random-walk step bound while calm.
const CALM_STEP: i32 = 8;
/// Target band around the base while calm.
const CALM_BAND: i32 = 15;

const FLAME_CHANNELS: [PwmChannel; 3] =
    [PwmChannel::White1, PwmChannel::White2, PwmChannel::Red];

/// Calm-base brightness of each flame channel, percent of the ceiling.
const FLAME_BASE_PERCENT: [u8; 3] = [75, 72, 35];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Weather {
    Calm,
    Disturbed,
}

#[derive(Debug, Clone, Copy)]
struct Flame {
    base: u8,
    target: u8,
    current: u8,
}

#[derive(Debug, Clone)]
pub struct CandleMode {
    weather: Weather,
    weather_deadline: Instant,
    last_update: Instant,
    flames: [Flame; 3],
    ceiling: u8,
    calm_blend: u8,
    disturbed_blend: u8,
}

impl CandleMode {
    pub fn new(config: LampConfig) -> Self {
        let flames = FLAME_BASE_PERCENT.map(|percent| {
            let base = percent8(config.max_brightness, percent);
            Flame {
                base,
                target: base,
                current: base,
            }
        });
        Self {
            weather: Weather::Calm,
            weather_deadline: Instant::from_millis(0),
            last_update: Instant::from_millis(0),
            flames,
            ceiling: config.max_brightness,
            calm_blend: config.calm_blend,
            disturbed_blend: config.disturbed_blend,
        }
    }

    fn advance_weather(&mut self, now: Instant, rng: &mut SplitMix64) {
        if now < self.weather_deadline {
            return;
        }
        let (state, dwell) = match self.weather {
            Weather::Calm => (Weather::Disturbed, DISTURBED_DWELL_MS),
            Weather::Disturbed => (Weather::Calm, CALM_DWELL_MS),
        };
        self.weather = state;
        self.weather_deadline = now + Duration::from_millis(rng.range(dwell.0, dwell.1));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn step_flame(flame: &mut Flame, weather: Weather, ceiling: u8, rng: &mut SplitMix64) {
        let base = i32::from(flame.base);
        let target = match weather {
            Weather::Calm => {
                let walked = i32::from(flame.target) + rng.jitter(CALM_STEP);
                walked.clamp(base - CALM_BAND, base + CALM_BAND)
            }
            Weather::Disturbed => {
                let span = base / 3;
                base + rng.jitter(span)
            }
        };
        flame.target = target.clamp(0, i32::from(ceiling)) as u8;
    }

    fn blend_speed(&self) -> u8 {
        match self.weather {
            Weather::Calm => self.calm_blend,
            Weather::Disturbed => self.disturbed_blend,
        }
    }

    fn write_channels(&self, frame: &mut Frame<'_>) {
        for (flame, channel) in self.flames.iter().zip(FLAME_CHANNELS) {
            frame.channels.set(channel, flame.current);
        }
        frame.channels.set(PwmChannel::Uv, 0);
    }
}

impl Mode for CandleMode {
    fn enter(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        self.weather = Weather::Calm;
        self.weather_deadline =
            now + Duration::from_millis(rng.range(CALM_DWELL_MS.0, CALM_DWELL_MS.1));
        self.last_update = now;
        for flame in &mut self.flames {
            flame.target = flame.base;
            flame.current = flame.base;
        }
        self.write_channels(frame);
    }

    fn update(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        if now - self.last_update < UPDATE_INTERVAL {
            return;
        }
        self.last_update = now;

        self.advance_weather(now, rng);

        let speed = self.blend_speed();
        for flame in &mut self.flames {
            Self::step_flame(flame, self.weather, self.ceiling, rng);
            flame.current = blend8(flame.current, flame.target, speed);
        }
        self.write_channels(frame);
    }

    fn exit(&mut self, frame: &mut Frame<'_>) {
        for channel in FLAME_CHANNELS {
            frame.channels.set(channel, 0);
        }
        frame.channels.set(PwmChannel::Uv, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelBank;
    use crate::color::Rgb;

    fn simulate(seed: u64, minutes: u64, mut check: impl FnMut(&CandleMode)) {
        let config = LampConfig::default();
        let mut mode = CandleMode::new(config);
        let mut rng = SplitMix64::new(seed);
        let mut channels = ChannelBank::new();
        let mut pixels = [Rgb::default(); 4];
        let mut frame = Frame {
            channels: &mut channels,
            pixels: &mut pixels,
        };
        mode.enter(Instant::from_millis(0), &mut rng, &mut frame);
        let ticks = minutes * 60 * 1000 / 20;
        for i in 1..=ticks {
            mode.update(Instant::from_millis(i * 20), &mut rng, &mut frame);
            check(&mode);
        }
    }

    #[test]
    fn calm_targets_stay_in_band() {
        simulate(1, 5, |mode| {
            if mode.weather != Weather::Calm {
                return;
            }
            for flame in &mode.flames {
                let base = i32::from(flame.base);
                let target = i32::from(flame.target);
                assert!(
                    (base - CALM_BAND..=base + CALM_BAND).contains(&target),
                    "calm target {target} out of band around {base}"
                );
            }
        });
    }

    #[test]
    fn disturbed_targets_stay_in_band() {
        simulate(2, 5, |mode| {
            if mode.weather != Weather::Disturbed {
                return;
            }
            for flame in &mode.flames {
                let base = i32::from(flame.base);
                let span = base / 3;
                let target = i32::from(flame.target);
                assert!(
                    (base - span..=base + span).contains(&target),
                    "disturbed target {target} out of band around {base}"
                );
            }
        });
    }

    #[test]
    fn current_never_exceeds_ceiling() {
        let ceiling = LampConfig::default().max_brightness;
        simulate(3, 5, |mode| {
            for flame in &mode.flames {
                assert!(flame.current <= ceiling);
            }
        });
    }

    #[test]
    fn enter_writes_calm_bases_and_zero_uv() {
        let config = LampConfig::default();
        let mut mode = CandleMode::new(config);
        let mut rng = SplitMix64::new(9);
        let mut channels = ChannelBank::new();
        let mut pixels = [Rgb::default(); 4];
        let mut frame = Frame {
            channels: &mut channels,
            pixels: &mut pixels,
        };
        mode.enter(Instant::from_millis(0), &mut rng, &mut frame);

        assert_eq!(
            channels.get(PwmChannel::White1),
            percent8(config.max_brightness, 75)
        );
        assert_eq!(
            channels.get(PwmChannel::White2),
            percent8(config.max_brightness, 72)
        );
        assert_eq!(
            channels.get(PwmChannel::Red),
            percent8(config.max_brightness, 35)
        );
        assert_eq!(channels.get(PwmChannel::Uv), 0);
    }

    #[test]
    fn update_is_throttled_to_sixteen_millis() {
        let config = LampConfig::default();
        let mut mode = CandleMode::new(config);
        let mut rng = SplitMix64::new(5);
        let mut channels = ChannelBank::new();
        let mut pixels = [Rgb::default(); 4];
        let mut frame = Frame {
            channels: &mut channels,
            pixels: &mut pixels,
        };
        mode.enter(Instant::from_millis(0), &mut rng, &mut frame);
        let before = mode.flames;
        mode.update(Instant::from_millis(10), &mut rng, &mut frame);
        for (a, b) in mode.flames.iter().zip(before) {
            assert_eq!(a.target, b.target);
            assert_eq!(a.current, b.current);
        }
    }
}
