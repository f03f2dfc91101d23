//! Auto mode
//!
//! Meta-mode that dwells on one of the three concrete generators and
//! hops to a uniformly random one (repeats allowed) when the dwell
//! interval expires. The sub-mode enum has no Auto variant, so the
//! meta-mode can never select itself. Sub-modes run under the same
//! enter/update/exit contract as top-level modes.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{CandleMode, ColorMode, Frame, MagicMode, Mode};
use crate::{LampConfig, rand::SplitMix64};

const DWELL_MS: (u64, u64) = (30_000, 180_000);

/// Identifier of an Auto sub-mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubModeId {
    Candle,
    Color,
    Magic,
}

impl SubModeId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candle => "candle",
            Self::Color => "color",
            Self::Magic => "magic",
        }
    }

    fn to_slot(self, config: LampConfig) -> SubSlot {
        match self {
            Self::Candle => SubSlot::Candle(CandleMode::new(config)),
            Self::Color => SubSlot::Color(ColorMode::new()),
            Self::Magic => SubSlot::Magic(MagicMode::new(config)),
        }
    }
}

#[derive(Debug, Clone)]
enum SubSlot {
    Candle(CandleMode),
    Color(ColorMode),
    Magic(MagicMode),
}

impl SubSlot {
    const fn id(&self) -> SubModeId {
        match self {
            Self::Candle(_) => SubModeId::Candle,
            Self::Color(_) => SubModeId::Color,
            Self::Magic(_) => SubModeId::Magic,
        }
    }

    fn enter(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        match self {
            Self::Candle(mode) => mode.enter(now, rng, frame),
            Self::Color(mode) => mode.enter(now, rng, frame),
            Self::Magic(mode) => mode.enter(now, rng, frame),
        }
    }

    fn update(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        match self {
            Self::Candle(mode) => mode.update(now, rng, frame),
            Self::Color(mode) => mode.update(now, rng, frame),
            Self::Magic(mode) => mode.update(now, rng, frame),
        }
    }

    fn exit(&mut self, frame: &mut Frame<'_>) {
        match self {
            Self::Candle(mode) => mode.exit(frame),
            Self::Color(mode) => mode.exit(frame),
            Self::Magic(mode) => mode.exit(frame),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoMode {
    active: SubSlot,
    switch_deadline: Instant,
    config: LampConfig,
}

impl AutoMode {
    pub fn new(config: LampConfig) -> Self {
        Self {
            active: SubSlot::Candle(CandleMode::new(config)),
            switch_deadline: Instant::from_millis(0),
            config,
        }
    }

    /// Sub-mode currently running under the scheduler.
    pub const fn active_sub(&self) -> SubModeId {
        self.active.id()
    }

    fn draw_deadline(now: Instant, rng: &mut SplitMix64) -> Instant {
        now + Duration::from_millis(rng.range(DWELL_MS.0, DWELL_MS.1))
    }

    fn pick_sub(rng: &mut SplitMix64) -> SubModeId {
        match rng.range(0, 3) {
            0 => SubModeId::Candle,
            1 => SubModeId::Color,
            _ => SubModeId::Magic,
        }
    }

    fn switch(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        self.active.exit(frame);
        let next = Self::pick_sub(rng);
        #[cfg(feature = "esp32-log")]
        println!("[AutoMode] switching to {}", next.as_str());
        self.active = next.to_slot(self.config);
        self.active.enter(now, rng, frame);
        self.switch_deadline = Self::draw_deadline(now, rng);
    }
}

impl Mode for AutoMode {
    fn enter(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        self.active = SubSlot::Candle(CandleMode::new(self.config));
        self.active.enter(now, rng, frame);
        self.switch_deadline = Self::draw_deadline(now, rng);
    }

    fn update(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        if now >= self.switch_deadline {
            self.switch(now, rng, frame);
        }
        self.active.update(now, rng, frame);
    }

    fn exit(&mut self, frame: &mut Frame<'_>) {
        self.active.exit(frame);
    }
}
