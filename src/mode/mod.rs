//! Mode system with compile-time known mode variants
//!
//! All modes are stored in an enum to avoid heap allocations.
//! Each mode implements the `Mode` trait: `enter` resets the mode's
//! animation state to its canonical start, `update` advances the
//! animation and writes into the frame, `exit` zeroes the outputs the
//! mode owns. Exit hooks are idempotent.

mod auto;
mod candle;
mod color;
mod magic;

use embassy_time::Instant;

pub use auto::{AutoMode, SubModeId};
pub use candle::CandleMode;
pub use color::ColorMode;
pub use magic::MagicMode;

use crate::{LampConfig, channel::ChannelBank, color::Rgb, rand::SplitMix64};

const MODE_NAME_CANDLE: &str = "candle";
const MODE_NAME_COLOR: &str = "color";
const MODE_NAME_MAGIC: &str = "magic";
const MODE_NAME_AUTO: &str = "auto";

/// Mutable view of the engine-owned outputs handed to the active mode.
pub struct Frame<'a> {
    pub channels: &'a mut ChannelBank,
    pub pixels: &'a mut [Rgb],
}

pub trait Mode {
    /// Reset animation state to its canonical start and write the
    /// initial output
    fn enter(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>);

    /// Advance the animation and write into the frame
    fn update(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>);

    /// Zero the channels and pixels this mode owns
    fn exit(&mut self, frame: &mut Frame<'_>);
}

/// Mode slot - enum containing all possible modes
#[derive(Debug, Clone)]
pub enum ModeSlot {
    /// Flickering flame on the white/red channels
    Candle(CandleMode),
    /// Slow traveling rainbow wash on the strip
    Color(ColorMode),
    /// Pulsing purple/teal wash with full UV drive
    Magic(MagicMode),
    /// Meta-mode cycling among the other three
    Auto(AutoMode),
}

/// Known mode ids, in button-cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeId {
    Candle,
    Color,
    Magic,
    Auto,
}

impl ModeId {
    /// Next mode in the short-press cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Candle => Self::Color,
            Self::Color => Self::Magic,
            Self::Magic => Self::Auto,
            Self::Auto => Self::Candle,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candle => MODE_NAME_CANDLE,
            Self::Color => MODE_NAME_COLOR,
            Self::Magic => MODE_NAME_MAGIC,
            Self::Auto => MODE_NAME_AUTO,
        }
    }

    pub fn to_slot(self, config: LampConfig) -> ModeSlot {
        match self {
            Self::Candle => ModeSlot::Candle(CandleMode::new(config)),
            Self::Color => ModeSlot::Color(ColorMode::new()),
            Self::Magic => ModeSlot::Magic(MagicMode::new(config)),
            Self::Auto => ModeSlot::Auto(AutoMode::new(config)),
        }
    }
}

impl ModeSlot {
    /// Get the mode ID for external observation
    pub const fn id(&self) -> ModeId {
        match self {
            Self::Candle(_) => ModeId::Candle,
            Self::Color(_) => ModeId::Color,
            Self::Magic(_) => ModeId::Magic,
            Self::Auto(_) => ModeId::Auto,
        }
    }

    pub fn enter(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        match self {
            Self::Candle(mode) => mode.enter(now, rng, frame),
            Self::Color(mode) => mode.enter(now, rng, frame),
            Self::Magic(mode) => mode.enter(now, rng, frame),
            Self::Auto(mode) => mode.enter(now, rng, frame),
        }
    }

    pub fn update(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        match self {
            Self::Candle(mode) => mode.update(now, rng, frame),
            Self::Color(mode) => mode.update(now, rng, frame),
            Self::Magic(mode) => mode.update(now, rng, frame),
            Self::Auto(mode) => mode.update(now, rng, frame),
        }
    }

    pub fn exit(&mut self, frame: &mut Frame<'_>) {
        match self {
            Self::Candle(mode) => mode.exit(frame),
            Self::Color(mode) => mode.exit(frame),
            Self::Magic(mode) => mode.exit(frame),
            Self::Auto(mode) => mode.exit(frame),
        }
    }
}
