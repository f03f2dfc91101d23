#![no_std]

pub mod button;
pub mod channel;
pub mod color;
pub mod engine;
pub mod math8;
pub mod mode;
pub mod rand;
pub mod runner;

pub use button::{ButtonDebouncer, ButtonEvent};
pub use channel::{ChannelBank, PwmChannel};
pub use engine::LampEngine;
pub use mode::{Mode, ModeId, ModeSlot};
pub use runner::{LampRunner, TickResult};

pub use color::{Hsv, Rgb};
pub use rand::SplitMix64;
pub use embassy_time::{Duration, Instant};

/// Number of pixels on the device strip.
pub const STRIP_LENGTH: usize = 20;

/// Abstract lamp output driver
///
/// Implement this trait to support different hardware platforms.
/// The engine writes four PWM duty channels and one RGB strip;
/// `present` latches the strip buffer into the hardware.
pub trait OutputDriver {
    /// Write a PWM duty value to one channel
    fn write_channel(&mut self, channel: PwmChannel, duty: u8);
    /// Write colors to the LED strip
    fn write_strip(&mut self, pixels: &[Rgb]);
    /// Latch the written strip buffer
    fn present(&mut self);
}

/// Configuration for the lamp engine
///
/// Defaults are the most evolved hardware revision's values; earlier
/// revisions (15% ceiling, single-speed blend) stay expressible through
/// the same fields.
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    /// Shared brightness ceiling for the flame channels (duty, 0-255)
    pub max_brightness: u8,
    /// Flame smoothing speed while calm (0-255 blend amount per tick)
    pub calm_blend: u8,
    /// Flame smoothing speed while disturbed
    pub disturbed_blend: u8,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            // 30% of full 8-bit scale
            max_brightness: 76,
            calm_blend: 32,
            disturbed_blend: 64,
        }
    }
}
