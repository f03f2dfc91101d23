//! Lamp engine - the mode state machine
//!
//! Owns the power state, the active mode slot, the PRNG and the output
//! frame (four PWM duties plus the strip pixels). Button events drive
//! mode cycling and power toggling; `tick` advances the active
//! generator while powered on.

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    LampConfig,
    button::ButtonEvent,
    channel::ChannelBank,
    color::Rgb,
    mode::{Frame, ModeId, ModeSlot},
    rand::SplitMix64,
};

/// Mode state machine and frame owner.
///
/// `PIXELS` is the strip length; the device value is
/// [`crate::STRIP_LENGTH`].
pub struct LampEngine<const PIXELS: usize> {
    config: LampConfig,
    rng: SplitMix64,
    powered: bool,
    mode: ModeSlot,
    last_active: ModeId,
    channels: ChannelBank,
    pixels: [Rgb; PIXELS],
}

impl<const PIXELS: usize> LampEngine<PIXELS> {
    /// Create the engine powered on in Candle mode.
    ///
    /// `seed` comes from platform entropy; a fixed seed makes every
    /// animation reproducible.
    pub fn new(config: LampConfig, seed: u64, now: Instant) -> Self {
        let mut engine = Self {
            config,
            rng: SplitMix64::new(seed),
            powered: true,
            mode: ModeId::Candle.to_slot(config),
            last_active: ModeId::Candle,
            channels: ChannelBank::new(),
            pixels: [Rgb::default(); PIXELS],
        };
        let mut frame = Frame {
            channels: &mut engine.channels,
            pixels: &mut engine.pixels,
        };
        engine.mode.enter(now, &mut engine.rng, &mut frame);
        engine
    }

    /// Apply one button event to the state machine.
    pub fn handle_event(&mut self, event: ButtonEvent, now: Instant) {
        match event {
            ButtonEvent::PressStart(_) => {}
            ButtonEvent::ShortPress(_) => {
                if self.powered {
                    self.cycle_mode(now);
                } else {
                    self.power_on(now);
                }
            }
            ButtonEvent::LongPress(_) => self.power_off(),
        }
    }

    /// Advance the active generator; a no-op while powered off.
    pub fn tick(&mut self, now: Instant) {
        if !self.powered {
            return;
        }
        let mut frame = Frame {
            channels: &mut self.channels,
            pixels: &mut self.pixels,
        };
        self.mode.update(now, &mut self.rng, &mut frame);
    }

    fn cycle_mode(&mut self, now: Instant) {
        let mut frame = Frame {
            channels: &mut self.channels,
            pixels: &mut self.pixels,
        };
        self.mode.exit(&mut frame);

        let next = self.mode.id().next();
        self.last_active = next;
        #[cfg(feature = "esp32-log")]
        println!("[LampEngine] mode {}", next.as_str());
        self.mode = next.to_slot(self.config);
        self.mode.enter(now, &mut self.rng, &mut frame);
    }

    fn power_on(&mut self, now: Instant) {
        self.powered = true;
        #[cfg(feature = "esp32-log")]
        println!("[LampEngine] power on, mode {}", self.last_active.as_str());
        self.mode = self.last_active.to_slot(self.config);
        let mut frame = Frame {
            channels: &mut self.channels,
            pixels: &mut self.pixels,
        };
        self.mode.enter(now, &mut self.rng, &mut frame);
    }

    /// Power off bypasses exit hooks and zeroes the whole frame.
    fn power_off(&mut self) {
        self.powered = false;
        self.channels.clear();
        self.pixels.fill(Rgb::default());
        #[cfg(feature = "esp32-log")]
        println!("[LampEngine] power off");
    }

    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    pub const fn mode_id(&self) -> ModeId {
        self.mode.id()
    }

    pub const fn mode(&self) -> &ModeSlot {
        &self.mode
    }

    pub const fn last_active(&self) -> ModeId {
        self.last_active
    }

    pub const fn channels(&self) -> &ChannelBank {
        &self.channels
    }

    pub const fn pixels(&self) -> &[Rgb; PIXELS] {
        &self.pixels
    }
}
