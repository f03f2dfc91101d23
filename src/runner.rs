//! Polling loop driver
//!
//! Portable loop pacing without async/await or platform timers: the
//! platform calls `tick` with the current time and the logical button
//! sample, and is responsible for sleeping until the returned deadline.
//! One tick samples the debouncer, advances the engine and flushes the
//! frame through the output driver.

use embassy_time::{Duration, Instant};

use crate::{
    LampEngine, OutputDriver,
    button::ButtonDebouncer,
    channel::PwmChannel,
};

/// Target loop cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Result of one loop tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Polling loop driver over an engine and an output driver.
pub struct LampRunner<O: OutputDriver, const PIXELS: usize> {
    output: O,
    engine: LampEngine<PIXELS>,
    debouncer: ButtonDebouncer,
    next_tick: Instant,
}

impl<O: OutputDriver, const PIXELS: usize> LampRunner<O, PIXELS> {
    pub fn new(engine: LampEngine<PIXELS>, driver: O) -> Self {
        Self {
            output: driver,
            engine,
            debouncer: ButtonDebouncer::new(),
            next_tick: Instant::from_millis(0),
        }
    }

    /// Process one loop iteration and return timing information.
    ///
    /// `button_pressed` is the logical button state for this sample.
    /// The caller waits until `next_deadline` before calling again.
    pub fn tick(&mut self, now: Instant, button_pressed: bool) -> TickResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // instead of replaying the backlog.
        let max_drift = Duration::from_millis(TICK_INTERVAL.as_millis() * 2);
        if now.as_millis() > self.next_tick.as_millis() + max_drift.as_millis() {
            self.next_tick = now;
        }

        if let Some(event) = self.debouncer.sample(button_pressed, now) {
            self.engine.handle_event(event, now);
        }
        self.engine.tick(now);

        for channel in PwmChannel::ALL {
            self.output
                .write_channel(channel, self.engine.channels().get(channel));
        }
        self.output.write_strip(self.engine.pixels());
        self.output.present();

        self.next_tick += TICK_INTERVAL;

        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    /// Get a reference to the engine.
    pub const fn engine(&self) -> &LampEngine<PIXELS> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub const fn engine_mut(&mut self) -> &mut LampEngine<PIXELS> {
        &mut self.engine
    }
}
