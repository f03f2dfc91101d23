//! Push-button edge detection
//!
//! The lamp's only input is a single push-button. The platform samples
//! the pin at the loop cadence (one sample per ~20 ms) and feeds the
//! logical pressed state here; the active-low pin inversion happens in
//! platform code. Contact bounce is handled with a fixed dead-time
//! between press edges rather than a filter, which is enough at the
//! sampling cadence involved.

use embassy_time::{Duration, Instant};

/// Held durations below this emit [`ButtonEvent::ShortPress`], at or
/// above it [`ButtonEvent::LongPress`].
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(3000);

/// A new press within this window of the previous one is ignored.
pub const DEAD_TIME: Duration = Duration::from_millis(200);

/// Event derived from consecutive button samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Button went down; carries the press timestamp
    PressStart(Instant),
    /// Button released before the long-press threshold; carries held time
    ShortPress(Duration),
    /// Button released at or past the long-press threshold
    LongPress(Duration),
}

#[derive(Debug, Clone, Copy)]
enum DebounceState {
    Idle,
    Pressed { since: Instant },
}

/// Two-state debouncer turning raw samples into [`ButtonEvent`]s.
///
/// Releases always resolve the open press; only press edges are gated
/// by the dead-time, so even a very short tap still produces its
/// `ShortPress`.
#[derive(Debug)]
pub struct ButtonDebouncer {
    state: DebounceState,
    last_press: Option<Instant>,
}

impl Default for ButtonDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonDebouncer {
    pub const fn new() -> Self {
        Self {
            state: DebounceState::Idle,
            last_press: None,
        }
    }

    /// Feed one sample; emits at most one event per call.
    ///
    /// `pressed` is the logical state (true while the button is held).
    pub fn sample(&mut self, pressed: bool, now: Instant) -> Option<ButtonEvent> {
        match self.state {
            DebounceState::Idle if pressed => {
                if let Some(edge) = self.last_press {
                    if now - edge < DEAD_TIME {
                        return None;
                    }
                }
                self.state = DebounceState::Pressed { since: now };
                self.last_press = Some(now);
                Some(ButtonEvent::PressStart(now))
            }
            DebounceState::Pressed { since } if !pressed => {
                let held = now - since;
                self.state = DebounceState::Idle;
                if held < LONG_PRESS_THRESHOLD {
                    Some(ButtonEvent::ShortPress(held))
                } else {
                    Some(ButtonEvent::LongPress(held))
                }
            }
            _ => None,
        }
    }
}
