//! Color mode
//!
//! Slow rainbow wash traveling along the strip. The current hue walks
//! a full wheel every two minutes; every 150 ms it is pushed into a
//! circular history, and each pixel reads the history one step behind
//! its neighbor, so hue changes ripple outward. A final pass blends
//! each pixel with 15% of each neighbor to soften the steps.

use embassy_time::{Duration, Instant};

use super::{Frame, Mode};
use crate::{
    STRIP_LENGTH,
    color::{Hsv, Rgb, hsv2rgb},
    math8::scale8,
    rand::SplitMix64,
};

/// Extra history slots beyond the strip length.
const HISTORY_MARGIN: usize = 5;
const HISTORY_CAPACITY: usize = STRIP_LENGTH + HISTORY_MARGIN;

/// One full hue cycle.
const CYCLE: Duration = Duration::from_secs(120);

const UPDATE_INTERVAL: Duration = Duration::from_millis(50);
const PUSH_INTERVAL: Duration = Duration::from_millis(150);

const SATURATION: u8 = 255;
const VALUE: u8 = 200;

/// Per-pixel hue jitter bound.
const HUE_JITTER: i32 = 3;

/// Smoothing weights: 70% own color, 15% per neighbor.
const SELF_WEIGHT: u8 = 178;
const NEIGHBOR_WEIGHT: u8 = 38;

#[derive(Debug, Clone)]
pub struct ColorMode {
    history: [u8; HISTORY_CAPACITY],
    cursor: usize,
    entered_at: Instant,
    last_update: Instant,
    last_push: Instant,
    current_hue: u8,
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorMode {
    pub fn new() -> Self {
        Self {
            history: [0; HISTORY_CAPACITY],
            cursor: 0,
            entered_at: Instant::from_millis(0),
            last_update: Instant::from_millis(0),
            last_push: Instant::from_millis(0),
            current_hue: 0,
        }
    }

    /// Hue for the pixel at `index`, lagging one history step per pixel.
    fn lagged_hue(&self, index: usize) -> u8 {
        let offset = index % HISTORY_CAPACITY;
        let slot = (self.cursor + HISTORY_CAPACITY - offset) % HISTORY_CAPACITY;
        self.history[slot]
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, rng: &mut SplitMix64, pixels: &mut [Rgb]) {
        for (i, pixel) in pixels.iter_mut().enumerate() {
            let hue = self
                .lagged_hue(i)
                .wrapping_add_signed(rng.jitter(HUE_JITTER) as i8);
            *pixel = hsv2rgb(Hsv {
                hue,
                sat: SATURATION,
                val: VALUE,
            });
        }
        smooth(pixels);
    }
}

/// One in-place smoothing pass over pre-blend colors.
///
/// Edge pixels substitute their own color for the missing neighbor.
fn smooth(pixels: &mut [Rgb]) {
    if pixels.is_empty() {
        return;
    }
    let mut prev_original = pixels[0];
    for i in 0..pixels.len() {
        let original = pixels[i];
        let left = if i == 0 { original } else { prev_original };
        let right = if i + 1 < pixels.len() {
            pixels[i + 1]
        } else {
            original
        };
        pixels[i] = blend_neighbors(original, left, right);
        prev_original = original;
    }
}

fn blend_neighbors(own: Rgb, left: Rgb, right: Rgb) -> Rgb {
    let mix = |own: u8, left: u8, right: u8| {
        scale8(own, SELF_WEIGHT)
            .saturating_add(scale8(left, NEIGHBOR_WEIGHT))
            .saturating_add(scale8(right, NEIGHBOR_WEIGHT))
    };
    Rgb {
        r: mix(own.r, left.r, right.r),
        g: mix(own.g, left.g, right.g),
        b: mix(own.b, left.b, right.b),
    }
}

impl Mode for ColorMode {
    #[allow(clippy::cast_possible_truncation)]
    fn enter(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        let start_hue = rng.range(0, 256) as u8;
        self.history = [start_hue; HISTORY_CAPACITY];
        self.cursor = 0;
        self.entered_at = now;
        self.last_update = now;
        self.last_push = now;
        self.current_hue = 0;
        self.render(rng, frame.pixels);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn update(&mut self, now: Instant, rng: &mut SplitMix64, frame: &mut Frame<'_>) {
        if now - self.last_update < UPDATE_INTERVAL {
            return;
        }
        self.last_update = now;

        let elapsed_ms = (now - self.entered_at).as_millis();
        self.current_hue = ((elapsed_ms % CYCLE.as_millis()) * 255 / CYCLE.as_millis()) as u8;

        if now - self.last_push >= PUSH_INTERVAL {
            self.history[self.cursor] = self.current_hue;
            self.cursor = (self.cursor + 1) % HISTORY_CAPACITY;
            self.last_push = now;
        }

        self.render(rng, frame.pixels);
    }

    fn exit(&mut self, frame: &mut Frame<'_>) {
        frame.pixels.fill(Rgb::default());
    }
}
