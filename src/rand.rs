//! Deterministic pseudo-random number generator
//!
//! SplitMix64: one `u64` of state, good enough mixing for animation
//! jitter, and fully reproducible under test with a fixed seed. The
//! platform seeds it once from hardware entropy at engine construction.

/// SplitMix64 generator
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform value in `[min, max_exclusive)`
    ///
    /// An empty range degrades to `min` instead of panicking.
    pub fn range(&mut self, min: u64, max_exclusive: u64) -> u64 {
        debug_assert!(min < max_exclusive);
        if min >= max_exclusive {
            return min;
        }
        min + self.next_u64() % (max_exclusive - min)
    }

    /// Uniform signed value in `[-amplitude, amplitude]`
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn jitter(&mut self, amplitude: i32) -> i32 {
        if amplitude <= 0 {
            return 0;
        }
        let span = u64::from(amplitude.unsigned_abs()) * 2 + 1;
        self.range(0, span) as i32 - amplitude
    }
}
