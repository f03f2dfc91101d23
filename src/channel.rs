//! PWM channel identifiers and the engine-owned duty bank.
//!
//! The lamp drives four monochrome LED channels: two warm whites, one
//! red and one ultraviolet. Channel init parameters are published here
//! as constants so platform code can configure its PWM peripheral.

/// PWM carrier frequency for all four channels.
pub const PWM_FREQUENCY_HZ: u32 = 5000;

/// PWM duty resolution in bits.
pub const PWM_RESOLUTION_BITS: u8 = 8;

/// Highest representable duty value at the configured resolution.
pub const MAX_DUTY: u8 = ((1u16 << PWM_RESOLUTION_BITS) - 1) as u8;

/// Identifier of one monochrome PWM channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum PwmChannel {
    White1 = 0,
    White2 = 1,
    Red = 2,
    Uv = 3,
}

impl PwmChannel {
    pub const COUNT: usize = 4;

    /// All channels in bank order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::White1, Self::White2, Self::Red, Self::Uv];
}

/// Duty values for all four PWM channels, keyed by [`PwmChannel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelBank {
    duties: [u8; PwmChannel::COUNT],
}

impl ChannelBank {
    pub const fn new() -> Self {
        Self {
            duties: [0; PwmChannel::COUNT],
        }
    }

    #[inline]
    pub const fn set(&mut self, channel: PwmChannel, duty: u8) {
        self.duties[channel as usize] = duty;
    }

    #[inline]
    pub const fn get(&self, channel: PwmChannel) -> u8 {
        self.duties[channel as usize]
    }

    /// Force every channel to zero.
    pub const fn clear(&mut self) {
        self.duties = [0; PwmChannel::COUNT];
    }

    pub const fn duties(&self) -> &[u8; PwmChannel::COUNT] {
        &self.duties
    }
}
