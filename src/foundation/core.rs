use std::time::Duration;

use crate::foundation::error::{BlinkmarkError, BlinkmarkResult};

/// Default blink frame rate, a reasonable compromise between smoothness
/// and per-variant memory cost.
pub const DEFAULT_FPS: u32 = 10;

/// Default length of one full blink cycle in milliseconds.
pub const DEFAULT_BLINK_PERIOD_MS: u32 = 2_000;

/// Timing configuration for one blinking marker.
///
/// The number of opacity variants is derived as
/// `blink_period_ms * fps / 2 / 1000` (integer floor): one half-cycle of
/// the blink period, sampled at `fps`. Both the variant icons and the
/// placed markers scale linearly with that product, so high frame rates
/// combined with long periods get expensive quickly.
///
/// The derived variant count is fixed for the lifetime of a controller;
/// changing fps or period means building a new controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlinkConfig {
    /// Visibility flips per second. Must be > 0.
    pub fps: u32,
    /// Full blink cycle length in milliseconds. Must be > 0.
    pub blink_period_ms: u32,
}

impl BlinkConfig {
    /// Build a validated configuration.
    pub fn new(fps: u32, blink_period_ms: u32) -> BlinkmarkResult<Self> {
        let config = Self {
            fps,
            blink_period_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants without consuming it.
    pub fn validate(&self) -> BlinkmarkResult<()> {
        if self.fps == 0 {
            return Err(BlinkmarkError::configuration("fps must be > 0"));
        }
        if self.blink_period_ms == 0 {
            return Err(BlinkmarkError::configuration("blink period must be > 0 ms"));
        }
        if self.variant_count() < 1 {
            return Err(BlinkmarkError::configuration(format!(
                "fps {} with blink period {} ms yields no opacity variants",
                self.fps, self.blink_period_ms
            )));
        }
        Ok(())
    }

    /// Number of opacity variants one half-cycle needs at this frame rate.
    pub fn variant_count(&self) -> usize {
        (u64::from(self.blink_period_ms) * u64::from(self.fps) / 2 / 1000) as usize
    }

    /// Delay between two visibility flips. Integer milliseconds; only
    /// meaningful on a validated configuration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.fps))
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            blink_period_ms: DEFAULT_BLINK_PERIOD_MS,
        }
    }
}

/// A marker position in geographic coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
