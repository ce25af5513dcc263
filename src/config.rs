//! PSG configuration
//!
//! Clock and output parameters supplied by the host.

use serde::{Deserialize, Serialize};

use crate::{PsgError, Result};

/// Default PSG master clock used by the reference engine (Hz)
pub const DEFAULT_MASTER_CLOCK: u32 = 3_580_000;

/// Default output sample rate (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsgConfig {
    /// PSG master clock in Hz, the numerator of every period-to-frequency conversion
    pub master_clock: u32,
    /// Output sample rate in Hz (per channel)
    pub sample_rate: u32,
    /// Output amplitude ceiling: the magnitude a single full-gain voice sums to across six voices
    pub max_volume: i16,
}

impl PsgConfig {
    /// Create a configuration with custom clocks and the default amplitude ceiling
    pub fn with_clocks(master_clock: u32, sample_rate: u32) -> Self {
        Self {
            master_clock,
            sample_rate,
            ..Self::default()
        }
    }

    /// Set the output amplitude ceiling
    pub fn max_volume(mut self, max_volume: i16) -> Self {
        self.max_volume = max_volume;
        self
    }

    /// Check that the clocks can be used as divisors
    pub fn validate(&self) -> Result<()> {
        if self.master_clock == 0 {
            return Err(PsgError::ConfigError(
                "master clock must be non-zero".to_string(),
            ));
        }
        if self.sample_rate == 0 {
            return Err(PsgError::ConfigError(
                "sample rate must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PsgConfig {
    fn default() -> Self {
        Self {
            master_clock: DEFAULT_MASTER_CLOCK,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_volume: i16::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = PsgConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_volume, i16::MAX);
    }

    #[test]
    fn test_zero_clocks_rejected() {
        assert!(PsgConfig::with_clocks(0, 44_100).validate().is_err());
        assert!(PsgConfig::with_clocks(3_580_000, 0).validate().is_err());
    }

    #[test]
    fn test_config_json_keys() {
        let cfg = PsgConfig::with_clocks(3_579_545, 48_000).max_volume(16_000);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"master_clock\":3579545"));
        let back: PsgConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
