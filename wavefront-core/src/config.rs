use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable knobs for the analysis pipeline. See each component module for
/// how a given field is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// FFT length for spectrum extraction (C5). Must be a power of two >= 4096.
    pub fft_size: usize,
    /// Octave fraction for fractional-octave smoothing (C6). Permitted (0, 1].
    pub smoothing_fraction: f64,
    /// Normalization anchor frequency in Hz for C7.
    pub reference_freq_hz: f64,
    /// Tikhonov regularization lambda for C3. Must be > 0.
    pub regularization_lambda: f64,
    /// Pre-peak window width in milliseconds for C4.
    pub pre_window_ms: f64,
    /// Post-peak window width in milliseconds for C4.
    pub post_window_ms: f64,
    /// Number of log-spaced output points for C8.
    pub display_points: usize,
    /// Maximum number of room modes kept by C9.
    pub mode_max: usize,
    /// Minimum octave spacing between kept room modes for C9.
    pub mode_min_spacing_octaves: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fft_size: 32_768,
            smoothing_fraction: 1.0 / 3.0,
            reference_freq_hz: 1000.0,
            regularization_lambda: 1e-3,
            pre_window_ms: 50.0,
            post_window_ms: 400.0,
            display_points: 300,
            mode_max: 5,
            mode_min_spacing_octaves: 1.0 / 6.0,
        }
    }
}

impl Config {
    /// Validates every field in one pass, collecting all violations into a
    /// single [`ConfigError`] instead of failing on the first one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.fft_size < 4096 || !self.fft_size.is_power_of_two() {
            problems.push(format!(
                "fft_size must be a power of two >= 4096, got {}",
                self.fft_size
            ));
        }
        if !(self.smoothing_fraction > 0.0 && self.smoothing_fraction <= 1.0) {
            problems.push(format!(
                "smoothing_fraction must be in (0, 1], got {}",
                self.smoothing_fraction
            ));
        }
        if !(self.reference_freq_hz > 0.0) {
            problems.push(format!(
                "reference_freq_hz must be > 0, got {}",
                self.reference_freq_hz
            ));
        }
        if !(self.regularization_lambda > 0.0) {
            problems.push(format!(
                "regularization_lambda must be > 0, got {}",
                self.regularization_lambda
            ));
        }
        if !(self.pre_window_ms >= 0.0) {
            problems.push(format!(
                "pre_window_ms must be >= 0, got {}",
                self.pre_window_ms
            ));
        }
        if !(self.post_window_ms > 0.0) {
            problems.push(format!(
                "post_window_ms must be > 0, got {}",
                self.post_window_ms
            ));
        }
        if self.display_points == 0 {
            problems.push("display_points must be > 0".to_string());
        }
        if self.mode_max == 0 {
            problems.push("mode_max must be > 0".to_string());
        }
        if !(self.mode_min_spacing_octaves > 0.0) {
            problems.push(format!(
                "mode_min_spacing_octaves must be > 0, got {}",
                self.mode_min_spacing_octaves
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_power_of_two_fft_size() {
        let config = Config {
            fft_size: 5000,
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.0.contains("fft_size"));
    }

    #[test]
    fn collects_multiple_problems() {
        let config = Config {
            fft_size: 10,
            smoothing_fraction: -1.0,
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.0.contains("fft_size"));
        assert!(err.0.contains("smoothing_fraction"));
    }
}
