//! Training configuration with constructor validation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of an interval training test.
///
/// A test runs fixed-distance intervals, starting at `initial_speed_kmh` and
/// increasing by `speed_increment_kmh` whenever a stage of roughly
/// `stage_duration_s` has elapsed, until `max_speed_kmh` is exceeded.
///
/// Constructed through [`TrainingConfig::new`], which validates every field,
/// so a value of this type is always internally consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Initial speed in km/h.
    pub initial_speed_kmh: f64,
    /// Distance of every interval in meters.
    pub interval_distance_m: u32,
    /// Target duration of a stage in seconds.
    pub stage_duration_s: u32,
    /// Tolerance around the stage duration within which a stage still closes.
    pub stage_threshold_s: u32,
    /// Speed increase per stage in km/h.
    pub speed_increment_kmh: f64,
    /// Maximum speed in km/h; generation stops once exceeded.
    pub max_speed_kmh: f64,
}

impl TrainingConfig {
    /// Creates a validated training configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if any field is non-positive or the maximum
    /// speed is below the initial speed.
    pub fn new(
        initial_speed_kmh: f64,
        interval_distance_m: u32,
        stage_duration_s: u32,
        stage_threshold_s: u32,
        speed_increment_kmh: f64,
        max_speed_kmh: f64,
    ) -> Result<Self, ConfigError> {
        validate_positive("initial_speed_kmh", initial_speed_kmh)?;
        validate_positive("interval_distance_m", interval_distance_m as f64)?;
        validate_positive("stage_duration_s", stage_duration_s as f64)?;
        validate_positive("stage_threshold_s", stage_threshold_s as f64)?;
        validate_positive("speed_increment_kmh", speed_increment_kmh)?;
        validate_positive("max_speed_kmh", max_speed_kmh)?;

        if max_speed_kmh < initial_speed_kmh {
            return Err(ConfigError::MaxSpeedBelowInitial {
                max_speed: max_speed_kmh,
                initial_speed: initial_speed_kmh,
            });
        }

        Ok(Self {
            initial_speed_kmh,
            interval_distance_m,
            stage_duration_s,
            stage_threshold_s,
            speed_increment_kmh,
            max_speed_kmh,
        })
    }

    /// Initial speed converted to m/s.
    pub fn initial_speed_ms(&self) -> f64 {
        self.initial_speed_kmh / 3.6
    }
}

fn validate_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}
