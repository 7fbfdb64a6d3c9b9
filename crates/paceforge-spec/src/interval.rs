//! Interval descriptors and progression generation.
//!
//! The progression walks fixed-distance intervals: the first interval runs at
//! the configured initial speed; whenever the accumulated time in the current
//! stage exceeds the stage duration (or lands within the threshold of it),
//! the stage closes and the next interval's speed is bumped by the increment.
//! Generation stops once the speed exceeds the configured maximum.

use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::ConfigError;

/// Hard cap on generated intervals, guarding against configurations whose
/// speed increment never reaches the maximum.
const MAX_INTERVALS: usize = 100;

/// One interval of the training progression.
///
/// Immutable once produced; the audio assembler only reads cumulative end
/// times, speeds, and the stage-change flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Interval distance in meters.
    pub distance_m: u32,
    /// Speed in km/h.
    pub speed_kmh: f64,
    /// Speed in m/s.
    pub speed_ms: f64,
    /// Duration of this interval in seconds (distance / speed).
    pub duration_s: f64,
    /// Cumulative run time when this interval starts, in seconds.
    pub total_start_s: f64,
    /// Cumulative run time when this interval ends, in seconds.
    pub total_end_s: f64,
    /// Cumulative distance when this interval starts, in meters.
    pub total_distance_start_m: u32,
    /// Cumulative distance when this interval ends, in meters.
    pub total_distance_end_m: u32,
    /// Time already spent in the current stage when this interval starts.
    pub stage_time_start_s: f64,
    /// Time spent in the current stage when this interval ends.
    pub stage_time_end_s: f64,
    /// Whether the stage closes (and the speed changes) at this interval's end.
    pub stage_change_at_end: bool,
}

impl Interval {
    fn initial(config: &TrainingConfig) -> Self {
        let speed_ms = config.initial_speed_ms();
        let duration_s = config.interval_distance_m as f64 / speed_ms;
        let mut interval = Self {
            distance_m: config.interval_distance_m,
            speed_kmh: config.initial_speed_kmh,
            speed_ms,
            duration_s,
            total_start_s: 0.0,
            total_end_s: duration_s,
            total_distance_start_m: 0,
            total_distance_end_m: config.interval_distance_m,
            stage_time_start_s: 0.0,
            stage_time_end_s: duration_s,
            stage_change_at_end: false,
        };
        interval.stage_change_at_end = stage_closes(&interval, config);
        interval
    }

    fn next(previous: &Self, config: &TrainingConfig) -> Self {
        let speed_kmh = if previous.stage_change_at_end {
            previous.speed_kmh + config.speed_increment_kmh
        } else {
            previous.speed_kmh
        };
        let speed_ms = speed_kmh / 3.6;
        let duration_s = config.interval_distance_m as f64 / speed_ms;
        let stage_time_start_s = if previous.stage_change_at_end {
            0.0
        } else {
            previous.stage_time_end_s
        };

        let mut interval = Self {
            distance_m: config.interval_distance_m,
            speed_kmh,
            speed_ms,
            duration_s,
            total_start_s: previous.total_end_s,
            total_end_s: previous.total_end_s + duration_s,
            total_distance_start_m: previous.total_distance_end_m,
            total_distance_end_m: previous.total_distance_end_m + config.interval_distance_m,
            stage_time_start_s,
            stage_time_end_s: stage_time_start_s + duration_s,
            stage_change_at_end: false,
        };
        interval.stage_change_at_end = stage_closes(&interval, config);
        interval
    }
}

/// Stage close rule: the accumulated stage time has passed the target
/// duration, or is within the configured threshold of it.
fn stage_closes(interval: &Interval, config: &TrainingConfig) -> bool {
    let stage_time = interval.stage_time_end_s;
    let target = config.stage_duration_s as f64;
    stage_time > target || (stage_time - target).abs() < config.stage_threshold_s as f64
}

/// Generates the complete interval progression for a configuration.
///
/// The returned sequence always contains at least one interval. The last
/// interval may exceed the maximum speed: generation checks the cap before
/// creating the next interval, matching the behavior of running the final
/// stage through to its first interval.
pub fn generate_intervals(config: &TrainingConfig) -> Vec<Interval> {
    let mut intervals = vec![Interval::initial(config)];

    while intervals.len() < MAX_INTERVALS
        && intervals[intervals.len() - 1].speed_kmh <= config.max_speed_kmh
    {
        let next = Interval::next(&intervals[intervals.len() - 1], config);
        intervals.push(next);
    }

    intervals
}

/// Validates an interval sequence before audio assembly.
///
/// The sequence must be non-empty and monotonically non-decreasing in speed.
pub fn validate_intervals(intervals: &[Interval]) -> Result<(), ConfigError> {
    if intervals.is_empty() {
        return Err(ConfigError::EmptyIntervals);
    }
    for (index, pair) in intervals.windows(2).enumerate() {
        if pair[1].speed_kmh < pair[0].speed_kmh {
            return Err(ConfigError::DecreasingSpeed {
                index: index + 1,
                speed: pair[1].speed_kmh,
                previous: pair[0].speed_kmh,
            });
        }
    }
    Ok(())
}
