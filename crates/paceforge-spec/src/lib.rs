//! Paceforge Canonical Training-Plan Library
//!
//! This crate provides the domain types, validation, and deterministic hashing
//! that the Paceforge audio backend consumes:
//!
//! - **Training configuration**: the validated parameters of an interval
//!   training test (initial speed, interval distance, stage duration, speed
//!   increment, maximum speed).
//! - **Interval progression**: the ordered list of interval descriptors
//!   computed from a configuration.
//! - **Fragment descriptors**: the tagged value types (silence, beep burst,
//!   spoken phrase) that identify every audio fragment on the timeline, plus
//!   their canonical BLAKE3 cache keys.
//!
//! # Determinism
//!
//! Fragment cache keys are derived by hashing a canonical string of the
//! fragment's kind tag and all parameter values together with the global
//! sample rate. Two value-equal descriptors always produce the same key, and
//! any single-field difference changes it.
//!
//! # Example
//!
//! ```
//! use paceforge_spec::{Fragment, fragment_key, TrainingConfig, generate_intervals};
//!
//! let config = TrainingConfig::new(8.0, 50, 60, 5, 0.5, 20.0).unwrap();
//! let intervals = generate_intervals(&config);
//! assert!(!intervals.is_empty());
//!
//! let beep = Fragment::beep(3, 0.2, 220.0, 0.1);
//! let key = fragment_key(&beep, 44100);
//! assert_eq!(key.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`config`]: Training configuration with constructor validation
//! - [`interval`]: Interval descriptors and progression generation
//! - [`fragment`]: Fragment descriptors and cache key derivation
//! - [`error`]: Error types for configuration and sequence validation

pub mod config;
pub mod error;
pub mod fragment;
pub mod interval;

// Re-export commonly used types at the crate root
pub use config::TrainingConfig;
pub use error::ConfigError;
pub use fragment::{fragment_key, Fragment};
pub use interval::{generate_intervals, validate_intervals, Interval};
