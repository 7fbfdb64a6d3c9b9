//! Exact-length linear-interpolation resampler.
//!
//! Output length is always exactly the requested slot length, even when the
//! rate ratio implies a different natural length. Truncation or padding by
//! interpolation is intentional: every fragment must fill its allotted
//! timeline slot exactly.

use crate::buffer::SampleBuffer;
use crate::error::{AudioError, AudioResult};

/// Resamples to exactly `exact_output_length` samples.
///
/// Each output index i reads the fractional input position
/// `i * (in_len - 1) / (out_len - 1)`, clamped to the valid input range (no
/// extrapolation), and linearly interpolates between the two nearest input
/// samples. A convex combination of i16 values stays within the i16 range.
///
/// # Errors
/// `InvalidInput` if the input is empty or the output length is zero.
pub fn resample_exact(samples: &[i16], exact_output_length: usize) -> AudioResult<Vec<i16>> {
    if samples.is_empty() {
        return Err(AudioError::invalid_input("input buffer is empty"));
    }
    if exact_output_length == 0 {
        return Err(AudioError::invalid_input("output length must be positive"));
    }
    if samples.len() == exact_output_length {
        return Ok(samples.to_vec());
    }

    let in_max = (samples.len() - 1) as f64;
    let out_max = (exact_output_length - 1) as f64;

    let mut output = Vec::with_capacity(exact_output_length);
    for i in 0..exact_output_length {
        let pos = if out_max > 0.0 {
            (i as f64 * in_max / out_max).clamp(0.0, in_max)
        } else {
            0.0
        };
        let floor = pos as usize;
        let ceil = (floor + 1).min(samples.len() - 1);
        let weight = pos - floor as f64;

        let value = samples[floor] as f64 * (1.0 - weight) + samples[ceil] as f64 * weight;
        output.push(value.round() as i16);
    }

    Ok(output)
}

/// Resamples a buffer to the target rate at its natural length
/// `round(len * target / source)`.
pub fn resample(buffer: &SampleBuffer, target_rate: u32) -> AudioResult<SampleBuffer> {
    if buffer.sample_rate == target_rate {
        return Ok(buffer.clone());
    }
    let natural_length =
        (buffer.len() as f64 * target_rate as f64 / buffer.sample_rate as f64).round() as usize;
    let samples = resample_exact(&buffer.samples, natural_length.max(1))?;
    Ok(SampleBuffer::new(samples, target_rate))
}
