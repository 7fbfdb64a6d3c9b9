//! Sample buffer type and PCM byte conversion.

/// Mono 16-bit PCM sample buffer tagged with its sample rate.
///
/// The shared currency between synthesis, resampling, caching, and assembly.
/// Every arithmetic producer clamps into the i16 range before storing a
/// sample; a buffer never holds wrapped values.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// PCM samples.
    pub samples: Vec<i16>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl SampleBuffer {
    /// Creates a buffer from samples at the given rate.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Creates an empty buffer at the given rate.
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Appends all samples of `other`. The rates must already match;
    /// the assembler resamples before concatenation.
    pub fn extend_from(&mut self, other: &[i16]) {
        self.samples.extend_from_slice(other);
    }

    /// Appends `count` zero samples.
    pub fn extend_silence(&mut self, count: usize) {
        self.samples.resize(self.samples.len() + count, 0);
    }

    /// Serializes the samples as little-endian PCM bytes.
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        let mut pcm = Vec::with_capacity(self.samples.len() * 2);
        for &sample in &self.samples {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
        pcm
    }

    /// Deserializes little-endian PCM bytes into a buffer.
    ///
    /// Returns `None` if the byte count is odd.
    pub fn from_pcm_bytes(bytes: &[u8], sample_rate: u32) -> Option<Self> {
        if bytes.len() % 2 != 0 {
            return None;
        }
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Some(Self::new(samples, sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pcm_bytes_round_trip() {
        let buffer = SampleBuffer::new(vec![0, 1, -1, i16::MAX, i16::MIN], 44100);
        let bytes = buffer.to_pcm_bytes();
        assert_eq!(bytes.len(), 10);
        let back = SampleBuffer::from_pcm_bytes(&bytes, 44100).unwrap();
        assert_eq!(back, buffer);
    }

    #[test]
    fn test_from_pcm_bytes_rejects_odd_length() {
        assert!(SampleBuffer::from_pcm_bytes(&[0, 1, 2], 44100).is_none());
    }

    #[test]
    fn test_extend_silence() {
        let mut buffer = SampleBuffer::new(vec![5, 5], 44100);
        buffer.extend_silence(3);
        assert_eq!(buffer.samples, vec![5, 5, 0, 0, 0]);
    }

    #[test]
    fn test_duration() {
        let buffer = SampleBuffer::new(vec![0; 44100], 44100);
        assert_eq!(buffer.duration_seconds(), 1.0);
    }
}
