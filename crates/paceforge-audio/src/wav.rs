//! Deterministic WAV file writer.
//!
//! Writes 16-bit mono PCM WAV files with no timestamps or variable metadata,
//! so byte-identical sample buffers always produce byte-identical files. The
//! BLAKE3 hash of the PCM payload is exposed for byte-identity checks.

use std::io::{self, Write};
use std::path::Path;

use crate::buffer::SampleBuffer;
use crate::error::AudioResult;

/// WAV format parameters. The pipeline is mono 16-bit throughout.
#[derive(Debug, Clone, Copy)]
pub struct WavFormat {
    /// Number of channels (always 1 here).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 here).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono 16-bit format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus the 8-byte RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a buffer to a complete WAV byte vector.
pub fn write_wav_to_vec(buffer: &SampleBuffer) -> Vec<u8> {
    let pcm = buffer.to_pcm_bytes();
    let format = WavFormat::mono(buffer.sample_rate);
    let mut out = Vec::with_capacity(44 + pcm.len());
    write_wav(&mut out, &format, &pcm).expect("writing to Vec should not fail");
    out
}

/// BLAKE3 hash of the PCM payload (not the WAV container).
pub fn pcm_hash(buffer: &SampleBuffer) -> String {
    blake3::hash(&buffer.to_pcm_bytes()).to_hex().to_string()
}

/// Writes a buffer to a WAV file.
///
/// The file goes through a temporary sibling and an atomic rename, so a
/// failed run never leaves a partial file in place of the output.
pub fn write_wav_file(buffer: &SampleBuffer, path: impl AsRef<Path>) -> AudioResult<()> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };

    let format = WavFormat::mono(buffer.sample_rate);
    write_wav(&mut temp, &format, &buffer.to_pcm_bytes())?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
