//! WAV encoding via hound.
//!
//! Produces the canonical 44-byte mono 16-bit PCM layout: `RIFF` size
//! `WAVE`, a 16-byte `fmt ` sub-chunk, then the `data` sub-chunk with
//! little-endian samples. This is the one stage that tolerates mixer
//! overflow: out-of-range samples are clamped, not rejected.

use crate::error::Result;
use crate::mixer::PcmBuffer;
use hound::{SampleFormat, WavSpec, WavWriter};
use log::warn;
use std::io::Cursor;

/// Encode a PCM buffer as WAV file bytes.
///
/// Pure and total: encoding cannot fail on a buffer produced by the
/// mixer. A buffer that peaks past full scale is clamped sample by
/// sample and logged once as a clip warning.
pub fn encode_wav(buffer: &PcmBuffer) -> Result<Vec<u8>> {
    if buffer.clipped() {
        warn!(
            "mix peaks at {:.3}, clamping to full scale on encode",
            buffer.peak()
        );
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut bytes = Vec::with_capacity(44 + buffer.len() * 2);
    {
        let cursor = Cursor::new(&mut bytes);
        let mut writer = WavWriter::new(cursor, spec)?;
        for &sample in buffer.samples() {
            writer.write_sample(float_to_i16(sample))?;
        }
        // Finalize patches the RIFF and data size fields
        writer.finalize()?;
    }

    Ok(bytes)
}

/// Convert a float sample to 16-bit PCM, clamping to [-1, 1].
#[inline]
fn float_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;
    use melodica_core::Note;

    fn render(notes: &[Note]) -> PcmBuffer {
        crate::mixer::render_to_pcm(notes, 120.0, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_float_to_i16() {
        assert_eq!(float_to_i16(0.0), 0);
        assert_eq!(float_to_i16(1.0), 32767);
        assert_eq!(float_to_i16(-1.0), -32767);
        assert_eq!(float_to_i16(0.5), 16384);
        // Out-of-range input clamps
        assert_eq!(float_to_i16(1.5), 32767);
        assert_eq!(float_to_i16(-2.0), -32767);
    }

    #[test]
    fn test_canonical_header() {
        let bytes = encode_wav(&render(&[Note::new(60, 0.0, 1.0, 100)])).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        // 16-byte PCM fmt chunk
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        // format = 1 (PCM), channels = 1
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 1);
        // sample rate and derived byte rate / block align
        assert_eq!(
            u32::from_le_bytes(bytes[24..28].try_into().unwrap()),
            44_100
        );
        assert_eq!(
            u32::from_le_bytes(bytes[28..32].try_into().unwrap()),
            44_100 * 2
        );
        assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
        assert_eq!(&bytes[36..40], b"data");
    }

    #[test]
    fn test_size_fields() {
        let pcm = render(&[Note::new(60, 0.0, 1.0, 100)]);
        let bytes = encode_wav(&pcm).unwrap();

        let riff_size = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        let data_size = u32::from_le_bytes(bytes[40..44].try_into().unwrap());
        assert_eq!(data_size as usize, pcm.len() * 2);
        assert_eq!(riff_size as usize, bytes.len() - 8);
        assert_eq!(bytes.len(), 44 + pcm.len() * 2);
    }

    #[test]
    fn test_silent_buffer_encodes_zeros() {
        let bytes = encode_wav(&render(&[])).unwrap();
        assert!(bytes[44..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clipped_mix_clamps_at_encode() {
        // Enough unison notes to push the sum past full scale
        let notes: Vec<Note> = (0..8).map(|_| Note::new(60, 0.0, 1.0, 127)).collect();
        let pcm = render(&notes);
        assert!(pcm.clipped());

        let bytes = encode_wav(&pcm).unwrap();
        for pair in bytes[44..].chunks_exact(2) {
            let sample = i16::from_le_bytes([pair[0], pair[1]]);
            assert!((-32767..=32767).contains(&sample));
        }
    }
}
