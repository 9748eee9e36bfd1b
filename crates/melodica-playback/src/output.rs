//! CPAL output stream glue.
//!
//! Everything device-specific lives here; the rest of the crate deals
//! in the pure [`VoiceSet`] clock. The callback renders mono and fans
//! the same value out to every hardware channel.

use crate::error::{PlaybackError, Result};
use crate::voice::VoiceSet;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::Arc;
use tracing::warn;

/// Wrapper to hold `cpal::Stream` in a `Send` context.
///
/// # Safety
/// `cpal::Stream` is `!Send` due to platform internals. This is safe
/// because the stream is only ever touched behind the player's mutex.
pub(crate) struct StreamHandle(#[allow(dead_code)] cpal::Stream);

unsafe impl Send for StreamHandle {}

/// Acquire the default output device and its preferred configuration.
pub(crate) fn acquire() -> Result<(cpal::Device, cpal::SupportedStreamConfig)> {
    let device = cpal::default_host()
        .default_output_device()
        .ok_or(PlaybackError::NoOutputDevice)?;
    let config = device.default_output_config()?;
    Ok((device, config))
}

/// Build and start an output stream fed by `voices`.
pub(crate) fn start_stream(
    device: &cpal::Device,
    config: cpal::SupportedStreamConfig,
    voices: Arc<VoiceSet>,
) -> Result<StreamHandle> {
    let sample_rate = config.sample_rate().0 as f64;

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(device, &config.into(), voices, sample_rate)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(device, &config.into(), voices, sample_rate)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(device, &config.into(), voices, sample_rate)?,
        format => {
            return Err(PlaybackError::UnsupportedFormat(format!("{format:?}")));
        }
    };

    stream.play()?;
    Ok(StreamHandle(stream))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    voices: Arc<VoiceSet>,
    sample_rate: f64,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;

    // Mono scratch buffer, grown on the first callback and stable after
    let mut mono = Vec::<f32>::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / channels;
            if mono.len() < frames {
                mono.resize(frames, 0.0);
            }

            voices.render(&mut mono[..frames], sample_rate);

            for (i, sample) in data.iter_mut().enumerate() {
                *sample = T::from_sample(mono[i / channels]);
            }
        },
        |err| warn!("output stream error: {err}"),
        None,
    )?;

    Ok(stream)
}
