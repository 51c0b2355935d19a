//! Audio device setup and the realtime output callback.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    FromSample, SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig,
};
use rtrb::{Consumer, Producer};

use crate::synth::{Engine, SynthMessage, VoiceStatus};

/// Engine type driven by the device callback.
pub type AudioEngine = Engine<Consumer<SynthMessage>>;

/// Side channels from the audio callback to the UI. Pushes never block;
/// whatever does not fit is dropped.
pub struct AudioTaps {
    pub scope: Producer<f32>,
    pub status: Producer<VoiceStatus>,
}

/// A running output stream. Dropping it stops playback.
pub struct AudioOutput {
    _stream: cpal::Stream,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Names of every output device on `host`, for the startup log.
pub fn output_device_names(host: &cpal::Host) -> Vec<String> {
    match host.output_devices() {
        Ok(devices) => devices
            .map(|device| device.name().unwrap_or_else(|_| "<unnamed>".to_string()))
            .collect(),
        Err(err) => {
            tracing::warn!(error = %err, "could not enumerate output devices");
            Vec::new()
        }
    }
}

/// Pick a stream config: `preferred_rate` in the default format and channel
/// count if the device supports it, otherwise the device default.
pub fn pick_config(device: &cpal::Device, preferred_rate: u32) -> EyreResult<SupportedStreamConfig> {
    let default = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let matching = device
        .supported_output_configs()
        .wrap_err("failed to query supported output configs")?
        .filter(|range| {
            range.sample_format() == default.sample_format() && range.channels() == default.channels()
        })
        .find(|range| {
            range.min_sample_rate().0 <= preferred_rate && preferred_rate <= range.max_sample_rate().0
        });

    Ok(match matching {
        Some(range) => range.with_sample_rate(cpal::SampleRate(preferred_rate)),
        None => {
            tracing::info!(
                preferred_rate,
                fallback = default.sample_rate().0,
                "device cannot run at the requested rate, using its default"
            );
            default
        }
    })
}

impl AudioOutput {
    /// Build and start the output stream, moving `engine` into the callback.
    pub fn start(
        device: &cpal::Device,
        supported: SupportedStreamConfig,
        engine: AudioEngine,
        taps: AudioTaps,
    ) -> EyreResult<Self> {
        let format = supported.sample_format();
        let config: StreamConfig = supported.into();

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(device, &config, engine, taps)?,
            SampleFormat::I16 => build_stream::<i16>(device, &config, engine, taps)?,
            SampleFormat::U16 => build_stream::<u16>(device, &config, engine, taps)?,
            other => return Err(eyre!("unsupported sample format {other:?}")),
        };

        stream.play().wrap_err("failed to start output stream")?;

        tracing::info!(
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            format = ?format,
            "audio stream started"
        );

        Ok(Self {
            _stream: stream,
            sample_rate: config.sample_rate.0,
            channels: config.channels,
        })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut engine: AudioEngine,
    mut taps: AudioTaps,
) -> EyreResult<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                engine.process_messages();

                // Mono engine output duplicated to every device channel
                for frame in data.chunks_mut(channels) {
                    let sample = engine.next_sample() as f32;
                    frame.fill(T::from_sample(sample));

                    // Drop scope samples rather than wait for the UI
                    let _ = taps.scope.push(sample);
                }

                let _ = taps.status.push(engine.status());
            },
            |err| tracing::error!(error = %err, "audio stream error"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    Ok(stream)
}
