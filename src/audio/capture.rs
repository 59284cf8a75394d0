//! Microphone capture and the analysis loop feeding shared features.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use super::analyzer::AudioAnalyzer;
use super::features::AudioFeatures;
use super::spectrum::Spectrum;
use crate::error::CaptureError;
use crate::params::CaptureConfig;

/// Latest features, shared between the analysis thread and the render loop.
/// Last write wins; `None` while not listening.
#[derive(Clone, Default)]
pub struct SharedFeatures(Arc<Mutex<Option<AudioFeatures>>>);

impl SharedFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<AudioFeatures> {
        *lock(&self.0)
    }

    pub fn set(&self, features: Option<AudioFeatures>) {
        *lock(&self.0) = features;
    }
}

/// Active microphone session: input stream plus analysis thread
pub struct MicCapture {
    features: SharedFeatures,
    stop: Arc<AtomicBool>,
    analysis_thread: Option<thread::JoinHandle<()>>,
    stream: Option<cpal::Stream>,
    device_name: String,
}

impl MicCapture {
    /// Open the input device and start analysing
    pub fn start(config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate()?;

        let host = cpal::default_host();
        let device = select_input_device(&host, config.device_query.as_deref())?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported = device.default_input_config()?;
        let channels = supported.channels() as usize;
        let sample_format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();

        tracing::info!(
            "Audio input: {} @ {}Hz ({} ch, {:?})",
            device_name,
            stream_config.sample_rate.0,
            channels,
            sample_format
        );

        // Keep a few FFT windows of headroom between analysis ticks
        let capacity = config.spectrum.fft_size * 4;
        let pcm = Arc::new(Mutex::new(Vec::<f32>::with_capacity(capacity)));

        let stream = match sample_format {
            SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, channels, capacity, &pcm)?
            }
            SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, channels, capacity, &pcm)?
            }
            SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, channels, capacity, &pcm)?
            }
            other => return Err(CaptureError::SampleFormat(format!("{other:?}"))),
        };
        stream.play()?;

        let features = SharedFeatures::new();
        let stop = Arc::new(AtomicBool::new(false));
        let analysis_thread = spawn_analysis_thread(config, pcm, features.clone(), stop.clone())?;

        Ok(Self {
            features,
            stop,
            analysis_thread: Some(analysis_thread),
            stream: Some(stream),
            device_name,
        })
    }

    /// Latest features (None until the first analysis tick)
    pub fn features(&self) -> Option<AudioFeatures> {
        self.features.get()
    }

    /// Handle for readers that outlive a borrow of the capture
    pub fn shared(&self) -> SharedFeatures {
        self.features.clone()
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Release the device, stop analysis and clear the shared features
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.analysis_thread.take() {
            if handle.join().is_err() {
                tracing::warn!("Audio analysis thread panicked");
            }
        }
        if self.stream.take().is_some() {
            tracing::info!("Audio input released: {}", self.device_name);
        }
        self.features.set(None);
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        self.stop();
    }
}

fn select_input_device(
    host: &cpal::Host,
    query: Option<&str>,
) -> Result<cpal::Device, CaptureError> {
    let Some(query) = query else {
        return host.default_input_device().ok_or(CaptureError::NoDevice);
    };

    let want = query.to_lowercase();
    host.input_devices()?
        .find(|d| {
            d.name()
                .map(|n| n.to_lowercase().contains(&want))
                .unwrap_or(false)
        })
        .ok_or_else(|| CaptureError::DeviceNotFound(query.to_string()))
}

/// Build an input stream that down-mixes to mono and appends to `pcm`
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    capacity: usize,
    pcm: &Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream, CaptureError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let pcm = Arc::clone(pcm);
    let channels = channels.max(1);

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut buf = lock(&pcm);
            for frame in data.chunks(channels) {
                let sum: f32 = frame.iter().map(|&s| s.to_sample::<f32>()).sum();
                buf.push(sum / frame.len() as f32);
            }
            // Analysis only ever looks at the newest window
            if buf.len() > capacity {
                let excess = buf.len() - capacity;
                buf.drain(..excess);
            }
        },
        |err| tracing::error!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

/// Spawn the analysis loop: spectrum → analyzer → shared features, once per tick
fn spawn_analysis_thread(
    config: CaptureConfig,
    pcm: Arc<Mutex<Vec<f32>>>,
    features: SharedFeatures,
    stop: Arc<AtomicBool>,
) -> Result<thread::JoinHandle<()>, CaptureError> {
    let mut spectrum = Spectrum::new(config.spectrum.clone())?;
    let mut analyzer = AudioAnalyzer::new(config.analyzer.clone());
    let interval = Duration::from_millis(config.update_interval_ms);

    let handle = thread::spawn(move || {
        let mut window = Vec::with_capacity(spectrum.fft_size());

        while !stop.load(Ordering::Relaxed) {
            thread::sleep(interval);

            window.clear();
            {
                let buf = lock(&pcm);
                let start = buf.len().saturating_sub(spectrum.fft_size());
                window.extend_from_slice(&buf[start..]);
            }

            let bins = spectrum.process(&window);
            features.set(Some(analyzer.analyze(bins)));
        }

        tracing::debug!("Audio analysis loop stopped");
    });

    Ok(handle)
}

/// Lock ignoring poisoning; the protected data is plain numbers
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundType;

    #[test]
    fn test_shared_features_last_write_wins() {
        let shared = SharedFeatures::new();
        assert!(shared.get().is_none());

        let reader = shared.clone();
        shared.set(Some(AudioFeatures {
            intensity: 0.2,
            ..Default::default()
        }));
        shared.set(Some(AudioFeatures {
            intensity: 0.7,
            sound_type: SoundType::Chaotic,
            ..Default::default()
        }));

        let got = reader.get().unwrap();
        assert_eq!(got.intensity, 0.7);
        assert_eq!(got.sound_type, SoundType::Chaotic);

        shared.set(None);
        assert!(reader.get().is_none());
    }

    #[test]
    fn test_invalid_config_fails_before_opening_device() {
        let mut config = CaptureConfig::default();
        config.spectrum.fft_size = 1000;
        assert!(matches!(
            MicCapture::start(config),
            Err(CaptureError::Config(_))
        ));
    }
}
