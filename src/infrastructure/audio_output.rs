// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The device stream lives on a dedicated thread because `cpal::Stream` is not
//! `Send` on every platform. Decoders talk to it through an [`AudioSink`], a
//! cheap handle onto a shared sample queue plus atomic volume/pause flags.
//!
//! Only one decoder may feed the queue at a time. Each decoder takes an
//! ownership ticket with [`AudioSink::claim`]; samples pushed with a stale
//! ticket are discarded, so a superseded track can never bleed into the next.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{mpsc as std_mpsc, Arc, Mutex};
use std::thread;

use crate::domain::playback::Volume;
use crate::error::MediaError;

/// Seconds of audio the queue holds before producers must wait.
pub const QUEUE_CAPACITY_SECS: f64 = 0.5;

/// Sample rate and channel layout decoders must resample to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioOutputConfig {
    /// Interleaved samples per second of audio.
    #[must_use]
    pub fn samples_per_sec(&self) -> usize {
        self.sample_rate as usize * usize::from(self.channels)
    }

    /// Queue size in interleaved samples.
    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        (self.samples_per_sec() as f64 * QUEUE_CAPACITY_SECS) as usize
    }
}

/// State shared between the device callback and producers.
struct SharedState {
    /// Current volume (stored as u32 bits of f32 for atomic access).
    volume_bits: AtomicU32,
    paused: AtomicBool,
    owner: AtomicU64,
}

impl SharedState {
    fn new(volume: Volume) -> Self {
        Self {
            volume_bits: AtomicU32::new(volume.value().to_bits()),
            paused: AtomicBool::new(true),
            owner: AtomicU64::new(0),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }
}

/// Producer-side handle onto the output queue.
#[derive(Clone)]
pub struct AudioSink {
    shared: Arc<SharedState>,
    queue: Arc<Mutex<VecDeque<f32>>>,
    config: AudioOutputConfig,
}

impl std::fmt::Debug for AudioSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSink")
            .field("config", &self.config)
            .field("paused", &self.shared.is_paused())
            .finish_non_exhaustive()
    }
}

impl AudioSink {
    fn new(volume: Volume, config: AudioOutputConfig) -> Self {
        Self {
            shared: Arc::new(SharedState::new(volume)),
            queue: Arc::new(Mutex::new(VecDeque::with_capacity(config.queue_capacity()))),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }

    /// Takes exclusive ownership of the queue, silencing and flushing it.
    pub fn claim(&self) -> u64 {
        let ticket = self.shared.owner.fetch_add(1, Ordering::AcqRel) + 1;
        self.shared.set_paused(true);
        self.clear();
        ticket
    }

    /// Whether `ticket` is still the current owner.
    #[must_use]
    pub fn owns(&self, ticket: u64) -> bool {
        self.shared.owner.load(Ordering::Acquire) == ticket
    }

    /// Appends as many samples as fit and returns how many were taken.
    ///
    /// Returns 0 without touching the queue when `ticket` is stale.
    pub fn push(&self, ticket: u64, samples: &[f32]) -> usize {
        if !self.owns(ticket) {
            return 0;
        }
        let Ok(mut queue) = self.queue.lock() else {
            return 0;
        };
        let free = self.config.queue_capacity().saturating_sub(queue.len());
        let taken = free.min(samples.len());
        queue.extend(&samples[..taken]);
        taken
    }

    /// Drops every queued sample.
    pub fn clear(&self) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.clear();
        }
    }

    /// Queued audio not yet handed to the device, in seconds.
    #[must_use]
    pub fn buffered_secs(&self) -> f64 {
        let queued = self.queue.lock().map(|q| q.len()).unwrap_or(0);
        queued as f64 / self.config.samples_per_sec().max(1) as f64
    }

    /// Sets the pause flag if `ticket` still owns the queue.
    pub fn set_paused(&self, ticket: u64, paused: bool) {
        if self.owns(ticket) {
            self.shared.set_paused(paused);
        }
    }

    /// Fills a device buffer from the queue, applying the volume curve.
    fn fill<T: cpal::SizedSample + cpal::FromSample<f32>>(&self, data: &mut [T]) {
        let silence = T::from_sample(0.0f32);
        if self.shared.is_paused() {
            data.fill(silence);
            return;
        }
        let Ok(mut queue) = self.queue.lock() else {
            data.fill(silence);
            return;
        };

        // Squared so the configured level feels linear to the ear.
        let gain = {
            let v = self.shared.volume();
            v * v
        };
        for slot in data.iter_mut() {
            *slot = match queue.pop_front() {
                // Kept just below 1.0: i16 conversion overflows at exactly 1.0.
                Some(sample) => T::from_sample((sample * gain).clamp(-1.0, 0.999_999_9)),
                None => silence,
            };
        }
    }
}

/// Owns the device stream thread. Dropping it closes the stream.
pub struct AudioOutput {
    sink: AudioSink,
    _shutdown: std_mpsc::Sender<()>,
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

impl AudioOutput {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::OutputUnavailable`] if there is no device, its
    /// configuration cannot be read, or the stream fails to start.
    pub fn new(volume: Volume) -> Result<Self, MediaError> {
        let (ready_tx, ready_rx) = std_mpsc::channel::<Result<AudioSink, MediaError>>();
        let (shutdown_tx, shutdown_rx) = std_mpsc::channel::<()>();

        thread::Builder::new()
            .name("audio-output".into())
            .spawn(move || {
                let stream = match open_stream(volume) {
                    Ok((stream, sink)) => {
                        let _ = ready_tx.send(Ok(sink));
                        stream
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                // Parks until the owning AudioOutput is dropped.
                let _ = shutdown_rx.recv();
                drop(stream);
                tracing::debug!("audio output stream closed");
            })
            .map_err(|e| MediaError::OutputUnavailable(format!("audio thread: {e}")))?;

        let sink = ready_rx.recv().map_err(|_| {
            MediaError::OutputUnavailable("audio thread exited during startup".into())
        })??;

        tracing::info!(
            sample_rate = sink.config.sample_rate,
            channels = sink.config.channels,
            "audio output ready"
        );

        Ok(Self {
            sink,
            _shutdown: shutdown_tx,
        })
    }

    /// A producer handle onto this output.
    #[must_use]
    pub fn sink(&self) -> AudioSink {
        self.sink.clone()
    }
}

fn open_stream(volume: Volume) -> Result<(cpal::Stream, AudioSink), MediaError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| MediaError::OutputUnavailable("no audio output device found".into()))?;

    let supported = device
        .default_output_config()
        .map_err(|e| MediaError::OutputUnavailable(format!("failed to get audio config: {e}")))?;

    let sink = AudioSink::new(
        volume,
        AudioOutputConfig {
            sample_rate: supported.sample_rate().0,
            channels: supported.channels(),
        },
    );

    let format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();
    let stream = match format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, sink.clone())?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, sink.clone())?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, sink.clone())?,
        other => {
            return Err(MediaError::OutputUnavailable(format!(
                "unsupported output sample format {other:?}"
            )))
        }
    };

    stream
        .play()
        .map_err(|e| MediaError::OutputUnavailable(format!("failed to start audio stream: {e}")))?;

    Ok((stream, sink))
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sink: AudioSink,
) -> Result<cpal::Stream, MediaError> {
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| sink.fill(data),
            |err| tracing::warn!("audio output error: {err}"),
            None,
        )
        .map_err(|e| MediaError::OutputUnavailable(format!("failed to build audio stream: {e}")))
}
