// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg`-backed implementation of the [`MediaElement`] port.
//!
//! Each `load` spawns a decoder thread that opens the file, resamples to the
//! output device format and feeds an [`AudioSink`]. Commands travel to the
//! thread over an unbounded channel; events travel back over another and are
//! drained by [`MediaElement::poll_event`] on the UI thread.

use crate::application::port::{MediaElement, MediaEvent, MediaEventKind, SourceToken};
use crate::error::MediaError;
use crate::infrastructure::audio_output::{AudioOutputConfig, AudioSink};
use crate::infrastructure::ffmpeg;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Interval between position reports while playing.
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Sleep while paused or waiting for queue space.
const IDLE_SLEEP: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq)]
enum DecoderCommand {
    Play,
    Pause,
    Seek(f64),
    Stop,
}

struct DecoderHandle {
    ticket: u64,
    commands: mpsc::UnboundedSender<DecoderCommand>,
}

/// Audio element playing files from the asset directory.
pub struct FfmpegAudioElement {
    assets_dir: PathBuf,
    sink: Option<AudioSink>,
    decoder: Option<DecoderHandle>,
    events_tx: mpsc::UnboundedSender<MediaEvent>,
    events_rx: mpsc::UnboundedReceiver<MediaEvent>,
}

impl std::fmt::Debug for FfmpegAudioElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegAudioElement")
            .field("assets_dir", &self.assets_dir)
            .field("has_output", &self.sink.is_some())
            .field("has_decoder", &self.decoder.is_some())
            .finish()
    }
}

impl FfmpegAudioElement {
    /// Creates an element resolving sources against `assets_dir`.
    ///
    /// Without a sink every `load` fails with
    /// [`MediaError::OutputUnavailable`] and the app runs silent.
    pub fn new(assets_dir: impl Into<PathBuf>, sink: Option<AudioSink>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            assets_dir: assets_dir.into(),
            sink,
            decoder: None,
            events_tx,
            events_rx,
        }
    }

    fn send(&self, command: DecoderCommand) {
        if let Some(decoder) = &self.decoder {
            if decoder.commands.send(command).is_err() {
                tracing::trace!(?command, "decoder already exited");
            }
        }
    }

    fn release(&mut self) {
        // Dropping the sender disconnects the thread, which then exits.
        if let Some(decoder) = self.decoder.take() {
            if let Some(sink) = &self.sink {
                sink.set_paused(decoder.ticket, true);
                sink.clear();
            }
        }
    }
}

impl Drop for FfmpegAudioElement {
    fn drop(&mut self) {
        self.release();
    }
}

impl MediaElement for FfmpegAudioElement {
    fn load(&mut self, source: &str, token: SourceToken) -> Result<(), MediaError> {
        self.release();

        let path = self.assets_dir.join(source);
        if !path.exists() {
            return Err(MediaError::SourceNotFound(path.display().to_string()));
        }
        let sink = self
            .sink
            .clone()
            .ok_or_else(|| MediaError::OutputUnavailable("no audio output device".into()))?;

        let ticket = sink.claim();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let events = self.events_tx.clone();

        thread::Builder::new()
            .name("audio-decoder".into())
            .spawn(move || decoder_thread(&path, token, ticket, &sink, commands_rx, &events))
            .map_err(|e| MediaError::DecodingFailed(format!("decoder thread: {e}")))?;

        self.decoder = Some(DecoderHandle {
            ticket,
            commands: commands_tx,
        });
        Ok(())
    }

    fn play(&mut self) {
        if self.decoder.is_none() {
            // Nothing loaded: settle the attempt right away.
            let _ = self.events_tx.send(MediaEvent::new(
                SourceToken::default(),
                MediaEventKind::PlayRejected("no source loaded".into()),
            ));
            return;
        }
        self.send(DecoderCommand::Play);
    }

    fn pause(&mut self) {
        self.send(DecoderCommand::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.send(DecoderCommand::Seek(seconds));
    }

    fn stop(&mut self) {
        self.send(DecoderCommand::Stop);
    }

    fn unload(&mut self) {
        self.release();
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events_rx.try_recv().ok()
    }
}

/// Runs one source from open to disconnect.
fn decoder_thread(
    path: &Path,
    token: SourceToken,
    ticket: u64,
    sink: &AudioSink,
    mut commands: mpsc::UnboundedReceiver<DecoderCommand>,
    events: &mpsc::UnboundedSender<MediaEvent>,
) {
    let emit = |kind: MediaEventKind| {
        let _ = events.send(MediaEvent::new(token, kind));
    };

    let mut source = match AudioSource::open(path, sink.config()) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(path = %path.display(), "cannot open audio: {err}");
            emit(MediaEventKind::Error(err));
            return;
        }
    };
    if let Some(duration) = source.duration_secs {
        emit(MediaEventKind::DurationKnown(duration));
    }
    emit(MediaEventKind::Ready);
    tracing::debug!(path = %path.display(), "audio source ready");

    let mut playing = false;
    let mut drained = false;
    let mut pending: Vec<f32> = Vec::new();
    let mut last_report = Instant::now();

    loop {
        loop {
            let command = match commands.try_recv() {
                Ok(command) => command,
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => return,
            };
            match command {
                DecoderCommand::Play => {
                    if !sink.owns(ticket) {
                        emit(MediaEventKind::PlayRejected("output taken over".into()));
                        continue;
                    }
                    if drained {
                        if let Err(err) = source.seek(0.0) {
                            emit(MediaEventKind::PlayRejected(err.to_string()));
                            continue;
                        }
                        pending.clear();
                        drained = false;
                    }
                    playing = true;
                    sink.set_paused(ticket, false);
                    emit(MediaEventKind::PlayStarted);
                }
                DecoderCommand::Pause => {
                    playing = false;
                    sink.set_paused(ticket, true);
                }
                DecoderCommand::Seek(secs) => {
                    pending.clear();
                    sink.clear();
                    drained = false;
                    match source.seek(secs) {
                        Ok(()) => emit(MediaEventKind::TimeUpdate(source.position_secs)),
                        Err(err) => tracing::warn!("audio seek failed: {err}"),
                    }
                }
                DecoderCommand::Stop => {
                    playing = false;
                    sink.set_paused(ticket, true);
                    pending.clear();
                    sink.clear();
                    drained = false;
                    if let Err(err) = source.seek(0.0) {
                        tracing::warn!("audio rewind failed: {err}");
                    }
                }
            }
        }

        if !playing {
            thread::sleep(IDLE_SLEEP);
            continue;
        }

        if last_report.elapsed() >= TIME_UPDATE_INTERVAL {
            let position = (source.position_secs - sink.buffered_secs()).max(0.0);
            emit(MediaEventKind::TimeUpdate(position));
            last_report = Instant::now();
        }

        if !pending.is_empty() {
            let taken = sink.push(ticket, &pending);
            pending.drain(..taken);
            if !pending.is_empty() {
                thread::sleep(IDLE_SLEEP);
            }
            continue;
        }

        if drained {
            // Wait for the device to play out what is queued.
            if sink.buffered_secs() > 0.0 {
                thread::sleep(IDLE_SLEEP);
                continue;
            }
            playing = false;
            sink.set_paused(ticket, true);
            emit(MediaEventKind::Ended);
            tracing::debug!(path = %path.display(), "audio track ended");
            continue;
        }

        match source.next_samples() {
            Ok(Some(samples)) => pending = samples,
            Ok(None) => drained = true,
            Err(err) => {
                tracing::warn!(path = %path.display(), "audio decoding failed: {err}");
                sink.set_paused(ticket, true);
                emit(MediaEventKind::Error(err));
                return;
            }
        }
    }
}

/// An opened audio stream plus its decoder and resampler.
struct AudioSource {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Audio,
    resampler: ffmpeg_next::software::resampling::Context,
    stream_index: usize,
    time_base: ffmpeg_next::Rational,
    output: AudioOutputConfig,
    resampled_channels: u16,
    duration_secs: Option<f64>,
    /// End of the most recently decoded audio, in seconds.
    position_secs: f64,
    /// Frames ending before this are skipped after a seek.
    seek_target: Option<f64>,
    eof_sent: bool,
}

impl AudioSource {
    fn open(path: &Path, output: AudioOutputConfig) -> Result<Self, MediaError> {
        let ictx = ffmpeg::open_input(path)?;
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| MediaError::NoStream(format!("no audio stream in {}", path.display())))?;
        let stream_index = stream.index();
        let time_base = stream.time_base();

        let duration_secs = if stream.duration() > 0 {
            Some(ffmpeg::pts_to_secs(stream.duration(), time_base))
        } else {
            ffmpeg::container_duration_secs(&ictx)
        };

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .and_then(|ctx| ctx.decoder().audio())
            .map_err(|e| MediaError::DecodingFailed(format!("audio decoder: {e}")))?;

        // Devices with more than two channels get stereo in the front pair.
        let (layout, resampled_channels) = match output.channels {
            1 => (ffmpeg_next::ChannelLayout::MONO, 1),
            _ => (ffmpeg_next::ChannelLayout::STEREO, 2),
        };

        let resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            layout,
            output.sample_rate,
        )
        .map_err(|e| MediaError::DecodingFailed(format!("resampler: {e}")))?;

        Ok(Self {
            ictx,
            decoder,
            resampler,
            stream_index,
            time_base,
            output,
            resampled_channels,
            duration_secs,
            position_secs: 0.0,
            seek_target: None,
            eof_sent: false,
        })
    }

    fn seek(&mut self, secs: f64) -> Result<(), MediaError> {
        let secs = match self.duration_secs {
            Some(duration) => secs.clamp(0.0, duration),
            None => secs.max(0.0),
        };
        ffmpeg::seek_to(&mut self.ictx, secs)?;
        self.decoder.flush();
        self.position_secs = secs;
        self.seek_target = (secs > 0.0).then_some(secs);
        self.eof_sent = false;
        Ok(())
    }

    /// Decodes up to the next chunk of output-format samples.
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    fn next_samples(&mut self) -> Result<Option<Vec<f32>>, MediaError> {
        loop {
            let mut frame = ffmpeg_next::frame::Audio::empty();
            if self.decoder.receive_frame(&mut frame).is_ok() {
                if let Some(samples) = self.convert(&frame)? {
                    return Ok(Some(samples));
                }
                continue;
            }
            if self.eof_sent {
                return Ok(None);
            }

            let mut fed = false;
            for (stream, packet) in self.ictx.packets() {
                if stream.index() != self.stream_index {
                    continue;
                }
                if let Err(e) = self.decoder.send_packet(&packet) {
                    tracing::trace!("skipping bad audio packet: {e}");
                    continue;
                }
                fed = true;
                break;
            }
            if !fed {
                let _ = self.decoder.send_eof();
                self.eof_sent = true;
            }
        }
    }

    /// Resamples one decoded frame; `None` when it is skipped for a seek.
    fn convert(&mut self, frame: &ffmpeg_next::frame::Audio) -> Result<Option<Vec<f32>>, MediaError> {
        let mut resampled = ffmpeg_next::frame::Audio::empty();
        self.resampler
            .run(frame, &mut resampled)
            .map_err(|e| MediaError::DecodingFailed(format!("resampling failed: {e}")))?;

        let frames = resampled.samples();
        let frame_secs = frames as f64 / f64::from(self.output.sample_rate.max(1));
        let start = frame
            .timestamp()
            .map_or(self.position_secs, |pts| ffmpeg::pts_to_secs(pts, self.time_base));

        if let Some(target) = self.seek_target {
            if start + frame_secs < target {
                return Ok(None);
            }
            self.seek_target = None;
        }
        self.position_secs = start + frame_secs;

        let packed = packed_f32(resampled.data(0), frames * usize::from(self.resampled_channels));
        Ok(Some(spread_channels(
            &packed,
            self.resampled_channels,
            self.output.channels,
        )))
    }
}

/// Reads `count` little-endian f32 samples from a packed plane.
fn packed_f32(data: &[u8], count: usize) -> Vec<f32> {
    data.chunks_exact(4)
        .take(count)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// Maps interleaved `from`-channel audio onto `to` device channels.
///
/// Extra device channels are left silent.
fn spread_channels(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    if from == to || from == 0 || to == 0 {
        return samples.to_vec();
    }
    let (from, to) = (usize::from(from), usize::from(to));
    let mut out = Vec::with_capacity(samples.len() / from * to);
    for frame in samples.chunks_exact(from) {
        out.extend_from_slice(&frame[..from.min(to)]);
        out.extend(std::iter::repeat_n(0.0, to.saturating_sub(from)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_samples_are_little_endian() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-1.0f32).to_le_bytes());
        bytes.extend_from_slice(&[0, 0]);
        assert_eq!(packed_f32(&bytes, 4), vec![0.5, -1.0]);
        assert_eq!(packed_f32(&bytes, 1), vec![0.5]);
    }

    #[test]
    fn stereo_spreads_into_surround_front_pair() {
        let out = spread_channels(&[0.1, 0.2, 0.3, 0.4], 2, 4);
        assert_eq!(out, vec![0.1, 0.2, 0.0, 0.0, 0.3, 0.4, 0.0, 0.0]);
    }

    #[test]
    fn matching_layout_is_untouched() {
        let input = [0.1, 0.2, 0.3];
        assert_eq!(spread_channels(&input, 1, 1), input.to_vec());
    }

    #[test]
    fn load_without_output_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("song.mp3"), b"not really audio").expect("write");

        let mut element = FfmpegAudioElement::new(dir.path(), None);
        let result = element.load("song.mp3", SourceToken::new(1));
        assert!(matches!(result, Err(MediaError::OutputUnavailable(_))));
    }

    #[test]
    fn load_of_missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut element = FfmpegAudioElement::new(dir.path(), None);
        let result = element.load("missing.mp3", SourceToken::new(1));
        assert!(matches!(result, Err(MediaError::SourceNotFound(_))));
    }

    #[test]
    fn play_without_source_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut element = FfmpegAudioElement::new(dir.path(), None);
        element.play();
        let event = element.poll_event().expect("event");
        assert!(matches!(event.kind, MediaEventKind::PlayRejected(_)));
        assert!(element.poll_event().is_none());
    }

    #[test]
    fn commands_without_source_are_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut element = FfmpegAudioElement::new(dir.path(), None);
        element.pause();
        element.seek(3.0);
        element.stop();
        element.unload();
        assert!(element.poll_event().is_none());
    }
}
