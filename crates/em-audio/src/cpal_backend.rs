//! CPAL-based audio output backend.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use em_engine::Frame;
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::traits::{AudioError, AudioHost, AudioOutput};

/// How long `write` parks while the ring buffer is full.
const WRITE_BACKOFF: Duration = Duration::from_millis(2);

/// A device that has taken nothing for this long is treated as gone.
const STALL_TIMEOUT: Duration = Duration::from_secs(1);

/// The system's default output device.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpalHost;

impl AudioHost for CpalHost {
    type Output = CpalOutput;

    fn open(&self) -> Result<CpalOutput, AudioError> {
        let (mut output, consumer) = CpalOutput::new()?;
        output.build_stream(consumer)?;
        Ok(output)
    }
}

/// CPAL-based audio output.
pub struct CpalOutput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    producer: HeapProd<Frame>,
    running: Arc<AtomicBool>,
}

impl CpalOutput {
    /// Create a new CPAL output with default device.
    pub fn new() -> Result<(Self, HeapCons<Frame>), AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;

        let mut config: StreamConfig = config.into();
        // The stream callback assumes 2-channel interleaving.
        config.channels = 2;

        // About 100ms of audio.
        let buffer_size = (config.sample_rate.0 as usize / 10) * 2;
        let rb = HeapRb::<Frame>::new(buffer_size);
        let (producer, consumer) = rb.split();

        log::info!(
            "opened output device {:?} at {} Hz",
            device.name().unwrap_or_else(|_| "<unnamed>".into()),
            config.sample_rate.0
        );

        let output = Self {
            device,
            config,
            stream: None,
            producer,
            running: Arc::new(AtomicBool::new(false)),
        };

        Ok((output, consumer))
    }

    /// Build and start the audio stream.
    pub fn build_stream(&mut self, mut consumer: HeapCons<Frame>) -> Result<(), AudioError> {
        let running = self.running.clone();
        let channels = self.config.channels as usize;

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !running.load(Ordering::Relaxed) {
                        data.fill(0.0);
                        return;
                    }

                    for chunk in data.chunks_mut(channels) {
                        if let Some(frame) = consumer.try_pop() {
                            let left = frame.left as f32 / 32768.0;
                            let right = frame.right as f32 / 32768.0;
                            for (i, sample) in chunk.iter_mut().enumerate() {
                                *sample = match i {
                                    0 => left,
                                    1 => right,
                                    _ => 0.0,
                                };
                            }
                        } else {
                            chunk.fill(0.0);
                        }
                    }
                },
                |err| log::error!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;

        stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        self.running.store(true, Ordering::Relaxed);
        self.stream = Some(stream);

        Ok(())
    }
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn write(&mut self, frames: &[Frame], cancel: &AtomicBool) -> Result<(), AudioError> {
        if self.stream.is_none() {
            return Err(AudioError::Playback("stream not built".into()));
        }
        let producer = &mut self.producer;
        queue_frames(frames, cancel, STALL_TIMEOUT, |rest| producer.push_slice(rest))
    }

    fn start(&mut self) -> Result<(), AudioError> {
        self.running.store(true, Ordering::Relaxed);
        if let Some(ref stream) = self.stream {
            stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running.store(false, Ordering::Relaxed);
        if let Some(ref stream) = self.stream {
            stream.pause().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }
}

/// Push `frames` through `push` (which returns how many it took), parking
/// while nothing fits. Returns early without error once `cancel` is raised,
/// and fails if no frame is taken for `stall_timeout`.
fn queue_frames(
    frames: &[Frame],
    cancel: &AtomicBool,
    stall_timeout: Duration,
    mut push: impl FnMut(&[Frame]) -> usize,
) -> Result<(), AudioError> {
    let mut rest = frames;
    let mut last_progress = Instant::now();
    while !rest.is_empty() {
        let pushed = push(rest);
        rest = &rest[pushed..];
        if rest.is_empty() {
            break;
        }
        if cancel.load(Ordering::Acquire) {
            return Ok(());
        }
        if pushed > 0 {
            last_progress = Instant::now();
        } else if last_progress.elapsed() >= stall_timeout {
            return Err(AudioError::Playback("output stopped taking frames".into()));
        }
        std::thread::sleep(WRITE_BACKOFF);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(len: usize) -> Vec<Frame> {
        vec![Frame { left: 1, right: 1 }; len]
    }

    #[test]
    fn drains_in_pieces() {
        let cancel = AtomicBool::new(false);
        let mut taken = 0;
        queue_frames(&block(10), &cancel, STALL_TIMEOUT, |rest| {
            let n = rest.len().min(3);
            taken += n;
            n
        })
        .unwrap();
        assert_eq!(taken, 10);
    }

    #[test]
    fn cancel_ends_a_blocked_write() {
        let cancel = AtomicBool::new(false);
        let mut calls = 0;
        let result = queue_frames(&block(4), &cancel, Duration::from_secs(60), |_| {
            calls += 1;
            if calls == 3 {
                cancel.store(true, Ordering::Release);
            }
            0
        });
        assert_eq!(result, Ok(()));
        assert_eq!(calls, 3);
    }

    #[test]
    fn stalled_device_is_an_error() {
        let cancel = AtomicBool::new(false);
        let result = queue_frames(&block(4), &cancel, Duration::from_millis(20), |_| 0);
        assert!(matches!(result, Err(AudioError::Playback(_))));
    }
}
