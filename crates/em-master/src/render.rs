//! Offline rendering: a session's music without an audio device.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use em_engine::{Engine, Frame, MixSettings};
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::session::SessionPlan;

/// Render `plan` for `seconds` at `sample_rate`, exactly as a live session
/// would play it from transport zero.
pub fn render_frames(plan: &SessionPlan, mix: MixSettings, sample_rate: u32, seconds: f32) -> Vec<Frame> {
    let mut engine = Engine::new(sample_rate, mix);
    engine.load(&plan.composition, plan.engine_seed);
    engine.play();
    let count = (seconds.max(0.0) * sample_rate as f32).round() as usize;
    engine.render_frames(count)
}

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Encode frames as 16-bit stereo PCM WAV into any seekable writer.
pub fn write_wav<W: Write + Seek>(w: W, frames: &[Frame], sample_rate: u32) -> hound::Result<()> {
    let mut writer = WavWriter::new(w, wav_spec(sample_rate))?;
    for frame in frames {
        writer.write_sample(frame.left)?;
        writer.write_sample(frame.right)?;
    }
    writer.finalize()
}

/// Encode frames into an in-memory WAV file.
pub fn frames_to_wav(frames: &[Frame], sample_rate: u32) -> hound::Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav(&mut cursor, frames, sample_rate)?;
    Ok(cursor.into_inner())
}

/// Encode frames into a WAV file at `path`.
pub fn save_wav(path: impl AsRef<Path>, frames: &[Frame], sample_rate: u32) -> hound::Result<()> {
    let file = File::create(path)?;
    write_wav(BufWriter::new(file), frames, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use em_ir::{EmotionAnalysis, Movement, Temperature};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SR: u32 = 8000;

    fn plan(seed: u64) -> SessionPlan {
        let analysis = EmotionAnalysis::new("sadness", "fear", 6, Temperature::Cold, Movement::Stable);
        SessionPlan::new(&analysis, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn renders_requested_length() {
        let frames = render_frames(&plan(1), MixSettings::default(), SR, 1.5);
        assert_eq!(frames.len(), 12000);
        assert!(frames.iter().any(|f| !f.is_silent()));
    }

    #[test]
    fn same_plan_renders_identically() {
        let a = render_frames(&plan(4), MixSettings::default(), SR, 1.0);
        let b = render_frames(&plan(4), MixSettings::default(), SR, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn wav_header_and_size() {
        let frames = render_frames(&plan(2), MixSettings::default(), SR, 0.5);
        let bytes = frames_to_wav(&frames, SR).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + frames.len() * 4);
    }

    #[test]
    fn wav_round_trips_through_reader() {
        let frames = render_frames(&plan(3), MixSettings::default(), SR, 0.25);
        let bytes = frames_to_wav(&frames, SR).unwrap();
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, SR);
        assert_eq!(reader.len() as usize, frames.len() * 2);
    }

    #[test]
    fn save_wav_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let frames = render_frames(&plan(5), MixSettings::default(), SR, 0.1);
        save_wav(&path, &frames, SR).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.duration() as usize, frames.len());
    }
}
