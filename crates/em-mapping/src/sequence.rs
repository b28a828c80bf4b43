//! Sequence generator: melody slots and the harmony triad.

use em_ir::{
    Composition, HarmonyChord, Melody, MelodyEvent, Movement, Note, NoteDuration, NoteValue,
    SCALE_DEGREES,
};
use rand::Rng;

use crate::mapper::MusicParams;

/// Chance that a chaotic slot becomes a rest.
pub const REST_PROBABILITY: f64 = 0.3;

/// Chance that a note is lifted one octave above the base register.
pub const OCTAVE_UP_PROBABILITY: f64 = 0.3;

/// Fill `params.note_count` slots from the melody scale.
///
/// Stable movement never rests. Chaotic movement rests with
/// [`REST_PROBABILITY`]; an all-rest melody is valid.
pub fn generate_melody<R: Rng + ?Sized>(params: &MusicParams, rng: &mut R) -> Melody {
    let mut melody = Melody::new();
    for _ in 0..params.note_count.min(melody.capacity()) {
        if params.movement.is_chaotic() && rng.gen_bool(REST_PROBABILITY) {
            melody.push(MelodyEvent::Rest);
            continue;
        }
        let pitch = params.scale.degree(rng.gen_range(0..SCALE_DEGREES));
        let lift = if rng.gen_bool(OCTAVE_UP_PROBABILITY) { 1 } else { 0 };
        melody.push(MelodyEvent::Note(Note::new(pitch, params.octave + lift)));
    }
    melody
}

/// Degrees 1, 3 and 5 of the harmony scale, one octave under the melody.
pub fn harmony_chord(params: &MusicParams) -> HarmonyChord {
    let octave = params.octave - 1;
    let scale = params.harmony_scale;
    HarmonyChord {
        notes: [scale.note(0, octave), scale.note(2, octave), scale.note(4, octave)],
    }
}

/// Per-note melody length, picked when each note fires.
pub fn melody_duration(movement: Movement) -> NoteDuration {
    match movement {
        Movement::Chaotic => NoteDuration::EitherOf(NoteValue::Eighth, NoteValue::Quarter),
        Movement::Stable => NoteDuration::Fixed(NoteValue::Quarter),
    }
}

/// Generate the full session content from resolved parameters.
pub fn compose<R: Rng + ?Sized>(params: &MusicParams, rng: &mut R) -> Composition {
    Composition {
        bpm: params.bpm,
        melody: generate_melody(params, rng),
        subdivision: params.subdivision,
        melody_timbre: params.timbre,
        melody_duration: melody_duration(params.movement),
        chord: harmony_chord(params),
        chord_duration: NoteValue::Half,
        chord_interval: NoteValue::Measure,
    }
}
