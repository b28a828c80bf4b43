//! Allocation-free render path tests.
//!
//! These tests verify that `Engine::render_frame()` does not allocate once
//! a composition is loaded. They render several seconds of the busiest
//! material the generator produces (twelve eighth-note slots with random
//! note lengths, the chord loop and the reverb tail) to catch allocations
//! on loop wrap-around, voice stealing or pause/resume.
//!
//! Just run `cargo test`; no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use em_engine::{Engine, Frame, MixSettings};
use em_ir::{EmotionAnalysis, Movement, Temperature};
use em_master::SessionPlan;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn loaded_engine(analysis: &EmotionAnalysis, seed: u64) -> Engine {
    let plan = SessionPlan::new(analysis, &mut StdRng::seed_from_u64(seed));
    let mut engine = Engine::new(44100, MixSettings::default());
    engine.load(&plan.composition, plan.engine_seed);
    engine.play();
    engine
}

/// Render for `duration_frames`, aborting on any heap allocation.
fn assert_render_alloc_free(mut engine: Engine, duration_frames: usize) {
    assert_no_alloc(|| {
        for _ in 0..duration_frames {
            engine.render_frame();
        }
    });
}

#[test]
fn chaotic_high_intensity_alloc_free() {
    let analysis = EmotionAnalysis::new("anger", "fear", 10, Temperature::Cold, Movement::Chaotic);
    assert_render_alloc_free(loaded_engine(&analysis, 1), 44100 * 5);
}

#[test]
fn stable_low_intensity_alloc_free() {
    let analysis = EmotionAnalysis::new("sadness", "love", 1, Temperature::Warm, Movement::Stable);
    assert_render_alloc_free(loaded_engine(&analysis, 2), 44100 * 5);
}

#[test]
fn pause_resume_alloc_free() {
    let analysis = EmotionAnalysis::new("hope", "joy", 6, Temperature::Warm, Movement::Chaotic);
    let mut engine = loaded_engine(&analysis, 3);
    assert_no_alloc(|| {
        for _ in 0..3 {
            for _ in 0..44100 {
                engine.render_frame();
            }
            engine.pause();
            for _ in 0..22050 {
                engine.render_frame();
            }
            engine.play();
        }
    });
}

#[test]
fn block_render_alloc_free() {
    let analysis = EmotionAnalysis::new("fear", "anger", 8, Temperature::Cold, Movement::Stable);
    let mut engine = loaded_engine(&analysis, 4);
    let mut block = vec![Frame::silence(); 512];
    assert_no_alloc(|| {
        for _ in 0..400 {
            engine.render_into(&mut block);
        }
    });
}
