mod common;

use common::test_utils::{MockLoader, triangle_model};
use depth_sketch::{
    Sketch, SketchConfig, Viewport,
    sketch::clock::{FixedStep, FrameClock},
};

#[test]
fn fixed_step_ignores_wall_clock() {
    let mut clock = FixedStep::new(0.5);
    let mut expected = 0.0;
    for _ in 0..100 {
        std::thread::sleep(std::time::Duration::from_micros(50));
        expected += 0.5;
        assert_eq!(clock.tick(), expected);
    }
    assert_eq!(clock.time(), 50.0);
}

#[test]
fn sketch_time_advances_by_the_variant_step() {
    let mut face = Sketch::new(
        SketchConfig::face(),
        MockLoader::new(triangle_model("face")),
        Viewport::new(800, 600),
    );
    let mut skull = Sketch::new(
        SketchConfig::skull(),
        MockLoader::new(triangle_model("skull")),
        Viewport::new(800, 600),
    );
    for _ in 0..10 {
        face.advance();
        skull.advance();
    }
    assert_eq!(face.time(), 5.0);
    assert!((skull.time() - 0.5).abs() < 1e-6);
}

#[test]
fn two_runs_produce_identical_frames() {
    let run = || {
        let mut sketch = Sketch::new(
            SketchConfig::face(),
            MockLoader::new(triangle_model("face")),
            Viewport::new(800, 600),
        );
        (0..25).map(|_| sketch.advance()).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

struct Frozen;

impl FrameClock for Frozen {
    fn tick(&mut self) -> f32 {
        42.0
    }

    fn time(&self) -> f32 {
        42.0
    }
}

#[test]
fn injected_clock_drives_the_time_uniform() {
    let mut sketch = Sketch::with_clock(
        SketchConfig::skull(),
        MockLoader::new(triangle_model("skull")),
        Viewport::new(800, 600),
        Frozen,
    );
    let frame = sketch.advance();
    assert_eq!(frame.time, 42.0);
    assert_eq!(frame.uniforms.time, 42.0);
    assert_eq!(sketch.uniforms().time, 42.0);
}
