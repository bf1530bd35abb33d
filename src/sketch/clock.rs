//! Frame time sources.

/// Advances the sketch's time once per rendered frame.
pub trait FrameClock {
    /// Advance by one frame and return the new time.
    fn tick(&mut self) -> f32;
    fn time(&self) -> f32;
}

/// Adds a fixed step every frame, regardless of how long the frame took.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStep {
    step: f32,
    time: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self { step, time: 0.0 }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl FrameClock for FixedStep {
    fn tick(&mut self) -> f32 {
        self.time += self.step;
        self.time
    }

    fn time(&self) -> f32 {
        self.time
    }
}
