//! Time-driven shift animation.
//!
//! [`ParallaxLoop::tick`] samples a [`TimeSource`], derives the shift vector
//! from [`ShiftMotion`], pushes it into the renderer and reports what the
//! page should apply to the container transform. The browser calls `tick`
//! once per animation frame; tests call it directly with a stepped clock.

use std::cell::Cell;
use std::rc::Rc;

use crate::{FrameTarget, ParallaxRenderer, RenderError};

/// Displacement applied to depth-scaled texture lookups.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shift {
    pub x: f64,
    pub y: f64,
}

impl Shift {
    pub fn to_uniform(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

/// Circular motion of the shift vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftMotion {
    pub strength: f64,
    /// Radians per millisecond.
    pub speed: f64,
}

impl ShiftMotion {
    pub const DEFAULT_SPEED: f64 = 0.0025;

    pub fn new(strength: f64) -> Self {
        Self {
            strength,
            speed: Self::DEFAULT_SPEED,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// `[strength * sin(t * speed), strength * cos(t * speed)]`, `t` in ms.
    pub fn shift_at(&self, time_ms: f64) -> Shift {
        let phase = time_ms * self.speed;
        Shift {
            x: self.strength * phase.sin(),
            y: self.strength * phase.cos(),
        }
    }
}

/// Perspective tilt of the preview container that follows the shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssTilt {
    pub perspective_px: f64,
    /// Rotation in degrees per unit of shift.
    pub degrees: f64,
}

impl Default for CssTilt {
    fn default() -> Self {
        Self {
            perspective_px: 600.0,
            degrees: 10.0,
        }
    }
}

/// Result of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub time_ms: f64,
    pub shift: Shift,
    pub tilt: CssTilt,
}

impl FrameUpdate {
    /// CSS `transform` value for the preview container.
    pub fn css_transform(&self) -> String {
        format!(
            "perspective({}px) rotateY({}deg) rotateX({}deg)",
            self.tilt.perspective_px,
            -self.shift.x * self.tilt.degrees,
            self.shift.y * self.tilt.degrees,
        )
    }
}

/// Source of frame timestamps in milliseconds.
pub trait TimeSource {
    fn now_ms(&mut self) -> f64;
}

/// Clock that advances by a fixed step on every sample.
#[derive(Debug, Clone, Copy)]
pub struct SteppedTimeSource {
    next_ms: f64,
    step_ms: f64,
}

impl SteppedTimeSource {
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            next_ms: start_ms,
            step_ms,
        }
    }

    /// Always reports `time_ms`.
    pub fn fixed(time_ms: f64) -> Self {
        Self::new(time_ms, 0.0)
    }
}

impl TimeSource for SteppedTimeSource {
    fn now_ms(&mut self) -> f64 {
        let now = self.next_ms;
        self.next_ms += self.step_ms;
        now
    }
}

/// Shared stop flag between a running loop and whoever may end it.
#[derive(Debug, Clone, Default)]
pub struct LoopControl {
    stopped: Rc<Cell<bool>>,
}

impl LoopControl {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

pub struct ParallaxLoop<T, C> {
    renderer: ParallaxRenderer<T>,
    motion: ShiftMotion,
    clock: C,
    tilt: CssTilt,
    control: LoopControl,
    frames: u64,
}

impl<T: FrameTarget, C: TimeSource> ParallaxLoop<T, C> {
    pub fn new(renderer: ParallaxRenderer<T>, motion: ShiftMotion, clock: C) -> Self {
        Self {
            renderer,
            motion,
            clock,
            tilt: CssTilt::default(),
            control: LoopControl::default(),
            frames: 0,
        }
    }

    pub fn with_tilt(mut self, tilt: CssTilt) -> Self {
        self.tilt = tilt;
        self
    }

    /// Handle that stops this loop.
    pub fn control(&self) -> LoopControl {
        self.control.clone()
    }

    pub fn renderer(&self) -> &ParallaxRenderer<T> {
        &self.renderer
    }

    /// Frames applied so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Applies one frame, or returns `None` without drawing once stopped.
    pub fn tick(&mut self) -> Result<Option<FrameUpdate>, RenderError> {
        if self.control.is_stopped() {
            return Ok(None);
        }
        let time_ms = self.clock.now_ms();
        let shift = self.motion.shift_at(time_ms);
        self.renderer.set_shift(shift.to_uniform())?;
        self.frames += 1;
        Ok(Some(FrameUpdate {
            time_ms,
            shift,
            tilt: self.tilt,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParallaxUniforms;

    #[derive(Default)]
    struct CountingTarget {
        draws: usize,
    }

    impl FrameTarget for CountingTarget {
        fn draw(&mut self, _: &ParallaxUniforms) -> Result<(), RenderError> {
            self.draws += 1;
            Ok(())
        }
    }

    fn parallax_loop(strength: f64) -> ParallaxLoop<CountingTarget, SteppedTimeSource> {
        let renderer = ParallaxRenderer::new(
            CountingTarget::default(),
            ParallaxUniforms::for_image(100, 100),
        )
        .unwrap();
        ParallaxLoop::new(
            renderer,
            ShiftMotion::new(strength),
            SteppedTimeSource::new(0.0, 16.0),
        )
    }

    #[test]
    fn shift_follows_strength_and_speed() {
        let motion = ShiftMotion::new(2.0);
        for t in [0.0, 16.7, 1234.5, 98765.4321] {
            let shift = motion.shift_at(t);
            assert!((shift.x - 2.0 * (t * 0.0025).sin()).abs() < 1e-9);
            assert!((shift.y - 2.0 * (t * 0.0025).cos()).abs() < 1e-9);
        }
    }

    #[test]
    fn css_transform_tilts_against_shift() {
        let update = FrameUpdate {
            time_ms: 0.0,
            shift: Shift { x: 0.5, y: -0.25 },
            tilt: CssTilt::default(),
        };
        assert_eq!(
            update.css_transform(),
            "perspective(600px) rotateY(-5deg) rotateX(-2.5deg)"
        );
    }

    #[test]
    fn ticks_apply_shift_and_redraw() {
        let mut parallax = parallax_loop(2.0);
        let first = parallax.tick().unwrap().unwrap();
        assert_eq!(first.time_ms, 0.0);
        assert_eq!(first.shift, Shift { x: 0.0, y: 2.0 });
        let second = parallax.tick().unwrap().unwrap();
        assert_eq!(second.time_ms, 16.0);
        assert_eq!(
            parallax.renderer().uniforms().shift,
            second.shift.to_uniform()
        );
        assert_eq!(parallax.frames(), 2);
        assert_eq!(parallax.renderer().target().draws, 3);
    }

    #[test]
    fn stopped_loop_does_not_draw() {
        let mut parallax = parallax_loop(1.0);
        parallax.tick().unwrap();
        let control = parallax.control();
        control.stop();
        assert!(parallax.tick().unwrap().is_none());
        assert!(parallax.tick().unwrap().is_none());
        assert_eq!(parallax.frames(), 1);
        assert_eq!(parallax.renderer().target().draws, 2);
    }

    #[test]
    fn fixed_clock_repeats() {
        let mut clock = SteppedTimeSource::fixed(42.0);
        assert_eq!(clock.now_ms(), 42.0);
        assert_eq!(clock.now_ms(), 42.0);
    }
}
