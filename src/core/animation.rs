use crate::models::{Animation, SpringParams};
use std::time::Duration;

/// Integration step used by [`Spring::step`]
const SPRING_SUBSTEP_SECS: f64 = 0.001;

/// Fixed-duration slide between two offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitSlide {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl ExitSlide {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Offset after `elapsed`, eased in and out; clamps at both ends
    pub fn offset_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Cubic ease-in-out over `t` in [0, 1]
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Damped spring pulling an offset back to 0
///
/// There is no fixed duration; the spring is done once both displacement
/// and speed drop under the rest thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    params: SpringParams,
    position: f64,
    velocity: f64,
    settled: bool,
}

impl Spring {
    pub fn new(from_offset: f64, params: SpringParams) -> Self {
        let mut spring = Self {
            params,
            position: from_offset,
            velocity: 0.0,
            settled: false,
        };
        spring.check_rest();
        spring
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advance the simulation by `dt` and return the new offset
    pub fn step(&mut self, dt: Duration) -> f64 {
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 && !self.settled {
            let h = remaining.min(SPRING_SUBSTEP_SECS);
            let force = -self.params.stiffness * self.position - self.params.damping * self.velocity;
            self.velocity += force / self.params.mass * h;
            self.position += self.velocity * h;
            remaining -= h;
            if !self.position.is_finite() || !self.velocity.is_finite() {
                tracing::warn!("Spring diverged with {:?}, snapping to rest", self.params);
                self.position = 0.0;
                self.velocity = 0.0;
                self.settled = true;
                break;
            }
            self.check_rest();
        }
        self.position
    }

    fn check_rest(&mut self) {
        if self.position.abs() <= self.params.rest_displacement
            && self.velocity.abs() <= self.params.rest_speed
        {
            self.position = 0.0;
            self.velocity = 0.0;
            self.settled = true;
        }
    }
}

/// A running animation, advanced frame by frame by the render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Playback {
    Exit { slide: ExitSlide, elapsed: Duration },
    Spring(Spring),
}

impl Playback {
    pub fn start(animation: &Animation, spring: SpringParams) -> Self {
        match *animation {
            Animation::Exit { from_offset, to_offset, duration, .. } => Playback::Exit {
                slide: ExitSlide::new(from_offset, to_offset, duration),
                elapsed: Duration::ZERO,
            },
            Animation::SpringBack { from_offset } => Playback::Spring(Spring::new(from_offset, spring)),
        }
    }

    /// Advance by one frame and return the offset to draw
    pub fn advance(&mut self, frame: Duration) -> f64 {
        match self {
            Playback::Exit { slide, elapsed } => {
                *elapsed += frame;
                slide.offset_at(*elapsed)
            }
            Playback::Spring(spring) => spring.step(frame),
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Playback::Exit { slide, elapsed } => slide.is_finished(*elapsed),
            Playback::Spring(spring) => spring.is_settled(),
        }
    }
}
