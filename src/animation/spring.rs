use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    foundation::core::Fps,
};

/// Physical parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Damping coefficient.
    pub damping: f64,
    /// Spring stiffness.
    pub stiffness: f64,
    /// Moving mass.
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SpringConfig {
    /// `damping = 10`, `stiffness = 100`, `mass = 1`.
    pub const DEFAULT: Self = Self {
        damping: 10.0,
        stiffness: 100.0,
        mass: 1.0,
    };

    /// Build a configuration from all three parameters.
    pub const fn new(damping: f64, stiffness: f64, mass: f64) -> Self {
        Self {
            damping,
            stiffness,
            mass,
        }
    }

    /// Default stiffness and mass with a custom damping.
    pub const fn damped(damping: f64) -> Self {
        Self {
            damping,
            ..Self::DEFAULT
        }
    }

    /// Damping ratio `c / (2 * sqrt(k * m))`; `< 1` oscillates around the target.
    pub fn damping_ratio(self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// A spring released from `from` toward `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    /// Value before release.
    pub from: f64,
    /// Rest value.
    pub to: f64,
    /// Stretch (or squeeze) the natural settle time to this many frames.
    pub duration_frames: Option<f64>,
    /// Physical parameters.
    pub config: SpringConfig,
}

/// Distance from the target below which a spring counts as settled.
pub const REST_THRESHOLD: f64 = 0.005;

// Consecutive settled frames required before a spring is considered at rest.
const SETTLE_FRAMES: u32 = 20;
// Undamped or pathological springs never settle; measurement stops here.
const MAX_MEASURE_FRAMES: u64 = 100_000;
// Longest integration step, in milliseconds.
const MAX_STEP_MS: f64 = 64.0;

impl Spring {
    /// Spring from `from` to `to` with [`SpringConfig::DEFAULT`] and no fixed duration.
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            duration_frames: None,
            config: SpringConfig::DEFAULT,
        }
    }

    /// Fix the time the spring takes to settle.
    pub fn duration(self, frames: f64) -> Self {
        Self {
            duration_frames: Some(frames),
            ..self
        }
    }

    /// Replace the physical parameters.
    pub fn config(self, config: SpringConfig) -> Self {
        Self { config, ..self }
    }

    /// Value at `frame` frames after release.
    ///
    /// Negative frames return `from` (not yet released). With a fixed duration, frames past it return
    /// exactly `to`.
    pub fn sample(&self, frame: f64, fps: Fps) -> f64 {
        let t = match self.duration_frames {
            None => frame,
            Some(duration) => {
                if frame > duration {
                    return self.to;
                }
                let natural = measure_spring(fps, self.config, REST_THRESHOLD) as f64;
                frame / (duration / natural)
            }
        };
        let progress = unit_spring(t, fps, self.config).current;
        if self.from == 0.0 && self.to == 1.0 {
            progress
        } else {
            interpolate(
                progress,
                [0.0, 1.0],
                [self.from, self.to],
                InterpolateOpts::default(),
            )
        }
    }
}

/// Free-function form of [`Spring::sample`].
pub fn spring(frame: f64, fps: Fps, params: Spring) -> f64 {
    params.sample(frame, fps)
}

/// Number of frames a unit spring takes to come to rest at `fps`.
///
/// The spring is at rest once it has stayed within `threshold` of its target for 20 consecutive
/// frames, so a bouncy spring crossing the target early does not count as settled.
pub fn measure_spring(fps: Fps, config: SpringConfig, threshold: f64) -> u64 {
    let ms_per_frame = 1000.0 / fps.as_f64();
    let mut frame = 0u64;
    let mut state = SpringState::default().advance(0.0, config);
    let off_target = |s: &SpringState| (s.current - 1.0).abs() >= threshold;

    while off_target(&state) {
        if frame >= MAX_MEASURE_FRAMES {
            return frame;
        }
        frame += 1;
        state = state.advance(frame as f64 * ms_per_frame, config);
    }

    let mut finished = frame;
    let mut settled = 0u32;
    while settled < SETTLE_FRAMES {
        if frame >= MAX_MEASURE_FRAMES {
            break;
        }
        frame += 1;
        state = state.advance(frame as f64 * ms_per_frame, config);
        if off_target(&state) {
            settled = 0;
            finished = frame + 1;
        }
        settled += 1;
    }
    finished
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SpringState {
    last_ms: f64,
    current: f64,
    velocity: f64,
}

impl SpringState {
    // Closed-form step of a unit spring (0 -> 1) from `last_ms` to `now_ms`.
    fn advance(self, now_ms: f64, config: SpringConfig) -> Self {
        let dt = (now_ms - self.last_ms).min(MAX_STEP_MS) / 1000.0;
        let SpringConfig {
            damping: c,
            stiffness: k,
            mass: m,
        } = config;

        let v0 = -self.velocity;
        let x0 = 1.0 - self.current;
        let zeta = c / (2.0 * (k * m).sqrt());
        let omega0 = (k / m).sqrt();

        let (current, velocity) = if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let (sin1, cos1) = (omega1 * dt).sin_cos();
            let envelope = (-zeta * omega0 * dt).exp();
            let frag = envelope * (sin1 * ((v0 + zeta * omega0 * x0) / omega1) + x0 * cos1);
            let velocity = zeta * omega0 * frag
                - envelope * (cos1 * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin1);
            (1.0 - frag, velocity)
        } else {
            let envelope = (-omega0 * dt).exp();
            let current = 1.0 - envelope * (x0 + (v0 + omega0 * x0) * dt);
            let velocity = envelope * (v0 * (dt * omega0 - 1.0) + dt * x0 * omega0 * omega0);
            (current, velocity)
        };

        Self {
            last_ms: now_ms,
            current,
            velocity,
        }
    }
}

// Unit spring sampled at a possibly fractional frame, integrating one frame at a time.
fn unit_spring(frame: f64, fps: Fps, config: SpringConfig) -> SpringState {
    let frame = frame.max(0.0);
    let whole = frame.floor();
    let rest = frame - whole;
    let ms_per_frame = 1000.0 / fps.as_f64();

    let mut state = SpringState::default();
    let steps = whole as u64;
    for f in 0..=steps {
        let at = if f == steps {
            f as f64 + rest
        } else {
            f as f64
        };
        state = state.advance(at * ms_per_frame, config);
    }
    state
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
