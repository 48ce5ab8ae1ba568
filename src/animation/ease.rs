/// Easing curves used to remap normalized progress before interpolation.
///
/// The set is closed. `EaseIn`/`EaseOut`/`EaseInOut` are built from one base cubic-bezier curve
/// `(0.42, 0, 1, 1)`: `EaseIn` applies it directly, `EaseOut` mirrors it, and `EaseInOut` runs it
/// forward over the first half and mirrored over the second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Identity mapping.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply this curve to normalized progress `t`; input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => BASE.apply(t),
            Self::EaseOut => 1.0 - BASE.apply(1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    BASE.apply(t * 2.0) / 2.0
                } else {
                    1.0 - BASE.apply((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

const BASE: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-3;
const SUBDIVISION_PRECISION: f64 = 1e-9;
const SUBDIVISION_MAX_ITERATIONS: usize = 60;

/// Cubic bezier timing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
///
/// `x1` and `x2` must lie in `[0, 1]` so that x(t) is monotonic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    pub(crate) const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coeff_a(a1: f64, a2: f64) -> f64 {
        1.0 - 3.0 * a2 + 3.0 * a1
    }

    fn coeff_b(a1: f64, a2: f64) -> f64 {
        3.0 * a2 - 6.0 * a1
    }

    fn coeff_c(a1: f64) -> f64 {
        3.0 * a1
    }

    fn calc(t: f64, a1: f64, a2: f64) -> f64 {
        ((Self::coeff_a(a1, a2) * t + Self::coeff_b(a1, a2)) * t + Self::coeff_c(a1)) * t
    }

    fn slope(t: f64, a1: f64, a2: f64) -> f64 {
        3.0 * Self::coeff_a(a1, a2) * t * t + 2.0 * Self::coeff_b(a1, a2) * t + Self::coeff_c(a1)
    }

    fn t_for_x(self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let slope = Self::slope(t, self.x1, self.x2);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            let err = Self::calc(t, self.x1, self.x2) - x;
            if err.abs() <= SUBDIVISION_PRECISION {
                return t;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }
        if (Self::calc(t, self.x1, self.x2) - x).abs() <= SUBDIVISION_PRECISION {
            return t;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        let mut mid = x;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            mid = lo + (hi - lo) / 2.0;
            let err = Self::calc(mid, self.x1, self.x2) - x;
            if err.abs() <= SUBDIVISION_PRECISION {
                break;
            }
            if err > 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        mid
    }

    /// Curve value at `x` in `[0, 1]`; endpoints are exact.
    pub(crate) fn apply(self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        Self::calc(self.t_for_x(x), self.y1, self.y2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
