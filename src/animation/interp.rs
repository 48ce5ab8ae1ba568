use crate::animation::ease::Easing;

/// Behaviour of [`interpolate`] outside its input range, chosen independently per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolate {
    /// Continue the linear mapping past the boundary (easing is not applied there).
    #[default]
    Extend,
    /// Hold the boundary output value.
    Clamp,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterpolateOpts {
    /// Behaviour below the input range.
    pub left: Extrapolate,
    /// Behaviour above the input range.
    pub right: Extrapolate,
    /// Curve applied to normalized progress inside the input range.
    pub easing: Option<Easing>,
}

impl InterpolateOpts {
    /// Extend on the left, clamp on the right; the default for entrance ramps.
    pub const CLAMP_RIGHT: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Clamp,
        easing: None,
    };

    /// Clamp on both sides; used for exit fades that must hold their initial value.
    pub const CLAMP_BOTH: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
        easing: None,
    };

    /// Same extrapolation, with `easing` applied inside the range.
    pub fn with_easing(self, easing: Easing) -> Self {
        Self {
            easing: Some(easing),
            ..self
        }
    }
}

/// Map `input` from `input_range` to `output_range`.
///
/// Inside the input range progress is normalized to `[0, 1]`, passed through the optional easing
/// curve and mapped linearly onto the output range. Outside it each side either clamps or continues
/// linearly, per [`InterpolateOpts`].
///
/// A degenerate input range (`end <= start`) behaves as a step at `start`: inputs below it yield the
/// first output value, everything else the second.
pub fn interpolate(
    input: f64,
    input_range: [f64; 2],
    output_range: [f64; 2],
    opts: InterpolateOpts,
) -> f64 {
    let [in_start, in_end] = input_range;
    let [out_start, out_end] = output_range;

    if in_end <= in_start {
        return if input < in_start { out_start } else { out_end };
    }

    let t = (input - in_start) / (in_end - in_start);
    let t = if t < 0.0 {
        match opts.left {
            Extrapolate::Clamp => 0.0,
            Extrapolate::Extend => return lerp(out_start, out_end, t),
        }
    } else if t > 1.0 {
        match opts.right {
            Extrapolate::Clamp => 1.0,
            Extrapolate::Extend => return lerp(out_start, out_end, t),
        }
    } else {
        t
    };

    let t = match opts.easing {
        Some(easing) => easing.apply(t),
        None => t,
    };
    lerp(out_start, out_end, t)
}

/// Linear blend from `a` to `b` by `t` (unclamped).
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
