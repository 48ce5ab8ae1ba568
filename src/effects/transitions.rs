use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    foundation::core::Vec2,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "&'static str")]
/// Transition declared on a scene, played while it overlaps the next one.
///
/// Deserialization never fails: spellings outside the closed set become
/// [`TransitionType::Unrecognized`], which blends like a crossfade.
pub enum TransitionType {
    /// Crossfade.
    #[default]
    Fade,
    /// Crossfade (same blend as `fade`).
    Dissolve,
    /// Incoming scene enters from the right edge.
    SlideLeft,
    /// Incoming scene enters from the left edge.
    SlideRight,
    /// Incoming scene enters from the bottom edge.
    SlideUp,
    /// Any other spelling.
    Unrecognized,
}

impl From<String> for TransitionType {
    fn from(s: String) -> Self {
        parse_transition(&s)
    }
}

impl From<TransitionType> for &'static str {
    fn from(t: TransitionType) -> Self {
        t.as_str()
    }
}

impl TransitionType {
    /// Script spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Dissolve => "dissolve",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::SlideUp => "slide-up",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Blend family for this transition.
    pub fn strategy(self) -> BlendStrategy {
        presentation_for(self)
    }
}

/// Parse a script spelling; case and surrounding whitespace are ignored.
pub fn parse_transition(kind: &str) -> TransitionType {
    match kind.trim().to_ascii_lowercase().as_str() {
        "fade" => TransitionType::Fade,
        "dissolve" => TransitionType::Dissolve,
        "slide-left" => TransitionType::SlideLeft,
        "slide-right" => TransitionType::SlideRight,
        "slide-up" => TransitionType::SlideUp,
        _ => TransitionType::Unrecognized,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Edge the incoming scene enters from.
#[allow(missing_docs)]
pub enum SlideFrom {
    Right,
    Left,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How two overlapping scenes are composited.
pub enum BlendStrategy {
    /// Incoming fades in over the outgoing scene.
    Crossfade,
    /// Incoming pushes the outgoing scene off the opposite edge.
    Slide(SlideFrom),
}

/// Map a transition to its blend family. Unrecognized transitions crossfade.
pub fn presentation_for(t: TransitionType) -> BlendStrategy {
    match t {
        TransitionType::Fade | TransitionType::Dissolve | TransitionType::Unrecognized => {
            BlendStrategy::Crossfade
        }
        TransitionType::SlideLeft => BlendStrategy::Slide(SlideFrom::Right),
        TransitionType::SlideRight => BlendStrategy::Slide(SlideFrom::Left),
        TransitionType::SlideUp => BlendStrategy::Slide(SlideFrom::Bottom),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Layer adjustment applied on top of a scene's own evaluated state.
pub struct LayerBlend {
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Layer offset in percent of the canvas.
    pub offset: Vec2,
}

impl LayerBlend {
    /// Fully visible, not moved.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Adjustments for both scenes of a transition at one progress value.
pub struct BlendPair {
    /// Scene being left (drawn first).
    pub outgoing: LayerBlend,
    /// Scene being entered (drawn on top).
    pub incoming: LayerBlend,
}

impl BlendStrategy {
    /// Layer adjustments at transition progress `p` (clamped to `[0, 1]`).
    pub fn blend(self, p: f64) -> BlendPair {
        let p = p.clamp(0.0, 1.0);
        match self {
            Self::Crossfade => BlendPair {
                outgoing: LayerBlend::IDENTITY,
                incoming: LayerBlend {
                    opacity: p,
                    offset: Vec2::ZERO,
                },
            },
            Self::Slide(from) => {
                let (sign, axis) = match from {
                    SlideFrom::Right => (1.0, Vec2::new(1.0, 0.0)),
                    SlideFrom::Left => (-1.0, Vec2::new(1.0, 0.0)),
                    SlideFrom::Bottom => (1.0, Vec2::new(0.0, 1.0)),
                };
                let o = InterpolateOpts::CLAMP_BOTH;
                let incoming = interpolate(p, [0.0, 1.0], [sign * 100.0, 0.0], o);
                let outgoing = interpolate(p, [0.0, 1.0], [0.0, -sign * 100.0], o);
                BlendPair {
                    outgoing: LayerBlend {
                        opacity: 1.0,
                        offset: axis * outgoing,
                    },
                    incoming: LayerBlend {
                        opacity: 1.0,
                        offset: axis * incoming,
                    },
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
