use crate::foundation::core::Transform2D;

/// Frames at the start of an activation window counted as entering.
pub const ENTER_FRAMES: u64 = 20;
/// Frames at the end of an activation window counted as exiting.
pub const EXIT_FRAMES: u64 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Lifecycle of a timed element, recomputed from the frame alone.
pub enum ElementPhase {
    /// Before the activation window.
    Pending,
    /// First frames of the window; animating toward steady state.
    Entering,
    /// Steady state.
    Holding,
    /// Last frames of the window; fading out.
    Exiting,
    /// After the activation window.
    Gone,
}

impl ElementPhase {
    /// Phase at `relative` frames into a window of `duration` frames.
    ///
    /// When the enter and exit windows overlap (short elements) the exit window wins.
    pub fn at(relative: i64, duration: u64, enter: u64, exit: u64) -> Self {
        match u64::try_from(relative) {
            Ok(elapsed) => Self::since_start(elapsed, duration, enter, exit),
            Err(_) => Self::Pending,
        }
    }

    /// Phase `elapsed` frames after the window opened.
    pub fn since_start(elapsed: u64, duration: u64, enter: u64, exit: u64) -> Self {
        if elapsed >= duration {
            Self::Gone
        } else if elapsed >= duration.saturating_sub(exit) {
            Self::Exiting
        } else if elapsed < enter {
            Self::Entering
        } else {
            Self::Holding
        }
    }

    /// `true` for phases that produce visual output.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Entering | Self::Holding | Self::Exiting)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What an intro, outro or overlay element shows.
pub enum ElementRole {
    /// Brand line.
    Brand,
    /// Thin decorative rule; its width animates.
    Rule,
    /// One word of the product name, by position.
    Word(usize),
    /// Whole product name.
    ProductName,
    /// Tagline under the product name.
    Tagline,
    /// Outro background card; its opacity is already folded into every outro child.
    Card,
    /// Lifestyle line.
    Lifestyle,
    /// Outro headline.
    Headline,
    /// Short accent line under the outro headline.
    AccentLine,
    /// Outro subline.
    Subline,
    /// Call to action.
    Cta,
    /// Legacy title overlay.
    Title,
    /// Legacy dimensions overlay.
    Dimensions,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual state of one text or decoration element for a frame.
pub struct ElementState {
    /// What the element is.
    pub role: ElementRole,
    /// Text to draw, for text elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Effective opacity in `[0, 1]`, including any parent fades.
    pub opacity: f64,
    /// Offset in pixels and scale about the element's own center.
    pub transform: Transform2D,
    /// Width in pixels, for elements whose width animates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ElementState {
    pub(crate) fn text(role: ElementRole, text: impl Into<String>, opacity: f64) -> Self {
        Self {
            role,
            text: Some(text.into()),
            opacity: unit(opacity),
            transform: Transform2D::IDENTITY,
            width: None,
        }
    }

    pub(crate) fn decoration(role: ElementRole, opacity: f64) -> Self {
        Self {
            role,
            text: None,
            opacity: unit(opacity),
            transform: Transform2D::IDENTITY,
            width: None,
        }
    }

    pub(crate) fn with_transform(self, transform: Transform2D) -> Self {
        Self { transform, ..self }
    }

    pub(crate) fn with_width(self, width: f64) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }
}

// Ramps extend linearly before their window, so raw values can leave [0, 1].
pub(crate) fn unit(opacity: f64) -> f64 {
    opacity.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/element.rs"]
mod tests;
