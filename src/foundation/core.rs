use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Point, Vec2};

/// Absolute (or section-local, depending on context) frame number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame inside the range.
    pub start: FrameIndex,
    /// First frame after the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Range starting at `start` and covering `len` frames.
    pub fn at(start: u64, len: u64) -> Self {
        Self {
            start: FrameIndex(start),
            end: FrameIndex(start.saturating_add(len)),
        }
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frame.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Clamp `f` into the range (to `start` for empty ranges).
    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        if self.is_empty() {
            return self.start;
        }
        FrameIndex(f.0.clamp(self.start.0, self.end.0 - 1))
    }

    /// Last frame inside the range, if any.
    pub fn last(self) -> Option<FrameIndex> {
        if self.is_empty() {
            None
        } else {
            Some(FrameIndex(self.end.0 - 1))
        }
    }

    /// Frame number of `f` relative to `start`, if `f` is inside the range.
    pub fn local(self, f: FrameIndex) -> Option<u64> {
        self.contains(f).then(|| f.0 - self.start.0)
    }
}

/// Integral frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(u32);

impl Fps {
    /// Build a frame rate; `0` is rejected.
    pub fn new(fps: u32) -> ReelResult<Self> {
        if fps == 0 {
            return Err(ReelError::validation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    /// Frames per second as an integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Convert a (possibly fractional) frame count to seconds.
    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames / self.as_f64()
    }
}

/// Output dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Center point of the canvas.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Convert a percent-of-canvas offset to pixels.
    pub fn percent_to_px(self, v: Vec2) -> Vec2 {
        Vec2::new(
            v.x * f64::from(self.width) / 100.0,
            v.y * f64::from(self.height) / 100.0,
        )
    }
}

/// Uniform scale followed by a translation, applied about a pivot.
///
/// Mirrors a CSS `scale(s) translate(x, y)` chain with a centered transform origin: the translation
/// is expressed in the element's pre-scale coordinate space and therefore grows with `scale`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation (percent of canvas for image layers, pixels for text elements).
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// No scale, no translation.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Pure translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            scale: 1.0,
        }
    }

    /// Pure uniform scale.
    pub fn scale(s: f64) -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: s,
        }
    }

    /// Matrix for this transform about `pivot`, with `translate` taken as-is.
    pub fn to_affine(self, pivot: Point) -> Affine {
        let to_pivot = Affine::translate(pivot.to_vec2());
        let from_pivot = Affine::translate(-pivot.to_vec2());
        // T(pivot) * S(scale) * T(translate) * T(-pivot)
        to_pivot * Affine::scale(self.scale) * Affine::translate(self.translate) * from_pivot
    }

    /// Matrix for a percent-of-canvas transform pivoting on the canvas center.
    pub fn to_pixel_affine(self, canvas: Canvas) -> Affine {
        Self {
            translate: canvas.percent_to_px(self.translate),
            scale: self.scale,
        }
        .to_affine(canvas.center())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
