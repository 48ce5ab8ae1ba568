use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::ease::Easing,
    effects::transitions::TransitionType,
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
    timeline::composer::Timeline,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A complete motion script: optional intro, ordered scenes, optional outro.
///
/// Scripts arrive already checked against the upstream schema (closed enums, numeric ranges).
/// [`MotionScript::validate`] only re-checks what the timeline depends on.
pub struct MotionScript {
    /// Schema version; always `1` for current scripts.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Layout template the script was authored for.
    #[serde(default)]
    pub template: TemplateType,
    /// Timeline frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Output width in pixels.
    #[serde(default = "default_side")]
    pub width: u32,
    /// Output height in pixels.
    #[serde(default = "default_side")]
    pub height: u32,
    /// Background color (CSS notation, styling only).
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Text color (CSS notation, styling only).
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Accent color (CSS notation, styling only).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    /// Product display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Brand display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Free-form product dimensions line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// Opening title section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<IntroScene>,
    /// Camera-animated scenes, in play order.
    pub scenes: Vec<Scene>,
    /// Closing card section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outro: Option<OutroScene>,
    /// Total duration as declared by the script author.
    pub total_duration_frames: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Layout template family.
pub enum TemplateType {
    /// Full product showcase.
    #[default]
    Showcase,
    /// Short social cut.
    Social,
    /// Detail-oriented story.
    DetailStory,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One product image with camera motion and callouts.
pub struct Scene {
    /// Image source (URL or data URI), passed through to the renderer.
    pub image_url: String,
    /// Scene length in frames.
    pub duration_frames: u64,
    /// Scale sweep over the scene.
    pub zoom: Sweep,
    /// Horizontal pan sweep, in percent of the canvas width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_x: Option<Sweep>,
    /// Vertical pan sweep, in percent of the canvas height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_y: Option<Sweep>,
    /// Curve applied to zoom and pan progress.
    #[serde(default)]
    pub easing: Easing,
    /// Transition into the next scene.
    #[serde(default)]
    pub transition: TransitionType,
    /// Overlap with the next scene, in frames. Ignored on the last scene.
    pub transition_duration_frames: u64,
    /// Timed text annotations.
    #[serde(default)]
    pub callouts: Vec<Callout>,
    /// Image analysis metadata; carried through, never evaluated.
    #[serde(rename = "_analysis", default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SceneAnalysis>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A value animated from `from` to `to` across a scene.
pub struct Sweep {
    /// Value at local frame 0.
    pub from: f64,
    /// Value at the end of the scene.
    pub to: f64,
}

impl Sweep {
    /// Sweep that does not move.
    pub fn fixed(v: f64) -> Self {
        Self { from: v, to: v }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Notes produced when the script was generated from a product photo.
pub struct SceneAnalysis {
    /// Camera angle detected in the photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_angle: Option<String>,
    /// Product features detected in the photo.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_features: Vec<String>,
    /// Suggested focus area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_focus: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A timed text annotation on a scene.
pub struct Callout {
    /// Main text.
    pub text: String,
    /// Secondary line rendered under the main text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Anchor on the canvas.
    pub position: CalloutPosition,
    /// First active frame, relative to the scene start.
    pub start_frame: u64,
    /// Number of active frames.
    pub duration_frames: u64,
    /// Entrance animation.
    pub animation: CalloutAnimation,
    /// Visual style tag (renderer concern).
    pub style: CalloutStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// One of nine named anchor points.
#[allow(missing_docs)]
pub enum CalloutPosition {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Callout entrance animation.
pub enum CalloutAnimation {
    /// Opacity ramp only.
    FadeIn,
    /// Rise from below.
    SlideUp,
    /// Enter moving left (starts offset to the right).
    SlideLeft,
    /// Enter moving right (starts offset to the left).
    SlideRight,
    /// Reveal the text one character at a time.
    Typewriter,
    /// Spring up from a small scale.
    ScalePop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Callout style tag. Styling only; the engine passes it through.
#[allow(missing_docs)]
pub enum CalloutStyle {
    Headline,
    Badge,
    Caption,
    FeatureTag,
    Minimal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Section tag carried by intro JSON objects (`"type": "intro"`).
#[allow(missing_docs)]
pub enum IntroTag {
    #[default]
    Intro,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Section tag carried by outro JSON objects (`"type": "outro"`).
#[allow(missing_docs)]
pub enum OutroTag {
    #[default]
    Outro,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Opening title section.
pub struct IntroScene {
    /// Always [`IntroTag::Intro`].
    #[serde(rename = "type", default)]
    pub tag: IntroTag,
    /// Section length in frames.
    pub duration_frames: u64,
    /// Brand line above the product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Product name, revealed per variant.
    pub product_name: String,
    /// Short line under the product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Reveal variant.
    pub animation: IntroAnimation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Intro reveal variant.
pub enum IntroAnimation {
    /// Brand fades in, product name rises word by word.
    FadeReveal,
    /// Each line springs up from below in turn.
    SlideUpReveal,
    /// Brand and product name spring up from half scale.
    ScaleReveal,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Closing card section.
pub struct OutroScene {
    /// Always [`OutroTag::Outro`].
    #[serde(rename = "type", default)]
    pub tag: OutroTag,
    /// Section length in frames.
    pub duration_frames: u64,
    /// Main card line.
    pub headline: String,
    /// Secondary line, typically dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subline: Option<String>,
    /// Lifestyle line above the headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle_line: Option<String>,
    /// Call-to-action text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    /// Reveal variant.
    pub animation: OutroAnimation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Outro reveal variant.
pub enum OutroAnimation {
    /// Card fades in, lines fade in one after another.
    FadeReveal,
    /// Lines spring up from below in turn.
    SlideUpReveal,
    /// Lines slide in from the right, staggered.
    SpecsCascade,
}

fn default_version() -> u32 {
    1
}

fn default_fps() -> u32 {
    30
}

fn default_side() -> u32 {
    1080
}

fn default_background_color() -> String {
    "#f5f5f5".to_owned()
}

fn default_text_color() -> String {
    "#1a1a1a".to_owned()
}

fn default_accent_color() -> String {
    "#3b82f6".to_owned()
}

impl MotionScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse motion script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open motion script '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a script from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ReelError::serde(format!("parse motion script JSON: {e}")))
    }

    /// Serialize back to the JSON wire format.
    pub fn to_json_string_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReelError::serde(format!("serialize motion script: {e}")))
    }

    /// Frame rate as a checked [`Fps`].
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(self.fps)
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Duration derived from the sections alone: intro, plus every scene, minus each
    /// non-last scene's transition overlap, plus outro.
    ///
    /// Signed so that inconsistent scripts (overlaps longer than the scenes) yield a value that
    /// visibly disagrees with any declared total instead of wrapping.
    pub fn computed_duration_frames(&self) -> i64 {
        let mut total = self.intro.as_ref().map_or(0, |i| i.duration_frames as i64);
        let last = self.scenes.len().saturating_sub(1);
        for (i, scene) in self.scenes.iter().enumerate() {
            total += scene.duration_frames as i64;
            if i < last {
                total -= scene.transition_duration_frames as i64;
            }
        }
        total + self.outro.as_ref().map_or(0, |o| o.duration_frames as i64)
    }

    /// Check everything the timeline depends on.
    ///
    /// Structural problems are [`ReelError::Validation`]; transitions that swallow a scene and a
    /// declared total that disagrees with the composed one are [`ReelError::Timeline`].
    pub fn validate(&self) -> ReelResult<()> {
        self.checked_timeline().map(|_| ())
    }

    // `validate`, keeping the composed timeline.
    pub(crate) fn checked_timeline(&self) -> ReelResult<Timeline> {
        self.fps()?;
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }

        let timeline = Timeline::compose(self)?;
        if timeline.total_duration_frames != self.total_duration_frames {
            return Err(ReelError::timeline(format!(
                "declared totalDurationFrames {} does not match composed duration {}",
                self.total_duration_frames, timeline.total_duration_frames
            )));
        }
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
