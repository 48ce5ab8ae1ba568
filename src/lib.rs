//! motion-reel turns a declarative product-showcase script into per-frame visual state.
//!
//! A script describes an optional intro, a sequence of camera-animated scenes carrying timed text
//! callouts, and an optional outro. The engine composes those sections onto one global frame
//! timeline (adjacent scenes overlap by their declared transition duration) and, for any frame,
//! computes every number a renderer needs: image transforms, blend offsets, opacities and the
//! text visible this frame.
//!
//! # Pipeline overview
//!
//! 1. **Load**: JSON -> [`MotionScript`] (or legacy [`SpinProps`])
//! 2. **Compose**: [`Timeline::compose`] lays out sections and transition windows
//! 3. **Evaluate**: [`Engine::eval_frame`] maps a global frame to a [`FrameState`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure evaluation**: a frame's state depends only on `(script, frame)`, so frames can be
//!   evaluated out of order, repeatedly or in parallel ([`Engine::eval_range`]).
//! - **No silent correction**: overlapping transitions that swallow a scene and declared durations
//!   that disagree with the composed timeline are errors, never clamped.
//! - **Defined boundaries**: frames outside `[0, total)` resolve to the first/last frame and are
//!   tagged with a [`Boundary`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod effects;
mod eval;
mod foundation;
mod script;
mod timeline;

pub use animation::ease::Easing;
pub use animation::interp::{Extrapolate, InterpolateOpts, interpolate, lerp};
pub use animation::spring::{REST_THRESHOLD, Spring, SpringConfig, measure_spring, spring};
pub use effects::transitions::{
    BlendPair, BlendStrategy, LayerBlend, SlideFrom, TransitionType, parse_transition,
    presentation_for,
};
pub use eval::callout::{CalloutState, SubtitleState, eval_callout, eval_callouts};
pub use eval::camera::camera_transform;
pub use eval::element::{ENTER_FRAMES, EXIT_FRAMES, ElementPhase, ElementRole, ElementState};
pub use eval::evaluator::{Engine, EvalOpts, FrameState, SceneBlend, SceneLayer, Section};
pub use eval::intro::{IntroState, eval_intro};
pub use eval::legacy::{ImageLayer, LegacyEngine, LegacyFrameState};
pub use eval::outro::{OutroState, eval_outro};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Transform2D, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use script::legacy::{LEGACY_FPS, LEGACY_SIDE, SpinProps};
pub use script::model::{
    Callout, CalloutAnimation, CalloutPosition, CalloutStyle, IntroAnimation, IntroScene, IntroTag,
    MotionScript, OutroAnimation, OutroScene, OutroTag, Scene, SceneAnalysis, Sweep, TemplateType,
};
pub use timeline::composer::{Boundary, Placement, Timeline, TransitionWindow};
