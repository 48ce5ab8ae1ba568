use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    animation::spring::{Spring, SpringConfig},
    eval::element::{ENTER_FRAMES, EXIT_FRAMES, ElementPhase, unit},
    foundation::core::{Fps, Transform2D},
    script::model::{Callout, CalloutAnimation, CalloutPosition, CalloutStyle, Scene},
};

const SLIDE_SPRING: SpringConfig = SpringConfig::new(10.0, 120.0, 0.8);
const SLIDE_FRAMES: f64 = 22.0;
const POP_SPRING: SpringConfig = SpringConfig::new(7.0, 180.0, 0.6);
const POP_FRAMES: f64 = 18.0;
// Frames per revealed character.
const TYPE_FRAMES_PER_CHAR: f64 = 3.0;
const CARET_PERIOD: u64 = 15;
const CARET_ON: u64 = 8;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual state of an active callout.
pub struct CalloutState {
    /// Position of the callout in its scene's callout list.
    pub index: usize,
    /// Text to draw this frame (a prefix of the full text for typewriter callouts).
    pub text: String,
    /// Typewriter caret visibility; `None` for other animations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caret: Option<bool>,
    /// Secondary line, when the callout has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<SubtitleState>,
    /// Anchor on the canvas.
    pub position: CalloutPosition,
    /// Style tag, passed through.
    pub style: CalloutStyle,
    /// Entrance animation.
    pub animation: CalloutAnimation,
    /// Entrance opacity times the exit fade, in `[0, 1]`.
    pub opacity: f64,
    /// Entrance offset (pixels) and scale, applied on top of the anchor.
    pub transform: Transform2D,
    /// Lifecycle phase.
    pub phase: ElementPhase,
    /// Frames since activation.
    pub relative_frame: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual state of a callout subtitle.
pub struct SubtitleState {
    /// Subtitle text.
    pub text: String,
    /// Effective opacity: the subtitle's own ramp and exit fade, times the callout's opacity.
    ///
    /// The exit fade therefore counts twice, once here and once through the callout.
    pub opacity: f64,
}

// Entrance animation output before the shared exit fade.
struct Entrance {
    opacity: f64,
    transform: Transform2D,
    visible_chars: Option<usize>,
}

impl Entrance {
    fn fade(opacity: f64) -> Self {
        Self {
            opacity,
            transform: Transform2D::IDENTITY,
            visible_chars: None,
        }
    }
}

/// Evaluate one callout at scene-local frame `scene_local`.
///
/// Returns `None` outside `[startFrame, startFrame + durationFrames)`: an inactive callout is
/// absent, not transparent.
pub fn eval_callout(
    callout: &Callout,
    index: usize,
    scene_local: u64,
    fps: Fps,
) -> Option<CalloutState> {
    // Before `startFrame` the callout is pending.
    let relative = scene_local.checked_sub(callout.start_frame)?;
    let phase = ElementPhase::since_start(
        relative,
        callout.duration_frames,
        ENTER_FRAMES,
        EXIT_FRAMES,
    );
    if !phase.is_active() {
        return None;
    }
    let rel = relative as f64;

    let text_len = callout.text.chars().count();
    let entrance = match callout.animation {
        CalloutAnimation::FadeIn => fade_in(rel),
        CalloutAnimation::SlideUp => slide(rel, fps, (0.0, 30.0)),
        CalloutAnimation::SlideLeft => slide(rel, fps, (40.0, 0.0)),
        CalloutAnimation::SlideRight => slide(rel, fps, (-40.0, 0.0)),
        CalloutAnimation::ScalePop => scale_pop(rel, fps),
        CalloutAnimation::Typewriter => typewriter(rel, text_len),
    };

    let duration = callout.duration_frames as f64;
    let fade_out = interpolate(
        rel,
        [duration - EXIT_FRAMES as f64, duration],
        [1.0, 0.0],
        InterpolateOpts::CLAMP_BOTH,
    );
    let opacity = unit(entrance.opacity * fade_out);

    let text = match entrance.visible_chars {
        Some(n) => callout.text.chars().take(n).collect(),
        None => callout.text.clone(),
    };
    let caret = (callout.animation == CalloutAnimation::Typewriter)
        .then_some(scene_local % CARET_PERIOD < CARET_ON);
    let subtitle = callout.subtitle.as_ref().map(|s| SubtitleState {
        text: s.clone(),
        opacity: unit(
            interpolate(rel, [8.0, 22.0], [0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)
                * fade_out
                * opacity,
        ),
    });

    Some(CalloutState {
        index,
        text,
        caret,
        subtitle,
        position: callout.position,
        style: callout.style,
        animation: callout.animation,
        opacity,
        transform: entrance.transform,
        phase,
        relative_frame: relative,
    })
}

/// Active callouts of `scene` at `scene_local`, in script order.
pub fn eval_callouts(scene: &Scene, scene_local: u64, fps: Fps) -> Vec<CalloutState> {
    scene
        .callouts
        .iter()
        .enumerate()
        .filter_map(|(i, c)| eval_callout(c, i, scene_local, fps))
        .collect()
}

fn ramp(rel: f64, frames: f64) -> f64 {
    interpolate(rel, [0.0, frames], [0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)
}

fn fade_in(rel: f64) -> Entrance {
    Entrance::fade(ramp(rel, 15.0))
}

// `offset` is the starting (x, y) displacement in pixels; the spring pulls it to zero.
fn slide(rel: f64, fps: Fps, offset: (f64, f64)) -> Entrance {
    let travel = |from: f64| {
        if from == 0.0 {
            return 0.0;
        }
        Spring::new(from, 0.0)
            .duration(SLIDE_FRAMES)
            .config(SLIDE_SPRING)
            .sample(rel, fps)
    };
    Entrance {
        opacity: ramp(rel, 12.0),
        transform: Transform2D::translate(travel(offset.0), travel(offset.1)),
        visible_chars: None,
    }
}

fn scale_pop(rel: f64, fps: Fps) -> Entrance {
    let scale = Spring::new(0.2, 1.0)
        .duration(POP_FRAMES)
        .config(POP_SPRING)
        .sample(rel, fps);
    Entrance {
        opacity: ramp(rel, 6.0),
        transform: Transform2D::scale(scale),
        visible_chars: None,
    }
}

fn typewriter(rel: f64, text_len: usize) -> Entrance {
    let len = text_len as f64;
    let shown = interpolate(
        rel,
        [0.0, len * TYPE_FRAMES_PER_CHAR],
        [0.0, len],
        InterpolateOpts::CLAMP_RIGHT,
    )
    .floor()
    .clamp(0.0, len);
    Entrance {
        opacity: 1.0,
        transform: Transform2D::IDENTITY,
        visible_chars: Some(shown as usize),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/callout.rs"]
mod tests;
