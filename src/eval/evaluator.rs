use rayon::prelude::*;

use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    effects::transitions::{BlendStrategy, LayerBlend},
    eval::callout::{CalloutState, eval_callouts},
    eval::camera::camera_transform,
    eval::intro::{IntroState, eval_intro},
    eval::outro::{OutroState, eval_outro},
    foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Transform2D, Vec2},
    foundation::error::{ReelError, ReelResult},
    script::model::MotionScript,
    timeline::composer::{Boundary, Placement, Timeline},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything a renderer needs to draw one frame.
pub struct FrameState {
    /// Frame the caller asked for, possibly outside the timeline.
    pub requested: i64,
    /// Frame actually evaluated.
    pub frame: FrameIndex,
    /// Set when `requested` was clamped onto the timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
    /// Progress-bar fraction in `[0, 1]`.
    pub progress: f64,
    /// Active section and its state.
    pub section: Section,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// The section visible at a frame.
pub enum Section {
    /// Intro titles.
    Intro(IntroState),
    /// A single scene.
    Scene(SceneLayer),
    /// Two scenes inside a transition window.
    SceneBlend(SceneBlend),
    /// Closing card.
    Outro(OutroState),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Two overlapping scenes and how to composite them.
pub struct SceneBlend {
    /// Blend family of the outgoing scene's transition.
    pub strategy: BlendStrategy,
    /// Linear transition progress in `[0, 1)`.
    pub progress: f64,
    /// Scene being left; draw first.
    pub outgoing: SceneLayer,
    /// Scene being entered; draw on top.
    pub incoming: SceneLayer,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fully evaluated scene: image placement and active callouts.
pub struct SceneLayer {
    /// Scene index in the script.
    pub index: usize,
    /// Image source.
    pub image_url: String,
    /// Frame relative to the scene start.
    pub local_frame: u64,
    /// Zoom and pan (translate in percent of the canvas).
    pub camera: Transform2D,
    /// Transition offset of the whole layer, in percent of the canvas.
    pub offset: Vec2,
    /// Transition opacity of the whole layer.
    pub opacity: f64,
    /// Active callouts, in script order.
    pub callouts: Vec<CalloutState>,
}

impl SceneLayer {
    /// Pixel-space matrix for the image: transition offset, then camera about the canvas center.
    pub fn image_affine(&self, canvas: Canvas) -> Affine {
        Affine::translate(canvas.percent_to_px(self.offset)) * self.camera.to_pixel_affine(canvas)
    }

    fn blended(self, blend: LayerBlend) -> Self {
        Self {
            offset: blend.offset,
            opacity: blend.opacity,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Batch evaluation controls.
pub struct EvalOpts {
    /// Evaluate frames on a rayon pool.
    pub parallel: bool,
    /// Worker count for the pool; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Frames handed to the pool at a time.
    pub chunk_size: usize,
}

impl Default for EvalOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

/// Stateless per-frame evaluator for one validated script.
///
/// Holds only the script and its composed timeline; every call recomputes its frame from scratch,
/// so an `Engine` can be shared across threads and queried in any order.
#[derive(Clone, Debug)]
pub struct Engine {
    script: MotionScript,
    timeline: Timeline,
    fps: Fps,
}

impl Engine {
    #[tracing::instrument(skip(script), fields(scenes = script.scenes.len()))]
    /// Validate `script` and compose its timeline.
    pub fn new(script: MotionScript) -> ReelResult<Self> {
        let timeline = script.checked_timeline()?;
        let fps = script.fps()?;
        Ok(Self {
            script,
            timeline,
            fps,
        })
    }

    /// The script being evaluated.
    pub fn script(&self) -> &MotionScript {
        &self.script
    }

    /// Composed timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Total frames.
    pub fn duration_frames(&self) -> u64 {
        self.timeline.total_duration_frames
    }

    #[tracing::instrument(level = "trace", skip(self))]
    /// Evaluate one frame. Out-of-range requests resolve to the nearest end, tagged with a
    /// [`Boundary`].
    pub fn eval_frame(&self, requested: i64) -> ReelResult<FrameState> {
        let (frame, boundary) = self.timeline.resolve(requested);
        if let Some(boundary) = boundary {
            tracing::debug!(requested, resolved = frame.0, ?boundary, "frame clamped");
        }

        let placement = self.timeline.locate(frame).ok_or_else(|| {
            ReelError::evaluation(format!("frame {} is not covered by the timeline", frame.0))
        })?;

        let section = match placement {
            Placement::Intro { local } => {
                let intro = self.script.intro.as_ref().ok_or_else(|| {
                    ReelError::evaluation("intro range without an intro section")
                })?;
                Section::Intro(eval_intro(intro, local, self.fps))
            }
            Placement::Outro { local } => {
                let outro = self.script.outro.as_ref().ok_or_else(|| {
                    ReelError::evaluation("outro range without an outro section")
                })?;
                Section::Outro(eval_outro(outro, local, self.fps))
            }
            Placement::Scene { index, local } => Section::Scene(self.scene_layer(index, local)?),
            Placement::Overlap {
                outgoing,
                incoming,
                out_local,
                in_local,
                progress,
            } => {
                let strategy = self
                    .timeline
                    .transition_after(outgoing)
                    .map_or(BlendStrategy::Crossfade, |w| w.kind.strategy());
                let blend = strategy.blend(progress);
                Section::SceneBlend(SceneBlend {
                    strategy,
                    progress,
                    outgoing: self.scene_layer(outgoing, out_local)?.blended(blend.outgoing),
                    incoming: self.scene_layer(incoming, in_local)?.blended(blend.incoming),
                })
            }
        };

        Ok(FrameState {
            requested,
            frame,
            boundary,
            progress: progress_fraction(frame, self.duration_frames()),
            section,
        })
    }

    #[tracing::instrument(skip(self, opts))]
    /// Evaluate every frame of `range` (clamped per frame like [`Engine::eval_frame`]).
    ///
    /// Parallel and sequential evaluation produce identical results in the same order.
    pub fn eval_range(&self, range: FrameRange, opts: &EvalOpts) -> ReelResult<Vec<FrameState>> {
        for_each_chunk(range, opts, |f| self.eval_frame(f))
    }

    fn scene_layer(&self, index: usize, local: u64) -> ReelResult<SceneLayer> {
        let scene = self
            .script
            .scenes
            .get(index)
            .ok_or_else(|| ReelError::evaluation(format!("scene {index} does not exist")))?;
        Ok(SceneLayer {
            index,
            image_url: scene.image_url.clone(),
            local_frame: local,
            camera: camera_transform(scene, local as f64),
            offset: Vec2::ZERO,
            opacity: 1.0,
            callouts: eval_callouts(scene, local, self.fps),
        })
    }
}

pub(crate) fn progress_fraction(frame: FrameIndex, total: u64) -> f64 {
    interpolate(
        frame.0 as f64,
        [0.0, total as f64],
        [0.0, 1.0],
        InterpolateOpts::CLAMP_RIGHT,
    )
}

// Evaluate `range` in order, chunk by chunk, optionally on a dedicated rayon pool.
pub(crate) fn for_each_chunk<T, F>(range: FrameRange, opts: &EvalOpts, eval: F) -> ReelResult<Vec<T>>
where
    T: Send,
    F: Fn(i64) -> ReelResult<T> + Sync,
{
    let to_frame = |f: u64| -> ReelResult<i64> {
        i64::try_from(f).map_err(|_| ReelError::evaluation(format!("frame {f} is out of range")))
    };
    // Every requested frame must be representable before any work starts.
    if let Some(last) = range.last() {
        to_frame(last.0)?;
    }

    if !opts.parallel {
        return (range.start.0..range.end.0)
            .map(|f| eval(to_frame(f)?))
            .collect();
    }

    let pool = match opts.threads {
        Some(n) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(n.max(1))
                .build()
                .map_err(|e| ReelError::evaluation(format!("build rayon pool: {e}")))?,
        ),
        None => None,
    };
    let run = |frames: Vec<u64>| -> ReelResult<Vec<T>> {
        let job = || {
            frames
                .into_par_iter()
                .map(|f| eval(to_frame(f)?))
                .collect::<ReelResult<Vec<T>>>()
        };
        match &pool {
            Some(pool) => pool.install(job),
            None => job(),
        }
    };

    let chunk_size = normalized_chunk_size(opts.chunk_size);
    let mut out = Vec::new();
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        out.extend(run((chunk_start..chunk_end).collect())?);
        chunk_start = chunk_end;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
