use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    animation::spring::Spring,
    effects::transitions::{BlendStrategy, LayerBlend},
    eval::element::{ElementRole, ElementState},
    eval::evaluator::{EvalOpts, for_each_chunk, progress_fraction},
    foundation::core::{Fps, FrameIndex, FrameRange, Transform2D},
    foundation::error::{ReelError, ReelResult},
    script::legacy::SpinProps,
    timeline::composer::{Boundary, Placement, Timeline},
};

const ZOOM_SPAN: (f64, f64) = (1.0, 1.06);
const TITLE_DELAY: u64 = 5;
const DIMENSIONS_DELAY: u64 = 15;
// Overlays fade out over [total - 25, total - 5].
const FADE_OUT_LEAD: f64 = 25.0;
const FADE_OUT_TAIL: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One legacy frame: visible images (draw order) and text overlays.
pub struct LegacyFrameState {
    /// Frame the caller asked for, possibly outside the timeline.
    pub requested: i64,
    /// Frame actually evaluated.
    pub frame: FrameIndex,
    /// Set when `requested` was clamped onto the timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
    /// Progress-bar fraction in `[0, 1]`.
    pub progress: f64,
    /// One image, or two during a crossfade (outgoing first).
    pub images: Vec<ImageLayer>,
    /// Title (top-left) and dimensions (bottom-right) overlays, when their text is set.
    pub overlays: Vec<ElementState>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A legacy image with its Ken Burns zoom.
pub struct ImageLayer {
    /// Image index in the props.
    pub index: usize,
    /// Image source.
    pub image_url: String,
    /// Frame relative to the image's own start.
    pub local_frame: u64,
    /// Zoom about the canvas center.
    pub camera: Transform2D,
    /// Crossfade opacity.
    pub opacity: f64,
}

/// Evaluator for legacy image-sequence props.
#[derive(Clone, Debug)]
pub struct LegacyEngine {
    props: SpinProps,
    timeline: Timeline,
    fps: Fps,
    title: String,
}

impl LegacyEngine {
    #[tracing::instrument(skip(props), fields(images = props.images.len()))]
    /// Validate `props` and lay out the image sequence.
    pub fn new(props: SpinProps) -> ReelResult<Self> {
        let timeline = props.checked_timeline()?;
        let fps = props.fps()?;
        let title = props.title_text();
        Ok(Self {
            props,
            timeline,
            fps,
            title,
        })
    }

    /// The props being evaluated.
    pub fn props(&self) -> &SpinProps {
        &self.props
    }

    /// Composed timeline (one scene per image).
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Total frames.
    pub fn duration_frames(&self) -> u64 {
        self.timeline.total_duration_frames
    }

    #[tracing::instrument(level = "trace", skip(self))]
    /// Evaluate one frame, clamping out-of-range requests like [`crate::Engine::eval_frame`].
    pub fn eval_frame(&self, requested: i64) -> ReelResult<LegacyFrameState> {
        let (frame, boundary) = self.timeline.resolve(requested);
        if let Some(boundary) = boundary {
            tracing::debug!(requested, resolved = frame.0, ?boundary, "frame clamped");
        }

        let images = match self.timeline.locate(frame) {
            Some(Placement::Scene { index, local }) => {
                vec![self.image(index, local, LayerBlend::IDENTITY)?]
            }
            Some(Placement::Overlap {
                outgoing,
                incoming,
                out_local,
                in_local,
                progress,
            }) => {
                let blend = BlendStrategy::Crossfade.blend(progress);
                vec![
                    self.image(outgoing, out_local, blend.outgoing)?,
                    self.image(incoming, in_local, blend.incoming)?,
                ]
            }
            other => {
                return Err(ReelError::evaluation(format!(
                    "frame {} has no image placement ({other:?})",
                    frame.0
                )));
            }
        };

        Ok(LegacyFrameState {
            requested,
            frame,
            boundary,
            progress: progress_fraction(frame, self.duration_frames()),
            images,
            overlays: self.overlays(frame),
        })
    }

    /// Evaluate every frame of `range`; see [`crate::Engine::eval_range`].
    pub fn eval_range(
        &self,
        range: FrameRange,
        opts: &EvalOpts,
    ) -> ReelResult<Vec<LegacyFrameState>> {
        for_each_chunk(range, opts, |f| self.eval_frame(f))
    }

    fn image(&self, index: usize, local: u64, blend: LayerBlend) -> ReelResult<ImageLayer> {
        let url = self
            .props
            .images
            .get(index)
            .ok_or_else(|| ReelError::evaluation(format!("image {index} does not exist")))?;
        // Even images zoom in, odd images zoom out.
        let (from, to) = if index % 2 == 0 {
            ZOOM_SPAN
        } else {
            (ZOOM_SPAN.1, ZOOM_SPAN.0)
        };
        let scale = interpolate(
            local as f64,
            [0.0, self.props.hold_duration as f64],
            [from, to],
            InterpolateOpts::CLAMP_RIGHT,
        );
        Ok(ImageLayer {
            index,
            image_url: url.clone(),
            local_frame: local,
            camera: Transform2D::scale(scale),
            opacity: blend.opacity,
        })
    }

    fn overlays(&self, frame: FrameIndex) -> Vec<ElementState> {
        let mut out = Vec::new();
        if !self.title.is_empty() {
            out.push(self.overlay(ElementRole::Title, &self.title, frame, TITLE_DELAY, -1.0));
        }
        if !self.props.dimensions.is_empty() {
            out.push(self.overlay(
                ElementRole::Dimensions,
                &self.props.dimensions,
                frame,
                DIMENSIONS_DELAY,
                1.0,
            ));
        }
        out
    }

    // `side` is -1 for overlays anchored left (they slide in from the left), +1 for right.
    fn overlay(
        &self,
        role: ElementRole,
        text: &str,
        frame: FrameIndex,
        delay: u64,
        side: f64,
    ) -> ElementState {
        let f = frame.0 as f64 - delay as f64;
        let total = self.duration_frames() as f64;
        let fade_in = Spring::new(0.0, 1.0).duration(20.0).sample(f, self.fps);
        let fade_out = interpolate(
            frame.0 as f64,
            [total - FADE_OUT_LEAD, total - FADE_OUT_TAIL],
            [1.0, 0.0],
            InterpolateOpts::CLAMP_BOTH,
        );
        let slide = Spring::new(20.0, 0.0).duration(25.0).sample(f, self.fps);
        ElementState::text(role, text, fade_in.min(fade_out))
            .with_transform(Transform2D::translate(side * slide, 0.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/legacy.rs"]
mod tests;
