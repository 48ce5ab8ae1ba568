use crate::{
    effects::transitions::TransitionType,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    script::model::MotionScript,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Global frame layout of a script.
///
/// Scene ranges are contiguous and monotonic: scene `i + 1` starts where scene `i`'s transition
/// window starts, so the only frames covered by two scenes are the declared overlaps.
pub struct Timeline {
    /// Intro range, starting at frame 0.
    pub intro_range: Option<FrameRange>,
    /// One range per scene, in play order.
    pub scene_ranges: Vec<FrameRange>,
    /// One overlap window per adjacent scene pair (`scene_ranges.len() - 1` entries).
    pub transitions: Vec<TransitionWindow>,
    /// Range covered by all scenes together.
    pub scene_section: FrameRange,
    /// Outro range, starting where the scene section ends.
    pub outro_range: Option<FrameRange>,
    /// Length of the whole timeline.
    pub total_duration_frames: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Frames during which scene `outgoing` and scene `outgoing + 1` are both on screen.
pub struct TransitionWindow {
    /// Index of the scene being left.
    pub outgoing: usize,
    /// Transition declared on the outgoing scene.
    pub kind: TransitionType,
    /// Overlap frames (the incoming scene's first `len` frames).
    pub range: FrameRange,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Where a global frame falls on a [`Timeline`]. All frame numbers are section-local.
pub enum Placement {
    /// Inside the intro.
    Intro {
        /// Frame relative to the intro start.
        local: u64,
    },
    /// Inside exactly one scene.
    Scene {
        /// Scene index.
        index: usize,
        /// Frame relative to the scene start.
        local: u64,
    },
    /// Inside a transition window.
    Overlap {
        /// Scene being left.
        outgoing: usize,
        /// Scene being entered.
        incoming: usize,
        /// Frame relative to the outgoing scene's start.
        out_local: u64,
        /// Frame relative to the incoming scene's start.
        in_local: u64,
        /// Linear transition progress `in_local / window length`, in `[0, 1)`.
        progress: f64,
    },
    /// Inside the outro.
    Outro {
        /// Frame relative to the outro start.
        local: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Marks a requested frame that lay outside `[0, total)` and was clamped.
pub enum Boundary {
    /// Requested frame was negative; resolved to frame 0.
    BeforeStart,
    /// Requested frame was at or past the end; resolved to the last frame.
    AfterEnd,
}

// Scene length, transition into the next scene (ignored for the last), transition type.
struct SceneSpan {
    duration: u64,
    transition: u64,
    kind: TransitionType,
}

impl Timeline {
    #[tracing::instrument(skip(script), fields(scenes = script.scenes.len()))]
    /// Lay out intro, scenes and outro on the global timeline.
    ///
    /// Fails when a section has zero length or a transition would cover an entire adjacent scene
    /// (including two transitions that together cover a scene). Nothing is clamped.
    pub fn compose(script: &MotionScript) -> ReelResult<Self> {
        let intro = match &script.intro {
            Some(intro) if intro.duration_frames == 0 => {
                return Err(ReelError::validation("intro durationFrames must be > 0"));
            }
            Some(intro) => Some(intro.duration_frames),
            None => None,
        };
        let outro = match &script.outro {
            Some(outro) if outro.duration_frames == 0 => {
                return Err(ReelError::validation("outro durationFrames must be > 0"));
            }
            Some(outro) => Some(outro.duration_frames),
            None => None,
        };
        let spans = script
            .scenes
            .iter()
            .map(|s| SceneSpan {
                duration: s.duration_frames,
                transition: s.transition_duration_frames,
                kind: s.transition,
            })
            .collect::<Vec<_>>();

        let timeline = lay_out(intro, &spans, outro)?;
        tracing::debug!(
            total = timeline.total_duration_frames,
            scene_section = timeline.scene_section.len_frames(),
            "composed timeline"
        );
        Ok(timeline)
    }

    /// Layout for legacy image sequences: `images` scenes of `hold` frames joined by crossfades
    /// of `transition` frames, no intro or outro.
    pub fn legacy(images: usize, hold: u64, transition: u64) -> ReelResult<Self> {
        let spans = (0..images)
            .map(|_| SceneSpan {
                duration: hold,
                transition,
                kind: TransitionType::Fade,
            })
            .collect::<Vec<_>>();
        lay_out(None, &spans, None)
    }

    /// Place a global frame. `None` for frames at or past the end.
    pub fn locate(&self, frame: FrameIndex) -> Option<Placement> {
        if let Some(local) = self.intro_range.and_then(|r| r.local(frame)) {
            return Some(Placement::Intro { local });
        }
        if let Some(local) = self.outro_range.and_then(|r| r.local(frame)) {
            return Some(Placement::Outro { local });
        }

        let index = self.scene_ranges.iter().position(|r| r.contains(frame))?;
        let range = self.scene_ranges[index];
        let out_local = frame.0 - range.start.0;

        match self.scene_ranges.get(index + 1) {
            Some(next) if next.contains(frame) => {
                let in_local = frame.0 - next.start.0;
                let window = self.transitions[index].range.len_frames();
                Some(Placement::Overlap {
                    outgoing: index,
                    incoming: index + 1,
                    out_local,
                    in_local,
                    progress: in_local as f64 / window as f64,
                })
            }
            _ => Some(Placement::Scene {
                index,
                local: out_local,
            }),
        }
    }

    /// Clamp a requested frame into `[0, total)`.
    ///
    /// Frames inside the timeline come back untouched with no boundary tag, so a legitimately
    /// first/last frame can be told apart from a clamped one.
    pub fn resolve(&self, requested: i64) -> (FrameIndex, Option<Boundary>) {
        let last = self.total_duration_frames.saturating_sub(1);
        if requested < 0 {
            (FrameIndex(0), Some(Boundary::BeforeStart))
        } else if requested as u64 > last {
            (FrameIndex(last), Some(Boundary::AfterEnd))
        } else {
            (FrameIndex(requested as u64), None)
        }
    }

    /// The transition window ending scene `index`, if any.
    pub fn transition_after(&self, index: usize) -> Option<&TransitionWindow> {
        self.transitions.get(index)
    }
}

fn lay_out(intro: Option<u64>, spans: &[SceneSpan], outro: Option<u64>) -> ReelResult<Timeline> {
    if spans.is_empty() {
        return Err(ReelError::validation("script must contain at least one scene"));
    }

    let intro_len = intro.unwrap_or(0);
    let mut cursor = intro_len;
    let mut scene_ranges = Vec::with_capacity(spans.len());
    let mut transitions = Vec::with_capacity(spans.len() - 1);
    let mut incoming_overlap = 0u64;

    for (i, span) in spans.iter().enumerate() {
        if span.duration == 0 {
            return Err(ReelError::validation(format!(
                "scene {i} durationFrames must be > 0"
            )));
        }
        let range = FrameRange::at(cursor, span.duration);
        scene_ranges.push(range);

        let Some(next) = spans.get(i + 1) else {
            cursor = range.end.0;
            break;
        };

        let t = span.transition;
        if t >= span.duration || t >= next.duration {
            return Err(ReelError::timeline(format!(
                "scene {i} transition of {t} frames must be shorter than scene {i} ({}) and scene {} ({})",
                span.duration,
                i + 1,
                next.duration
            )));
        }
        if incoming_overlap + t > span.duration {
            return Err(ReelError::timeline(format!(
                "scene {i} is shorter than its incoming ({incoming_overlap}) and outgoing ({t}) transitions combined"
            )));
        }

        let next_start = range.end.0 - t;
        transitions.push(TransitionWindow {
            outgoing: i,
            kind: span.kind,
            range: FrameRange::at(next_start, t),
        });
        cursor = next_start;
        incoming_overlap = t;
    }

    let scene_section = FrameRange::new(FrameIndex(intro_len), FrameIndex(cursor))?;
    let outro_range = outro.map(|len| FrameRange::at(cursor, len));
    Ok(Timeline {
        intro_range: intro.map(|len| FrameRange::at(0, len)),
        scene_ranges,
        transitions,
        scene_section,
        outro_range,
        total_duration_frames: cursor + outro.unwrap_or(0),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/composer.rs"]
mod tests;
