use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    foundation::core::Transform2D,
    script::model::{Scene, Sweep},
};

/// Camera transform of a scene's image at scene-local frame `local`.
///
/// Zoom and pan share the scene's easing and run over `[0, durationFrames]`, holding their final
/// value past the end. Pan is in percent of the canvas and 0 when absent.
pub fn camera_transform(scene: &Scene, local: f64) -> Transform2D {
    let sweep = |s: Sweep| {
        interpolate(
            local,
            [0.0, scene.duration_frames as f64],
            [s.from, s.to],
            InterpolateOpts::CLAMP_RIGHT.with_easing(scene.easing),
        )
    };
    let pan = |s: Option<Sweep>| s.map_or(0.0, sweep);

    Transform2D {
        translate: (pan(scene.pan_x), pan(scene.pan_y)).into(),
        scale: sweep(scene.zoom),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/camera.rs"]
mod tests;
