use super::*;
use crate::effects::transitions::SlideFrom;

const DEMO: &str = include_str!("../../data/demo_script.json");

fn engine() -> Engine {
    Engine::new(MotionScript::from_json_str(DEMO).unwrap()).unwrap()
}

fn scene_at(state: &FrameState) -> &SceneLayer {
    match &state.section {
        Section::Scene(layer) => layer,
        other => panic!("expected a single scene, got {other:?}"),
    }
}

fn blend_at(state: &FrameState) -> &SceneBlend {
    match &state.section {
        Section::SceneBlend(blend) => blend,
        other => panic!("expected a scene blend, got {other:?}"),
    }
}

#[test]
fn sections_follow_the_composed_timeline() {
    let e = engine();
    assert_eq!(e.duration_frames(), 305);

    assert!(matches!(e.eval_frame(0).unwrap().section, Section::Intro(_)));
    assert!(matches!(e.eval_frame(59).unwrap().section, Section::Intro(_)));

    let first = e.eval_frame(60).unwrap();
    let layer = scene_at(&first);
    assert_eq!(layer.index, 0);
    assert_eq!(layer.local_frame, 0);
    assert_eq!(layer.camera.scale, 1.0);

    for f in 105..135 {
        let state = e.eval_frame(f).unwrap();
        let blend = blend_at(&state);
        assert_eq!(blend.strategy, BlendStrategy::Crossfade);
        assert_eq!((blend.outgoing.index, blend.incoming.index), (0, 1));
    }
    assert_eq!(scene_at(&e.eval_frame(135).unwrap()).index, 1);

    assert!(matches!(e.eval_frame(230).unwrap().section, Section::Outro(_)));
    assert!(matches!(e.eval_frame(304).unwrap().section, Section::Outro(_)));
}

#[test]
fn crossfade_keeps_outgoing_opaque() {
    let e = engine();
    let start = e.eval_frame(105).unwrap();
    let blend = blend_at(&start);
    assert_eq!(blend.progress, 0.0);
    assert_eq!(blend.outgoing.opacity, 1.0);
    assert_eq!(blend.incoming.opacity, 0.0);
    assert_eq!(blend.outgoing.local_frame, 45);
    assert_eq!(blend.incoming.local_frame, 0);

    let mid = e.eval_frame(120).unwrap();
    assert!((blend_at(&mid).incoming.opacity - 0.5).abs() < 1e-9);
}

#[test]
fn slide_transition_pushes_both_layers() {
    let e = engine();
    let state = e.eval_frame(160).unwrap();
    let blend = blend_at(&state);
    assert_eq!(blend.strategy, BlendStrategy::Slide(SlideFrom::Right));
    assert!((blend.progress - 0.4).abs() < 1e-9);
    assert!((blend.incoming.offset.x - 60.0).abs() < 1e-9);
    assert!((blend.outgoing.offset.x + 40.0).abs() < 1e-9);
    assert_eq!(blend.incoming.offset.y, 0.0);
    assert_eq!(blend.incoming.opacity, 1.0);
}

#[test]
fn callouts_appear_inside_their_window() {
    let e = engine();
    // Scene 0 starts at 60; its callout covers scene frames [15, 65).
    assert!(scene_at(&e.eval_frame(74).unwrap()).callouts.is_empty());
    let on = e.eval_frame(75).unwrap();
    let callouts = &scene_at(&on).callouts;
    assert_eq!(callouts.len(), 1);
    assert_eq!(callouts[0].text, "Premium Comfort");
    assert_eq!(callouts[0].relative_frame, 0);

    let late = e.eval_frame(124).unwrap();
    assert_eq!(blend_at(&late).outgoing.callouts.len(), 1);
    let gone = e.eval_frame(125).unwrap();
    assert!(blend_at(&gone).outgoing.callouts.is_empty());
}

#[test]
fn out_of_range_frames_clamp_with_a_boundary() {
    let e = engine();
    let before = e.eval_frame(-5).unwrap();
    assert_eq!(before.requested, -5);
    assert_eq!(before.frame, FrameIndex(0));
    assert_eq!(before.boundary, Some(Boundary::BeforeStart));
    assert_eq!(before.section, e.eval_frame(0).unwrap().section);

    let after = e.eval_frame(400).unwrap();
    assert_eq!(after.frame, FrameIndex(304));
    assert_eq!(after.boundary, Some(Boundary::AfterEnd));
    assert_eq!(e.eval_frame(305).unwrap().boundary, Some(Boundary::AfterEnd));
    assert_eq!(e.eval_frame(304).unwrap().boundary, None);
}

#[test]
fn progress_is_a_fraction_of_the_video() {
    let e = engine();
    assert_eq!(e.eval_frame(0).unwrap().progress, 0.0);
    let last = e.eval_frame(304).unwrap().progress;
    assert!((last - 304.0 / 305.0).abs() < 1e-12);
    assert!(last < 1.0);
}

#[test]
fn evaluation_is_repeatable_in_any_order() {
    let e = engine();
    let first = e.eval_frame(120).unwrap();
    let _ = e.eval_frame(250).unwrap();
    let _ = e.eval_frame(10).unwrap();
    assert_eq!(e.eval_frame(120).unwrap(), first);
}

#[test]
fn parallel_range_matches_sequential() {
    let e = engine();
    let range = FrameRange::at(0, e.duration_frames());
    let seq = e.eval_range(range, &EvalOpts::default()).unwrap();
    let par = e
        .eval_range(
            range,
            &EvalOpts {
                parallel: true,
                threads: Some(2),
                chunk_size: 7,
            },
        )
        .unwrap();
    assert_eq!(seq.len(), 305);
    assert_eq!(seq, par);
    assert!(seq.iter().enumerate().all(|(i, s)| s.frame.0 == i as u64));
}

#[test]
fn zero_chunk_size_still_evaluates() {
    let e = engine();
    let opts = EvalOpts {
        parallel: true,
        threads: None,
        chunk_size: 0,
    };
    let out = e.eval_range(FrameRange::at(100, 10), &opts).unwrap();
    assert_eq!(out.len(), 10);
    assert_eq!(out[0].frame, FrameIndex(100));
}

#[test]
fn image_affine_is_identity_at_rest() {
    let e = engine();
    let state = e.eval_frame(60).unwrap();
    let affine = scene_at(&state).image_affine(e.script().canvas());
    assert_eq!(affine, Affine::IDENTITY);
}

#[test]
fn mismatched_total_is_rejected() {
    let mut script = MotionScript::from_json_str(DEMO).unwrap();
    script.total_duration_frames = 300;
    let err = Engine::new(script).unwrap_err();
    assert!(matches!(err, ReelError::Timeline(_)), "{err}");
}

#[test]
fn unrepresentable_ranges_fail_before_evaluating() {
    let e = engine();
    for parallel in [false, true] {
        let opts = EvalOpts {
            parallel,
            ..EvalOpts::default()
        };
        let err = e.eval_range(FrameRange::at(0, u64::MAX), &opts).unwrap_err();
        assert!(matches!(err, ReelError::Evaluation(_)), "{err}");
        let err = e.eval_range(FrameRange::at(1 << 63, 3), &opts).unwrap_err();
        assert!(matches!(err, ReelError::Evaluation(_)), "{err}");
    }
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn engine_composes_the_timeline_once() {
    let logs = Captured::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let script = MotionScript::from_json_str(DEMO).unwrap();
    let expected = Timeline::compose(&script).unwrap();
    let e = tracing::subscriber::with_default(subscriber, || Engine::new(script).unwrap());
    assert_eq!(e.timeline(), &expected);

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert_eq!(text.matches("composed timeline").count(), 1, "{text}");
}
