use super::*;
use crate::{
    animation::ease::Easing,
    script::model::{
        IntroAnimation, IntroScene, IntroTag, OutroAnimation, OutroScene, OutroTag, Scene, Sweep,
    },
};

fn scene(duration: u64, transition: u64) -> Scene {
    Scene {
        image_url: format!("scene-{duration}.png"),
        duration_frames: duration,
        zoom: Sweep::fixed(1.0),
        pan_x: None,
        pan_y: None,
        easing: Easing::Linear,
        transition: TransitionType::Fade,
        transition_duration_frames: transition,
        callouts: vec![],
        analysis: None,
    }
}

fn script(intro: Option<u64>, scenes: Vec<Scene>, outro: Option<u64>) -> MotionScript {
    let mut s: MotionScript =
        serde_json::from_str(r#"{ "scenes": [], "totalDurationFrames": 0 }"#).unwrap();
    s.intro = intro.map(|d| IntroScene {
        tag: IntroTag::Intro,
        duration_frames: d,
        brand_name: None,
        product_name: "Milano".to_owned(),
        tagline: None,
        animation: IntroAnimation::FadeReveal,
    });
    s.scenes = scenes;
    s.outro = outro.map(|d| OutroScene {
        tag: OutroTag::Outro,
        duration_frames: d,
        headline: "Milano".to_owned(),
        subline: None,
        lifestyle_line: None,
        cta_text: None,
        animation: OutroAnimation::FadeReveal,
    });
    s.total_duration_frames = s.computed_duration_frames() as u64;
    s
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn intro_plus_two_overlapping_scenes() {
    let s = script(Some(60), vec![scene(75, 30), scene(70, 20)], None);
    let t = Timeline::compose(&s).unwrap();

    assert_eq!(t.intro_range, Some(range(0, 60)));
    assert_eq!(t.scene_ranges, vec![range(60, 135), range(105, 175)]);
    assert_eq!(t.scene_section, range(60, 175));
    assert_eq!(t.scene_section.len_frames(), 75 + 70 - 30);
    assert_eq!(t.outro_range, None);
    assert_eq!(t.total_duration_frames, 175);
    assert_eq!(t.transitions.len(), 1);
    assert_eq!(t.transitions[0].range, range(105, 135));
}

#[test]
fn outro_follows_scene_section() {
    let s = script(None, vec![scene(40, 10), scene(40, 10), scene(40, 10)], Some(30));
    let t = Timeline::compose(&s).unwrap();
    assert_eq!(t.intro_range, None);
    assert_eq!(t.scene_section, range(0, 100));
    assert_eq!(t.outro_range, Some(range(100, 130)));
    assert_eq!(t.total_duration_frames as i64, s.computed_duration_frames());
}

#[test]
fn ranges_are_contiguous_and_monotonic() {
    let scenes = vec![scene(50, 5), scene(30, 12), scene(45, 0), scene(60, 9)];
    let s = script(Some(20), scenes, Some(15));
    let t = Timeline::compose(&s).unwrap();
    for (i, pair) in t.scene_ranges.windows(2).enumerate() {
        assert!(pair[0].start < pair[1].start);
        assert_eq!(
            pair[0].end.0 - pair[1].start.0,
            s.scenes[i].transition_duration_frames
        );
    }
    assert_eq!(t.scene_ranges[0].start, t.scene_section.start);
    assert_eq!(t.scene_ranges.last().unwrap().end, t.scene_section.end);
}

#[test]
fn transition_as_long_as_a_neighbour_is_rejected() {
    let s = script(None, vec![scene(40, 40), scene(60, 0)], None);
    assert!(matches!(Timeline::compose(&s), Err(ReelError::Timeline(_))));

    let s = script(None, vec![scene(60, 30), scene(30, 0)], None);
    assert!(matches!(Timeline::compose(&s), Err(ReelError::Timeline(_))));
}

#[test]
fn transitions_that_meet_inside_a_scene_are_rejected() {
    // Scene 1 (40 frames) would be covered by 25 incoming + 25 outgoing frames.
    let s = script(None, vec![scene(60, 25), scene(40, 25), scene(60, 0)], None);
    assert!(matches!(Timeline::compose(&s), Err(ReelError::Timeline(_))));

    // Exactly touching is fine.
    let s = script(None, vec![scene(60, 20), scene(40, 20), scene(60, 0)], None);
    Timeline::compose(&s).unwrap();
}

#[test]
fn empty_and_zero_length_sections_are_invalid() {
    let s = script(None, vec![], None);
    assert!(matches!(Timeline::compose(&s), Err(ReelError::Validation(_))));
    let s = script(None, vec![scene(0, 0)], None);
    assert!(matches!(Timeline::compose(&s), Err(ReelError::Validation(_))));
    let s = script(Some(0), vec![scene(30, 0)], None);
    assert!(matches!(Timeline::compose(&s), Err(ReelError::Validation(_))));
}

#[test]
fn locate_maps_every_section() {
    let s = script(Some(60), vec![scene(75, 30), scene(70, 20)], Some(30));
    let t = Timeline::compose(&s).unwrap();

    assert_eq!(t.locate(FrameIndex(0)), Some(Placement::Intro { local: 0 }));
    assert_eq!(t.locate(FrameIndex(59)), Some(Placement::Intro { local: 59 }));
    assert_eq!(
        t.locate(FrameIndex(60)),
        Some(Placement::Scene { index: 0, local: 0 })
    );
    assert_eq!(
        t.locate(FrameIndex(104)),
        Some(Placement::Scene { index: 0, local: 44 })
    );
    assert_eq!(
        t.locate(FrameIndex(105)),
        Some(Placement::Overlap {
            outgoing: 0,
            incoming: 1,
            out_local: 45,
            in_local: 0,
            progress: 0.0,
        })
    );
    assert_eq!(
        t.locate(FrameIndex(120)),
        Some(Placement::Overlap {
            outgoing: 0,
            incoming: 1,
            out_local: 60,
            in_local: 15,
            progress: 0.5,
        })
    );
    assert_eq!(
        t.locate(FrameIndex(135)),
        Some(Placement::Scene { index: 1, local: 30 })
    );
    assert_eq!(t.locate(FrameIndex(175)), Some(Placement::Outro { local: 0 }));
    assert_eq!(t.locate(FrameIndex(204)), Some(Placement::Outro { local: 29 }));
    assert_eq!(t.locate(FrameIndex(205)), None);
}

#[test]
fn resolve_tags_clamped_frames() {
    let s = script(None, vec![scene(30, 0)], None);
    let t = Timeline::compose(&s).unwrap();
    assert_eq!(t.resolve(-1), (FrameIndex(0), Some(Boundary::BeforeStart)));
    assert_eq!(t.resolve(0), (FrameIndex(0), None));
    assert_eq!(t.resolve(29), (FrameIndex(29), None));
    assert_eq!(t.resolve(30), (FrameIndex(29), Some(Boundary::AfterEnd)));
    assert_eq!(t.resolve(i64::MAX), (FrameIndex(29), Some(Boundary::AfterEnd)));
}

#[test]
fn legacy_layout_uses_crossfades() {
    let t = Timeline::legacy(3, 40, 20).unwrap();
    assert_eq!(t.total_duration_frames, 3 * 40 - 2 * 20);
    assert_eq!(t.scene_ranges, vec![range(0, 40), range(20, 60), range(40, 80)]);
    assert!(t.transitions.iter().all(|w| w.kind == TransitionType::Fade));
    assert!(Timeline::legacy(0, 40, 20).is_err());
    assert!(matches!(Timeline::legacy(2, 40, 40), Err(ReelError::Timeline(_))));
    assert_eq!(Timeline::legacy(1, 40, 80).unwrap().total_duration_frames, 40);
}
