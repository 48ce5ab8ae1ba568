use super::*;

#[test]
fn parse_accepts_script_spellings() {
    assert_eq!(parse_transition("fade"), TransitionType::Fade);
    assert_eq!(parse_transition(" Slide-Left "), TransitionType::SlideLeft);
    assert_eq!(parse_transition("slide-up"), TransitionType::SlideUp);
    assert_eq!(parse_transition("wipe"), TransitionType::Unrecognized);
    assert_eq!(parse_transition(""), TransitionType::Unrecognized);
}

#[test]
fn families_and_entry_edges() {
    assert_eq!(presentation_for(TransitionType::Fade), BlendStrategy::Crossfade);
    assert_eq!(
        presentation_for(TransitionType::Dissolve),
        BlendStrategy::Crossfade
    );
    assert_eq!(
        presentation_for(TransitionType::Unrecognized),
        BlendStrategy::Crossfade
    );
    assert_eq!(
        TransitionType::SlideLeft.strategy(),
        BlendStrategy::Slide(SlideFrom::Right)
    );
    assert_eq!(
        TransitionType::SlideRight.strategy(),
        BlendStrategy::Slide(SlideFrom::Left)
    );
    assert_eq!(
        TransitionType::SlideUp.strategy(),
        BlendStrategy::Slide(SlideFrom::Bottom)
    );
}

#[test]
fn crossfade_fades_incoming_over_opaque_outgoing() {
    let b = BlendStrategy::Crossfade.blend(0.25);
    assert_eq!(b.outgoing, LayerBlend::IDENTITY);
    assert_eq!(b.incoming.opacity, 0.25);
    assert_eq!(b.incoming.offset, Vec2::ZERO);

    assert_eq!(BlendStrategy::Crossfade.blend(3.0).incoming.opacity, 1.0);
}

#[test]
fn slide_from_right_pushes_outgoing_left() {
    let s = BlendStrategy::Slide(SlideFrom::Right);
    let start = s.blend(0.0);
    assert_eq!(start.incoming.offset, Vec2::new(100.0, 0.0));
    assert_eq!(start.outgoing.offset, Vec2::ZERO);

    let mid = s.blend(0.5);
    assert_eq!(mid.incoming.offset, Vec2::new(50.0, 0.0));
    assert_eq!(mid.outgoing.offset, Vec2::new(-50.0, 0.0));
    assert_eq!(mid.incoming.opacity, 1.0);
    assert_eq!(mid.outgoing.opacity, 1.0);

    let end = s.blend(1.0);
    assert_eq!(end.incoming.offset, Vec2::ZERO);
    assert_eq!(end.outgoing.offset, Vec2::new(-100.0, 0.0));
}

#[test]
fn slide_from_left_and_bottom_mirror() {
    let left = BlendStrategy::Slide(SlideFrom::Left).blend(0.5);
    assert_eq!(left.incoming.offset, Vec2::new(-50.0, 0.0));
    assert_eq!(left.outgoing.offset, Vec2::new(50.0, 0.0));

    let up = BlendStrategy::Slide(SlideFrom::Bottom).blend(0.5);
    assert_eq!(up.incoming.offset, Vec2::new(0.0, 50.0));
    assert_eq!(up.outgoing.offset, Vec2::new(0.0, -50.0));
}

#[test]
fn serde_round_trips_spellings() {
    let t: TransitionType = serde_json::from_str("\"slide-right\"").unwrap();
    assert_eq!(t, TransitionType::SlideRight);
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"slide-right\"");
    let t: TransitionType = serde_json::from_str("\"spin\"").unwrap();
    assert_eq!(t, TransitionType::Unrecognized);
}
