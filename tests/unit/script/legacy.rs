use super::*;

fn props(n: usize) -> SpinProps {
    SpinProps::new((0..n).map(|i| format!("img-{i}.png")).collect())
}

#[test]
fn defaults_match_legacy_schema() {
    let p = SpinProps::from_json_str(r#"{ "images": ["a.png"] }"#).unwrap();
    assert_eq!(p.hold_duration, 40);
    assert_eq!(p.transition_duration, 20);
    assert_eq!(p.background_color, "#f5f5f5");
    assert_eq!(p, SpinProps::new(vec!["a.png".to_owned()]));
}

#[test]
fn duration_is_holds_minus_overlaps() {
    assert_eq!(props(3).computed_duration_frames(), 3 * 40 - 2 * 20);
    assert_eq!(props(1).computed_duration_frames(), 40);
}

#[test]
fn title_joins_brand_and_product() {
    let mut p = props(1);
    assert_eq!(p.title_text(), "");
    p.product_name = "Milano".to_owned();
    assert_eq!(p.title_text(), "Milano");
    p.brand_name = "Bellona".to_owned();
    assert_eq!(p.title_text(), "Bellona — Milano");
}

#[test]
fn validate_rejects_unplayable_props() {
    assert!(matches!(props(0).validate(), Err(ReelError::Validation(_))));

    let mut p = props(2);
    p.transition_duration = 40;
    assert!(matches!(p.validate(), Err(ReelError::Timeline(_))));

    let mut p = props(2);
    p.hold_duration = 0;
    assert!(matches!(p.validate(), Err(ReelError::Validation(_))));

    props(3).validate().unwrap();
}

#[test]
fn legacy_canvas_and_fps_are_fixed() {
    let p = props(1);
    assert_eq!(p.fps().unwrap().get(), LEGACY_FPS);
    assert_eq!(p.canvas().width, LEGACY_SIDE);
}

