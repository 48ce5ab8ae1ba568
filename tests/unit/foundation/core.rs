use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.local(FrameIndex(4)), Some(2));
    assert_eq!(r.local(FrameIndex(5)), None);
    assert_eq!(r.last(), Some(FrameIndex(4)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let empty = FrameRange::at(7, 0);
    assert!(empty.is_empty());
    assert_eq!(empty.last(), None);
    assert_eq!(empty.clamp(FrameIndex(100)), FrameIndex(7));
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0).is_err());
    let fps = Fps::new(30).unwrap();
    assert_eq!(fps.frames_to_secs(15.0), 0.5);
}

#[test]
fn transform_identity_and_percent_translation() {
    let canvas = Canvas {
        width: 1000,
        height: 500,
    };
    assert_eq!(
        Transform2D::IDENTITY.to_pixel_affine(canvas),
        Affine::IDENTITY
    );

    let t = Transform2D::translate(10.0, -20.0).to_pixel_affine(canvas);
    assert_eq!(t, Affine::translate(Vec2::new(100.0, -100.0)));
}

#[test]
fn scale_pivots_on_center() {
    let canvas = Canvas {
        width: 200,
        height: 200,
    };
    let a = Transform2D::scale(2.0).to_pixel_affine(canvas);
    let c = a * canvas.center();
    assert!((c.x - 100.0).abs() < 1e-9);
    assert!((c.y - 100.0).abs() < 1e-9);
    let corner = a * Point::new(0.0, 0.0);
    assert!((corner.x + 100.0).abs() < 1e-9);
}
