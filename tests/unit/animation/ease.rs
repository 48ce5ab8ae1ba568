use super::*;

const ALL: [Easing; 4] = [
    Easing::Linear,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
];

#[test]
fn endpoints_are_exact() {
    for e in ALL {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert_eq!(e.apply(1.0), 1.0, "{e:?}");
    }
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), 0.0);
        assert_eq!(e.apply(7.0), 1.0);
    }
}

#[test]
fn curves_are_monotonic() {
    for e in ALL {
        let mut prev = 0.0;
        for i in 0..=200 {
            let v = e.apply(f64::from(i) / 200.0);
            assert!(v + 1e-12 >= prev, "{e:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn shapes_match_names() {
    assert!(Easing::EaseIn.apply(0.25) < 0.25);
    assert!(Easing::EaseOut.apply(0.25) > 0.25);
    assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    assert!(Easing::EaseInOut.apply(0.75) > 0.75);
    assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-9);
}

#[test]
fn ease_out_mirrors_ease_in() {
    for i in 0..=20 {
        let t = f64::from(i) / 20.0;
        let mirrored = 1.0 - Easing::EaseIn.apply(1.0 - t);
        assert!((Easing::EaseOut.apply(t) - mirrored).abs() < 1e-12);
    }
}

#[test]
fn bezier_solver_hits_target_x() {
    let b = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
    for i in 1..20 {
        let x = f64::from(i) / 20.0;
        let t = b.t_for_x(x);
        assert!((CubicBezier::calc(t, 0.42, 1.0) - x).abs() < 1e-7);
    }
}

#[test]
fn serde_uses_script_spellings() {
    let e: Easing = serde_json::from_str("\"easeInOut\"").unwrap();
    assert_eq!(e, Easing::EaseInOut);
    assert_eq!(serde_json::to_string(&Easing::EaseIn).unwrap(), "\"easeIn\"");
    assert_eq!(Easing::default(), Easing::EaseInOut);
}
