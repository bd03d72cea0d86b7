use super::*;

#[test]
fn default_geometry_matches_canonical_banner() {
    let spec = LayoutSpec::default();
    spec.validate().unwrap();

    let (w, h) = spec.product_box();
    assert!((w - 596.736).abs() < 1e-9);
    assert!((h - 489.6).abs() < 1e-9);

    assert_eq!(spec.product1_origin(), (100, 310));
    assert_eq!(spec.product2_origin(300), (888 - 300 - 80, 390));
    assert_eq!(spec.button_origin(), (284, 888));
}

#[test]
fn centered_x_splits_free_space() {
    let spec = LayoutSpec::default();
    assert_eq!(spec.centered_x(88.0), 400);
    assert_eq!(spec.centered_x(888.0), 0);
    assert!(spec.centered_x(1000.0) < 0);
}

#[test]
fn partial_json_overrides_keep_defaults() {
    let spec = LayoutSpec::from_json_str(r#"{ "button_y": 900, "label_bias_y": -10.5 }"#).unwrap();
    assert_eq!(spec.button_y, 900);
    assert_eq!(spec.label_bias_y, -10.5);
    assert_eq!(spec.canvas, PixelSize::new(888, 1020));
    assert_eq!(spec.supersample, 4);
}

#[test]
fn json_round_trips_through_default() {
    let json = serde_json::to_string(&LayoutSpec::default()).unwrap();
    assert_eq!(
        LayoutSpec::from_json_str(&json).unwrap(),
        LayoutSpec::default()
    );
}

#[test]
fn invalid_layouts_are_rejected() {
    assert!(LayoutSpec::from_json_str(r#"{ "supersample": 0 }"#).is_err());
    assert!(LayoutSpec::from_json_str(r#"{ "canvas": { "width": 0, "height": 5 } }"#).is_err());
    assert!(LayoutSpec::from_json_str(r#"{ "product_scale": [0.0, 1.0] }"#).is_err());
    assert!(LayoutSpec::from_json_str(r#"{ "title_size_px": -1.0 }"#).is_err());
    assert!(LayoutSpec::from_json_str("not json").is_err());
}
