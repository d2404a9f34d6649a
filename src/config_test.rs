use serde_json::json;

use super::*;

// --- ShatterOptions ---

#[test]
fn shatter_defaults() {
    let options = ShatterOptions::default();
    assert_eq!(options.vectors_count, 12);
    assert!((options.velocity_rate - 0.5).abs() < f64::EPSILON);
    assert!((options.acceleration_rate - 0.5).abs() < f64::EPSILON);
    assert_eq!(options.z_index, 0);
    assert_eq!(options.delay_ms, 1_000);
    assert_eq!(options.event_mode, EventMode::Scroll);
    assert!(!options.repeat);
    assert_eq!(options.load_timeout_ms, 10_000);
    assert!(!options.legacy_center_skew);
    assert_eq!(options.seed, None);
    assert_eq!(options.style, OverlayPosition::default());
}

#[test]
fn shatter_minimal_json_fills_defaults() {
    let options = ShatterOptions::from_json(json!({ "src": "broken.png" })).unwrap();
    assert_eq!(options.src, "broken.png");
    assert_eq!(options.vectors_count, 12);
    assert_eq!(options.event_mode, EventMode::Scroll);
}

#[test]
fn shatter_json_field_names_match_the_js_api() {
    let options = ShatterOptions::from_json(json!({
        "src": "broken.png",
        "vectorsCount": 16,
        "velocityRate": 1.5,
        "accelerationRate": 2.0,
        "zIndex": 5,
        "delay": 250,
        "event_mode": "click",
        "repeat": true,
        "loadTimeout": 3000,
        "legacyCenterSkew": true,
        "seed": 42,
    }))
    .unwrap();

    assert_eq!(options.vectors_count, 16);
    assert!((options.velocity_rate - 1.5).abs() < f64::EPSILON);
    assert!((options.acceleration_rate - 2.0).abs() < f64::EPSILON);
    assert_eq!(options.z_index, 5);
    assert_eq!(options.delay_ms, 250);
    assert_eq!(options.event_mode, EventMode::Click);
    assert!(options.repeat);
    assert_eq!(options.load_timeout_ms, 3000);
    assert!(options.legacy_center_skew);
    assert_eq!(options.seed, Some(42));
}

#[test]
fn shatter_style_override_parses() {
    let options = ShatterOptions::from_json(json!({
        "src": "x.png",
        "style": { "left": 12.5, "top": 40.0 },
    }))
    .unwrap();
    assert_eq!(options.style.left, Some(12.5));
    assert_eq!(options.style.top, Some(40.0));
}

#[test]
fn shatter_style_may_override_one_axis() {
    let options =
        ShatterOptions::from_json(json!({ "src": "x.png", "style": { "left": 0.0 } })).unwrap();
    assert_eq!(options.style.left, Some(0.0));
    assert_eq!(options.style.top, None);
}

#[test]
fn shatter_missing_src_is_rejected() {
    let err = ShatterOptions::from_json(json!({})).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn shatter_too_few_vectors_rejected() {
    let err = ShatterOptions::from_json(json!({ "src": "x.png", "vectorsCount": 2 })).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn shatter_minimum_vector_count_accepted() {
    let options = ShatterOptions::from_json(json!({ "src": "x.png", "vectorsCount": 3 })).unwrap();
    assert_eq!(options.vectors_count, 3);
}

#[test]
fn shatter_wrong_type_is_a_parse_error() {
    let err =
        ShatterOptions::from_json(json!({ "src": "x.png", "vectorsCount": "many" })).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn validate_runs_without_json() {
    let mut options = ShatterOptions { src: "x.png".into(), ..ShatterOptions::default() };
    assert!(options.validate().is_ok());
    options.src.clear();
    assert!(options.validate().is_err());
}

#[test]
fn shatter_options_round_trip() {
    let options = ShatterOptions {
        src: "x.png".into(),
        vectors_count: 9,
        seed: Some(7),
        ..ShatterOptions::default()
    };
    let value = serde_json::to_value(&options).unwrap();
    assert_eq!(ShatterOptions::from_json(value).unwrap(), options);
}

// --- EventMode ---

#[test]
fn event_mode_is_lowercase_on_the_wire() {
    assert_eq!(serde_json::to_value(EventMode::Click).unwrap(), json!("click"));
    assert_eq!(serde_json::to_value(EventMode::Scroll).unwrap(), json!("scroll"));
}

// --- TextOptions ---

#[test]
fn text_defaults() {
    let options = TextOptions::default();
    assert_eq!(options.speed_ms, 500);
    assert_eq!(options.duration_ms, None);
    assert_eq!(options.delay_ms, 100);
    assert_eq!(options.event_mode, EventMode::Scroll);
    assert!(!options.repeat);
}

#[test]
fn text_json_field_names() {
    let options = TextOptions::from_json(json!({
        "speed": 50,
        "duration": 2000,
        "delay": 10,
        "event_mode": "click",
        "repeat": true,
    }))
    .unwrap();
    assert_eq!(options.speed_ms, 50);
    assert_eq!(options.duration_ms, Some(2000));
    assert_eq!(options.delay_ms, 10);
    assert_eq!(options.event_mode, EventMode::Click);
    assert!(options.repeat);
}

#[test]
fn text_empty_json_is_all_defaults() {
    assert_eq!(TextOptions::from_json(json!({})).unwrap(), TextOptions::default());
}

#[test]
fn text_unknown_event_mode_is_rejected() {
    let err = TextOptions::from_json(json!({ "event_mode": "hover" })).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
