// crates/rh_profile/tests/profile_tests.rs
//!
//! 纵断面几何测试
//!
//! 验证竖曲线求解、高低点识别与采样折线的断点/去重规则

use rh_config::ProfileConfig;
use rh_profile::{
    resolve_curves, sample, AnnotationKind, ExtremumKind, ProfileDefinition, ProfileEngine, Pvi,
};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn three_pvi_profile() -> ProfileDefinition {
    ProfileDefinition::new(-1.0, 1.5)
        .with_pvi(Pvi::new(1000.0, 100.0, 400.0))
        .with_pvi(Pvi::new(1600.0, 106.0, 300.0))
        .with_pvi(Pvi::new(2200.0, 103.0, 0.0))
}

// ============================================================
// 竖曲线
// ============================================================

#[test]
fn test_sag_low_point_at_bvc_plus_200() {
    let def = ProfileDefinition::new(-1.0, 1.0).with_pvi(Pvi::new(1000.0, 100.0, 400.0));
    let curves = resolve_curves(&def);
    let c = &curves[0];
    assert!(approx_eq(c.delta_grade, 2.0));
    let e = c.extremum.expect("sag curve must report a low point");
    assert_eq!(e.kind, ExtremumKind::Low);
    assert!(approx_eq(e.station, c.bvc_station + 200.0));
}

#[test]
fn test_zero_length_curve_collapses_to_pvi() {
    let curves = resolve_curves(&three_pvi_profile());
    let c = &curves[2];
    assert_eq!(c.bvc_station, 2200.0);
    assert_eq!(c.evc_station, 2200.0);
    assert_eq!(c.bvc_elevation, 103.0);
    assert!(c.extremum.is_none());
}

#[test]
fn test_grade_inference_chain() {
    let curves = resolve_curves(&three_pvi_profile());
    assert_eq!(curves[0].grade_in, -1.0);
    assert!(approx_eq(curves[0].grade_out, 1.0));
    assert!(approx_eq(curves[1].grade_in, 1.0));
    assert!(approx_eq(curves[1].grade_out, -0.5));
    assert!(approx_eq(curves[2].grade_in, -0.5));
    assert_eq!(curves[2].grade_out, 1.5);
    for c in &curves {
        assert!(approx_eq(c.delta_grade, c.grade_out - c.grade_in));
    }
}

#[test]
fn test_crest_and_sag_classification() {
    let derived = ProfileEngine::default().recompute(&three_pvi_profile()).unwrap();
    let lows = derived.low_points();
    let highs = derived.high_points();
    assert_eq!(lows.len(), 1);
    assert_eq!(highs.len(), 1);
    // 凸曲线：g_in = 1, A = −1.5, x* = 1/1.5 × 300 = 200
    assert!(approx_eq(highs[0].station, 1450.0 + 200.0));
}

// ============================================================
// 采样
// ============================================================

#[test]
fn test_sampling_includes_every_breakpoint() {
    let def = three_pvi_profile();
    let line = sample(&def, &ProfileConfig { station_step: 7.0, ..ProfileConfig::default() }).unwrap();
    for c in resolve_curves(&def) {
        for s in [c.bvc_station, c.pvi_station, c.evc_station] {
            assert!(line.iter().any(|p| p.station == s), "missing breakpoint {s}");
        }
    }
}

#[test]
fn test_sampling_spans_pads_in_order() {
    let config = ProfileConfig::default();
    let line = sample(&three_pvi_profile(), &config).unwrap();
    let first = line.first().unwrap();
    let last = line.last().unwrap();
    assert!(approx_eq(first.station, 800.0 - config.pad));
    assert!(approx_eq(last.station, 2200.0 + config.pad));
    assert!(line.as_slice().windows(2).all(|w| w[0].station <= w[1].station));
}

#[test]
fn test_sampling_is_continuous() {
    let config = ProfileConfig { station_step: 1.0, ..ProfileConfig::default() };
    let line = sample(&three_pvi_profile(), &config).unwrap();
    // 最陡坡度 1.5%，1 ft 间距内高程变化不应超过 0.015 ft（留余量）
    for w in line.as_slice().windows(2) {
        let ds = w[1].station - w[0].station;
        assert!((w[1].elevation - w[0].elevation).abs() <= 0.0151 * ds + 1e-9);
    }
}

#[test]
fn test_sampling_no_duplicate_points() {
    let line = sample(&three_pvi_profile(), &ProfileConfig::default()).unwrap();
    for w in line.as_slice().windows(2) {
        let same_station = w[0].station == w[1].station;
        assert!(!(same_station && (w[0].elevation - w[1].elevation).abs() < 0.001));
    }
}

#[test]
fn test_sampling_drops_undefined_elevations() {
    // 起始坡度未定义：首段切线高程为 NaN，应被丢弃而不是补值
    let def = ProfileDefinition::new(f64::NAN, 1.0).with_pvi(Pvi::new(1000.0, 100.0, 0.0));
    let line = sample(&def, &ProfileConfig::default()).unwrap();
    assert!(!line.is_empty());
    assert!(line.iter().all(|p| p.elevation.is_finite()));
    assert!(line.iter().all(|p| p.station >= 1000.0));
}

#[test]
fn test_sampling_is_restartable() {
    let line = sample(&three_pvi_profile(), &ProfileConfig::default()).unwrap();
    let first_pass: Vec<_> = line.iter().collect();
    let second_pass: Vec<_> = line.iter().collect();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_recompute_after_remove() {
    let engine = ProfileEngine::default();
    let mut def = three_pvi_profile();
    let before = engine.recompute(&def).unwrap();
    def.remove_pvi(1).unwrap();
    let after = engine.recompute(&def).unwrap();
    assert_eq!(after.resolved.curves.len(), 2);
    assert_ne!(before.polyline, after.polyline);
    // 第二个变坡点现在是原第三个
    assert_eq!(after.resolved.curves[1].pvi_station, 2200.0);
    def.insert_pvi(1, Pvi::new(1600.0, 106.0, 300.0)).unwrap();
    assert_eq!(engine.recompute(&def).unwrap(), before);
}

#[test]
fn test_annotations_cover_all_pvis() {
    let derived = ProfileEngine::default().recompute(&three_pvi_profile()).unwrap();
    let pvis = derived
        .annotations
        .iter()
        .filter(|a| a.kind == AnnotationKind::Pvi)
        .count();
    assert_eq!(pvis, 3);
    let bvcs = derived
        .annotations
        .iter()
        .filter(|a| a.kind == AnnotationKind::Bvc)
        .count();
    assert_eq!(bvcs, 2);
    assert!(derived
        .annotations
        .iter()
        .any(|a| a.kind == AnnotationKind::HighPoint && a.label.starts_with("HIGH PT STA 16+50.00")));
}

#[test]
fn test_definition_json_roundtrip() {
    let def = three_pvi_profile();
    let json = serde_json::to_string(&def).unwrap();
    let parsed: ProfileDefinition = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, def);
}
