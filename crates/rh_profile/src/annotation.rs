// crates/rh_profile/src/annotation.rs

//! 纵断面标注
//!
//! 为渲染层生成 PVI/BVC/EVC/极值点与坡度标签。桩号按道路习惯写作 `12+50.00`。

use crate::curve::{CurveSegment, ExtremumKind, ResolvedProfile};
use serde::{Deserialize, Serialize};

/// 标注类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// 变坡点
    Pvi,
    /// 竖曲线起点
    Bvc,
    /// 竖曲线终点
    Evc,
    /// 低点
    LowPoint,
    /// 高点
    HighPoint,
    /// 切线坡度标签
    Grade,
}

/// 单个标注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnnotation {
    /// 类型
    pub kind: AnnotationKind,
    /// 关联的变坡点索引（起始切线坡度标签为 `None`）
    pub pvi_index: Option<usize>,
    /// 标注桩号
    pub station: f64,
    /// 标注高程
    pub elevation: f64,
    /// 标注坡度 [%]
    pub grade: Option<f64>,
    /// 显示文本
    pub label: String,
}

/// 桩号格式化：1250.0 → `12+50.00`
pub fn format_station(station: f64) -> String {
    if !station.is_finite() {
        return "--+--.--".to_string();
    }
    let sign = if station < 0.0 { "-" } else { "" };
    let cents = (station.abs() * 100.0).round() as i64;
    let hundreds = cents / 10_000;
    let rem = cents % 10_000;
    format!("{}{}+{:02}.{:02}", sign, hundreds, rem / 100, rem % 100)
}

/// 坡度格式化：-1.0 → `-1.00%`
pub fn format_grade(grade: f64) -> String {
    if grade.is_finite() {
        format!("{:.2}%", grade)
    } else {
        "--%".to_string()
    }
}

/// 无变坡点时的坡度标签
///
/// 只定义了一个坡度或两坡度相同：`G = x.xx%`；两坡度不同：`G1 = x.xx%, G2 = y.yy%`；都未定义按 0%。
pub fn grade_label(beginning_grade: f64, ending_grade: f64) -> String {
    match (beginning_grade.is_finite(), ending_grade.is_finite()) {
        (true, true) if beginning_grade != ending_grade => format!(
            "G1 = {}, G2 = {}",
            format_grade(beginning_grade),
            format_grade(ending_grade)
        ),
        (true, _) => format!("G = {}", format_grade(beginning_grade)),
        (false, true) => format!("G = {}", format_grade(ending_grade)),
        (false, false) => format!("G = {}", format_grade(0.0)),
    }
}

fn point_label(prefix: &str, station: f64, elevation: f64) -> String {
    format!("{} STA {}, EL {:.2}", prefix, format_station(station), elevation)
}

fn curve_annotations(index: usize, curve: &CurveSegment, out: &mut Vec<ProfileAnnotation>) {
    let mut pvi_label = point_label("PVI", curve.pvi_station, curve.pvi_elevation);
    if curve.has_curve() {
        pvi_label.push_str(&format!(", L = {:.2}'", curve.curve_length));
    }
    out.push(ProfileAnnotation {
        kind: AnnotationKind::Pvi,
        pvi_index: Some(index),
        station: curve.pvi_station,
        elevation: curve.pvi_elevation,
        grade: None,
        label: pvi_label,
    });

    if !curve.has_curve() {
        return;
    }

    out.push(ProfileAnnotation {
        kind: AnnotationKind::Bvc,
        pvi_index: Some(index),
        station: curve.bvc_station,
        elevation: curve.bvc_elevation,
        grade: Some(curve.grade_in),
        label: format!(
            "{}, G = {}",
            point_label("BVC", curve.bvc_station, curve.bvc_elevation),
            format_grade(curve.grade_in)
        ),
    });
    out.push(ProfileAnnotation {
        kind: AnnotationKind::Evc,
        pvi_index: Some(index),
        station: curve.evc_station,
        elevation: curve.evc_elevation,
        grade: Some(curve.grade_out),
        label: format!(
            "{}, G = {}",
            point_label("EVC", curve.evc_station, curve.evc_elevation),
            format_grade(curve.grade_out)
        ),
    });

    if let Some(e) = curve.extremum {
        let (kind, prefix) = match e.kind {
            ExtremumKind::Low => (AnnotationKind::LowPoint, "LOW PT"),
            ExtremumKind::High => (AnnotationKind::HighPoint, "HIGH PT"),
        };
        out.push(ProfileAnnotation {
            kind,
            pvi_index: Some(index),
            station: e.station,
            elevation: e.elevation,
            grade: Some(0.0),
            label: point_label(prefix, e.station, e.elevation),
        });
    }
}

fn grade_annotation(pvi_index: Option<usize>, station: f64, elevation: f64, grade: f64) -> ProfileAnnotation {
    ProfileAnnotation {
        kind: AnnotationKind::Grade,
        pvi_index,
        station,
        elevation,
        grade: Some(grade),
        label: format!("G = {}", format_grade(grade)),
    }
}

/// 为已求解纵断面生成标注（按桩号方向的定义顺序）
///
/// `pad` 为首末切线的延伸长度，坡度标签放在各切线段中点。
pub fn annotate(profile: &ResolvedProfile, pad: f64) -> Vec<ProfileAnnotation> {
    let curves = &profile.curves;
    let (Some(first), Some(last)) = (curves.first(), curves.last()) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(curves.len() * 5 + 2);

    let lead = first.bvc_station - pad / 2.0;
    out.push(grade_annotation(None, lead, first.tangent_in_elevation(lead), first.grade_in));

    for (i, curve) in curves.iter().enumerate() {
        curve_annotations(i, curve, &mut out);
        if let Some(next) = curves.get(i + 1) {
            let mid = (curve.evc_station + next.bvc_station) / 2.0;
            out.push(grade_annotation(Some(i), mid, curve.tangent_out_elevation(mid), curve.grade_out));
        }
    }

    let trail = last.evc_station + pad / 2.0;
    out.push(grade_annotation(
        Some(curves.len() - 1),
        trail,
        last.tangent_out_elevation(trail),
        last.grade_out,
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pvi::{ProfileDefinition, Pvi};

    #[test]
    fn test_format_station() {
        assert_eq!(format_station(1250.0), "12+50.00");
        assert_eq!(format_station(0.0), "0+00.00");
        assert_eq!(format_station(1299.999), "13+00.00");
        assert_eq!(format_station(-50.0), "-0+50.00");
        assert_eq!(format_station(7.5), "0+07.50");
        assert_eq!(format_station(f64::NAN), "--+--.--");
    }

    #[test]
    fn test_grade_label_simplification() {
        assert_eq!(grade_label(1.5, 1.5), "G = 1.50%");
        assert_eq!(grade_label(-1.0, 2.0), "G1 = -1.00%, G2 = 2.00%");
        assert_eq!(grade_label(f64::NAN, 2.0), "G = 2.00%");
        assert_eq!(grade_label(-0.5, f64::NAN), "G = -0.50%");
        assert_eq!(grade_label(f64::NAN, f64::NAN), "G = 0.00%");
    }

    #[test]
    fn test_annotate_sag_curve() {
        let def = ProfileDefinition::new(-1.0, 1.0).with_pvi(Pvi::new(1000.0, 100.0, 400.0));
        let notes = annotate(&ResolvedProfile::resolve(&def), 100.0);
        let kinds: Vec<AnnotationKind> = notes.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AnnotationKind::Grade,
                AnnotationKind::Pvi,
                AnnotationKind::Bvc,
                AnnotationKind::Evc,
                AnnotationKind::LowPoint,
                AnnotationKind::Grade,
            ]
        );
        assert_eq!(notes[1].label, "PVI STA 10+00.00, EL 100.00, L = 400.00'");
        assert_eq!(notes[2].label, "BVC STA 8+00.00, EL 102.00, G = -1.00%");
        assert_eq!(notes[4].label, "LOW PT STA 10+00.00, EL 101.00");
    }

    #[test]
    fn test_annotate_grade_break_has_no_bvc() {
        let def = ProfileDefinition::new(2.0, -2.0)
            .with_pvi(Pvi::new(100.0, 10.0, 0.0))
            .with_pvi(Pvi::new(300.0, 12.0, 0.0));
        let notes = annotate(&ResolvedProfile::resolve(&def), 100.0);
        assert!(notes.iter().all(|a| a.kind == AnnotationKind::Pvi || a.kind == AnnotationKind::Grade));
        let grades: Vec<f64> = notes.iter().filter_map(|a| a.grade).collect();
        assert_eq!(grades, vec![2.0, 1.0, -2.0]);
    }

    #[test]
    fn test_annotate_empty() {
        assert!(annotate(&ResolvedProfile::resolve(&ProfileDefinition::default()), 100.0).is_empty());
    }
}
