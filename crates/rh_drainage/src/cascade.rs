// crates/rh_drainage/src/cascade.rs

//! 雨水口级联计算
//!
//! 对有序雨水口序列做一次显式折叠：
//!
//! ```text
//! tc → I → Q_area
//! Q_total   = Q_area + Q_bypass_in        (首个雨水口 Q_bypass_in = 0)
//! qi        = 低点 ? 人工值 : Q_total × 截流比
//! Q_bypass  = Q_total − qi                → 下一个雨水口的 Q_bypass_in
//! ```
//!
//! 顺序即汇流顺序，调换两个雨水口会改变其后全部结果。
//! 每次调用都从头完整重算，不保留任何跨调用状态。

use crate::formulas::{self, DEFAULT_CROSS_SLOPE, DEFAULT_MANNING_N, MIN_TC_MINUTES};
use crate::inlet::{Inlet, InletMode, InletResult};
use crate::rainfall::{RainfallCoefficients, RainfallSelection};
use rh_config::HydraulicsConfig;
use rh_foundation::float::finite_or_zero;
use rh_foundation::validation::{check_finite, check_range, warn_non_positive};
use rh_foundation::{ValidationError, ValidationReport, ValidationWarning};
use std::collections::HashSet;

/// 级联计算上下文
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeContext {
    /// 降雨选择
    pub selection: RainfallSelection,
    /// 选择对应的 IDF 系数
    pub coefficients: RainfallCoefficients,
    /// 边沟糙率
    pub manning_n: f64,
    /// 连续坡段横坡
    pub cross_slope: f64,
    /// 汇流时间下限 [min]
    pub min_tc_minutes: f64,
}

impl CascadeContext {
    /// 使用默认水力常数创建
    pub fn new(selection: RainfallSelection) -> Self {
        Self {
            selection,
            coefficients: selection.coefficients(),
            manning_n: DEFAULT_MANNING_N,
            cross_slope: DEFAULT_CROSS_SLOPE,
            min_tc_minutes: MIN_TC_MINUTES,
        }
    }

    /// 从水力配置创建
    pub fn from_config(selection: RainfallSelection, config: &HydraulicsConfig) -> Self {
        Self {
            manning_n: config.manning_n,
            cross_slope: config.cross_slope,
            min_tc_minutes: config.min_tc_minutes,
            ..Self::new(selection)
        }
    }
}

/// 单个雨水口的折叠步
///
/// 输入上游旁通流量，返回本雨水口的完整结果；
/// `result.q_bypass_out` 即下一步的输入。
pub fn cascade_step(q_bypass_in: f64, inlet: &Inlet, ctx: &CascadeContext) -> InletResult {
    let tc = formulas::time_of_concentration_with_floor(
        inlet.longest_flow_path,
        inlet.runoff_coefficient,
        inlet.flow_path_slope,
        ctx.min_tc_minutes,
    );
    let intensity = formulas::intensity(tc, Some(&ctx.coefficients));
    let q_from_area = formulas::flow(intensity, inlet.area_times_c);
    let q_total = q_from_area + q_bypass_in;

    let (intercepted_flow, flooding_width) = match inlet.mode {
        InletMode::LowPoint {
            manual_intercepted_flow,
            manual_flooding_width,
        } => (
            manual_intercepted_flow.map_or(0.0, finite_or_zero),
            manual_flooding_width.map_or(0.0, finite_or_zero),
        ),
        InletMode::OnGrade { interception_ratio } => {
            let width = if q_total > 0.0 && inlet.gutter_grade > 0.0 {
                formulas::width_of_flooding(q_total, inlet.gutter_grade, ctx.cross_slope, ctx.manning_n)
            } else {
                0.0
            };
            (q_total * interception_ratio.map_or(0.0, finite_or_zero), width)
        }
    };

    let q_bypass_out = q_total - intercepted_flow;
    if q_bypass_out < 0.0 {
        log::warn!(
            "雨水口 {} 截流量 {:.4} cfs 超过总流量 {:.4} cfs",
            inlet.str_id,
            intercepted_flow,
            q_total
        );
    }

    InletResult {
        time_of_concentration: tc,
        intensity,
        q_from_area,
        q_bypass_in,
        q_total,
        intercepted_flow,
        q_bypass_out,
        flooding_width,
    }
}

/// 按顺序计算整个雨水口序列
pub fn evaluate_cascade(inlets: &[Inlet], ctx: &CascadeContext) -> Vec<InletResult> {
    log::debug!("级联计算: {} 个雨水口, {}", inlets.len(), ctx.selection);

    inlets
        .iter()
        .scan(0.0, |bypass, inlet| {
            let result = cascade_step(*bypass, inlet, ctx);
            *bypass = result.q_bypass_out;
            Some(result)
        })
        .collect()
}

/// 级联汇总
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CascadeSummary {
    /// 雨水口数量
    pub inlet_count: usize,
    /// 直接汇水流量合计 [cfs]
    pub total_direct_flow: f64,
    /// 截流量合计 [cfs]
    pub total_intercepted: f64,
    /// 末端旁通流量 [cfs]
    pub final_bypass: f64,
    /// 最大积水宽度 [ft]
    pub max_flooding_width: f64,
    /// 最大积水宽度所在位置
    pub max_flooding_index: Option<usize>,
}

impl CascadeSummary {
    /// 从结果序列汇总
    pub fn from_results(results: &[InletResult]) -> Self {
        let mut summary = Self {
            inlet_count: results.len(),
            final_bypass: results.last().map_or(0.0, |r| r.q_bypass_out),
            ..Self::default()
        };

        for (i, r) in results.iter().enumerate() {
            summary.total_direct_flow += r.q_from_area;
            summary.total_intercepted += r.intercepted_flow;
            if r.flooding_width > summary.max_flooding_width {
                summary.max_flooding_width = r.flooding_width;
                summary.max_flooding_index = Some(i);
            }
        }

        summary
    }
}

/// 验证雨水口序列
///
/// 错误：截流比越界、人工值为负、编号重复、非有限值。
/// 警告：会使结果退化为 0 的非正输入、桩号与汇流顺序不一致。
pub fn validate_inlets(inlets: &[Inlet]) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut seen = HashSet::new();

    for (i, inlet) in inlets.iter().enumerate() {
        if !seen.insert(inlet.str_id.as_str()) {
            report.add_error(ValidationError::Duplicate {
                field: "str_id",
                value: inlet.str_id.clone(),
            });
        }

        let fields = [
            ("station", inlet.station),
            ("area_times_c", inlet.area_times_c),
            ("runoff_coefficient", inlet.runoff_coefficient),
            ("longest_flow_path", inlet.longest_flow_path),
            ("flow_path_slope", inlet.flow_path_slope),
            ("gutter_grade", inlet.gutter_grade),
        ];
        if !fields.iter().all(|&(field, value)| check_finite(&mut report, field, i, value)) {
            continue;
        }

        check_range(&mut report, "area_times_c", i, inlet.area_times_c, 0.0, f64::MAX);
        warn_non_positive(&mut report, "area_times_c", i, inlet.area_times_c);
        warn_non_positive(&mut report, "runoff_coefficient", i, inlet.runoff_coefficient);
        warn_non_positive(&mut report, "longest_flow_path", i, inlet.longest_flow_path);
        warn_non_positive(&mut report, "flow_path_slope", i, inlet.flow_path_slope);

        match inlet.mode {
            InletMode::OnGrade { interception_ratio } => {
                if let Some(ratio) = interception_ratio {
                    check_range(&mut report, "interception_ratio", i, ratio, 0.0, 1.0);
                }
                check_range(&mut report, "gutter_grade", i, inlet.gutter_grade, 0.0, f64::MAX);
            }
            InletMode::LowPoint {
                manual_intercepted_flow,
                manual_flooding_width,
            } => {
                if let Some(qi) = manual_intercepted_flow {
                    check_range(&mut report, "manual_intercepted_flow", i, qi, 0.0, f64::MAX);
                }
                if let Some(w) = manual_flooding_width {
                    check_range(&mut report, "manual_flooding_width", i, w, 0.0, f64::MAX);
                }
            }
        }
    }

    for (i, pair) in inlets.windows(2).enumerate() {
        if pair[1].station < pair[0].station {
            report.add_warning(ValidationWarning::OrderWarning {
                message: format!(
                    "雨水口 {} 的桩号 {} 小于上游 {} 的桩号 {}",
                    pair[1].str_id, pair[1].station, pair[0].str_id, pair[0].station
                ),
                item: Some(i + 1),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rainfall::{Region, ReturnPeriod};

    fn ctx() -> CascadeContext {
        CascadeContext::new(RainfallSelection::new(Region::Region1, ReturnPeriod::Year10))
    }

    fn on_grade(id: &str, ratio: f64) -> Inlet {
        Inlet::new(id)
            .with_drainage(0.2, 0.9, 120.0, 1.0)
            .with_gutter_grade(1.5)
            .with_mode(InletMode::on_grade(ratio))
    }

    #[test]
    fn test_first_inlet_has_no_bypass() {
        let results = evaluate_cascade(&[on_grade("A", 0.5)], &ctx());
        assert_eq!(results[0].q_bypass_in, 0.0);
        assert_eq!(results[0].q_total, results[0].q_from_area);
    }

    #[test]
    fn test_step_matches_fold() {
        let inlets = [on_grade("A", 0.6), on_grade("B", 0.7)];
        let results = evaluate_cascade(&inlets, &ctx());
        let first = cascade_step(0.0, &inlets[0], &ctx());
        let second = cascade_step(first.q_bypass_out, &inlets[1], &ctx());
        assert_eq!(results, vec![first, second]);
    }

    #[test]
    fn test_unset_ratio_intercepts_nothing() {
        let inlet = on_grade("A", 0.0).with_mode(InletMode::default());
        let r = cascade_step(0.0, &inlet, &ctx());
        assert_eq!(r.intercepted_flow, 0.0);
        assert_eq!(r.q_bypass_out, r.q_total);
    }

    #[test]
    fn test_unset_low_point_defaults_to_zero() {
        let mut inlet = on_grade("A", 0.5);
        inlet.set_low_point(true);
        let r = cascade_step(1.0, &inlet, &ctx());
        assert_eq!(r.intercepted_flow, 0.0);
        assert_eq!(r.flooding_width, 0.0);
    }

    #[test]
    fn test_zero_gutter_grade_gives_zero_width() {
        let inlet = on_grade("A", 0.5).with_gutter_grade(0.0);
        let r = cascade_step(0.0, &inlet, &ctx());
        assert!(r.q_total > 0.0);
        assert_eq!(r.flooding_width, 0.0);
    }

    #[test]
    fn test_config_overrides_constants() {
        let config = HydraulicsConfig {
            manning_n: 0.016,
            cross_slope: 0.02,
            min_tc_minutes: 10.0,
        };
        let c = CascadeContext::from_config(RainfallSelection::default(), &config);
        assert_eq!(c.cross_slope, 0.02);
        let inlet = Inlet::new("A").with_drainage(0.1, 1.0, 1.0, 10.0);
        assert_eq!(cascade_step(0.0, &inlet, &c).time_of_concentration, 10.0);
    }

    #[test]
    fn test_summary() {
        let inlets = [on_grade("A", 0.5), on_grade("B", 0.5)];
        let results = evaluate_cascade(&inlets, &ctx());
        let s = CascadeSummary::from_results(&results);
        assert_eq!(s.inlet_count, 2);
        assert_eq!(s.final_bypass, results[1].q_bypass_out);
        assert_eq!(s.max_flooding_index, Some(1));
        let expected = results[0].q_from_area + results[1].q_from_area;
        assert!((s.total_direct_flow - (s.total_intercepted + s.final_bypass)).abs() < 1e-12);
        assert!((s.total_direct_flow - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary() {
        let s = CascadeSummary::from_results(&[]);
        assert_eq!(s.inlet_count, 0);
        assert_eq!(s.max_flooding_index, None);
    }

    #[test]
    fn test_validate_inlets() {
        let mut bad_ratio = on_grade("B", 1.5).with_station(50.0);
        bad_ratio.gutter_grade = 1.0;
        let inlets = [
            on_grade("A", 0.5).with_station(100.0),
            bad_ratio,
            on_grade("A", 0.5).with_station(200.0),
        ];
        let report = validate_inlets(&inlets);
        assert_eq!(report.error_count(), 2); // 截流比越界 + 编号重复
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::OrderWarning { item: Some(1), .. })));
    }

    #[test]
    fn test_validate_flags_non_finite_mode_values() {
        let mut sag = on_grade("B", 0.5);
        sag.mode = InletMode::low_point(f64::NAN, f64::INFINITY);
        let report = validate_inlets(&[on_grade("A", f64::NAN), sag]);
        assert_eq!(report.error_count(), 3);
        assert!(report
            .errors
            .iter()
            .all(|e| matches!(e, ValidationError::NonFinite { .. })));
    }

    #[test]
    fn test_non_finite_mode_values_fall_back_to_zero() {
        let r = cascade_step(0.0, &on_grade("A", f64::NAN), &ctx());
        assert_eq!(r.intercepted_flow, 0.0);
        assert_eq!(r.q_bypass_out, r.q_total);

        let mut sag = on_grade("B", 0.5);
        sag.mode = InletMode::low_point(f64::NAN, f64::NAN);
        let r = cascade_step(1.0, &sag, &ctx());
        assert_eq!(r.intercepted_flow, 0.0);
        assert_eq!(r.flooding_width, 0.0);
    }

    #[test]
    fn test_validate_clean_sequence() {
        let inlets = [
            on_grade("A", 0.5).with_station(100.0),
            on_grade("B", 0.5).with_station(300.0),
        ];
        assert!(validate_inlets(&inlets).is_valid_strict());
    }
}
