// crates/rh_drainage/src/formulas.rs

//! 水文与边沟水力公式
//!
//! # 公式
//!
//! 汇流时间（坡面流）:
//! ```text
//! TC = 0.7039 × HL^0.3917 × C^-1.1309 × S^-0.1985     [min]
//! ```
//!
//! 降雨强度与流量:
//! ```text
//! I = a × (tc/60 + b)^c     [in/hr]
//! Q = I × ΣAC               [cfs]
//! ```
//!
//! 边沟水面宽（由 Izzard 形式的边沟流量公式反解）:
//! ```text
//! Q = (0.56 / n) × Sx^(5/3) × T^(8/3) × S^(1/2)
//! T = (Q × n / (0.56 × Sx^(5/3) × S^(1/2)))^(3/8)
//! ```
//!
//! 所有函数对非正或非有限输入返回 0，不返回错误。
//! 0 沿级联向下游传播，使编辑中的半成品数据得到零流量而不是中断计算。

use crate::rainfall::{lookup, RainfallCoefficients, RainfallSelection, Region, ReturnPeriod};
use rh_foundation::float::is_positive_finite;

/// 最小设计汇流时间 [min]
pub const MIN_TC_MINUTES: f64 = 5.0;

/// 默认边沟 Manning 糙率
pub const DEFAULT_MANNING_N: f64 = 0.015;

/// 连续坡段雨水口使用的路面横坡 [ft/ft]
pub const DEFAULT_CROSS_SLOPE: f64 = 0.025;

/// 边沟流量公式的单位换算系数（英制）
pub const GUTTER_KU: f64 = 0.56;

/// 汇流时间 [min]，下限 5 分钟
///
/// - `flow_path_length`: 最长流径 HL [ft]
/// - `runoff_coefficient`: 径流系数 C
/// - `path_slope_pct`: 流径坡度 S [%]
///
/// 任一输入非正时返回 0（不可计算）。
pub fn time_of_concentration(flow_path_length: f64, runoff_coefficient: f64, path_slope_pct: f64) -> f64 {
    time_of_concentration_with_floor(flow_path_length, runoff_coefficient, path_slope_pct, MIN_TC_MINUTES)
}

/// 带自定义下限的汇流时间 [min]
pub fn time_of_concentration_with_floor(
    flow_path_length: f64,
    runoff_coefficient: f64,
    path_slope_pct: f64,
    floor_minutes: f64,
) -> f64 {
    if !is_positive_finite(flow_path_length)
        || !is_positive_finite(runoff_coefficient)
        || !is_positive_finite(path_slope_pct)
    {
        return 0.0;
    }

    let tc = 0.7039
        * flow_path_length.powf(0.3917)
        * runoff_coefficient.powf(-1.1309)
        * path_slope_pct.powf(-0.1985);

    tc.max(floor_minutes)
}

/// 降雨强度 [in/hr]
///
/// 系数缺失或 `tc_minutes <= 0` 时返回 0。
pub fn intensity(tc_minutes: f64, coefficients: Option<&RainfallCoefficients>) -> f64 {
    let Some(coef) = coefficients else {
        return 0.0;
    };
    if !is_positive_finite(tc_minutes) {
        return 0.0;
    }

    let i = coef.intensity_at(tc_minutes / 60.0);
    if i.is_finite() && i > 0.0 {
        i
    } else {
        0.0
    }
}

/// 按分区与重现期计算降雨强度
pub fn intensity_for(tc_minutes: f64, region: Region, return_period: ReturnPeriod) -> f64 {
    intensity(tc_minutes, Some(&lookup(region, return_period)))
}

/// 按目录名称计算降雨强度，未知名称返回 0
pub fn intensity_for_names(tc_minutes: f64, region: &str, return_period: &str) -> f64 {
    let coefficients = RainfallSelection::from_names(region, return_period)
        .ok()
        .map(|s| s.coefficients());
    intensity(tc_minutes, coefficients.as_ref())
}

/// 有理公式流量 Q = I × ΣAC [cfs]
pub fn flow(intensity: f64, sum_area_c: f64) -> f64 {
    if !is_positive_finite(intensity) || !is_positive_finite(sum_area_c) {
        return 0.0;
    }
    intensity * sum_area_c
}

/// 边沟水面宽（积水宽度）T [ft]
///
/// - `q_total`: 边沟流量 [cfs]
/// - `longitudinal_grade_pct`: 纵坡 [%]
/// - `cross_slope`: 横坡 Sx [ft/ft]
/// - `manning_n`: 糙率
pub fn width_of_flooding(q_total: f64, longitudinal_grade_pct: f64, cross_slope: f64, manning_n: f64) -> f64 {
    if !is_positive_finite(q_total)
        || !is_positive_finite(longitudinal_grade_pct)
        || !is_positive_finite(cross_slope)
        || !is_positive_finite(manning_n)
    {
        return 0.0;
    }

    let s = longitudinal_grade_pct / 100.0;
    let denom = GUTTER_KU * cross_slope.powf(5.0 / 3.0) * s.sqrt();
    (q_total * manning_n / denom).powf(3.0 / 8.0)
}
