// crates/rh_profile/src/curve.rs

//! 竖曲线求解
//!
//! # 算法
//!
//! 对第 i 个变坡点：
//! ```text
//! g_in  = i == 0 ? 起始坡度 : (z_i − z_{i−1}) / (s_i − s_{i−1}) × 100
//! g_out = i == n−1 ? 终止坡度 : (z_{i+1} − z_i) / (s_{i+1} − s_i) × 100
//! BVC   = s_i − L/2,   z_BVC = z_i − g_in/100 × L/2
//! EVC   = s_i + L/2,   z_EVC = z_i + g_out/100 × L/2
//! A     = g_out − g_in
//! z(x)  = z_BVC + g_in/100 × x + (A/100) / (2L) × x²      x ∈ [0, L]
//! x*    = −g_in / A × L                                   极值点
//! ```
//!
//! 桩号相等时弦坡定义为 0。`A > 0` 为凹曲线（低点），`A < 0` 为凸曲线（高点）。

use crate::pvi::{ProfileDefinition, Pvi};
use serde::{Deserialize, Serialize};

/// 极值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumKind {
    /// 低点（凹曲线）
    Low,
    /// 高点（凸曲线）
    High,
}

/// 竖曲线上的极值点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// 桩号
    pub station: f64,
    /// 高程
    pub elevation: f64,
    /// 类型
    pub kind: ExtremumKind,
}

/// 已求解的竖曲线
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    /// 变坡点桩号
    pub pvi_station: f64,
    /// 变坡点高程
    pub pvi_elevation: f64,
    /// 有效竖曲线长度（负值或非有限值按 0 处理）
    pub curve_length: f64,
    /// 进入坡度 [%]
    pub grade_in: f64,
    /// 离开坡度 [%]
    pub grade_out: f64,
    /// 竖曲线起点桩号
    pub bvc_station: f64,
    /// 竖曲线起点高程
    pub bvc_elevation: f64,
    /// 竖曲线终点桩号
    pub evc_station: f64,
    /// 竖曲线终点高程
    pub evc_elevation: f64,
    /// 坡度代数差 A = g_out − g_in [%]
    pub delta_grade: f64,
    /// 极值点
    pub extremum: Option<Extremum>,
}

/// 两点之间的弦坡 [%]，桩号相等时为 0
#[inline]
pub fn chord_grade(from: &Pvi, to: &Pvi) -> f64 {
    let ds = to.station - from.station;
    if ds == 0.0 {
        0.0
    } else {
        (to.elevation - from.elevation) / ds * 100.0
    }
}

impl CurveSegment {
    /// 由变坡点与前后坡度求解竖曲线
    pub fn solve(pvi: &Pvi, grade_in: f64, grade_out: f64) -> Self {
        let l = if pvi.curve_length.is_finite() && pvi.curve_length > 0.0 {
            pvi.curve_length
        } else {
            0.0
        };
        let delta_grade = grade_out - grade_in;

        if l == 0.0 {
            return Self {
                pvi_station: pvi.station,
                pvi_elevation: pvi.elevation,
                curve_length: 0.0,
                grade_in,
                grade_out,
                bvc_station: pvi.station,
                bvc_elevation: pvi.elevation,
                evc_station: pvi.station,
                evc_elevation: pvi.elevation,
                delta_grade,
                extremum: None,
            };
        }

        let half = l / 2.0;
        let mut segment = Self {
            pvi_station: pvi.station,
            pvi_elevation: pvi.elevation,
            curve_length: l,
            grade_in,
            grade_out,
            bvc_station: pvi.station - half,
            bvc_elevation: pvi.elevation - grade_in / 100.0 * half,
            evc_station: pvi.station + half,
            evc_elevation: pvi.elevation + grade_out / 100.0 * half,
            delta_grade,
            extremum: None,
        };
        segment.extremum = segment.find_extremum();
        segment
    }

    fn find_extremum(&self) -> Option<Extremum> {
        let a = self.delta_grade;
        if self.curve_length <= 0.0 || a == 0.0 || !a.is_finite() {
            return None;
        }
        let x = -self.grade_in / a * self.curve_length;
        if !(0.0..=self.curve_length).contains(&x) {
            return None;
        }
        Some(Extremum {
            station: self.bvc_station + x,
            elevation: self.elevation_at_offset(x),
            kind: if a > 0.0 {
                ExtremumKind::Low
            } else {
                ExtremumKind::High
            },
        })
    }

    /// 是否为真正的竖曲线（而非折线点）
    pub fn has_curve(&self) -> bool {
        self.curve_length > 0.0
    }

    /// 抛物线系数 r = (A/100) / (2L)
    pub fn rate_of_change(&self) -> f64 {
        if self.has_curve() {
            self.delta_grade / 100.0 / (2.0 * self.curve_length)
        } else {
            0.0
        }
    }

    /// 距 BVC 距离 x 处的曲线高程
    pub fn elevation_at_offset(&self, x: f64) -> f64 {
        self.bvc_elevation + self.grade_in / 100.0 * x + self.rate_of_change() * x * x
    }

    /// 桩号是否位于竖曲线范围内
    pub fn contains(&self, station: f64) -> bool {
        self.has_curve() && station >= self.bvc_station && station <= self.evc_station
    }

    /// 离开切线上桩号处的高程
    pub fn tangent_out_elevation(&self, station: f64) -> f64 {
        self.pvi_elevation + self.grade_out / 100.0 * (station - self.pvi_station)
    }

    /// 进入切线上桩号处的高程
    pub fn tangent_in_elevation(&self, station: f64) -> f64 {
        self.pvi_elevation + self.grade_in / 100.0 * (station - self.pvi_station)
    }
}

/// 逐个变坡点求解竖曲线
///
/// 只做局部推导，不检查桩号顺序，不会失败。
pub fn resolve_curves(definition: &ProfileDefinition) -> Vec<CurveSegment> {
    let pvis = &definition.pvis;
    let n = pvis.len();

    (0..n)
        .map(|i| {
            let grade_in = if i == 0 {
                definition.beginning_grade
            } else {
                chord_grade(&pvis[i - 1], &pvis[i])
            };
            let grade_out = if i + 1 == n {
                definition.ending_grade
            } else {
                chord_grade(&pvis[i], &pvis[i + 1])
            };
            CurveSegment::solve(&pvis[i], grade_in, grade_out)
        })
        .collect()
}

/// 已求解的纵断面，可在任意桩号求高程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProfile {
    /// 起始坡度 [%]
    pub beginning_grade: f64,
    /// 终止坡度 [%]
    pub ending_grade: f64,
    /// 各变坡点的竖曲线
    pub curves: Vec<CurveSegment>,
}

impl ResolvedProfile {
    /// 求解纵断面
    pub fn resolve(definition: &ProfileDefinition) -> Self {
        Self {
            beginning_grade: definition.beginning_grade,
            ending_grade: definition.ending_grade,
            curves: resolve_curves(definition),
        }
    }

    /// 桩号处的设计高程
    ///
    /// 依次为：首条包含该桩号的竖曲线 → 最近一个已走过 EVC 的离开切线 → 起始切线。
    /// 没有变坡点时返回 `None`。
    pub fn elevation_at(&self, station: f64) -> Option<f64> {
        let first = self.curves.first()?;

        if let Some(curve) = self.curves.iter().find(|c| c.contains(station)) {
            return Some(curve.elevation_at_offset(station - curve.bvc_station));
        }

        if let Some(curve) = self.curves.iter().rev().find(|c| c.evc_station <= station) {
            return Some(curve.tangent_out_elevation(station));
        }

        Some(first.tangent_in_elevation(station))
    }

    /// 所有低点
    pub fn low_points(&self) -> impl Iterator<Item = &Extremum> {
        self.extrema().filter(|e| e.kind == ExtremumKind::Low)
    }

    /// 所有高点
    pub fn high_points(&self) -> impl Iterator<Item = &Extremum> {
        self.extrema().filter(|e| e.kind == ExtremumKind::High)
    }

    fn extrema(&self) -> impl Iterator<Item = &Extremum> {
        self.curves.iter().filter_map(|c| c.extremum.as_ref())
    }
}
