// crates/rh_profile/src/sampling.rs

//! 纵断面采样
//!
//! 生成供渲染层使用的 `(桩号, 高程)` 折线：
//!
//! 1. 在 `[首个 BVC − pad, 末个 EVC + pad]` 上按固定间距取点；
//! 2. 插入每个 BVC/PVI/EVC 断点，保证转折处不被抹平；
//! 3. 丢弃高程非有限的点；
//! 4. 相邻同桩号且高程差小于容差的点去重。
//!
//! 没有变坡点时退化为默认窗口上的一条切线。

use crate::curve::ResolvedProfile;
use crate::pvi::ProfileDefinition;
use rh_config::ProfileConfig;
use rh_foundation::RhResult;
use serde::{Deserialize, Serialize};

/// 单次采样允许的最大点数，超过时自动放大间距
pub const MAX_SAMPLES: usize = 200_000;

/// 判定"同一桩号"的容差
const STATION_EPS: f64 = 1e-9;

/// 折线上的点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// 桩号
    pub station: f64,
    /// 高程
    pub elevation: f64,
}

/// 有限、可重复遍历、保持顺序的采样折线
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfilePolyline {
    points: Vec<ProfilePoint>,
}

impl ProfilePolyline {
    /// 逐点遍历（可多次调用）
    pub fn iter(&self) -> std::slice::Iter<'_, ProfilePoint> {
        self.points.iter()
    }

    /// 点数
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 全部点
    pub fn as_slice(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// 首点
    pub fn first(&self) -> Option<&ProfilePoint> {
        self.points.first()
    }

    /// 末点
    pub fn last(&self) -> Option<&ProfilePoint> {
        self.points.last()
    }

    /// 由桩号序列和高程函数构建，执行丢弃与去重规则
    fn from_stations(
        stations: Vec<f64>,
        mut elevation: impl FnMut(f64) -> Option<f64>,
        tolerance: f64,
    ) -> Self {
        let mut points: Vec<ProfilePoint> = Vec::with_capacity(stations.len());

        for station in stations {
            let Some(z) = elevation(station).filter(|z| z.is_finite()) else {
                continue;
            };
            if let Some(prev) = points.last() {
                if (station - prev.station).abs() <= STATION_EPS && (z - prev.elevation).abs() < tolerance {
                    continue;
                }
            }
            points.push(ProfilePoint { station, elevation: z });
        }

        Self { points }
    }
}

impl<'a> IntoIterator for &'a ProfilePolyline {
    type Item = &'a ProfilePoint;
    type IntoIter = std::slice::Iter<'a, ProfilePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// 等间距桩号（含两端）
fn regular_stations(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !(start.is_finite() && end.is_finite()) || end < start {
        return Vec::new();
    }
    let mut step = if step.is_finite() && step > 0.0 { step } else { end - start };
    let span = end - start;
    if span == 0.0 {
        return vec![start];
    }
    if span / step > MAX_SAMPLES as f64 {
        let widened = span / MAX_SAMPLES as f64;
        log::warn!("采样间距 {} 过小，放大为 {:.4}", step, widened);
        step = widened;
    }

    let n = (span / step).floor() as usize;
    let mut stations: Vec<f64> = (0..=n).map(|k| start + k as f64 * step).collect();
    if stations.last().is_some_and(|&s| end - s > STATION_EPS) {
        stations.push(end);
    }
    stations
}

/// 对已求解纵断面采样
pub fn sample_profile(profile: &ResolvedProfile, config: &ProfileConfig) -> ProfilePolyline {
    let breakpoints: Vec<f64> = profile
        .curves
        .iter()
        .flat_map(|c| [c.bvc_station, c.pvi_station, c.evc_station])
        .filter(|s| s.is_finite())
        .collect();

    let (Some(lo), Some(hi)) = (
        breakpoints.iter().copied().reduce(f64::min),
        breakpoints.iter().copied().reduce(f64::max),
    ) else {
        return ProfilePolyline::default();
    };

    let mut stations = regular_stations(lo - config.pad, hi + config.pad, config.station_step);
    stations.extend(breakpoints);
    stations.sort_by(f64::total_cmp);

    ProfilePolyline::from_stations(stations, |s| profile.elevation_at(s), config.dedupe_tolerance)
}

/// 无变坡点时使用的切线坡度：优先起始坡度，其次终止坡度，都未定义时为 0
pub fn fallback_grade(beginning_grade: f64, ending_grade: f64) -> f64 {
    if beginning_grade.is_finite() {
        beginning_grade
    } else if ending_grade.is_finite() {
        ending_grade
    } else {
        0.0
    }
}

/// 无变坡点时默认窗口上的切线高程
pub fn fallback_elevation(definition: &ProfileDefinition, config: &ProfileConfig, station: f64) -> f64 {
    let g = fallback_grade(definition.beginning_grade, definition.ending_grade);
    config.datum_elevation + g / 100.0 * (station - config.default_window_start)
}

/// 无变坡点时的退化采样
pub fn sample_tangent(definition: &ProfileDefinition, config: &ProfileConfig) -> ProfilePolyline {
    let start = config.default_window_start;
    let stations = regular_stations(start, start + config.default_window_length, config.station_step);
    ProfilePolyline::from_stations(
        stations,
        |s| Some(fallback_elevation(definition, config, s)),
        config.dedupe_tolerance,
    )
}

/// 采样入口：有变坡点时分段采样，否则退化为单条切线
///
/// 桩号递减时返回 [`rh_foundation::RhError::NonMonotonicStations`]。
pub fn sample(definition: &ProfileDefinition, config: &ProfileConfig) -> RhResult<ProfilePolyline> {
    definition.check_station_order()?;
    Ok(if definition.is_empty() {
        sample_tangent(definition, config)
    } else {
        sample_profile(&ResolvedProfile::resolve(definition), config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pvi::Pvi;

    #[test]
    fn test_regular_stations_include_end() {
        let s = regular_stations(0.0, 25.0, 10.0);
        assert_eq!(s, vec![0.0, 10.0, 20.0, 25.0]);
        assert_eq!(regular_stations(5.0, 5.0, 10.0), vec![5.0]);
        assert!(regular_stations(10.0, 0.0, 1.0).is_empty());
        assert!(regular_stations(f64::NAN, 10.0, 1.0).is_empty());
    }

    #[test]
    fn test_too_many_samples_widens_step() {
        let s = regular_stations(0.0, 1.0e6, 1e-3);
        assert!(s.len() <= MAX_SAMPLES + 2);
        assert_eq!(s.last().copied(), Some(1.0e6));
    }

    #[test]
    fn test_dedupe_and_drop() {
        let line = ProfilePolyline::from_stations(
            vec![0.0, 1.0, 1.0, 1.0, 2.0, 3.0],
            |s| match s {
                x if x == 2.0 => Some(f64::NAN),
                x if x == 3.0 => None,
                x => Some(x * 10.0),
            },
            1e-3,
        );
        let stations: Vec<f64> = line.iter().map(|p| p.station).collect();
        assert_eq!(stations, vec![0.0, 1.0]);
    }

    #[test]
    fn test_same_station_different_elevation_kept() {
        let mut z = 0.0;
        let line = ProfilePolyline::from_stations(
            vec![1.0, 1.0],
            |_| {
                z += 1.0;
                Some(z)
            },
            1e-3,
        );
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_tangent_fallback() {
        let config = ProfileConfig::default();
        let def = ProfileDefinition::new(f64::NAN, 2.0);
        let line = sample(&def, &config).unwrap();
        assert_eq!(line.len(), 101);
        let first = line.first().unwrap();
        let last = line.last().unwrap();
        assert_eq!(first.station, 0.0);
        assert_eq!(first.elevation, 100.0);
        assert_eq!(last.station, 1000.0);
        assert!((last.elevation - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_rejects_decreasing_stations() {
        let def = ProfileDefinition::new(1.0, 1.0)
            .with_pvi(Pvi::new(500.0, 10.0, 0.0))
            .with_pvi(Pvi::new(400.0, 11.0, 0.0));
        let err = sample(&def, &ProfileConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            rh_foundation::RhError::NonMonotonicStations { index: 1, .. }
        ));
    }

    #[test]
    fn test_restartable() {
        let def = ProfileDefinition::new(-1.0, 1.0).with_pvi(Pvi::new(1000.0, 100.0, 400.0));
        let line = sample(&def, &ProfileConfig::default()).unwrap();
        let a: Vec<ProfilePoint> = line.iter().copied().collect();
        let b: Vec<ProfilePoint> = (&line).into_iter().copied().collect();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
