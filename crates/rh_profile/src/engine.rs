// crates/rh_profile/src/engine.rs

//! 纵断面几何引擎
//!
//! 显式重算入口：调用方在每次编辑后调用 [`ProfileEngine::recompute`]，
//! 得到完整的派生结果（竖曲线、采样折线、标注）。引擎不保存任何派生状态。

use crate::annotation::{annotate, grade_label, AnnotationKind, ProfileAnnotation};
use crate::curve::{Extremum, ResolvedProfile};
use crate::pvi::ProfileDefinition;
use crate::sampling::{fallback_elevation, fallback_grade, sample_profile, sample_tangent, ProfilePolyline};
use rh_config::ProfileConfig;
use rh_foundation::validation::check_finite;
use rh_foundation::{RhResult, ValidationError, ValidationReport, ValidationWarning};

/// 纵断面派生结果
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDerived {
    /// 已求解纵断面
    pub resolved: ResolvedProfile,
    /// 采样折线
    pub polyline: ProfilePolyline,
    /// 标注
    pub annotations: Vec<ProfileAnnotation>,
}

impl ProfileDerived {
    /// 是否为无变坡点的退化纵断面
    pub fn is_tangent_only(&self) -> bool {
        self.resolved.curves.is_empty()
    }

    /// 所有低点
    pub fn low_points(&self) -> Vec<Extremum> {
        self.resolved.low_points().copied().collect()
    }

    /// 所有高点
    pub fn high_points(&self) -> Vec<Extremum> {
        self.resolved.high_points().copied().collect()
    }
}

/// 纵断面几何引擎
#[derive(Debug, Clone, Default)]
pub struct ProfileEngine {
    config: ProfileConfig,
}

impl ProfileEngine {
    /// 使用采样配置创建
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// 采样配置
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// 完整重算
    ///
    /// 桩号递减返回 [`rh_foundation::RhError::NonMonotonicStations`]；
    /// 其余退化情况（桩号相等、曲线长度为 0、坡度未定义）按定义规则处理。
    pub fn recompute(&self, definition: &ProfileDefinition) -> RhResult<ProfileDerived> {
        definition.check_station_order()?;

        let resolved = ResolvedProfile::resolve(definition);

        if resolved.curves.is_empty() {
            return Ok(ProfileDerived {
                polyline: sample_tangent(definition, &self.config),
                annotations: vec![self.tangent_annotation(definition)],
                resolved,
            });
        }

        for (i, pair) in resolved.curves.windows(2).enumerate() {
            if pair[0].evc_station > pair[1].bvc_station {
                log::warn!(
                    "竖曲线重叠: 第{}个 EVC {:.2} 超过第{}个 BVC {:.2}",
                    i,
                    pair[0].evc_station,
                    i + 1,
                    pair[1].bvc_station
                );
            }
        }

        let polyline = sample_profile(&resolved, &self.config);
        let annotations = annotate(&resolved, self.config.pad);
        log::debug!(
            "纵断面重算: {} 个变坡点, {} 个采样点",
            resolved.curves.len(),
            polyline.len()
        );

        Ok(ProfileDerived {
            resolved,
            polyline,
            annotations,
        })
    }

    /// 桩号处的设计高程（无变坡点时使用默认窗口切线）
    pub fn elevation_at(&self, definition: &ProfileDefinition, station: f64) -> f64 {
        ResolvedProfile::resolve(definition)
            .elevation_at(station)
            .unwrap_or_else(|| fallback_elevation(definition, &self.config, station))
    }

    fn tangent_annotation(&self, definition: &ProfileDefinition) -> ProfileAnnotation {
        let station = self.config.default_window_start + self.config.default_window_length / 2.0;
        ProfileAnnotation {
            kind: AnnotationKind::Grade,
            pvi_index: None,
            station,
            elevation: fallback_elevation(definition, &self.config, station),
            grade: Some(fallback_grade(definition.beginning_grade, definition.ending_grade)),
            label: grade_label(definition.beginning_grade, definition.ending_grade),
        }
    }

    /// 验证纵断面定义
    ///
    /// 错误：非有限的桩号/高程、负曲线长度、桩号递减。
    /// 警告：未定义的首末坡度、相邻竖曲线重叠、桩号相等。
    pub fn validate(&self, definition: &ProfileDefinition) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !definition.is_empty() {
            if !definition.beginning_grade.is_finite() {
                report.add_warning(ValidationWarning::Custom {
                    message: "起始坡度未定义，首段切线高程无法计算".to_string(),
                });
            }
            if !definition.ending_grade.is_finite() {
                report.add_warning(ValidationWarning::Custom {
                    message: "终止坡度未定义，末段切线高程无法计算".to_string(),
                });
            }
        }

        for (i, pvi) in definition.pvis.iter().enumerate() {
            check_finite(&mut report, "station", i, pvi.station);
            check_finite(&mut report, "elevation", i, pvi.elevation);
            if pvi.curve_length < 0.0 || !pvi.curve_length.is_finite() {
                report.add_error(ValidationError::OutOfRange {
                    field: "curve_length",
                    item: i,
                    value: pvi.curve_length,
                    min: 0.0,
                    max: f64::MAX,
                });
            }
        }

        if let Err(e) = definition.check_station_order() {
            report.add_error(ValidationError::ConsistencyError {
                message: e.to_string(),
            });
        }

        let resolved = ResolvedProfile::resolve(definition);
        for (i, pair) in resolved.curves.windows(2).enumerate() {
            if pair[0].pvi_station == pair[1].pvi_station {
                report.add_warning(ValidationWarning::OrderWarning {
                    message: "相邻变坡点桩号相等，弦坡按 0% 处理".to_string(),
                    item: Some(i + 1),
                });
            } else if pair[0].evc_station > pair[1].bvc_station {
                report.add_warning(ValidationWarning::OrderWarning {
                    message: format!(
                        "竖曲线重叠: EVC {:.2} > 下一 BVC {:.2}",
                        pair[0].evc_station, pair[1].bvc_station
                    ),
                    item: Some(i + 1),
                });
            }
        }

        report
    }
}
