// crates/rh_config/src/design_config.rs

//! DesignConfig - 设计配置（全 f64）
//!
//! 水力设计常数（Manning 糙率、路拱横坡、最小汇流时间）
//! 与纵断面采样参数。所有字段均有默认值，配置文件可只写需要覆盖的部分。

use rh_foundation::float::is_positive_finite;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 设计配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DesignConfig {
    /// 水力参数
    #[serde(default)]
    pub hydraulics: HydraulicsConfig,

    /// 纵断面采样参数
    #[serde(default)]
    pub profile: ProfileConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 水力参数配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicsConfig {
    /// 边沟 Manning 糙率系数
    #[serde(default = "default_manning")]
    pub manning_n: f64,

    /// 路面横坡 Sx [ft/ft]
    #[serde(default = "default_cross_slope")]
    pub cross_slope: f64,

    /// 最小设计汇流时间 [min]
    #[serde(default = "default_min_tc")]
    pub min_tc_minutes: f64,
}

fn default_manning() -> f64 { 0.015 }
fn default_cross_slope() -> f64 { 0.025 }
fn default_min_tc() -> f64 { 5.0 }

impl Default for HydraulicsConfig {
    fn default() -> Self {
        Self {
            manning_n: default_manning(),
            cross_slope: default_cross_slope(),
            min_tc_minutes: default_min_tc(),
        }
    }
}

/// 纵断面采样配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// 采样桩号间距 [ft]
    #[serde(default = "default_station_step")]
    pub station_step: f64,

    /// 首个 BVC 之前、末个 EVC 之后的延伸长度 [ft]
    #[serde(default = "default_pad")]
    pub pad: f64,

    /// 同桩号相邻点去重的高程容差 [ft]
    #[serde(default = "default_dedupe_tolerance")]
    pub dedupe_tolerance: f64,

    /// 无变坡点时默认窗口起点桩号
    #[serde(default)]
    pub default_window_start: f64,

    /// 无变坡点时默认窗口长度 [ft]
    #[serde(default = "default_window_length")]
    pub default_window_length: f64,

    /// 无变坡点时窗口起点高程 [ft]
    #[serde(default = "default_datum_elevation")]
    pub datum_elevation: f64,
}

fn default_station_step() -> f64 { 10.0 }
fn default_pad() -> f64 { 100.0 }
fn default_dedupe_tolerance() -> f64 { 1e-3 }
fn default_window_length() -> f64 { 1000.0 }
fn default_datum_elevation() -> f64 { 100.0 }

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            station_step: default_station_step(),
            pad: default_pad(),
            dedupe_tolerance: default_dedupe_tolerance(),
            default_window_start: 0.0,
            default_window_length: default_window_length(),
            datum_elevation: default_datum_elevation(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// 输出格式
    #[serde(default)]
    pub format: OutputFormat,
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 纯文本表格
    #[default]
    Text,
    /// CSV 表格
    Csv,
}

impl DesignConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析并验证
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: DesignConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = &self.hydraulics;
        if !is_positive_finite(h.manning_n) {
            return Err(ConfigError::invalid("hydraulics.manning_n", h.manning_n, "糙率必须为正"));
        }
        if !is_positive_finite(h.cross_slope) {
            return Err(ConfigError::invalid("hydraulics.cross_slope", h.cross_slope, "横坡必须为正"));
        }
        if !is_positive_finite(h.min_tc_minutes) {
            return Err(ConfigError::invalid(
                "hydraulics.min_tc_minutes",
                h.min_tc_minutes,
                "最小汇流时间必须为正",
            ));
        }

        let p = &self.profile;
        if !is_positive_finite(p.station_step) {
            return Err(ConfigError::invalid("profile.station_step", p.station_step, "采样间距必须为正"));
        }
        if p.pad < 0.0 || !p.pad.is_finite() {
            return Err(ConfigError::invalid("profile.pad", p.pad, "延伸长度不能为负"));
        }
        if p.dedupe_tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "profile.dedupe_tolerance",
                p.dedupe_tolerance,
                "去重容差不能为负",
            ));
        }
        if !is_positive_finite(p.default_window_length) {
            return Err(ConfigError::invalid(
                "profile.default_window_length",
                p.default_window_length,
                "窗口长度必须为正",
            ));
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
