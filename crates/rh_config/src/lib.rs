// crates/rh_config/src/lib.rs

//! RoadHydro Config Layer
//!
//! 配置层，集中存放设计常数和采样参数，全部为 f64 并支持 JSON 序列化。
//!
//! # 模块概览
//!
//! - [`design_config`]: `DesignConfig` 及其子配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: rh_cli       ─> DesignProject, DesignConfig
//! Layer 4: rh_report    ─> 汇总与咨询接口
//! Layer 3: rh_profile / rh_drainage ─> 读取 ProfileConfig / HydraulicsConfig
//! Layer 2: rh_config    ─> DesignConfig (本层)
//! Layer 1: rh_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod design_config;
pub mod error;

// 重导出核心类型
pub use design_config::{DesignConfig, HydraulicsConfig, OutputConfig, OutputFormat, ProfileConfig};
pub use error::ConfigError;
