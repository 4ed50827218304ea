// crates/rh_foundation/src/lib.rs

//! RoadHydro Foundation Layer
//!
//! 基础层，提供整个工作区共享的错误类型、验证报告和数值工具。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `RhError`
//! - [`validation`]: 输入验证报告
//! - [`float`]: "正有限值"判定与非有限值回退为 0
//!
//! # 示例
//!
//! ```
//! use rh_foundation::error::{RhError, RhResult};
//!
//! fn pick(region: &str) -> RhResult<()> {
//!     Err(RhError::invalid_selection(region, "10-Year"))
//! }
//! assert!(pick("Region 9").is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod validation;

pub use error::{RhError, RhResult};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

