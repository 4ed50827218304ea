// crates/rh_report/src/lib.rs

//! RoadHydro 报告层
//!
//! 把纵断面与级联结果组装为只读报告，并提供项目文件和外部咨询接口。
//!
//! - [`report`]: `ReportAssembler` 与 `DesignReport`
//! - [`project`]: `DesignProject` 项目文件与编辑操作
//! - [`advisory`]: 咨询提供方接口
//!
//! # 示例
//!
//! ```
//! use rh_report::DesignProject;
//!
//! let project = DesignProject::from_json("{}").unwrap();
//! let outcome = project.recompute().unwrap();
//! assert!(outcome.results.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod advisory;
pub mod project;
pub mod report;

pub use advisory::{
    request_advisory, AdvisoryError, AdvisoryOutcome, AdvisoryPayload, AdvisoryProvider, UnconfiguredProvider,
};
pub use project::{DesignOutcome, DesignProject};
pub use report::{DesignReport, InletRow, ReportAssembler};
