// crates/rh_drainage/src/lib.rs

//! 道路排水计算模块
//!
//! 提供雨水口水力计算功能，包括：
//! - 区域降雨 IDF 模型 (rainfall)
//! - 水文与边沟公式 (formulas)
//! - 雨水口数据模型 (inlet)
//! - 旁通流量级联 (cascade)
//!
//! # 示例
//!
//! ```
//! use rh_drainage::{evaluate_cascade, CascadeContext, Inlet, InletMode, RainfallSelection};
//!
//! let inlets = vec![
//!     Inlet::new("1").with_drainage(0.19, 1.0, 141.42, 0.5).with_gutter_grade(1.0)
//!         .with_mode(InletMode::on_grade(0.75)),
//!     Inlet::new("2").with_drainage(0.12, 0.9, 90.0, 1.0).with_gutter_grade(1.0)
//!         .with_mode(InletMode::on_grade(0.75)),
//! ];
//! let results = evaluate_cascade(&inlets, &CascadeContext::new(RainfallSelection::default()));
//! assert_eq!(results[1].q_bypass_in, results[0].q_bypass_out);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cascade;
pub mod formulas;
pub mod inlet;
pub mod rainfall;

pub use cascade::{cascade_step, evaluate_cascade, validate_inlets, CascadeContext, CascadeSummary};
pub use inlet::{Inlet, InletMode, InletResult, StructureType};
pub use rainfall::{
    lookup, lookup_by_name, RainfallCoefficients, RainfallSelection, Region, ReturnPeriod,
};
