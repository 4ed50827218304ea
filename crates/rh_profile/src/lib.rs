// crates/rh_profile/src/lib.rs

//! 道路纵断面几何模块
//!
//! 由变坡点序列和首末坡度推导完整的竖向线形：
//! - 变坡点与纵断面定义 (pvi)
//! - 竖曲线求解、高低点识别 (curve)
//! - 渲染用折线采样 (sampling)
//! - PVI/BVC/EVC/极值点标注 (annotation)
//! - 显式重算入口 (engine)
//!
//! # 示例
//!
//! ```
//! use rh_profile::{ProfileDefinition, ProfileEngine, Pvi};
//!
//! let def = ProfileDefinition::new(-1.0, 1.0).with_pvi(Pvi::new(1000.0, 100.0, 400.0));
//! let derived = ProfileEngine::default().recompute(&def).unwrap();
//! assert_eq!(derived.low_points().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotation;
pub mod curve;
pub mod engine;
pub mod pvi;
pub mod sampling;

pub use annotation::{format_grade, format_station, grade_label, AnnotationKind, ProfileAnnotation};
pub use curve::{resolve_curves, CurveSegment, Extremum, ExtremumKind, ResolvedProfile};
pub use engine::{ProfileDerived, ProfileEngine};
pub use pvi::{ProfileDefinition, Pvi};
pub use sampling::{sample, ProfilePoint, ProfilePolyline};
