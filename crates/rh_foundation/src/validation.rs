// crates/rh_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 输入数据在编辑过程中常处于半成品状态，计算本身对其"软失败"，
//! 验证报告则把这些问题列出来交给调用方。
//!
//! # 示例
//!
//! ```
//! use rh_foundation::validation::{ValidationReport, check_range};
//!
//! let mut report = ValidationReport::new();
//! check_range(&mut report, "interception_ratio", 0, 1.2, 0.0, 1.0);
//! assert!(!report.is_valid());
//! ```

use std::fmt;

/// 验证报告
///
/// 错误表示计算结果将失去意义；警告表示结果可以计算但可能退化为 0
/// 或与编辑意图不一致。
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 错误数量
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 警告数量
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 无错误
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// 无错误且无警告（`validate --strict`）
    pub fn is_valid_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// 合并子报告（纵断面、雨水口、配置各自生成）
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} 个错误, {} 个警告", self.error_count(), self.warning_count())?;
        for err in &self.errors {
            writeln!(f, "  ✗ {}", err)?;
        }
        for warn in &self.warnings {
            writeln!(f, "  ⚠ {}", warn)?;
        }
        Ok(())
    }
}

/// 验证错误类型
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// 非有限值
    NonFinite {
        /// 字段名称
        field: &'static str,
        /// 序列中的位置
        item: usize,
        /// 非有限的数值
        value: f64,
    },
    /// 数据超出范围
    OutOfRange {
        /// 字段名称
        field: &'static str,
        /// 序列中的位置
        item: usize,
        /// 实际值
        value: f64,
        /// 下界
        min: f64,
        /// 上界
        max: f64,
    },
    /// 重复标识
    Duplicate {
        /// 字段名称
        field: &'static str,
        /// 重复的值
        value: String,
    },
    /// 一致性错误
    ConsistencyError {
        /// 错误描述
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field, item, value } => {
                write!(f, "第{}项: 字段{}={} (非有限值)", item, field, value)
            }
            Self::OutOfRange {
                field,
                item,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "第{}项: 字段{}={} 超出范围[{}, {}]",
                    item, field, value, min, max
                )
            }
            Self::Duplicate { field, value } => {
                write!(f, "字段{}存在重复值 '{}'", field, value)
            }
            Self::ConsistencyError { message } => {
                write!(f, "一致性错误: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 验证警告类型
#[derive(Debug, Clone)]
pub enum ValidationWarning {
    /// 非正值（计算将退化为 0）
    NonPositive {
        /// 字段名称
        field: &'static str,
        /// 序列中的位置
        item: usize,
        /// 实际值
        value: f64,
    },
    /// 顺序警告
    OrderWarning {
        /// 警告描述
        message: String,
        /// 可选的元素位置
        item: Option<usize>,
    },
    /// 自定义警告
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, item, value } => {
                write!(f, "第{}项: 字段{}={} 非正，相关计算结果为 0", item, field, value)
            }
            Self::OrderWarning { message, item } => {
                if let Some(i) = item {
                    write!(f, "第{}项: 顺序警告: {}", i, message)
                } else {
                    write!(f, "顺序警告: {}", message)
                }
            }
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}

// ============================================================================
// 验证辅助函数
// ============================================================================

/// 检查值是否有限
pub fn check_finite(
    report: &mut ValidationReport,
    field: &'static str,
    item: usize,
    value: f64,
) -> bool {
    if !value.is_finite() {
        report.add_error(ValidationError::NonFinite { field, item, value });
        false
    } else {
        true
    }
}

/// 检查值是否在范围内（非有限值按 [`ValidationError::NonFinite`] 报告）
pub fn check_range(
    report: &mut ValidationReport,
    field: &'static str,
    item: usize,
    value: f64,
    min: f64,
    max: f64,
) -> bool {
    if !check_finite(report, field, item, value) {
        return false;
    }
    if value < min || value > max {
        report.add_error(ValidationError::OutOfRange {
            field,
            item,
            value,
            min,
            max,
        });
        false
    } else {
        true
    }
}

/// 检查值是否为正，否则添加警告
pub fn warn_non_positive(
    report: &mut ValidationReport,
    field: &'static str,
    item: usize,
    value: f64,
) -> bool {
    if value <= 0.0 {
        report.add_warning(ValidationWarning::NonPositive { field, item, value });
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.is_valid_strict());
    }

    #[test]
    fn test_range_and_finite_checks() {
        let mut report = ValidationReport::new();
        assert!(check_range(&mut report, "ratio", 0, 0.5, 0.0, 1.0));
        assert!(!check_range(&mut report, "ratio", 1, -0.1, 0.0, 1.0));
        assert!(!check_finite(&mut report, "station", 2, f64::NAN));
        assert_eq!(report.error_count(), 2);
    }

    #[test]
    fn test_range_rejects_nan() {
        let mut report = ValidationReport::new();
        assert!(!check_range(&mut report, "interception_ratio", 0, f64::NAN, 0.0, 1.0));
        assert!(matches!(
            report.errors[0],
            ValidationError::NonFinite { field: "interception_ratio", item: 0, .. }
        ));
    }

    #[test]
    fn test_warnings_fail_strict_only() {
        let mut report = ValidationReport::new();
        warn_non_positive(&mut report, "gutter_grade", 0, 0.0);
        assert!(report.is_valid());
        assert!(!report.is_valid_strict());
    }

    #[test]
    fn test_merge_and_display() {
        let mut a = ValidationReport::new();
        let mut b = ValidationReport::new();
        b.add_error(ValidationError::Duplicate {
            field: "str_id",
            value: "I-1".into(),
        });
        a.merge(b);
        let text = a.to_string();
        assert!(text.contains("I-1"));
        assert!(text.starts_with("1 个错误, 0 个警告"));
        assert!(text.contains("✗ 字段str_id"));
    }
}
