// crates/rh_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 计算公式本身从不返回错误（非法输入返回哨兵值 0），
//! 这里的错误只表示调用方违反契约：未知的降雨分区、
//! 乱序的变坡点桩号、结果与输入长度不一致等。

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type RhResult<T> = Result<T, RhError>;

/// RoadHydro 错误类型
#[derive(Error, Debug)]
pub enum RhError {
    /// 未知的降雨分区/重现期组合
    #[error("无效的降雨选择: 分区={region}, 重现期={return_period}")]
    InvalidSelection {
        /// 分区名称
        region: String,
        /// 重现期名称
        return_period: String,
    },

    /// 变坡点桩号递减
    #[error("变坡点桩号递减: 第{index}个变坡点桩号 {station} 小于前一个 {previous}")]
    NonMonotonicStations {
        /// 出错的变坡点索引
        index: usize,
        /// 出错的桩号
        station: f64,
        /// 前一个变坡点桩号
        previous: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// IO 错误
    #[error("IO错误: {path}")]
    Io {
        /// 相关文件路径
        path: PathBuf,
        #[source]
        /// 底层 IO 错误
        source: std::io::Error,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RhError {
    /// 无效的降雨选择
    pub fn invalid_selection(region: impl Into<String>, return_period: impl Into<String>) -> Self {
        Self::InvalidSelection {
            region: region.into(),
            return_period: return_period.into(),
        }
    }

    /// 桩号递减
    pub fn non_monotonic(index: usize, station: f64, previous: f64) -> Self {
        Self::NonMonotonicStations {
            index,
            station,
            previous,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// IO 错误（带源）
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 是否为调用方契约违反（而非环境错误）
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelection { .. }
                | Self::NonMonotonicStations { .. }
                | Self::SizeMismatch { .. }
                | Self::IndexOutOfBounds { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_selection_display() {
        let err = RhError::invalid_selection("Region 9", "7-Year");
        let msg = err.to_string();
        assert!(msg.contains("Region 9"));
        assert!(msg.contains("7-Year"));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_non_monotonic_display() {
        let err = RhError::non_monotonic(2, 90.0, 120.0);
        assert!(err.to_string().contains("90"));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_io_is_not_contract_violation() {
        let err = RhError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!err.is_contract_violation());
        assert!(std::error::Error::source(&err).is_some());
    }
}
