// crates/rh_report/src/advisory.rs

//! 外部咨询接口
//!
//! 将单个雨水口的计算结果交给外部咨询服务，取回一段文字建议。
//! 本模块只定义接口，不附带任何网络实现。咨询结果只用于展示，
//! 提供方只能读取计算值。

use rh_drainage::{Inlet, InletResult};
use serde::Serialize;
use thiserror::Error;

/// 发送给咨询方的数据
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdvisoryPayload {
    /// 总流量 [cfs]
    pub q_total: f64,
    /// 边沟纵坡 [%]
    pub gutter_grade: f64,
    /// 积水宽度 [ft]
    pub flooding_width: f64,
    /// 是否为低点
    pub is_low_point: bool,
}

impl AdvisoryPayload {
    /// 由雨水口及其结果构建
    pub fn from_result(inlet: &Inlet, result: &InletResult) -> Self {
        Self {
            q_total: result.q_total,
            gutter_grade: inlet.gutter_grade,
            flooding_width: result.flooding_width,
            is_low_point: inlet.is_low_point(),
        }
    }
}

/// 咨询错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    /// 未配置咨询凭据
    #[error("咨询服务未配置")]
    MissingConfiguration,

    /// 请求失败
    #[error("咨询请求失败: {0}")]
    Request(String),

    /// 返回内容为空
    #[error("咨询服务返回为空")]
    EmptyResponse,
}

/// 咨询提供方
pub trait AdvisoryProvider {
    /// 返回文字建议
    fn advise(&self, payload: &AdvisoryPayload) -> Result<String, AdvisoryError>;
}

/// 咨询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryOutcome {
    /// 取得建议
    Advice(String),
    /// 失败，附带可展示给用户的说明
    Unavailable {
        /// 失败原因
        error: AdvisoryError,
        /// 展示文字
        message: String,
    },
}

impl AdvisoryOutcome {
    /// 展示给用户的文字
    pub fn text(&self) -> &str {
        match self {
            Self::Advice(text) => text,
            Self::Unavailable { message, .. } => message,
        }
    }

    /// 是否取得建议
    pub fn is_advice(&self) -> bool {
        matches!(self, Self::Advice(_))
    }
}

/// 请求咨询，任何失败都转为可展示的说明文字
pub fn request_advisory(provider: &dyn AdvisoryProvider, payload: &AdvisoryPayload) -> AdvisoryOutcome {
    let result = provider.advise(payload).and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Err(AdvisoryError::EmptyResponse)
        } else {
            Ok(trimmed.to_string())
        }
    });

    match result {
        Ok(text) => AdvisoryOutcome::Advice(text),
        Err(error) => {
            log::warn!("咨询失败: {}", error);
            AdvisoryOutcome::Unavailable {
                message: format!("暂无建议（{}）", error),
                error,
            }
        }
    }
}

/// 未配置时使用的提供方，总是返回 [`AdvisoryError::MissingConfiguration`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredProvider;

impl AdvisoryProvider for UnconfiguredProvider {
    fn advise(&self, _payload: &AdvisoryPayload) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::MissingConfiguration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rh_drainage::InletMode;

    struct Canned(Result<String, AdvisoryError>);

    impl AdvisoryProvider for Canned {
        fn advise(&self, _payload: &AdvisoryPayload) -> Result<String, AdvisoryError> {
            self.0.clone()
        }
    }

    fn payload() -> AdvisoryPayload {
        let inlet = Inlet::new("1")
            .with_gutter_grade(0.8)
            .with_mode(InletMode::low_point(1.0, 9.0));
        let result = InletResult {
            q_total: 2.5,
            flooding_width: 9.0,
            ..InletResult::default()
        };
        AdvisoryPayload::from_result(&inlet, &result)
    }

    #[test]
    fn test_payload_fields() {
        let p = payload();
        assert_eq!(p.q_total, 2.5);
        assert_eq!(p.gutter_grade, 0.8);
        assert_eq!(p.flooding_width, 9.0);
        assert!(p.is_low_point);
    }

    #[test]
    fn test_advice_trimmed() {
        let out = request_advisory(&Canned(Ok("  加大格栅  \n".into())), &payload());
        assert!(out.is_advice());
        assert_eq!(out.text(), "加大格栅");
    }

    #[test]
    fn test_blank_response_is_empty_error() {
        let out = request_advisory(&Canned(Ok("   ".into())), &payload());
        assert!(matches!(
            out,
            AdvisoryOutcome::Unavailable { error: AdvisoryError::EmptyResponse, .. }
        ));
    }

    #[test]
    fn test_failures_become_text() {
        let out = request_advisory(&UnconfiguredProvider, &payload());
        assert!(!out.is_advice());
        assert!(out.text().contains("未配置"));

        let out = request_advisory(&Canned(Err(AdvisoryError::Request("timeout".into()))), &payload());
        assert!(out.text().contains("timeout"));
    }
}
