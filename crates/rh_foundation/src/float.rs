// crates/rh_foundation/src/float.rs

//! 浮点数工具
//!
//! 水文公式对非正或非有限输入统一返回 0，
//! 这里集中定义这些判定，避免各处写法不一致。

/// 是否为正的有限值
#[inline]
pub fn is_positive_finite(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// 有限值原样返回，否则返回 0
#[inline]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}
