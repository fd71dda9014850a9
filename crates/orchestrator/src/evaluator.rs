//! 成功率评估
//!
//! 把一次导入的成功率 (0..=100) 映射为任务终态。

use contracts::{TaskState, TaskUpdate};

/// 失败信息前缀
pub const SUCCESS_RATE_MESSAGE_PREFIX: &str = "batch ingestion successful rate is ";

/// 评估结果
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// 终态
    pub state: TaskState,
    /// 失败信息，仅在 FAILED 时存在
    pub error: Option<String>,
}

impl Evaluation {
    /// 转为任务记录更新
    pub fn to_update(&self) -> TaskUpdate {
        TaskUpdate {
            state: Some(self.state),
            error: self.error.clone(),
        }
    }
}

/// 将成功率映射为终态
///
/// - `100` → COMPLETED，无信息
/// - `0` → FAILED，`"batch ingestion successful rate is 0"`
/// - 其他 → FAILED，保留一位小数
///
/// 非有限值按 0 处理，超出区间的值被截断到 `[0, 100]`。
pub fn evaluate(rate: f64) -> Evaluation {
    let rate = normalize(rate);
    if rate == 100.0 {
        return Evaluation {
            state: TaskState::Completed,
            error: None,
        };
    }

    Evaluation {
        state: TaskState::Failed,
        error: Some(format!("{SUCCESS_RATE_MESSAGE_PREFIX}{}", format_rate(rate))),
    }
}

/// 截断到 `[0, 100]`，非有限值为 0
pub fn normalize(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

// 0 is rendered bare, everything else with one decimal
fn format_rate(rate: f64) -> String {
    if rate == 0.0 {
        "0".to_string()
    } else {
        format!("{rate:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_success() {
        let evaluation = evaluate(100.0);
        assert_eq!(evaluation.state, TaskState::Completed);
        assert_eq!(evaluation.error, None);
        assert_eq!(evaluation.to_update(), TaskUpdate::completed());
    }

    #[test]
    fn test_partial_success() {
        let evaluation = evaluate(50.0);
        assert_eq!(evaluation.state, TaskState::Failed);
        assert_eq!(
            evaluation.error.as_deref(),
            Some("batch ingestion successful rate is 50.0")
        );
    }

    #[test]
    fn test_zero_success() {
        let evaluation = evaluate(0.0);
        assert_eq!(evaluation.state, TaskState::Failed);
        assert_eq!(
            evaluation.error.as_deref(),
            Some("batch ingestion successful rate is 0")
        );
    }

    #[test]
    fn test_one_decimal() {
        assert_eq!(
            evaluate(100.0 / 3.0).error.as_deref(),
            Some("batch ingestion successful rate is 33.3")
        );
    }

    #[test]
    fn test_near_full_is_still_failed() {
        let evaluation = evaluate(99.96);
        assert_eq!(evaluation.state, TaskState::Failed);
        assert_eq!(
            evaluation.error.as_deref(),
            Some("batch ingestion successful rate is 100.0")
        );
    }

    #[test]
    fn test_non_finite_is_zero() {
        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                evaluate(rate).error.as_deref(),
                Some("batch ingestion successful rate is 0")
            );
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(evaluate(120.0).state, TaskState::Completed);
        assert_eq!(
            evaluate(-5.0).error.as_deref(),
            Some("batch ingestion successful rate is 0")
        );
    }
}
