//! 结构化评分结果
//!
//! LLM 在结构化模式下必须返回 `{ "feedback": string, "score": number }`，
//! 其中 score 在 [0, 10] 之间。

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// 分数下限
pub const MIN_SCORE: f64 = 0.0;
/// 分数上限
pub const MAX_SCORE: f64 = 10.0;

/// 单个维度的评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RubricEvaluation {
    /// Detailed feedback for the essay
    pub feedback: String,
    /// Score out of 10
    #[schemars(range(min = 0, max = 10))]
    pub score: f64,
}

impl RubricEvaluation {
    pub fn new(feedback: impl Into<String>, score: f64) -> Self {
        Self {
            feedback: feedback.into(),
            score,
        }
    }

    /// 输出格式的 JSON Schema（发送给模型）
    pub fn schema_json() -> String {
        let schema = schemars::schema_for!(RubricEvaluation);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }

    /// 解析 LLM 的结构化响应
    ///
    /// 取响应中第一个能解析为评分结果的 JSON 对象，对象前后的文字（包括 Markdown 代码块标记）忽略。
    pub fn parse(response: &str) -> Result<Self, LlmError> {
        let mut last_error = "响应中没有 JSON 对象".to_string();

        for (start, _) in response.match_indices('{') {
            let mut stream =
                serde_json::Deserializer::from_str(&response[start..]).into_iter::<RubricEvaluation>();
            match stream.next() {
                Some(Ok(parsed)) => return parsed.validate(),
                Some(Err(e)) => last_error = e.to_string(),
                None => {}
            }
        }

        Err(LlmError::InvalidStructuredOutput {
            response: response.to_string(),
            reason: last_error,
        })
    }

    /// 校验分数范围和反馈内容
    pub fn validate(self) -> Result<Self, LlmError> {
        if !self.score.is_finite() || self.score < MIN_SCORE || self.score > MAX_SCORE {
            return Err(LlmError::ScoreOutOfRange { score: self.score });
        }
        if self.feedback.trim().is_empty() {
            return Err(LlmError::InvalidStructuredOutput {
                response: String::new(),
                reason: "feedback 为空".to_string(),
            });
        }
        Ok(self)
    }
}
