//! 模型能力抽象
//!
//! 流程层只依赖这个 trait，不关心背后是哪家 LLM。

use async_trait::async_trait;

use crate::error::LlmError;
use crate::models::RubricEvaluation;

/// 评分模型能力
#[async_trait]
pub trait EssayModel: Send + Sync {
    /// 结构化调用：返回 feedback + score
    async fn structured(&self, prompt: &str) -> Result<RubricEvaluation, LlmError>;

    /// 非结构化调用：返回纯文本
    async fn unstructured(&self, prompt: &str) -> Result<String, LlmError>;
}
