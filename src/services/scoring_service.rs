//! 单维度评分 - 业务能力层

use std::sync::Arc;

use tracing::debug;

use crate::error::LlmError;
use crate::models::{Rubric, RubricEvaluation};
use crate::services::EssayModel;

/// 按维度给作文打分
///
/// 只负责"构建提示词 → 结构化调用 → 校验"，不写状态
#[derive(Clone)]
pub struct ScoringService {
    model: Arc<dyn EssayModel>,
}

impl ScoringService {
    pub fn new(model: Arc<dyn EssayModel>) -> Self {
        Self { model }
    }

    /// 对一个维度评分
    ///
    /// 模型调用失败或返回不合规结果时直接返回错误，不重试
    pub async fn evaluate(
        &self,
        rubric: Rubric,
        essay: &str,
    ) -> Result<RubricEvaluation, LlmError> {
        let prompt = rubric.prompt(essay);
        debug!("[{}] 提示词长度: {} 字符", rubric.node_name(), prompt.len());

        let evaluation = self.model.structured(&prompt).await?.validate()?;

        debug!("[{}] 得分: {}", rubric.node_name(), evaluation.score);
        Ok(evaluation)
    }
}
