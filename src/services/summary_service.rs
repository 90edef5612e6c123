//! 汇总 - 业务能力层
//!
//! 读取三个维度的反馈生成总评，并计算平均分

use std::sync::Arc;

use tracing::debug;

use crate::error::AppResult;
use crate::models::{EvaluationState, Rubric};
use crate::services::EssayModel;

/// 汇总输出
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub overall_feedback: String,
    pub avg_score: f64,
}

/// 汇总服务
#[derive(Clone)]
pub struct SummaryService {
    model: Arc<dyn EssayModel>,
}

impl SummaryService {
    pub fn new(model: Arc<dyn EssayModel>) -> Self {
        Self { model }
    }

    /// 生成总评
    ///
    /// 前置条件：三个分数和三条反馈都已写入；否则不调用模型，直接报错
    pub async fn summarize(&self, state: &EvaluationState) -> AppResult<Summary> {
        state.ensure_scored()?;

        let prompt = build_summary_prompt(state);
        debug!("总评提示词长度: {} 字符", prompt.len());

        let overall_feedback = self.model.unstructured(&prompt).await?;
        let avg_score = state.mean_score()?;

        Ok(Summary {
            overall_feedback,
            avg_score,
        })
    }
}

/// 构建总评提示词
pub fn build_summary_prompt(state: &EvaluationState) -> String {
    let feedback = |rubric: Rubric| state.feedback(rubric).unwrap_or_default();
    format!(
        "Based on the following feedbacks create a summarized feedback \n language feedback - {} \n depth of analysis feedback - {} \n clarity of thought feedback - {}",
        feedback(Rubric::Language),
        feedback(Rubric::Analysis),
        feedback(Rubric::Clarity)
    )
}
