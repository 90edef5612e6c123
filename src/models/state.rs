//! 评分状态
//!
//! 每次提交创建一个新的 `EvaluationState`，在流程中依次填充，渲染后丢弃。
//! 三个评分节点各自写入互不重叠的字段，汇总节点最后写入总评和平均分。

use serde::Serialize;

use crate::error::EvaluationError;
use crate::models::{Rubric, RubricEvaluation};

/// 需要收集的分数个数
pub const EXPECTED_SCORES: usize = Rubric::ALL.len();

/// 一次评分流程的共享状态
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationState {
    /// 作文原文，开始后只读
    pub essay: String,
    pub language_feedback: Option<String>,
    pub analysis_feedback: Option<String>,
    pub clarity_feedback: Option<String>,
    /// 各维度分数，只追加
    pub individual_scores: Vec<f64>,
    pub overall_feedback: Option<String>,
    pub avg_score: Option<f64>,
}

impl EvaluationState {
    pub fn new(essay: impl Into<String>) -> Self {
        Self {
            essay: essay.into(),
            ..Default::default()
        }
    }

    /// 某个维度的反馈
    pub fn feedback(&self, rubric: Rubric) -> Option<&str> {
        self.feedback_slot(rubric).as_deref()
    }

    fn feedback_slot(&self, rubric: Rubric) -> &Option<String> {
        match rubric {
            Rubric::Language => &self.language_feedback,
            Rubric::Analysis => &self.analysis_feedback,
            Rubric::Clarity => &self.clarity_feedback,
        }
    }

    fn feedback_slot_mut(&mut self, rubric: Rubric) -> &mut Option<String> {
        match rubric {
            Rubric::Language => &mut self.language_feedback,
            Rubric::Analysis => &mut self.analysis_feedback,
            Rubric::Clarity => &mut self.clarity_feedback,
        }
    }

    /// 合并一个评分节点的输出：写入反馈字段并追加分数
    pub fn apply_rubric(
        &mut self,
        rubric: Rubric,
        evaluation: RubricEvaluation,
    ) -> Result<(), EvaluationError> {
        if self.feedback_slot(rubric).is_some() {
            return Err(EvaluationError::DuplicateWrite {
                field: format!("{}_feedback", rubric_field(rubric)),
            });
        }
        if self.individual_scores.len() >= EXPECTED_SCORES {
            return Err(EvaluationError::DuplicateWrite {
                field: "individual_scores".to_string(),
            });
        }

        *self.feedback_slot_mut(rubric) = Some(evaluation.feedback);
        self.individual_scores.push(evaluation.score);
        Ok(())
    }

    /// 写入汇总结果
    pub fn apply_summary(
        &mut self,
        overall_feedback: String,
        avg_score: f64,
    ) -> Result<(), EvaluationError> {
        if self.overall_feedback.is_some() || self.avg_score.is_some() {
            return Err(EvaluationError::DuplicateWrite {
                field: "overall_feedback".to_string(),
            });
        }
        self.overall_feedback = Some(overall_feedback);
        self.avg_score = Some(avg_score);
        Ok(())
    }

    /// 检查汇总前置条件：三个分数、三条反馈都已就绪
    pub fn ensure_scored(&self) -> Result<(), EvaluationError> {
        if self.individual_scores.len() != EXPECTED_SCORES {
            return Err(EvaluationError::MissingScores {
                expected: EXPECTED_SCORES,
                actual: self.individual_scores.len(),
            });
        }
        for rubric in Rubric::ALL {
            match self.feedback(rubric) {
                Some(text) if !text.trim().is_empty() => {}
                _ => {
                    return Err(EvaluationError::MissingFeedback {
                        rubric: rubric.label().to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// 三个分数的算术平均
    pub fn mean_score(&self) -> Result<f64, EvaluationError> {
        if self.individual_scores.len() != EXPECTED_SCORES {
            return Err(EvaluationError::MissingScores {
                expected: EXPECTED_SCORES,
                actual: self.individual_scores.len(),
            });
        }
        let sum: f64 = self.individual_scores.iter().sum();
        Ok(sum / self.individual_scores.len() as f64)
    }

    /// 流程是否已全部完成
    pub fn is_complete(&self) -> bool {
        self.ensure_scored().is_ok() && self.overall_feedback.is_some() && self.avg_score.is_some()
    }
}

fn rubric_field(rubric: Rubric) -> &'static str {
    match rubric {
        Rubric::Language => "language",
        Rubric::Analysis => "analysis",
        Rubric::Clarity => "clarity",
    }
}
