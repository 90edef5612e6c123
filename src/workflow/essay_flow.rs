//! 作文评分流程 - 流程层
//!
//! 核心职责：定义"一篇作文"的完整评分流程
//!
//! 流程顺序：
//! 1. 三个维度评分（互相独立，可并发）
//! 2. 等待三个评分全部完成后合并到状态
//! 3. 汇总：生成总评 + 计算平均分
//!
//! 任一节点失败，整个流程失败，不返回部分结果。

use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, EvaluationError, LlmError};
use crate::models::{EvaluationState, Rubric, RubricEvaluation};
use crate::services::{EssayModel, ScoringService, SummaryService};
use crate::utils::truncate_text;
use crate::workflow::flow_graph::{self, FlowNode};

/// 作文评分流程
///
/// - 启动时创建一次，所有请求共享
/// - 不持有任何请求级状态
/// - 只依赖业务能力（services）
pub struct EssayFlow {
    scoring: ScoringService,
    summary: SummaryService,
    parallel_scoring: bool,
}

impl EssayFlow {
    /// 创建新的评分流程
    pub fn new(model: Arc<dyn EssayModel>, config: &Config) -> Self {
        Self::with_model(model, config.parallel_scoring)
    }

    pub fn with_model(model: Arc<dyn EssayModel>, parallel_scoring: bool) -> Self {
        Self {
            scoring: ScoringService::new(model.clone()),
            summary: SummaryService::new(model),
            parallel_scoring,
        }
    }

    /// 流程图的全部边
    pub fn edges() -> Vec<(FlowNode, FlowNode)> {
        flow_graph::edges()
    }

    /// 运行完整流程，返回填充完毕的状态
    pub async fn run(&self, essay: &str) -> AppResult<EvaluationState> {
        let started = Instant::now();
        let mut state = EvaluationState::new(essay);

        info!(
            "📝 开始评分 ({}): {}",
            FlowNode::Start,
            truncate_text(&state.essay, 60)
        );

        // ========== 评分节点 ==========
        let outcomes = self.score_all(&state.essay).await.map_err(|e| {
            warn!("⚠️ 评分节点失败: {}", e);
            e
        })?;

        // ========== 汇合：三个评分全部完成后再合并 ==========
        for (rubric, evaluation) in outcomes {
            state.apply_rubric(rubric, evaluation)?;
        }
        debug!("分数已收集: {:?}", state.individual_scores);
        ensure_upstream_done(&state)?;

        // ========== 汇总节点 ==========
        info!("[{}] 🧮 生成总评...", FlowNode::FinalEvaluation);
        let summary = self.summary.summarize(&state).await?;
        state.apply_summary(summary.overall_feedback, summary.avg_score)?;

        info!(
            "✅ 评分完成 ({}): 平均分 {:.2}，耗时 {:.1}s",
            FlowNode::End,
            summary.avg_score,
            started.elapsed().as_secs_f64()
        );

        Ok(state)
    }

    /// 运行 START 扇出的全部评分节点
    ///
    /// 并发模式下第一个失败会立即返回
    async fn score_all(&self, essay: &str) -> Result<Vec<(Rubric, RubricEvaluation)>, LlmError> {
        let rubrics = flow_graph::scoring_rubrics();
        if self.parallel_scoring {
            try_join_all(rubrics.iter().map(|&rubric| self.score_node(rubric, essay))).await
        } else {
            let mut outcomes = Vec::with_capacity(rubrics.len());
            for rubric in rubrics {
                outcomes.push(self.score_node(rubric, essay).await?);
            }
            Ok(outcomes)
        }
    }

    async fn score_node(
        &self,
        rubric: Rubric,
        essay: &str,
    ) -> Result<(Rubric, RubricEvaluation), LlmError> {
        let node = FlowNode::Score(rubric);
        info!("[{}] 🔍 正在评估 {}...", node, rubric);

        let evaluation = self.scoring.evaluate(rubric, essay).await?;

        info!("[{}] ✓ 得分 {}", node, evaluation.score);
        Ok((rubric, evaluation))
    }
}

/// 汇合检查：汇总节点的每个上游评分节点都已写入状态
fn ensure_upstream_done(state: &EvaluationState) -> Result<(), EvaluationError> {
    for node in flow_graph::predecessors(FlowNode::FinalEvaluation) {
        if let FlowNode::Score(rubric) = node {
            if state.feedback(rubric).is_none() {
                return Err(EvaluationError::MissingFeedback {
                    rubric: rubric.label().to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 按维度返回固定分数的模型，记录调用顺序
    struct ScriptedModel {
        scores: [f64; 3],
        fail_on: Option<Rubric>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(scores: [f64; 3]) -> Self {
            Self {
                scores,
                fail_on: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, rubric: Rubric) -> Self {
            self.fail_on = Some(rubric);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EssayModel for ScriptedModel {
        async fn structured(&self, prompt: &str) -> Result<RubricEvaluation, LlmError> {
            let (idx, rubric) = Rubric::ALL
                .iter()
                .enumerate()
                .find(|(_, r)| prompt.contains(r.label()))
                .map(|(i, r)| (i, *r))
                .expect("提示词中没有维度名称");
            self.calls.lock().unwrap().push(rubric.node_name().to_string());

            if self.fail_on == Some(rubric) {
                return Err(LlmError::EmptyContent {
                    model: "scripted".to_string(),
                });
            }
            Ok(RubricEvaluation::new(
                format!("{} feedback", rubric.label()),
                self.scores[idx],
            ))
        }

        async fn unstructured(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push("final_evaluation".to_string());
            Ok("overall summary".to_string())
        }
    }

    #[tokio::test]
    async fn test_average_of_seven_eight_six_is_seven() {
        let model = Arc::new(ScriptedModel::new([7.0, 8.0, 6.0]));
        let flow = EssayFlow::with_model(model.clone(), true);

        let state = flow.run("The quick brown fox...").await.unwrap();

        assert_eq!(state.individual_scores.len(), 3);
        assert_eq!(state.avg_score, Some(7.0));
        assert_eq!(state.overall_feedback.as_deref(), Some("overall summary"));
        assert_eq!(
            state.language_feedback.as_deref(),
            Some("language quality feedback")
        );
        assert!(state.is_complete());
    }

    #[tokio::test]
    async fn test_summary_runs_after_all_scoring_nodes() {
        let model = Arc::new(ScriptedModel::new([1.0, 2.0, 3.0]));
        let flow = EssayFlow::with_model(model.clone(), true);

        flow.run("essay").await.unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls.last().map(String::as_str), Some("final_evaluation"));
    }

    #[test]
    fn test_edges_describe_fan_out_fan_in() {
        let edges = EssayFlow::edges();
        for rubric in Rubric::ALL {
            assert!(edges.contains(&(FlowNode::Start, FlowNode::Score(rubric))));
            assert!(edges.contains(&(FlowNode::Score(rubric), FlowNode::FinalEvaluation)));
        }
        assert!(edges.contains(&(FlowNode::FinalEvaluation, FlowNode::End)));
    }

    #[test]
    fn test_join_check_rejects_missing_upstream() {
        let mut state = EvaluationState::new("essay");
        state
            .apply_rubric(Rubric::Language, RubricEvaluation::new("a", 5.0))
            .unwrap();
        state
            .apply_rubric(Rubric::Analysis, RubricEvaluation::new("b", 5.0))
            .unwrap();

        assert_eq!(
            ensure_upstream_done(&state),
            Err(EvaluationError::MissingFeedback {
                rubric: "clarity of thought".to_string()
            })
        );

        state
            .apply_rubric(Rubric::Clarity, RubricEvaluation::new("c", 5.0))
            .unwrap();
        assert_eq!(ensure_upstream_done(&state), Ok(()));
    }

    #[tokio::test]
    async fn test_sequential_mode_keeps_rubric_order() {
        let model = Arc::new(ScriptedModel::new([4.0, 5.0, 9.0]));
        let flow = EssayFlow::with_model(model.clone(), false);

        let state = flow.run("essay").await.unwrap();

        assert_eq!(
            model.calls(),
            vec![
                "evaluate_language",
                "evaluate_analysis",
                "evaluate_thought",
                "final_evaluation"
            ]
        );
        assert_eq!(state.individual_scores, vec![4.0, 5.0, 9.0]);
        assert_eq!(state.avg_score, Some(6.0));
    }

    #[tokio::test]
    async fn test_scoring_failure_skips_summary() {
        let model = Arc::new(ScriptedModel::new([7.0, 8.0, 6.0]).failing_on(Rubric::Analysis));
        let flow = EssayFlow::with_model(model.clone(), false);

        let err = flow.run("essay").await.unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
        assert!(!model.calls().contains(&"final_evaluation".to_string()));
    }

    #[tokio::test]
    async fn test_out_of_range_score_fails_the_flow() {
        let model = Arc::new(ScriptedModel::new([7.0, 10.5, 6.0]));
        let flow = EssayFlow::with_model(model, true);

        let err = flow.run("essay").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Llm(LlmError::ScoreOutOfRange { .. })
        ));
    }
}
