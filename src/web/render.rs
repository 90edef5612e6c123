//! 页面渲染
//!
//! 使用 minijinja 渲染 `templates/index.html`，模板名以 `.html` 结尾，默认开启 HTML 转义。

use minijinja::Environment;
use serde::Serialize;

use crate::models::{EvaluationState, Rubric};

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// 单个维度的展示行
#[derive(Debug, Serialize)]
pub struct RubricRow<'a> {
    pub label: &'a str,
    pub feedback: &'a str,
    pub score: f64,
}

/// 评分结果的展示数据
#[derive(Debug, Serialize)]
pub struct ResultView<'a> {
    pub rubrics: Vec<RubricRow<'a>>,
    pub overall_feedback: &'a str,
    pub avg_score: f64,
    pub avg_display: String,
}

impl<'a> ResultView<'a> {
    pub fn from_state(state: &'a EvaluationState) -> Self {
        // 分数按维度的固定顺序追加
        let rubrics = Rubric::ALL
            .iter()
            .zip(state.individual_scores.iter())
            .map(|(rubric, score)| RubricRow {
                label: rubric.label(),
                feedback: state.feedback(*rubric).unwrap_or_default(),
                score: *score,
            })
            .collect();

        let avg_score = state.avg_score.unwrap_or_default();
        Self {
            rubrics,
            overall_feedback: state.overall_feedback.as_deref().unwrap_or_default(),
            avg_score,
            avg_display: format!("{:.2}", avg_score),
        }
    }
}

/// 首页模板的上下文
#[derive(Debug, Default, Serialize)]
pub struct IndexView<'a> {
    pub essay: Option<&'a str>,
    pub result: Option<ResultView<'a>>,
    pub error: Option<String>,
}

impl<'a> IndexView<'a> {
    /// 空表单
    pub fn empty() -> Self {
        Self::default()
    }

    /// 错误页（不带结果）
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// 结果页
    pub fn with_result(essay: &'a str, state: &'a EvaluationState) -> Self {
        Self {
            essay: Some(essay),
            result: Some(ResultView::from_state(state)),
            error: None,
        }
    }
}

/// 页面渲染器，启动时创建一次
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, view: &IndexView<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX_TEMPLATE_NAME)?.render(view)
    }
}
