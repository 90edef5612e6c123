//! 评分维度

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// 作文评分维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rubric {
    /// 语言质量
    Language,
    /// 分析深度
    Analysis,
    /// 思路清晰度
    Clarity,
}

impl Rubric {
    /// 三个维度，按固定顺序排列
    pub const ALL: [Rubric; 3] = [Rubric::Language, Rubric::Analysis, Rubric::Clarity];

    /// 在评分流程图中的节点名
    pub fn node_name(self) -> &'static str {
        match self {
            Rubric::Language => "evaluate_language",
            Rubric::Analysis => "evaluate_analysis",
            Rubric::Clarity => "evaluate_thought",
        }
    }

    /// 用于提示词和页面展示的名称
    pub fn label(self) -> &'static str {
        match self {
            Rubric::Language => "language quality",
            Rubric::Analysis => "depth of analysis",
            Rubric::Clarity => "clarity of thought",
        }
    }

    /// 构建该维度的评分提示词
    pub fn prompt(self, essay: &str) -> String {
        format!(
            "Evaluate the {} of the following essay and provide feedback and assign a score out of 10 \n {}",
            self.label(),
            essay
        )
    }
}

impl Display for Rubric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
