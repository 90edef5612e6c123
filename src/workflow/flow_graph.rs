//! 评分流程图的拓扑
//!
//! ```text
//!            ┌→ evaluate_language ─┐
//! START ─────┼→ evaluate_analysis ─┼→ final_evaluation → END
//!            └→ evaluate_thought  ─┘
//! ```
//!
//! 固定形状：没有条件边，没有环，运行时不增删节点。

use std::fmt::Display;

use crate::models::Rubric;

/// 流程图节点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowNode {
    Start,
    Score(Rubric),
    FinalEvaluation,
    End,
}

impl FlowNode {
    pub fn name(self) -> &'static str {
        match self {
            FlowNode::Start => "__start__",
            FlowNode::Score(rubric) => rubric.node_name(),
            FlowNode::FinalEvaluation => "final_evaluation",
            FlowNode::End => "__end__",
        }
    }
}

impl Display for FlowNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 全部边（按评分维度的固定顺序）
pub fn edges() -> Vec<(FlowNode, FlowNode)> {
    let mut edges = Vec::with_capacity(Rubric::ALL.len() * 2 + 1);
    for rubric in Rubric::ALL {
        edges.push((FlowNode::Start, FlowNode::Score(rubric)));
    }
    for rubric in Rubric::ALL {
        edges.push((FlowNode::Score(rubric), FlowNode::FinalEvaluation));
    }
    edges.push((FlowNode::FinalEvaluation, FlowNode::End));
    edges
}

/// 某个节点的下游节点
pub fn successors(node: FlowNode) -> Vec<FlowNode> {
    edges()
        .into_iter()
        .filter(|(from, _)| *from == node)
        .map(|(_, to)| to)
        .collect()
}

/// 从 START 扇出的评分维度
pub fn scoring_rubrics() -> Vec<Rubric> {
    successors(FlowNode::Start)
        .into_iter()
        .filter_map(|node| match node {
            FlowNode::Score(rubric) => Some(rubric),
            _ => None,
        })
        .collect()
}

/// 某个节点的上游节点
pub fn predecessors(node: FlowNode) -> Vec<FlowNode> {
    edges()
        .into_iter()
        .filter(|(_, to)| *to == node)
        .map(|(from, _)| from)
        .collect()
}
