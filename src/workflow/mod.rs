pub mod essay_flow;
pub mod flow_graph;

pub use essay_flow::EssayFlow;
pub use flow_graph::FlowNode;
