pub mod essay_model;
pub mod llm_service;
pub mod scoring_service;
pub mod summary_service;

pub use essay_model::EssayModel;
pub use llm_service::LlmService;
pub use scoring_service::ScoringService;
pub use summary_service::{Summary, SummaryService};
