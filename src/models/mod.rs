pub mod evaluation;
pub mod rubric;
pub mod state;

pub use evaluation::{RubricEvaluation, MAX_SCORE, MIN_SCORE};
pub use rubric::Rubric;
pub use state::{EvaluationState, EXPECTED_SCORES};
