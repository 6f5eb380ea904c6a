pub mod quiz_flow;
pub mod session;

pub use quiz_flow::{AgeOutcome, QuizFlow};
pub use session::{Screen, SessionState, TOTAL_STEPS};
