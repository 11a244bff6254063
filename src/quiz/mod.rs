//! Question progression and answer checking.

mod distractors;
mod session;

pub use distractors::{choice_set, distractors};
pub use session::{
    parse_answer, AnswerInput, AnswerStatus, GameMode, Progress, QuizSession, SessionError,
    SessionSummary, MAX_INPUT_LENGTH, NUM_CHOICES,
};
