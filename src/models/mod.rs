mod media;
mod question;

pub use media::{MediaItem, MediaKind};
pub use question::{
    generate_questions, Question, QuestionOrder, MAX_MULTIPLIER, QUESTIONS_PER_SESSION,
};
