//! Quiz session state.
//!
//! A session owns its twelve questions, borrows the prefetched rewards and
//! walks through them one at a time. Each question starts in
//! [`AnswerStatus::Awaiting`]; a correct submission moves to
//! [`AnswerStatus::Correct`] and unlocks [`QuizSession::advance`], a wrong one
//! moves to [`AnswerStatus::Wrong`] and can be retried.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{
    generate_questions, MediaItem, Question, QuestionOrder, QUESTIONS_PER_SESSION,
};

use super::distractors::choice_set;

/// Longest typed answer accepted.
pub const MAX_INPUT_LENGTH: usize = 6;

/// Number of answer buttons in multiple-choice mode.
pub const NUM_CHOICES: usize = 3;

/// How the player answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    MultipleChoice,
    Typed,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::MultipleChoice, GameMode::Typed];

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::MultipleChoice => "Pick an answer",
            GameMode::Typed => "Type the answer",
        }
    }
}

/// Result of the latest submission for the current question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerStatus {
    #[default]
    Awaiting,
    Wrong,
    Correct,
}

/// Mode-dependent pending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerInput {
    MultipleChoice {
        choices: [u32; NUM_CHOICES],
        selected: usize,
    },
    Typed {
        buffer: String,
    },
}

/// Outcome of [`QuizSession::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Current question is not answered correctly yet, or the session is over.
    NotReady,
    /// Moved on to the next question.
    Next,
    /// The last question was answered. Returned once per session.
    Finished(SessionSummary),
}

/// What a finished session reports back to the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub number: u32,
    pub order: QuestionOrder,
    pub mode: GameMode,
    pub wrong_attempts: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Rewards must line up one-to-one with questions.
    MediaCount { expected: usize, actual: usize },
    /// The number's products do not fit in a `u32`.
    NumberTooLarge(u32),
    /// Restored state that a running session could never be in.
    Inconsistent(&'static str),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MediaCount { expected, actual } => write!(
                f,
                "expected {} rewards for the session, got {}",
                expected, actual
            ),
            SessionError::NumberTooLarge(number) => {
                write!(f, "{} is too large to practise", number)
            }
            SessionError::Inconsistent(reason) => write!(f, "invalid session state: {}", reason),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SessionState")]
pub struct QuizSession {
    number: u32,
    order: QuestionOrder,
    mode: GameMode,
    questions: Vec<Question>,
    media: Arc<[MediaItem]>,
    current: usize,
    status: AnswerStatus,
    input: AnswerInput,
    wrong_attempts: usize,
    completed: bool,
}

impl QuizSession {
    pub fn new<R: Rng + ?Sized>(
        number: u32,
        order: QuestionOrder,
        mode: GameMode,
        media: Arc<[MediaItem]>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        check_media_count(&media)?;

        let questions =
            generate_questions(number).ok_or(SessionError::NumberTooLarge(number))?;
        let questions = order.arrange(questions, rng);
        let input = fresh_input(mode, questions[0].product, rng);

        Ok(Self {
            number,
            order,
            mode,
            questions,
            media,
            current: 0,
            status: AnswerStatus::Awaiting,
            input,
            wrong_attempts: 0,
            completed: false,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn order(&self) -> QuestionOrder {
        self.order
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn status(&self) -> AnswerStatus {
        self.status
    }

    pub fn input(&self) -> &AnswerInput {
        &self.input
    }

    pub fn wrong_attempts(&self) -> usize {
        self.wrong_attempts
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The reward for the current question, once it has been earned.
    pub fn revealed_media(&self) -> Option<&MediaItem> {
        if self.status == AnswerStatus::Correct {
            self.media.get(self.current)
        } else {
            None
        }
    }

    /// Checks `answer` against the current question. Ignored once correct.
    pub fn submit(&mut self, answer: Option<u32>) -> AnswerStatus {
        if self.status == AnswerStatus::Correct || self.completed {
            return self.status;
        }

        let question = *self.current_question();
        self.status = match answer {
            Some(value) if question.is_correct(value) => AnswerStatus::Correct,
            _ => {
                self.wrong_attempts += 1;
                AnswerStatus::Wrong
            }
        };

        log::debug!(
            "{} {:?} -> {:?}",
            self.current_question().display(),
            answer,
            self.status
        );
        self.status
    }

    /// Submits whatever the pending input holds.
    pub fn submit_input(&mut self) -> AnswerStatus {
        let answer = match &self.input {
            AnswerInput::MultipleChoice { choices, selected } => Some(choices[*selected]),
            AnswerInput::Typed { buffer } => parse_answer(buffer),
        };
        self.submit(answer)
    }

    /// Moves to the next question, or finishes the session after the last one.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Progress {
        if self.completed || self.status != AnswerStatus::Correct {
            return Progress::NotReady;
        }

        if self.is_last_question() {
            self.completed = true;
            return Progress::Finished(SessionSummary {
                number: self.number,
                order: self.order,
                mode: self.mode,
                wrong_attempts: self.wrong_attempts,
            });
        }

        self.current += 1;
        self.status = AnswerStatus::Awaiting;
        self.input = fresh_input(self.mode, self.current_question().product, rng);
        Progress::Next
    }

    pub fn select_next_choice(&mut self) {
        if let AnswerInput::MultipleChoice { selected, .. } = &mut self.input {
            *selected = (*selected + 1) % NUM_CHOICES;
        }
    }

    pub fn select_previous_choice(&mut self) {
        if let AnswerInput::MultipleChoice { selected, .. } = &mut self.input {
            *selected = (*selected + NUM_CHOICES - 1) % NUM_CHOICES;
        }
    }

    /// Selects the choice at `index` and submits it.
    pub fn pick_choice(&mut self, index: usize) -> Option<AnswerStatus> {
        match &mut self.input {
            AnswerInput::MultipleChoice { selected, .. } if index < NUM_CHOICES => {
                *selected = index;
            }
            _ => return None,
        }
        Some(self.submit_input())
    }

    pub fn input_push(&mut self, c: char) {
        if self.status == AnswerStatus::Correct {
            return;
        }
        if let AnswerInput::Typed { buffer } = &mut self.input {
            if buffer.chars().count() < MAX_INPUT_LENGTH && !c.is_control() {
                buffer.push(c);
            }
        }
    }

    pub fn input_pop(&mut self) {
        if let AnswerInput::Typed { buffer } = &mut self.input {
            buffer.pop();
        }
    }
}

/// Serialized form of [`QuizSession`], checked before it becomes one.
#[derive(Deserialize)]
struct SessionState {
    number: u32,
    order: QuestionOrder,
    mode: GameMode,
    questions: Vec<Question>,
    media: Arc<[MediaItem]>,
    current: usize,
    status: AnswerStatus,
    input: AnswerInput,
    wrong_attempts: usize,
    completed: bool,
}

impl TryFrom<SessionState> for QuizSession {
    type Error = SessionError;

    fn try_from(state: SessionState) -> Result<Self, Self::Error> {
        check_media_count(&state.media)?;

        let expected =
            generate_questions(state.number).ok_or(SessionError::NumberTooLarge(state.number))?;
        let mut sorted = state.questions.clone();
        sorted.sort_by_key(|q| q.multiplier);
        if sorted != expected {
            return Err(SessionError::Inconsistent("questions do not match the number"));
        }

        if state.current >= state.questions.len() {
            return Err(SessionError::Inconsistent("current question out of range"));
        }

        match (&state.input, state.mode) {
            (AnswerInput::MultipleChoice { selected, .. }, GameMode::MultipleChoice)
                if *selected < NUM_CHOICES => {}
            (AnswerInput::Typed { .. }, GameMode::Typed) => {}
            _ => return Err(SessionError::Inconsistent("input does not fit the game mode")),
        }

        Ok(Self {
            number: state.number,
            order: state.order,
            mode: state.mode,
            questions: state.questions,
            media: state.media,
            current: state.current,
            status: state.status,
            input: state.input,
            wrong_attempts: state.wrong_attempts,
            completed: state.completed,
        })
    }
}

fn check_media_count(media: &[MediaItem]) -> Result<(), SessionError> {
    if media.len() != QUESTIONS_PER_SESSION {
        return Err(SessionError::MediaCount {
            expected: QUESTIONS_PER_SESSION,
            actual: media.len(),
        });
    }
    Ok(())
}

/// Typed answers that are not a plain number never match.
pub fn parse_answer(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

fn fresh_input<R: Rng + ?Sized>(mode: GameMode, product: u32, rng: &mut R) -> AnswerInput {
    match mode {
        GameMode::MultipleChoice => AnswerInput::MultipleChoice {
            choices: choice_set(product, rng),
            selected: 0,
        },
        GameMode::Typed => AnswerInput::Typed {
            buffer: String::new(),
        },
    }
}
