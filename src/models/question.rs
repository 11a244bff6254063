use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of questions in one session, one per multiplier.
pub const QUESTIONS_PER_SESSION: usize = 12;

/// Largest multiplier asked about.
pub const MAX_MULTIPLIER: u32 = 12;

/// A single `multiplicand × multiplier` question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub multiplicand: u32,
    pub multiplier: u32,
    pub product: u32,
}

impl Question {
    /// `None` when the product does not fit in a `u32`.
    pub fn new(multiplicand: u32, multiplier: u32) -> Option<Self> {
        Some(Self {
            multiplicand,
            multiplier,
            product: multiplicand.checked_mul(multiplier)?,
        })
    }

    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.product
    }

    pub fn display(&self) -> String {
        format!("{} × {} =", self.multiplicand, self.multiplier)
    }
}

/// Generates the twelve questions for `number`, multipliers ascending.
///
/// Returns `None` if `number × 12` overflows.
pub fn generate_questions(number: u32) -> Option<Vec<Question>> {
    (1..=MAX_MULTIPLIER)
        .map(|multiplier| Question::new(number, multiplier))
        .collect()
}

/// Order in which a session walks through its questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionOrder {
    #[default]
    Sequential,
    Random,
}

impl QuestionOrder {
    pub const ALL: [QuestionOrder; 2] = [QuestionOrder::Sequential, QuestionOrder::Random];

    pub fn label(&self) -> &'static str {
        match self {
            QuestionOrder::Sequential => "In order",
            QuestionOrder::Random => "Mixed up",
        }
    }

    /// Applies the order once. The returned sequence is what the session keeps.
    pub fn arrange<R: Rng + ?Sized>(&self, mut questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
        if *self == QuestionOrder::Random {
            questions.shuffle(rng);
        }
        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_questions_covers_every_multiplier() {
        for number in 1..=12 {
            let questions = generate_questions(number).expect("questions");
            assert_eq!(questions.len(), QUESTIONS_PER_SESSION);

            for (index, question) in questions.iter().enumerate() {
                assert_eq!(question.multiplicand, number);
                assert_eq!(question.multiplier, index as u32 + 1);
                assert_eq!(question.product, number * question.multiplier);
            }
        }
    }

    #[test]
    fn test_sevens() {
        let questions = generate_questions(7).expect("questions");
        assert_eq!(questions.first().copied(), Question::new(7, 1));
        assert_eq!(questions.last().map(|q| q.product), Some(84));
    }

    #[test]
    fn test_overflowing_number_has_no_questions() {
        assert!(generate_questions(400_000_000).is_none());
        assert!(generate_questions(u32::MAX / 12).is_some());
        assert_eq!(Question::new(u32::MAX, 2), None);
    }

    #[test]
    fn test_random_order_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = generate_questions(9).expect("questions");
        let sequential = QuestionOrder::Sequential.arrange(questions.clone(), &mut rng);
        let random = QuestionOrder::Random.arrange(questions.clone(), &mut rng);

        assert_eq!(sequential, questions);
        assert_eq!(random.len(), sequential.len());

        let mut sorted = random.clone();
        sorted.sort_by_key(|q| q.multiplier);
        assert_eq!(sorted, sequential);
    }
}
