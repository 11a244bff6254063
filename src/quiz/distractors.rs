//! Wrong-but-close answers for multiple-choice questions.

use rand::seq::SliceRandom;
use rand::Rng;

/// How far a distractor may sit from the correct answer.
const MAX_OFFSET: u32 = 3;

/// Draws before giving up on random candidates.
const MAX_DRAWS: usize = 1000;

/// Returns two distinct positive numbers within three of `correct`, neither
/// equal to it.
pub fn distractors<R: Rng + ?Sized>(correct: u32, rng: &mut R) -> [u32; 2] {
    let mut picked: Vec<u32> = Vec::with_capacity(2);

    for _ in 0..MAX_DRAWS {
        if picked.len() == 2 {
            break;
        }

        let offset = rng.gen_range(1..=MAX_OFFSET);
        let candidate = if rng.gen_bool(0.5) {
            correct.checked_add(offset)
        } else {
            correct.checked_sub(offset)
        };

        match candidate {
            Some(value) if value > 0 && value != correct && !picked.contains(&value) => {
                picked.push(value);
            }
            _ => {}
        }
    }

    // Only reachable with a broken rng.
    let mut next = correct;
    while picked.len() < 2 {
        next = next.saturating_add(1);
        if next != correct && !picked.contains(&next) {
            picked.push(next);
        }
    }

    [picked[0], picked[1]]
}

/// The correct answer plus two distractors, shuffled for display.
pub fn choice_set<R: Rng + ?Sized>(correct: u32, rng: &mut R) -> [u32; 3] {
    let [first, second] = distractors(correct, rng);
    let mut choices = [correct, first, second];
    choices.shuffle(rng);
    choices
}
