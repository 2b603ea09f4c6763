use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Difficulty, Question, ShuffledQuestion};

/// Shuffled question set plus the cap the caller should truncate to.
#[derive(Debug, Clone)]
pub struct ShuffleOutcome {
    pub shuffled: Vec<ShuffledQuestion>,
    pub limit: usize,
}

impl ShuffleOutcome {
    pub fn truncated(mut self) -> Vec<ShuffledQuestion> {
        self.shuffled.truncate(self.limit);
        self.shuffled
    }
}

/// Permutes the question order and every question's options.
///
/// The input slice is left untouched; each returned question's
/// `correct_option_index` points at the text that was correct before the move.
pub fn shuffle<R: Rng + ?Sized>(
    questions: &[Question],
    difficulty: Difficulty,
    rng: &mut R,
) -> ShuffleOutcome {
    let mut order: Vec<&Question> = questions.iter().collect();
    order.shuffle(rng);

    let shuffled = order
        .into_iter()
        .map(|q| ShuffledQuestion::new(shuffle_options(q, rng)))
        .collect();

    ShuffleOutcome {
        shuffled,
        limit: difficulty.question_limit(),
    }
}

fn shuffle_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Question {
    // permutation[new_position] = old_position
    let mut permutation: Vec<usize> = (0..question.options.len()).collect();
    permutation.shuffle(rng);

    let options = permutation
        .iter()
        .map(|&old| question.options[old].clone())
        .collect();
    let correct_option_index = permutation
        .iter()
        .position(|&old| old == question.correct_option_index)
        .unwrap_or(0);

    Question {
        options,
        correct_option_index,
        ..question.clone()
    }
}
