use std::collections::BTreeMap;

use crate::models::{
    AnalysisReport, AnswerRecord, CategoryStats, Difficulty, ShuffledQuestion, DEFAULT_CATEGORY,
};

const WEAK_AREA_THRESHOLD: f64 = 0.6;
const STRONG_AREA_THRESHOLD: f64 = 0.8;
const MIN_CATEGORY_SAMPLE: u32 = 2;

pub fn generate_analysis(
    questions: &[ShuffledQuestion],
    answers: &[AnswerRecord],
    quiz_type: &str,
    difficulty: Difficulty,
) -> AnalysisReport {
    let mut category_stats: BTreeMap<String, CategoryStats> = BTreeMap::new();
    let mut total_time: u64 = 0;
    let (mut correct_time, mut correct_count) = (0u64, 0u32);
    let (mut incorrect_time, mut incorrect_count) = (0u64, 0u32);
    let mut fastest: Option<u32> = None;
    let mut slowest: u32 = 0;
    let mut unanswered = 0u32;

    for answer in answers {
        let category = if answer.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            answer.category.as_str()
        };
        let stats = category_stats.entry(category.to_string()).or_default();
        stats.total += 1;

        let spent = u64::from(answer.time_spent_seconds);
        total_time += spent;
        if answer.is_correct {
            stats.correct += 1;
            correct_time += spent;
            correct_count += 1;
        } else {
            incorrect_time += spent;
            incorrect_count += 1;
        }

        if answer.time_spent_seconds > 0 {
            fastest = Some(fastest.map_or(answer.time_spent_seconds, |f| {
                f.min(answer.time_spent_seconds)
            }));
            slowest = slowest.max(answer.time_spent_seconds);
        }

        if answer.is_timeout() {
            unanswered += 1;
        }
    }

    let (weak_areas, strong_areas) = classify_areas(&category_stats);

    AnalysisReport {
        quiz_type: quiz_type.to_string(),
        difficulty,
        total_questions: questions.len(),
        correct_answers: correct_count,
        percentage: percentage(correct_count, questions.len()),
        average_time_per_question: rounded_average(total_time, answers.len().max(1) as u64),
        average_time_correct: rounded_average(correct_time, u64::from(correct_count)),
        average_time_incorrect: rounded_average(incorrect_time, u64::from(incorrect_count)),
        category_stats,
        weak_areas,
        strong_areas,
        fastest_answer: fastest.unwrap_or(0),
        slowest_answer: slowest,
        unanswered_questions: unanswered,
    }
}

/// Rounded `correct / total` as a whole percentage; 0 for an empty quiz.
pub fn percentage(correct: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) / total as f64 * 100.0).round() as u32
}

fn rounded_average(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

fn classify_areas(stats: &BTreeMap<String, CategoryStats>) -> (Vec<String>, Vec<String>) {
    let mut weak = Vec::new();
    let mut strong = Vec::new();
    for (category, s) in stats {
        if s.total < MIN_CATEGORY_SAMPLE {
            continue;
        }
        let accuracy = s.accuracy();
        if accuracy < WEAK_AREA_THRESHOLD {
            weak.push(category.clone());
        } else if accuracy > STRONG_AREA_THRESHOLD {
            strong.push(category.clone());
        }
    }
    (weak, strong)
}
