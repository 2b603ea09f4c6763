use std::io::Write;

use super::{PresentResult, Presenter, ToastKind};
use crate::models::{AnalysisReport, AnswerRecord, ShuffledQuestion};

/// Line-oriented presenter for the terminal host.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_question_screen(&mut self) -> PresentResult {
        writeln!(self.out)?;
        Ok(())
    }

    fn show_result_screen(&mut self) -> PresentResult {
        writeln!(self.out, "\n=== Results ===")?;
        Ok(())
    }

    fn set_question_text(&mut self, text: &str) -> PresentResult {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn render_options(&mut self, options: &[String]) -> PresentResult {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.out, "  {}) {}", i + 1, option)?;
        }
        writeln!(
            self.out,
            "Answer with a number, or p (pause), r (restart), f (finish), q (quit)"
        )?;
        Ok(())
    }

    fn update_progress(&mut self, current: usize, total: usize, percent: u32) -> PresentResult {
        writeln!(self.out, "[{}/{}] {}% complete", current, total, percent)?;
        Ok(())
    }

    fn update_timer(&mut self, seconds: u32) -> PresentResult {
        // only print every fifth second to keep the transcript readable
        if seconds % 5 == 0 {
            writeln!(self.out, "  {}s left", seconds)?;
        }
        Ok(())
    }

    fn show_time_warning(&mut self, seconds: u32) -> PresentResult {
        writeln!(self.out, "  Hurry up! {}s left", seconds)?;
        Ok(())
    }

    fn show_answer_feedback(&mut self, selected: Option<usize>, correct: usize) -> PresentResult {
        match selected {
            Some(s) if s == correct => writeln!(self.out, "Correct!")?,
            Some(s) => writeln!(
                self.out,
                "Wrong: you chose {}, the answer was {}",
                s + 1,
                correct + 1
            )?,
            None => writeln!(self.out, "Time's up! The answer was {}", correct + 1)?,
        }
        Ok(())
    }

    fn show_explanation(&mut self, text: &str) -> PresentResult {
        writeln!(self.out, "  {}", text)?;
        Ok(())
    }

    fn update_score(&mut self, score: u32, total: usize, percent: u32) -> PresentResult {
        writeln!(self.out, "Score: {}/{} ({}%)", score, total, percent)?;
        Ok(())
    }

    fn show_performance_analysis(&mut self, report: &AnalysisReport) -> PresentResult {
        writeln!(
            self.out,
            "Average time: {}s (correct {}s, incorrect {}s)",
            report.average_time_per_question,
            report.average_time_correct,
            report.average_time_incorrect
        )?;
        writeln!(
            self.out,
            "Fastest {}s, slowest {}s, unanswered {}",
            report.fastest_answer, report.slowest_answer, report.unanswered_questions
        )?;
        for (category, stats) in &report.category_stats {
            writeln!(self.out, "  {}: {}/{}", category, stats.correct, stats.total)?;
        }
        if !report.weak_areas.is_empty() {
            writeln!(self.out, "Needs work: {}", report.weak_areas.join(", "))?;
        }
        if !report.strong_areas.is_empty() {
            writeln!(self.out, "Strong: {}", report.strong_areas.join(", "))?;
        }
        Ok(())
    }

    fn show_question_review(
        &mut self,
        questions: &[ShuffledQuestion],
        answers: &[AnswerRecord],
    ) -> PresentResult {
        for answer in answers {
            let Some(question) = questions.get(answer.question_index) else {
                continue;
            };
            let mark = match answer.outcome_label() {
                "correct" => "+",
                "timeout" => "~",
                _ => "-",
            };
            writeln!(
                self.out,
                "{} {} -> {}",
                mark,
                question.text,
                question.correct_option().unwrap_or("?")
            )?;
        }
        Ok(())
    }

    fn update_pause_button(&mut self, paused: bool) -> PresentResult {
        if paused {
            writeln!(self.out, "Paused. Press p to resume.")?;
        } else {
            writeln!(self.out, "Resumed.")?;
        }
        Ok(())
    }

    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        let _ = writeln!(self.out, "({}) {}", kind.as_str(), message);
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "ERROR: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn renders_question_and_numbered_options() {
        let mut p = TerminalPresenter::new(Vec::new());
        p.set_question_text("What does <T> mean?").unwrap();
        p.render_options(&["Generic".to_string(), "Tag".to_string()])
            .unwrap();
        let text = output(p);
        assert!(text.contains("What does <T> mean?"));
        assert!(text.contains("  1) Generic"));
        assert!(text.contains("  2) Tag"));
    }

    #[test]
    fn feedback_distinguishes_timeout() {
        let mut p = TerminalPresenter::new(Vec::new());
        p.show_answer_feedback(Some(0), 0).unwrap();
        p.show_answer_feedback(Some(1), 0).unwrap();
        p.show_answer_feedback(None, 2).unwrap();
        let text = output(p);
        assert!(text.contains("Correct!"));
        assert!(text.contains("you chose 2, the answer was 1"));
        assert!(text.contains("Time's up! The answer was 3"));
    }

    #[test]
    fn timer_prints_every_fifth_second() {
        let mut p = TerminalPresenter::new(Vec::new());
        for s in (1..=10).rev() {
            p.update_timer(s).unwrap();
        }
        let text = output(p);
        assert_eq!(text.lines().count(), 2);
    }
}
