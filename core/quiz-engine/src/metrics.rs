use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    pub static ref QUIZ_SESSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_sessions_total",
        "Quiz session lifecycle events",
        &["event"]
    )
    .unwrap();

    pub static ref QUIZ_ANSWERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_answers_total",
        "Committed answers by outcome",
        &["outcome"]
    )
    .unwrap();

    pub static ref QUIZ_ANSWER_TIME_SECONDS: HistogramVec = register_histogram_vec!(
        "quiz_answer_time_seconds",
        "Time spent per committed answer",
        &["difficulty"],
        vec![1.0, 2.0, 5.0, 10.0, 15.0, 20.0, 30.0, 45.0, 60.0]
    )
    .unwrap();

    pub static ref QUIZ_RESTORES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_restores_total",
        "Snapshot restore attempts by result",
        &["result"]
    )
    .unwrap();

    pub static ref QUIZ_SNAPSHOT_WRITES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_snapshot_writes_total",
        "Snapshot writes to storage",
        &["status"]
    )
    .unwrap();
}

pub fn record_session_event(event: &str) {
    QUIZ_SESSIONS_TOTAL.with_label_values(&[event]).inc();
}

pub fn record_answer(outcome: &str) {
    QUIZ_ANSWERS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn observe_answer_time(difficulty: &str, seconds: u32) {
    QUIZ_ANSWER_TIME_SECONDS
        .with_label_values(&[difficulty])
        .observe(f64::from(seconds));
}

pub fn record_restore(result: &str) {
    QUIZ_RESTORES_TOTAL.with_label_values(&[result]).inc();
}

pub fn record_snapshot_write(ok: bool) {
    let status = if ok { "ok" } else { "error" };
    QUIZ_SNAPSHOT_WRITES_TOTAL.with_label_values(&[status]).inc();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_rendered_output() {
        record_answer("metrics-test");
        let before = QUIZ_ANSWERS_TOTAL
            .with_label_values(&["metrics-test"])
            .get();
        record_answer("metrics-test");
        assert_eq!(
            QUIZ_ANSWERS_TOTAL
                .with_label_values(&["metrics-test"])
                .get(),
            before + 1
        );
        observe_answer_time("easy", 12);

        let output = render_metrics().unwrap();
        assert!(output.contains("quiz_answers_total"));
        assert!(output.contains("quiz_answer_time_seconds"));
    }
}
