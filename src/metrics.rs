/// Words per minute for the typed text over `elapsed_secs`.
///
/// Blank text or a non-positive (or NaN) duration yields 0.
pub fn compute_wpm(typed: &str, elapsed_secs: f64) -> f64 {
    let words = typed.split_whitespace().count();
    if words == 0 || elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return 0.0;
    }

    (words as f64 * 60.0) / elapsed_secs
}

/// Two decimal display used by both the time and wpm readouts
pub fn format_metric(value: f64) -> String {
    format!("{:.2}", value)
}

/// Outcome of a stopped test
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub difficulty: String,
    pub elapsed_secs: f64,
    pub wpm: f64,
    pub words_typed: usize,
}

impl TestResult {
    pub fn new(difficulty: String, typed: &str, elapsed_secs: f64) -> Self {
        Self {
            difficulty,
            elapsed_secs,
            wpm: compute_wpm(typed, elapsed_secs),
            words_typed: typed.split_whitespace().count(),
        }
    }
}
