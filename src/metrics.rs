use std::time::Duration;

/// Characters per standard word for the WPM normalization.
const WORD_LENGTH: f64 = 5.0;

/// Final results of a typing run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Fraction of scored keystrokes that matched, in 0.0..=1.0.
    pub accuracy: f64,
    /// Words per minute, normalized to a 5-character word.
    pub wpm: f64,
}

impl Summary {
    /// Compute the session summary from the counters and the externally
    /// measured elapsed time. Returns `None` when nothing was scored, so
    /// callers show a neutral message instead of dividing by zero.
    pub fn compute(correct: usize, wrong: usize, elapsed: Duration) -> Option<Self> {
        let total = correct + wrong;
        if total == 0 {
            return None;
        }

        let mut secs = elapsed.as_secs_f64();
        if secs == 0.0 {
            secs = 1.0;
        }
        let minutes = secs / 60.0;

        Some(Self {
            accuracy: correct as f64 / total as f64,
            wpm: total as f64 / (WORD_LENGTH * minutes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_exact() {
        let summary = Summary::compute(8, 2, Duration::from_secs(60)).unwrap();
        assert_eq!(summary.accuracy, 0.8);
    }

    #[test]
    fn test_perfect_accuracy() {
        let summary = Summary::compute(10, 0, Duration::from_secs(30)).unwrap();
        assert_eq!(summary.accuracy, 1.0);
    }

    #[test]
    fn test_wpm_normalizes_to_five_char_words() {
        // 100 keystrokes in one minute is 20 five-character words
        let summary = Summary::compute(90, 10, Duration::from_secs(60)).unwrap();
        assert_eq!(summary.wpm, 20.0);
    }

    #[test]
    fn test_wpm_scales_with_elapsed_time() {
        let summary = Summary::compute(50, 0, Duration::from_secs(30)).unwrap();
        assert_eq!(summary.wpm, 20.0);
    }

    #[test]
    fn test_no_input_yields_none() {
        assert_eq!(Summary::compute(0, 0, Duration::from_secs(10)), None);
    }

    #[test]
    fn test_zero_elapsed_does_not_divide_by_zero() {
        let summary = Summary::compute(5, 0, Duration::ZERO).unwrap();
        assert!(summary.wpm.is_finite());
        assert!(summary.wpm > 0.0);
    }

    #[test]
    fn test_all_wrong_still_produces_speed() {
        let summary = Summary::compute(0, 25, Duration::from_secs(60)).unwrap();
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.wpm, 5.0);
    }
}
