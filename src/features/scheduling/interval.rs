//! Interval and ease update for SM-2 style spaced repetition.
//!
//! Performance quality is graded on a simplified scale: `0` is a failed
//! attempt, anything from `1` upwards a passed one.

/// Interval used for an item that has never been reviewed.
pub const BOOTSTRAP_INTERVAL_DAYS: i32 = 1;
/// Ease factor used for an item that has never been reviewed.
pub const BOOTSTRAP_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 3.0;
/// Longest interval ever scheduled (about a century).
pub const MAX_INTERVAL_DAYS: i32 = 36_500;
/// Interval after a failed attempt.
pub const REMEDIAL_INTERVAL_DAYS: i32 = 1;
/// Interval of a unit-level checkpoint created after a crown level-up.
pub const UNIT_REVIEW_INTERVAL_DAYS: i32 = 5;

const FAILURE_EASE_PENALTY: f64 = 0.2;
const SUCCESS_EASE_BONUS: f64 = 0.1;
const PRIORITY_CEILING: i32 = 100;

/// Computes the next interval and ease factor after one attempt.
///
/// Out-of-range inputs are clamped before use: the interval to
/// `1..=MAX_INTERVAL_DAYS`, the ease factor to
/// `MIN_EASE_FACTOR..=MAX_EASE_FACTOR`.
///
/// A passed attempt grows the interval by at least one day until it reaches
/// [`MAX_INTERVAL_DAYS`]; a failed one resets it to [`REMEDIAL_INTERVAL_DAYS`].
pub fn compute_next_interval(
    current_interval_days: i32,
    ease_factor: f64,
    performance_quality: i32,
) -> (i32, f64) {
    let interval = current_interval_days.clamp(1, MAX_INTERVAL_DAYS);
    let ease = clamp_ease(ease_factor);

    if performance_quality <= 0 {
        let ease = round_ease(ease - FAILURE_EASE_PENALTY).max(MIN_EASE_FACTOR);
        return (REMEDIAL_INTERVAL_DAYS, ease);
    }

    let ease = round_ease(ease + SUCCESS_EASE_BONUS).min(MAX_EASE_FACTOR);
    let grown = (f64::from(interval) * ease).round() as i32;
    let next = grown.max(interval + 1).min(MAX_INTERVAL_DAYS);

    (next, ease)
}

/// Same-day ordering weight: shorter intervals surface first.
pub fn priority_for(interval_days: i32) -> i32 {
    (PRIORITY_CEILING - interval_days).max(0)
}

fn clamp_ease(ease_factor: f64) -> f64 {
    if ease_factor.is_nan() {
        return MIN_EASE_FACTOR;
    }
    ease_factor.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR)
}

// Two decimals keeps repeated +0.1/-0.2 steps from drifting.
fn round_ease(ease_factor: f64) -> f64 {
    (ease_factor * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ease(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected ease {expected}, got {actual}"
        );
    }

    #[test]
    fn first_correct_answer_from_bootstrap() {
        let (interval, ease) =
            compute_next_interval(BOOTSTRAP_INTERVAL_DAYS, BOOTSTRAP_EASE_FACTOR, 1);
        assert_eq!(interval, 3);
        assert_ease(ease, 2.6);
    }

    #[test]
    fn failure_resets_interval_and_lowers_ease() {
        let (interval, ease) = compute_next_interval(10, 2.5, 0);
        assert_eq!(interval, 1);
        assert_ease(ease, 2.3);
    }

    #[test]
    fn success_always_grows_the_interval() {
        for interval in [1, 2, 3, 7, 30, 365] {
            for ease in [1.3, 1.5, 2.0, 2.5, 3.0] {
                let (next, _) = compute_next_interval(interval, ease, 1);
                assert!(next > interval, "{interval} @ {ease} -> {next}");
            }
        }
    }

    #[test]
    fn failure_never_grows_the_interval() {
        for interval in [1, 4, 60] {
            let (next, ease) = compute_next_interval(interval, 2.0, 0);
            assert!(next <= interval);
            assert!(ease < 2.0);
        }
    }

    #[test]
    fn ease_never_drops_below_floor() {
        let mut interval = 20;
        let mut ease = BOOTSTRAP_EASE_FACTOR;
        for _ in 0..25 {
            (interval, ease) = compute_next_interval(interval, ease, 0);
            assert!(ease >= MIN_EASE_FACTOR);
        }
        assert_ease(ease, MIN_EASE_FACTOR);
        assert_eq!(interval, REMEDIAL_INTERVAL_DAYS);
    }

    #[test]
    fn ease_is_capped_on_repeated_success() {
        let mut interval = 1;
        let mut ease = BOOTSTRAP_EASE_FACTOR;
        for _ in 0..8 {
            (interval, ease) = compute_next_interval(interval, ease, 1);
        }
        assert_ease(ease, MAX_EASE_FACTOR);
        assert_eq!(interval, 5184);
    }

    #[test]
    fn invalid_inputs_are_clamped() {
        assert_eq!(compute_next_interval(0, 2.5, 1), compute_next_interval(1, 2.5, 1));
        assert_eq!(compute_next_interval(-5, 2.5, 0), compute_next_interval(1, 2.5, 0));

        let (_, ease) = compute_next_interval(3, 0.4, 0);
        assert_ease(ease, MIN_EASE_FACTOR);

        let (_, ease) = compute_next_interval(3, f64::NAN, 1);
        assert_ease(ease, 1.4);
    }

    #[test]
    fn low_ease_still_grows_by_a_day() {
        // round(1 * 1.4) = 1 would stall without the floor
        assert_eq!(compute_next_interval(1, 1.3, 1).0, 2);
        assert_eq!(compute_next_interval(2, 1.3, 1).0, 3);
    }

    #[test]
    fn intervals_saturate_at_the_ceiling() {
        assert_eq!(compute_next_interval(20_000, 3.0, 1).0, MAX_INTERVAL_DAYS);
        assert_eq!(compute_next_interval(i32::MAX, 3.0, 1).0, MAX_INTERVAL_DAYS);
    }

    #[test]
    fn shorter_intervals_get_higher_priority() {
        assert!(priority_for(1) > priority_for(3));
        assert_eq!(priority_for(1), 99);
        assert_eq!(priority_for(500), 0);
    }
}
