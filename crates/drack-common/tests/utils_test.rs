//! Property tests for the drack-common formatting and reward helpers.
//!
//! These tests cover:
//! - Number and duration formatting invariants
//! - Claim window arithmetic
//! - Level curve consistency

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use drack_common::utils::*;
use proptest::prelude::*;
use std::time::Duration;

#[test]
fn test_duration_formatting_uses_two_units_at_most() {
    let formatted = format_duration(Duration::from_secs(400 * 86_400 + 3 * 3_600 + 17));
    assert_eq!(formatted.matches(", ").count(), 1, "got {formatted}");
    assert!(formatted.starts_with("1 year"));
}

#[test]
fn test_claim_remaining_at_exact_boundary() {
    let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let window = ChronoDuration::hours(1);
    let last = now - window;

    assert!(can_claim(Some(last), window, now));
    assert_eq!(claim_remaining(Some(last), window, now), Duration::ZERO);
}

proptest! {
    #[test]
    fn prop_format_number_round_trips(value in any::<i64>()) {
        let formatted = format_number(value);
        let stripped: String = formatted.chars().filter(|c| *c != ',').collect();
        prop_assert_eq!(stripped.parse::<i64>().unwrap(), value);

        // Every group after the first has exactly three digits
        let digits = formatted.trim_start_matches('-');
        for group in digits.split(',').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }

    #[test]
    fn prop_format_duration_never_empty(millis in 0u64..10_000_000_000) {
        let formatted = format_duration(Duration::from_millis(millis));
        prop_assert!(!formatted.is_empty());
        prop_assert!(formatted.matches(", ").count() <= 1);
    }

    #[test]
    fn prop_claim_remaining_is_zero_iff_claimable(
        elapsed_secs in 0i64..200_000,
        window_secs in 1i64..200_000
    ) {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_else(Utc::now);
        let last = now - ChronoDuration::seconds(elapsed_secs);
        let window = ChronoDuration::seconds(window_secs);

        let claimable = can_claim(Some(last), window, now);
        let remaining = claim_remaining(Some(last), window, now);
        prop_assert_eq!(claimable, remaining == Duration::ZERO);
    }

    #[test]
    fn prop_level_curve_is_consistent(experience in 0u64..10_000_000_000) {
        let level = calculate_level(experience);
        prop_assert!(experience >= level * level * 100);
        prop_assert!(experience < experience_for_level(level));
    }

    #[test]
    fn prop_truncation_respects_limit(text in "\\PC*", max_len in 3usize..200) {
        let truncated = truncate_string(&text, max_len);
        prop_assert!(truncated.chars().count() <= max_len);
    }
}
