//! Shared formatting and reward arithmetic helpers.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Display units used by [`format_duration`], largest first.
const DURATION_UNITS: [(&str, u64); 7] = [
    ("year", 31_557_600_000),
    ("month", 2_629_800_000),
    ("week", 604_800_000),
    ("day", 86_400_000),
    ("hour", 3_600_000),
    ("minute", 60_000),
    ("second", 1_000),
];

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Formats a duration using its two largest units, rounding the smaller one.
///
/// `86_340` seconds renders as `"23 hours, 59 minutes"`, and a duration that
/// rounds up to a whole larger unit collapses into it (`59m 59.6s` is
/// `"1 hour"`).
pub fn format_duration(duration: Duration) -> String {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);

    let Some(top) = DURATION_UNITS.iter().position(|&(_, unit)| millis >= unit) else {
        return plural(millis.saturating_add(500) / 1_000, "second");
    };

    let precision = DURATION_UNITS
        .get(top + 1)
        .map_or(DURATION_UNITS[top].1, |&(_, unit)| unit);
    let rounded = millis.saturating_add(precision / 2) / precision * precision;

    // Rounding may carry into the next larger unit.
    let top = DURATION_UNITS
        .iter()
        .position(|&(_, unit)| rounded >= unit)
        .unwrap_or(top);
    let (major_name, major_unit) = DURATION_UNITS[top];

    let mut parts = vec![plural(rounded / major_unit, major_name)];
    if let Some(&(minor_name, minor_unit)) = DURATION_UNITS.get(top + 1) {
        let minor = rounded % major_unit / minor_unit;
        if minor > 0 {
            parts.push(plural(minor, minor_name));
        }
    }

    parts.join(", ")
}

/// Formats a number with comma thousands separators.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Returns a random integer in `min..=max`. Bounds may be given in either order.
pub fn random_int(rng: &mut fastrand::Rng, min: i64, max: i64) -> i64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rng.i64(low..=high)
}

/// Picks a random element, or `None` for an empty slice.
pub fn random_element<'a, T>(rng: &mut fastrand::Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.usize(..items.len()))
    }
}

/// Whether a reward claimed at `last` can be claimed again at `now`.
pub fn can_claim(last: Option<DateTime<Utc>>, window: chrono::Duration, now: DateTime<Utc>) -> bool {
    last.map_or(true, |last| now - last >= window)
}

/// Time left until a reward claimed at `last` becomes claimable again.
pub fn claim_remaining(
    last: Option<DateTime<Utc>>,
    window: chrono::Duration,
    now: DateTime<Utc>,
) -> Duration {
    last.and_then(|last| (window - (now - last)).to_std().ok())
        .unwrap_or_default()
}

/// Level reached with the given experience: `floor(sqrt(xp / 100))`.
pub fn calculate_level(experience: u64) -> u64 {
    let quotient = experience / 100;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let mut level = (quotient as f64).sqrt() as u64;

    // Correct for float error on large inputs.
    while level.saturating_mul(level) > quotient {
        level -= 1;
    }
    while (level + 1).saturating_mul(level + 1) <= quotient {
        level += 1;
    }
    level
}

/// Experience required to reach the level after `level`.
pub fn experience_for_level(level: u64) -> u64 {
    (level + 1).saturating_pow(2).saturating_mul(100)
}

/// Renders a text progress bar such as `█████░░░░░`.
pub fn progress_bar(current: u64, max: u64, length: usize) -> String {
    let filled = if max == 0 || current >= max {
        length
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let filled = (length as f64 * current as f64 / max as f64).round() as usize;
        filled.min(length)
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(length - filled))
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(86_340)), "23 hours, 59 minutes");
        assert_eq!(format_duration(Duration::from_secs(5_400)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::from_secs(3_600)), "1 hour");
        assert_eq!(format_duration(Duration::from_millis(3_599_600)), "1 hour");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "2 seconds");
        assert_eq!(format_duration(Duration::from_millis(400)), "0 seconds");
        assert_eq!(format_duration(Duration::ZERO), "0 seconds");
        assert_eq!(format_duration(Duration::from_secs(8 * 86_400)), "1 week, 1 day");
    }

    #[test]
    fn test_format_duration_rounds_minor_unit() {
        // 2 minutes 29.5 seconds rounds the seconds up
        assert_eq!(format_duration(Duration::from_millis(149_500)), "2 minutes, 30 seconds");
        assert_eq!(format_duration(Duration::from_millis(61_000)), "1 minute, 1 second");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-45_000), "-45,000");
    }

    #[test]
    fn test_random_helpers() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let value = random_int(&mut rng, 50, 150);
            assert!((50..=150).contains(&value));
        }
        assert_eq!(random_int(&mut rng, 4, 4), 4);
        assert!((1..=3).contains(&random_int(&mut rng, 3, 1)));

        let empty: [u8; 0] = [];
        assert!(random_element(&mut rng, &empty).is_none());
        assert_eq!(random_element(&mut rng, &["only"]), Some(&"only"));
    }

    #[test]
    fn test_claim_window() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        let day = chrono::Duration::hours(24);

        assert!(can_claim(None, day, now));
        assert_eq!(claim_remaining(None, day, now), Duration::ZERO);

        let recent = now - chrono::Duration::hours(1);
        assert!(!can_claim(Some(recent), day, now));
        assert_eq!(claim_remaining(Some(recent), day, now), Duration::from_secs(23 * 3600));

        let old = now - chrono::Duration::hours(25);
        assert!(can_claim(Some(old), day, now));
        assert_eq!(claim_remaining(Some(old), day, now), Duration::ZERO);
    }

    #[test]
    fn test_level_curve() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(99), 0);
        assert_eq!(calculate_level(100), 1);
        assert_eq!(calculate_level(399), 1);
        assert_eq!(calculate_level(400), 2);
        assert_eq!(experience_for_level(0), 100);
        assert_eq!(experience_for_level(1), 400);
        assert_eq!(experience_for_level(2), 900);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(5, 10, 10), "█████░░░░░");
        assert_eq!(progress_bar(20, 10, 4), "████");
        assert_eq!(progress_bar(0, 10, 3), "░░░");
        assert_eq!(progress_bar(1, 0, 2), "██");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
        assert_eq!(truncate_string("ñañañañaña", 6), "ñañ...");
    }
}
