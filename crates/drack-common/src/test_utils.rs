//! Test utilities and shared test helpers for Drack Bot.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another test binary helper may already own the global subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a fixed timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::UserId;

    /// The owner configured in test setups.
    pub fn owner_id() -> UserId {
        UserId(111_111_111_111_111_111)
    }

    /// Create a test user ID that is not the owner.
    pub fn test_user_id() -> UserId {
        UserId(987_654_321_098_765_432)
    }

    /// Create multiple distinct test user IDs.
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count)
            .map(|i| UserId(100_000_000_000_000_000 + i as u64))
            .collect()
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::UserId;
    use proptest::prelude::*;

    /// Strategy for generating valid Discord user IDs.
    pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
        (100_000_000_000_000_000u64..=999_999_999_999_999_999u64).prop_map(UserId)
    }

    /// Strategy for generating command names.
    pub fn command_name_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z_]{1,31}".prop_map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_mock_timestamp() {
        let timestamp = mock_timestamp(2024, 1, 1, 12, 0, 0);
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.month(), 1);
        assert_eq!(timestamp.day(), 1);
        assert_eq!(timestamp.hour(), 12);
    }

    #[test]
    fn test_fixture_ids_are_distinct() {
        let ids = discord_fixtures::test_user_ids(5);
        assert_eq!(ids.len(), 5);
        assert!(!ids.contains(&discord_fixtures::owner_id()));
        assert_ne!(discord_fixtures::test_user_id(), discord_fixtures::owner_id());
    }

    #[cfg(feature = "proptest")]
    mod property_tests {
        use super::super::property_testing;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_property_user_id_display(id in property_testing::user_id_strategy()) {
                let displayed = format!("{}", id);
                let parsed: crate::UserId = displayed.parse().unwrap();
                prop_assert_eq!(id, parsed);
            }
        }
    }
}
