//! Per-command, per-user cooldown tracking with self-expiring entries.

use dashmap::DashMap;
use drack_common::UserId;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Cooldown key: (command name, user)
type CooldownKey = (String, UserId);

/// Rounds a duration up to whole seconds.
fn ceil_seconds(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

/// Registry of active cooldowns.
///
/// Each entry stores the absolute instant at which it expires. Writing an
/// entry schedules a removal task for that instant, so memory is bounded by
/// the entries created within the longest cooldown window. Reads also treat
/// expired entries as absent, which covers stores used outside a runtime.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct CooldownStore {
    entries: Arc<DashMap<CooldownKey, Instant>>,
}

impl CooldownStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(command: &str, user: UserId) -> CooldownKey {
        (command.to_string(), user)
    }

    /// Expiry of the live entry for the pair, dropping it if it has lapsed.
    fn live_expiry(&self, command: &str, user: UserId, now: Instant) -> Option<Instant> {
        let key = Self::key(command, user);
        let expiry = self.entries.get(&key).map(|entry| *entry.value())?;

        if now < expiry {
            Some(expiry)
        } else {
            self.entries.remove_if(&key, |_, expiry| *expiry <= now);
            None
        }
    }

    /// Whether the user is still cooling down on the command.
    pub fn is_on_cooldown(&self, command: &str, user: UserId) -> bool {
        self.live_expiry(command, user, Instant::now()).is_some()
    }

    /// Whole seconds left, rounded up. 0 when there is no active entry.
    pub fn remaining_seconds(&self, command: &str, user: UserId) -> u64 {
        let now = Instant::now();
        self.live_expiry(command, user, now)
            .map_or(0, |expiry| ceil_seconds(expiry - now))
    }

    /// Starts (or restarts) a cooldown of `duration` for the pair.
    ///
    /// A zero duration clears the entry instead.
    pub fn set_cooldown(&self, command: &str, user: UserId, duration: Duration) {
        if duration.is_zero() {
            self.clear_cooldown(command, user);
            return;
        }

        let expiry = Instant::now() + duration;
        let key = Self::key(command, user);
        self.entries.insert(key.clone(), expiry);
        debug!(command, user = %user, seconds = duration.as_secs(), "Cooldown set");

        if let Ok(handle) = Handle::try_current() {
            handle.spawn(remove_at_expiry(Arc::downgrade(&self.entries), key, expiry));
        }
    }

    /// Removes the entry for the pair, whatever its state.
    pub fn clear_cooldown(&self, command: &str, user: UserId) {
        if self.entries.remove(&Self::key(command, user)).is_some() {
            debug!(command, user = %user, "Cooldown cleared");
        }
    }

    /// Number of entries held, including lapsed ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every lapsed entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, expiry| *expiry > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, "Purged expired cooldowns");
        }
        removed
    }
}

/// Deferred removal scheduled by [`CooldownStore::set_cooldown`].
///
/// Only removes the entry if it is still lapsed when the timer fires; a
/// cooldown restarted in the meantime has a later expiry and survives.
async fn remove_at_expiry(
    entries: Weak<DashMap<CooldownKey, Instant>>,
    key: CooldownKey,
    expiry: Instant,
) {
    tokio::time::sleep_until(expiry).await;

    if let Some(entries) = entries.upgrade() {
        let now = Instant::now();
        if entries.remove_if(&key, |_, current| *current <= now).is_some() {
            trace!(command = %key.0, user = %key.1, "Cooldown expired");
        }
    }
}
