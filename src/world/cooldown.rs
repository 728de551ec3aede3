//! Per-mode, per-user cooldown ledger.
//!
//! Absence of an entry means "never moved, no cooldown active". Comparisons
//! use whole-second granularity: sub-second remainders do not count toward
//! the threshold.

use chrono::{DateTime, Duration, Utc};

use crate::world::types::{MoveMode, UserId, WorldDocument};

/// Whether a user may move in a given mode right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CooldownStatus {
    Ready,
    Waiting { remaining: Duration },
}

/// Check the ledger for `user` in `mode` against `threshold`.
///
/// A user is ready when no timestamp exists, or when at least the threshold's
/// worth of whole seconds has elapsed since the last successful move.
pub fn check(
    doc: &WorldDocument,
    mode: MoveMode,
    user: &UserId,
    now: DateTime<Utc>,
    threshold: Duration,
) -> CooldownStatus {
    let Some(last) = doc.cooldown_ledger(mode).get(user) else {
        return CooldownStatus::Ready;
    };
    let elapsed = now.signed_duration_since(*last).num_seconds();
    let threshold = threshold.num_seconds();
    if elapsed >= threshold {
        CooldownStatus::Ready
    } else {
        CooldownStatus::Waiting {
            remaining: Duration::seconds(threshold - elapsed),
        }
    }
}

/// Record a successful move. Overwrites unconditionally.
pub fn record(doc: &mut WorldDocument, mode: MoveMode, user: &UserId, now: DateTime<Utc>) {
    doc.cooldown_ledger_mut(mode).insert(user.clone(), now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn user_without_entry_is_ready() {
        let doc = WorldDocument::empty();
        let status = check(
            &doc,
            MoveMode::Walk,
            &UserId::from("ada"),
            at(0),
            Duration::seconds(300),
        );
        assert_eq!(status, CooldownStatus::Ready);
    }

    #[test]
    fn waiting_inside_the_window_ready_at_the_boundary() {
        let mut doc = WorldDocument::empty();
        let user = UserId::from("ada");
        record(&mut doc, MoveMode::Walk, &user, at(0));

        match check(&doc, MoveMode::Walk, &user, at(10), Duration::seconds(300)) {
            CooldownStatus::Waiting { remaining } => {
                assert_eq!(remaining.num_seconds(), 290);
            }
            other => panic!("expected waiting, got {other:?}"),
        }

        // Exactly at the threshold the wait is over.
        assert_eq!(
            check(&doc, MoveMode::Walk, &user, at(300), Duration::seconds(300)),
            CooldownStatus::Ready
        );
    }

    #[test]
    fn sub_second_remainders_do_not_count() {
        let mut doc = WorldDocument::empty();
        let user = UserId::from("ada");
        let last = at(0) + Duration::milliseconds(700);
        doc.cooldown_ledger_mut(MoveMode::Walk)
            .insert(user.clone(), last);

        // 299.3 elapsed seconds truncate to 299 whole seconds: still waiting.
        let status = check(&doc, MoveMode::Walk, &user, at(300), Duration::seconds(300));
        assert_eq!(
            status,
            CooldownStatus::Waiting {
                remaining: Duration::seconds(1)
            }
        );
    }

    #[test]
    fn ledgers_are_independent_per_mode() {
        let mut doc = WorldDocument::empty();
        let user = UserId::from("ada");
        record(&mut doc, MoveMode::Walk, &user, at(0));

        assert_eq!(
            check(&doc, MoveMode::Bus, &user, at(1), Duration::seconds(3600)),
            CooldownStatus::Ready
        );
    }

    #[test]
    fn record_overwrites_rather_than_accumulates() {
        let mut doc = WorldDocument::empty();
        let user = UserId::from("ada");
        record(&mut doc, MoveMode::Bus, &user, at(0));
        record(&mut doc, MoveMode::Bus, &user, at(50));
        assert_eq!(doc.bus_cooldown.get(&user), Some(&at(50)));
    }
}
