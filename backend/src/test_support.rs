//! Test utilities for the backend crate.
//!
//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`). Only compiled for tests or with the `test-support` feature.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{User, UserId, Username, hash_password};

/// Clock whose current time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}",)
            }
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Build an account with an argon2 hash of `password`.
///
/// # Panics
/// Panics when `username` is invalid or hashing fails.
pub fn user_with_password(username: &str, password: &str, is_staff: bool) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("valid test username"),
        hash_password(password).expect("hash test password"),
        is_staff,
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn mutable_clock_moves_only_when_advanced() {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp");
        let clock = MutableClock::new(start);
        assert_eq!(clock.utc(), start);

        clock.advance(Duration::from_secs(19));
        clock.advance_seconds(1);
        assert_eq!(clock.utc(), start + TimeDelta::seconds(20));
    }
}
