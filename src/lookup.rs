use rand::Rng;
use std::time::Duration;

use crate::temperature::{TemperatureRecord, TemperatureStore};

/// Upper bound (exclusive) of the artificial delay, in whole seconds.
pub const MAX_DELAY_SECONDS: u64 = 5;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LookupResult {
    Found(TemperatureRecord),
    NotFound,
}

/// Whole-second delay drawn uniformly from `0..MAX_DELAY_SECONDS`.
pub fn random_delay() -> Duration {
    Duration::from_secs(rand::rng().random_range(0..MAX_DELAY_SECONDS))
}

/// Suspends the calling task for `random_delay()`.
pub async fn artificial_delay() {
    let delay = random_delay();
    log::debug!("delaying by {:?}", delay);
    tokio::time::sleep(delay).await;
}

/// Waits a random number of seconds, then looks up `place`.
///
/// The wait happens on every call, whether or not the place exists. Only the
/// calling task is suspended.
pub async fn lookup(store: &TemperatureStore, place: &str) -> LookupResult {
    log::debug!("looking up {:?}", place);
    artificial_delay().await;

    match store.get(place) {
        Some(record) => LookupResult::Found(record.clone()),
        None => {
            log::debug!("no temperature for {:?}", place);
            LookupResult::NotFound
        }
    }
}
