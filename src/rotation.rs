//! Drawing new black market stock and deciding when the current stock expires.
//!
//! A rotation is a uniform sample, without replacement, of offers taken from
//! the blueprint pools. The resulting snapshot lives for a fixed period and is
//! replaced wholesale once it expires.

use chrono::{DateTime, TimeDelta, Utc};
use rand::prelude::*;
use std::time::Duration;
use tracing::{debug, info};

use crate::config;
use crate::error::{MarketError, Result};
use crate::models::{CatalogSnapshot, Offer, PoolEntry};

/// How many offers a rotation draws and how long it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub size: usize,
    pub period: Duration,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            size: config::ROTATION_SIZE,
            period: config::ROTATION_PERIOD,
        }
    }
}

/// True once the snapshot's expiry instant has been reached.
pub fn is_expired(snapshot: &CatalogSnapshot, now: DateTime<Utc>) -> bool {
    snapshot.expires_at() <= now
}

/// Draw a fresh rotation from `pool`.
///
/// Picks `policy.size` distinct pool positions uniformly at random, in random
/// order. A pool smaller than the rotation size is used in full, shuffled.
pub fn generate<R: Rng + ?Sized>(
    pool: &[Offer],
    policy: &RotationPolicy,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<CatalogSnapshot> {
    let period = TimeDelta::from_std(policy.period).map_err(|e| {
        MarketError::InvalidArgument(format!("Rotation period out of range: {}", e))
    })?;
    let expires_at = now.checked_add_signed(period).ok_or_else(|| {
        MarketError::InvalidArgument("Rotation expiry overflows the calendar".into())
    })?;

    let offers = sample_without_replacement(pool, policy.size, rng);
    info!(
        offers = offers.len(),
        pool = pool.len(),
        expires_at = %expires_at,
        "generated new market rotation"
    );
    CatalogSnapshot::new(offers, expires_at)
}

/// Keep `existing` while it is live; otherwise draw a replacement.
///
/// Returns the snapshot to display and whether it was newly generated, so the
/// caller knows to store it.
pub fn current_or_rotate<R: Rng + ?Sized>(
    existing: Option<CatalogSnapshot>,
    pool: &[Offer],
    policy: &RotationPolicy,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<(CatalogSnapshot, bool)> {
    match existing {
        Some(snapshot) if !is_expired(&snapshot, now) => Ok((snapshot, false)),
        Some(snapshot) => {
            debug!(expired_at = %snapshot.expires_at(), "rotation expired");
            Ok((generate(pool, policy, now, rng)?, true))
        }
        None => Ok((generate(pool, policy, now, rng)?, true)),
    }
}

/// Flatten recipe files (`{id: {produces, rarity?}}`) into a single offer pool.
///
/// Entries keep their file order, and files are taken in the order given.
pub fn build_pool<I>(sources: I) -> Result<Vec<Offer>>
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let mut pool = Vec::new();
    for source in sources {
        let map = match source {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(MarketError::InvalidArgument(format!(
                    "Rotation pool must be a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };
        for (_, entry) in map {
            let entry: PoolEntry = serde_json::from_value(entry)?;
            pool.push(entry.to_offer());
        }
    }
    Ok(pool)
}

// ---------------------------------------------------------------------------
// Free-standing helpers
// ---------------------------------------------------------------------------

/// Uniform random sampling without replacement.
fn sample_without_replacement<R: Rng + ?Sized>(
    pool: &[Offer],
    count: usize,
    rng: &mut R,
) -> Vec<Offer> {
    let actual_count = count.min(pool.len());
    let mut remaining: Vec<&Offer> = pool.iter().collect();
    let mut results = Vec::with_capacity(actual_count);

    for _ in 0..actual_count {
        let picked = rng.gen_range(0..remaining.len());
        results.push(remaining.swap_remove(picked).clone());
    }

    results
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
