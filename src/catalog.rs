//! Pricing, expiry countdown and display ordering for rotating catalogs.
//!
//! Everything here is a pure function over a fully formed
//! [`CatalogSnapshot`]; nothing is cached and nothing is mutated, so the
//! functions are safe to call repeatedly or from several threads.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::models::{CatalogSnapshot, Offer, Price, PriceTable, Rarity};

const MINUTE: Duration = Duration::from_secs(60);

/// Stateless operations over a catalog snapshot.
pub struct RotatingCatalog;

impl RotatingCatalog {
    /// Whole minutes left until the snapshot rotates out, clamped at zero.
    pub fn remaining_minutes(snapshot: &CatalogSnapshot, now: DateTime<Utc>) -> u64 {
        Self::units_until(snapshot.expires_at(), now, MINUTE)
    }

    /// Whole `unit`s left until the snapshot rotates out, clamped at zero.
    ///
    /// A zero `unit` yields 0.
    pub fn remaining_units(snapshot: &CatalogSnapshot, now: DateTime<Utc>, unit: Duration) -> u64 {
        Self::units_until(snapshot.expires_at(), now, unit)
    }

    /// Time left until the snapshot rotates out; zero once it has passed.
    pub fn remaining(snapshot: &CatalogSnapshot, now: DateTime<Utc>) -> Duration {
        Self::remaining_until(snapshot.expires_at(), now)
    }

    /// Whole minutes from `now` until `expires_at`, clamped at zero.
    pub fn minutes_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
        Self::units_until(expires_at, now, MINUTE)
    }

    /// Whole `unit`s from `now` until `expires_at`, clamped at zero.
    pub fn units_until(expires_at: DateTime<Utc>, now: DateTime<Utc>, unit: Duration) -> u64 {
        if unit.is_zero() {
            return 0;
        }
        let left = Self::remaining_until(expires_at, now);
        u64::try_from(left.as_nanos() / unit.as_nanos()).unwrap_or(u64::MAX)
    }

    /// Time from `now` until `expires_at`; zero once it has passed.
    pub fn remaining_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        (expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Look up the cost for a rarity label.
    ///
    /// Labels outside the known tiers return [`Price::Unknown`] so a view can
    /// render a placeholder for that one offer.
    pub fn price_for(rarity: &str, table: &PriceTable) -> Price {
        match rarity.parse::<Rarity>() {
            Ok(tier) => Price::Cost(table.get(tier)),
            Err(_) => Price::Unknown,
        }
    }

    /// Offers in the order the snapshot supplied them.
    pub fn ordered_offers(snapshot: &CatalogSnapshot) -> &[Offer] {
        snapshot.offers()
    }

    /// `(offer, price)` pairs in display order.
    pub fn priced_offers<'a>(
        snapshot: &'a CatalogSnapshot,
        table: &'a PriceTable,
    ) -> impl Iterator<Item = (&'a Offer, Price)> + 'a {
        Self::ordered_offers(snapshot)
            .iter()
            .map(move |o| (o, Self::price_for(&o.rarity, table)))
    }
}
