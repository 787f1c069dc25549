//! Rotating market views backed by the cached rotation files.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::cell::RefCell;
use tracing::debug;

use crate::cache::CacheManager;
use crate::catalog::RotatingCatalog;
use crate::display::{self, Countdown, OfferCard};
use crate::error::{MarketError, Result};
use crate::models::{CatalogKind, CatalogSnapshot, Offer, Price, PriceTable, UserProfile};
use crate::purchase::{self, Receipt};
use crate::rotation::{self, RotationPolicy};

// ---------------------------------------------------------------------------
// MarketQuery
// ---------------------------------------------------------------------------

/// Query interface for one rotating market (black market or parts market).
pub struct MarketQuery<'a> {
    cache: &'a RefCell<CacheManager>,
    kind: CatalogKind,
}

impl<'a> MarketQuery<'a> {
    /// Create a new `MarketQuery` for `kind` bound to the given cache.
    pub fn new(cache: &'a RefCell<CacheManager>, kind: CatalogKind) -> Self {
        Self { cache, kind }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn price_table(&self) -> PriceTable {
        self.kind.price_table()
    }

    /// Load and validate the current rotation.
    pub fn snapshot(&self) -> Result<CatalogSnapshot> {
        let data = self.cache.borrow_mut().load_json(self.kind.data_file())?;
        CatalogSnapshot::from_value(data)
    }

    /// Minutes until the rotation changes.
    ///
    /// A rotation file whose expiry is missing or malformed yields
    /// [`Countdown::Unavailable`] rather than an error.
    pub fn countdown(&self, now: DateTime<Utc>) -> Result<Countdown> {
        let data = self.cache.borrow_mut().load_json(self.kind.data_file())?;
        let expires = data.get("expires").and_then(|v| v.as_str());
        Ok(Countdown::from_expiry(expires, now))
    }

    /// Countdown text with this market's label.
    pub fn countdown_label(&self, now: DateTime<Utc>) -> Result<String> {
        Ok(self.countdown(now)?.label(self.kind.countdown_label()))
    }

    /// Offers in display order.
    pub fn offers(&self) -> Result<Vec<Offer>> {
        let snapshot = self.snapshot()?;
        Ok(RotatingCatalog::ordered_offers(&snapshot).to_vec())
    }

    /// Price of a single rarity label in this market.
    pub fn price_for(&self, rarity: &str) -> Price {
        RotatingCatalog::price_for(rarity, &self.price_table())
    }

    /// Display cards for the current rotation.
    pub fn cards(&self) -> Result<Vec<OfferCard>> {
        let snapshot = self.snapshot()?;
        Ok(display::offer_cards(&snapshot, &self.price_table()))
    }

    /// Find a current offer by name, ignoring case.
    pub fn find(&self, name: &str) -> Result<Option<Offer>> {
        let snapshot = self.snapshot()?;
        Ok(purchase::find_offer(&snapshot, name).cloned())
    }

    /// Check whether `profile` can afford `item` and return its cost.
    pub fn quote(&self, profile: &UserProfile, item: &str) -> Result<u32> {
        let snapshot = self.snapshot()?;
        let (_, cost) = purchase::quote(profile, &snapshot, item, &self.price_table())?;
        Ok(cost)
    }

    /// Buy `item` for `profile` from the current rotation.
    ///
    /// Only the in-memory profile changes; persisting it is up to the caller.
    pub fn purchase(&self, profile: &mut UserProfile, item: &str) -> Result<Receipt> {
        let snapshot = self.snapshot()?;
        Ok(purchase::purchase(profile, &snapshot, item, &self.price_table())?)
    }

    /// Load the offer pool this market's rotations draw from.
    pub fn pool(&self) -> Result<Vec<Offer>> {
        let files = self.kind.pool_files();
        if files.is_empty() {
            return Err(MarketError::InvalidArgument(format!(
                "{:?} market has no rotation pools",
                self.kind
            )));
        }
        let mut cache = self.cache.borrow_mut();
        let sources = files
            .iter()
            .map(|f| cache.load_json(f))
            .collect::<Result<Vec<_>>>()?;
        rotation::build_pool(sources)
    }

    /// Return the live rotation, drawing and caching a new one if it expired.
    ///
    /// A missing or unreadable cached rotation is replaced as well. The pool
    /// files are only read when a new rotation is drawn.
    pub fn current_or_rotate<R: Rng + ?Sized>(
        &self,
        policy: &RotationPolicy,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<CatalogSnapshot> {
        match self.snapshot() {
            Ok(live) if !rotation::is_expired(&live, now) => return Ok(live),
            Ok(expired) => debug!(expired_at = %expired.expires_at(), "rotation expired"),
            Err(e) => debug!(error = %e, "no usable rotation cached"),
        }
        let pool = self.pool()?;
        let snapshot = rotation::generate(&pool, policy, now, rng)?;
        let value = serde_json::to_value(&snapshot)?;
        self.cache
            .borrow()
            .store_json(self.kind.data_file(), &value)?;
        Ok(snapshot)
    }
}
