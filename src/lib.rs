//! WARLAB market SDK for Rust.
//!
//! Loads the market's JSON data files (rotations, player profiles and the
//! blueprint master list), caches them locally, and turns them into
//! display-ready facts: countdowns to the next rotation, rarity-tiered
//! prices, offer cards in snapshot order, and inventory views.
//!
//! # Quick start
//!
//! ```no_run
//! use warlab_market::MarketSdk;
//!
//! let sdk = MarketSdk::builder().user_id("user_123").build().unwrap();
//!
//! // Current black market stock
//! let cards = sdk.blackmarket().cards().unwrap();
//!
//! // Minutes until the stock rotates
//! let countdown = sdk.blackmarket().countdown(chrono::Utc::now()).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod inventory;
pub mod models;
pub mod purchase;
pub mod queries;
pub mod rotation;

#[cfg(feature = "async")]
pub use async_client::AsyncMarketSdk;
pub use cache::CacheManager;
pub use catalog::RotatingCatalog;
pub use display::{Countdown, OfferCard};
pub use error::{MarketError, Result};
pub use models::{CatalogKind, CatalogSnapshot, Offer, Price, PriceTable, Rarity, UserProfile};
pub use purchase::{PurchaseError, Receipt, Unlock};

use chrono::Utc;
use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

// ---------------------------------------------------------------------------
// MarketSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`MarketSdk`] instance.
///
/// Use [`MarketSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](MarketSdkBuilder::build) to create the SDK.
pub struct MarketSdkBuilder {
    cache_dir: Option<PathBuf>,
    base_url: Option<String>,
    user_id: Option<String>,
    offline: bool,
    timeout: Duration,
}

impl Default for MarketSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            base_url: None,
            user_id: None,
            offline: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl MarketSdkBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/warlab-market` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the base URL the data files are served from.
    ///
    /// Defaults to [`config::DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the player whose profile the views show.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never downloads and only uses previously cached
    /// data files. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for data file downloads.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK, initializing the cache directory.
    ///
    /// No data files are fetched eagerly; they are loaded on first query.
    pub fn build(self) -> Result<MarketSdk> {
        let cache = CacheManager::new(self.cache_dir, self.base_url, self.offline, self.timeout)?;
        Ok(MarketSdk {
            cache: RefCell::new(cache),
            user_id: self.user_id,
        })
    }
}

// ---------------------------------------------------------------------------
// MarketSdk
// ---------------------------------------------------------------------------

/// The main entry point for the market SDK.
///
/// Owns the [`CacheManager`] and exposes lightweight borrowing query views.
pub struct MarketSdk {
    cache: RefCell<CacheManager>,
    user_id: Option<String>,
}

impl MarketSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> MarketSdkBuilder {
        MarketSdkBuilder::default()
    }

    /// Access the black market (blueprint rotation).
    pub fn blackmarket(&self) -> queries::MarketQuery<'_> {
        self.market(CatalogKind::Blueprints)
    }

    /// Access the parts market.
    pub fn parts_market(&self) -> queries::MarketQuery<'_> {
        self.market(CatalogKind::Parts)
    }

    /// Access a rotating market by kind.
    pub fn market(&self, kind: CatalogKind) -> queries::MarketQuery<'_> {
        queries::MarketQuery::new(&self.cache, kind)
    }

    /// Access player profiles and blueprint collections.
    pub fn profiles(&self) -> queries::ProfileQuery<'_> {
        queries::ProfileQuery::new(&self.cache, self.user_id.as_deref())
    }

    /// The player this SDK was configured for, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Fetch any rotation whose cached snapshot has expired.
    ///
    /// Returns the kinds that were fetched again; always empty when offline.
    /// A failed download is an error here, unlike the market views which
    /// fall back to the cached copy.
    pub fn refresh(&self) -> Result<Vec<CatalogKind>> {
        if self.cache.borrow().offline {
            return Ok(Vec::new());
        }
        let now = Utc::now();
        let mut refreshed = Vec::new();
        for kind in [CatalogKind::Blueprints, CatalogKind::Parts] {
            let stale = self.cache.borrow().is_stale_at(kind.data_file(), now)?;
            if stale {
                self.cache.borrow_mut().fetch(kind.data_file())?;
                refreshed.push(kind);
            }
        }
        if !refreshed.is_empty() {
            info!(?refreshed, "refreshed expired rotations");
        }
        Ok(refreshed)
    }

    /// Remove every cached data file.
    pub fn clear_cache(&self) -> Result<()> {
        self.cache.borrow().clear()
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        self.cache.borrow_mut().close();
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for MarketSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        write!(
            f,
            "MarketSdk(cache_dir={}, base_url={}, user={}, offline={})",
            cache.cache_dir.display(),
            cache.base_url,
            self.user_id.as_deref().unwrap_or("-"),
            cache.offline
        )
    }
}
