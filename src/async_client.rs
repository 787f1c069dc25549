//! Async wrapper around [`MarketSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! data files are downloaded or read from disk.
//!
//! # Example
//!
//! ```no_run
//! use warlab_market::AsyncMarketSdk;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncMarketSdk::builder().user_id("user_123").build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let cards = sdk.run(|s| s.blackmarket().cards()).await.unwrap();
//!
//!     // Convenience method for the current countdown
//!     let countdown = sdk.countdown(warlab_market::CatalogKind::Parts).await.unwrap();
//! }
//! ```

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::display::{Countdown, OfferCard};
use crate::error::{MarketError, Result};
use crate::models::CatalogKind;
use crate::MarketSdk;

// ---------------------------------------------------------------------------
// AsyncMarketSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncMarketSdk`] instance.
#[derive(Default)]
pub struct AsyncMarketSdkBuilder {
    cache_dir: Option<PathBuf>,
    base_url: Option<String>,
    user_id: Option<String>,
    offline: bool,
    timeout: Option<Duration>,
}

impl AsyncMarketSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the base URL the data files are served from.
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
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for data file downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncMarketSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = MarketSdk::builder().offline(self.offline);
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(user_id) = self.user_id {
                builder = builder.user_id(user_id);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let sdk = builder.build()?;
            Ok(AsyncMarketSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| MarketError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncMarketSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`MarketSdk`].
///
/// The underlying [`MarketSdk`] is protected by a [`Mutex`] since it uses
/// `RefCell` internally.
pub struct AsyncMarketSdk {
    inner: Arc<Mutex<MarketSdk>>,
}

impl AsyncMarketSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncMarketSdkBuilder {
        AsyncMarketSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&MarketSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| MarketError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| MarketError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Countdown to the next rotation of `kind`, measured now.
    pub async fn countdown(&self, kind: CatalogKind) -> Result<Countdown> {
        self.run(move |s| s.market(kind).countdown(Utc::now())).await
    }

    /// Display cards for the current rotation of `kind`.
    pub async fn cards(&self, kind: CatalogKind) -> Result<Vec<OfferCard>> {
        self.run(move |s| s.market(kind).cards()).await
    }

    /// Fetch any rotation whose cached snapshot has expired.
    pub async fn refresh(&self) -> Result<Vec<CatalogKind>> {
        self.run(|s| s.refresh()).await
    }
}
