//! Local cache of the market's JSON data files.
//!
//! Data files are fetched from the configured base URL on first access and
//! kept on disk. Rotation files carry their own expiry, so a cached rotation
//! is fetched again once the snapshot it holds has expired. Everything else
//! is treated as static until the cache is cleared.

use crate::config;
use crate::error::{MarketError, Result};
use crate::models::{CatalogKind, CatalogSnapshot, RawSnapshot};
use crate::rotation;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Downloads and caches the market's JSON data files.
pub struct CacheManager {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// Base URL data files are fetched from.
    pub base_url: String,
    /// If true, never download (use cached files only).
    pub offline: bool,
    timeout: Duration,
    client: Option<Client>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(
        cache_dir: Option<PathBuf>,
        base_url: Option<String>,
        offline: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        let base_url = base_url
            .unwrap_or_else(|| config::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            cache_dir: dir,
            base_url,
            offline,
            timeout,
            client: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()?,
            );
        }
        self.client
            .as_ref()
            .ok_or_else(|| MarketError::InvalidArgument("HTTP client unavailable".into()))
    }

    fn file_name(name: &str) -> Result<&'static str> {
        config::data_files()
            .get(name)
            .copied()
            .ok_or_else(|| MarketError::NotFound(format!("Unknown data file: {}", name)))
    }

    /// Cached path for a logical file, preferring the plain file over a `.gz` copy.
    fn local_path(&self, filename: &str) -> Option<PathBuf> {
        let plain = self.cache_dir.join(filename);
        if plain.exists() {
            return Some(plain);
        }
        let gz = self.cache_dir.join(format!("{}.gz", filename));
        gz.exists().then_some(gz)
    }

    /// Check whether a cached file needs fetching again at `now`.
    ///
    /// Missing files are stale. Rotation files are stale once the snapshot
    /// they hold has expired, or when the snapshot cannot be read at all.
    /// Other files never go stale.
    pub fn is_stale_at(&self, name: &str, now: DateTime<Utc>) -> Result<bool> {
        let filename = Self::file_name(name)?;
        let path = match self.local_path(filename) {
            Some(p) => p,
            None => return Ok(true),
        };
        if !is_rotation_file(name) {
            return Ok(false);
        }
        match read_json(&path) {
            Ok(value) => Ok(rotation_expired(&value, now)),
            Err(e) => {
                debug!(file = filename, error = %e, "cached rotation unreadable");
                Ok(true)
            }
        }
    }

    /// [`is_stale_at`](Self::is_stale_at) for the current time.
    pub fn is_stale(&self, name: &str) -> Result<bool> {
        self.is_stale_at(name, Utc::now())
    }

    /// Download a single file from the base URL.
    ///
    /// Downloads into a temp file in the cache directory and persists it on
    /// success, so an interrupted download never leaves a partial file behind.
    fn download_file(&mut self, filename: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", self.base_url, filename);
        info!(%url, "downloading data file");

        let dir = dest.parent().unwrap_or(self.cache_dir.as_path()).to_path_buf();
        fs::create_dir_all(&dir)?;

        let client = self.client()?.clone();
        let resp = client.get(&url).send()?.error_for_status()?;
        let bytes = resp.bytes()?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(dest).map_err(|e| MarketError::Io(e.error))?;
        Ok(())
    }

    /// Ensure a data file is cached locally, downloading if needed.
    ///
    /// # Arguments
    ///
    /// * `name` - Logical file name (e.g. `"user_profiles"`, `"blackmarket_rotation"`).
    ///
    /// # Returns
    ///
    /// Local filesystem path to the cached JSON file.
    pub fn ensure_json(&mut self, name: &str) -> Result<PathBuf> {
        let filename = Self::file_name(name)?;
        let cached = self.local_path(filename);

        if cached.is_none() || self.is_stale(name)? {
            if self.offline {
                if let Some(path) = cached {
                    return Ok(path);
                }
                return Err(MarketError::NotFound(format!(
                    "Data file {} not cached and offline mode is enabled",
                    filename
                )));
            }
            let dest = self.cache_dir.join(filename);
            return match (self.download_file(filename, &dest), cached) {
                (Ok(()), _) => Ok(dest),
                (Err(e), Some(path)) => {
                    warn!(file = filename, error = %e, "fetch failed, keeping cached copy");
                    Ok(path)
                }
                (Err(e), None) => Err(e),
            };
        }

        cached.ok_or_else(|| MarketError::NotFound(filename.to_string()))
    }

    /// Load and parse a data file (handles `.gz` transparently).
    ///
    /// The cached copy is read once; an expired rotation is fetched again and
    /// the expired copy is served if that fetch fails. If the cached file is
    /// corrupt (truncated download, disk error), it is deleted automatically
    /// so the next call fetches a fresh copy.
    pub fn load_json(&mut self, name: &str) -> Result<serde_json::Value> {
        let filename = Self::file_name(name)?;
        let dest = self.cache_dir.join(filename);

        if let Some(path) = self.local_path(filename) {
            let value = read_cached(&path)?;
            if self.offline || !is_rotation_file(name) || !rotation_expired(&value, Utc::now()) {
                return Ok(value);
            }
            return match self.download_file(filename, &dest) {
                Ok(()) => read_cached(&dest),
                Err(e) => {
                    warn!(file = filename, error = %e, "fetch failed, serving expired rotation");
                    Ok(value)
                }
            };
        }

        if self.offline {
            return Err(MarketError::NotFound(format!(
                "Data file {} not cached and offline mode is enabled",
                filename
            )));
        }
        self.download_file(filename, &dest)?;
        read_cached(&dest)
    }

    /// Download a data file, replacing the cached copy.
    ///
    /// Unlike [`ensure_json`](Self::ensure_json), a failed download is an error.
    pub fn fetch(&mut self, name: &str) -> Result<PathBuf> {
        let filename = Self::file_name(name)?;
        if self.offline {
            return Err(MarketError::InvalidArgument(format!(
                "Cannot fetch {} in offline mode",
                filename
            )));
        }
        let dest = self.cache_dir.join(filename);
        self.download_file(filename, &dest)?;
        Ok(dest)
    }

    /// Write a data file into the cache, replacing any cached copy.
    pub fn store_json(&self, name: &str, value: &serde_json::Value) -> Result<PathBuf> {
        let filename = Self::file_name(name)?;
        let dest = self.cache_dir.join(filename);
        let gz = self.cache_dir.join(format!("{}.gz", filename));
        if gz.exists() {
            fs::remove_file(&gz)?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&self.cache_dir)?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.persist(&dest).map_err(|e| MarketError::Io(e.error))?;
        debug!(file = filename, "stored data file in cache");
        Ok(dest)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

fn is_rotation_file(name: &str) -> bool {
    [CatalogKind::Blueprints, CatalogKind::Parts]
        .iter()
        .any(|k| k.data_file() == name)
}

/// True when a cached rotation value has expired at `now` or is not a valid snapshot.
fn rotation_expired(value: &serde_json::Value, now: DateTime<Utc>) -> bool {
    RawSnapshot::deserialize(value)
        .map_err(MarketError::from)
        .and_then(CatalogSnapshot::try_from)
        .map(|s| rotation::is_expired(&s, now))
        .unwrap_or(true)
}

/// Read a cached file, evicting it when it does not parse.
fn read_cached(path: &Path) -> Result<serde_json::Value> {
    match read_json(path) {
        Ok(value) => Ok(value),
        Err(e @ MarketError::Json(_)) => {
            warn!(path = %path.display(), error = %e, "corrupt cache file, removing");
            let _ = fs::remove_file(path);
            Err(MarketError::NotFound(format!(
                "Cache file '{}' was corrupt and has been removed. \
                 Retry to fetch it again. Original error: {}",
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown"),
                e
            )))
        }
        Err(e) => Err(e),
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let file = fs::File::open(path)?;
        let mut decoder = BufReader::new(GzDecoder::new(BufReader::new(file)));
        let mut contents = String::new();
        decoder.read_to_string(&mut contents)?;
        Ok(serde_json::from_str(&contents)?)
    } else {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
