use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::rarity::Rarity;
use crate::error::{MarketError, Result};

// ---------------------------------------------------------------------------
// Offer — One purchasable entry in a rotation
// ---------------------------------------------------------------------------

/// A single offer in a rotating catalog.
///
/// The rarity label is kept exactly as supplied; labels outside the four
/// known tiers still load and price as [`Price::Unknown`](super::Price::Unknown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub rarity: String,
}

impl Offer {
    pub fn new(name: impl Into<String>, rarity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rarity: rarity.into(),
        }
    }

    /// The parsed rarity tier, or `None` for an unrecognized label.
    pub fn tier(&self) -> Option<Rarity> {
        self.rarity.parse().ok()
    }
}

// ---------------------------------------------------------------------------
// RawSnapshot — Wire shape of a rotation file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub offers: Vec<Offer>,
    pub expires: String,
}

// ---------------------------------------------------------------------------
// CatalogSnapshot — Validated, immutable rotation
// ---------------------------------------------------------------------------

/// Point-in-time capture of a catalog's offers and the instant they rotate out.
///
/// Validated once at the boundary: the expiry must be a real instant and every
/// offer must carry a name. Duplicate offers are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot", into = "RawSnapshot")]
pub struct CatalogSnapshot {
    offers: Vec<Offer>,
    expires_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Create a snapshot from already-validated parts.
    pub fn new(offers: Vec<Offer>, expires_at: DateTime<Utc>) -> Result<Self> {
        if let Some(pos) = offers.iter().position(|o| o.name.trim().is_empty()) {
            return Err(MarketError::InvalidSnapshot(format!(
                "offer at index {} has an empty name",
                pos
            )));
        }
        Ok(Self { offers, expires_at })
    }

    /// Parse and validate a rotation file's JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(text)?;
        Self::try_from(raw)
    }

    /// Validate an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl TryFrom<RawSnapshot> for CatalogSnapshot {
    type Error = MarketError;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        let expires_at = parse_timestamp(&raw.expires)?;
        Self::new(raw.offers, expires_at)
    }
}

impl From<CatalogSnapshot> for RawSnapshot {
    fn from(snapshot: CatalogSnapshot) -> Self {
        RawSnapshot {
            offers: snapshot.offers,
            expires: snapshot
                .expires_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 with an offset, or a naive timestamp (no offset) which is
/// taken to be UTC. The bot writes the naive form.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(MarketError::InvalidTimestamp(s.to_string()))
}
