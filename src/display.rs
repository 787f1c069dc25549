//! Display-ready values for the market pages.
//!
//! The rendering layer turns these into cards; nothing here builds markup.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::catalog::RotatingCatalog;
use crate::models::{parse_timestamp, CatalogSnapshot, Offer, Price, PriceTable};

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

/// Time until the next rotation, or unavailable when the expiry is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "minutes", rename_all = "snake_case")]
pub enum Countdown {
    Minutes(u64),
    Unavailable,
}

impl Countdown {
    pub fn for_snapshot(snapshot: &CatalogSnapshot, now: DateTime<Utc>) -> Self {
        Countdown::Minutes(RotatingCatalog::remaining_minutes(snapshot, now))
    }

    /// Countdown from a raw expiry string; malformed input is [`Countdown::Unavailable`].
    pub fn from_expiry(expires: Option<&str>, now: DateTime<Utc>) -> Self {
        match expires.map(parse_timestamp) {
            Some(Ok(expires_at)) => Countdown::Minutes(RotatingCatalog::minutes_until(expires_at, now)),
            _ => Countdown::Unavailable,
        }
    }

    /// Render with a leading label, e.g. `Next rotation in ~2 minutes`.
    pub fn label(&self, prefix: &str) -> String {
        match self {
            Countdown::Minutes(m) => format!("{} ~{} minutes", prefix, m),
            Countdown::Unavailable => "No countdown available".to_string(),
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label("Next rotation in"))
    }
}

// ---------------------------------------------------------------------------
// OfferCard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferCard {
    pub name: String,
    pub rarity: String,
    /// Lowercased rarity, used as the card's style class.
    pub css_class: String,
    pub emoji: &'static str,
    pub cost: Price,
}

impl OfferCard {
    pub fn new(offer: &Offer, table: &PriceTable) -> Self {
        Self {
            name: offer.name.clone(),
            rarity: offer.rarity.clone(),
            css_class: offer.rarity.to_lowercase(),
            emoji: offer.tier().map(|t| t.emoji()).unwrap_or("❔"),
            cost: RotatingCatalog::price_for(&offer.rarity, table),
        }
    }

    /// `Cost: 150 Prestige`, or `Cost: ? Prestige` when unpriced.
    pub fn cost_line(&self) -> String {
        format!("Cost: {} Prestige", self.cost)
    }
}

/// Cards for every offer, in snapshot order.
pub fn offer_cards(snapshot: &CatalogSnapshot, table: &PriceTable) -> Vec<OfferCard> {
    RotatingCatalog::ordered_offers(snapshot)
        .iter()
        .map(|o| OfferCard::new(o, table))
        .collect()
}
