use serde::{Serialize, Serializer};
use std::fmt;

use super::rarity::Rarity;
use crate::config;
use crate::error::{MarketError, Result};

// ---------------------------------------------------------------------------
// Price — Result of a price lookup
// ---------------------------------------------------------------------------

/// Cost of an offer, or the unknown marker when its rarity has no price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    Cost(u32),
    Unknown,
}

impl Price {
    /// The numeric cost, if one is configured.
    pub fn cost(&self) -> Option<u32> {
        match self {
            Price::Cost(c) => Some(*c),
            Price::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Price::Unknown)
    }
}

/// Renders the cost, or `?` for the unknown marker.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Cost(c) => write!(f, "{}", c),
            Price::Unknown => f.write_str("?"),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Price::Cost(c) => serializer.serialize_u32(*c),
            Price::Unknown => serializer.serialize_str("?"),
        }
    }
}

// ---------------------------------------------------------------------------
// PriceTable — One positive cost per rarity tier
// ---------------------------------------------------------------------------

/// Prestige cost for every rarity tier of one catalog.
///
/// The table holds exactly one entry per [`Rarity`], so a recognized tier
/// always has a price. Unrecognized rarity labels are priced by
/// [`RotatingCatalog::price_for`](crate::catalog::RotatingCatalog::price_for)
/// as [`Price::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceTable {
    costs: [u32; 4],
}

impl PriceTable {
    /// Build a table from costs in tier order (Common, Uncommon, Rare, Legendary).
    ///
    /// Intended for constants; a zero cost fails const evaluation.
    pub const fn from_costs(costs: [u32; 4]) -> Self {
        let mut i = 0;
        while i < costs.len() {
            assert!(costs[i] > 0, "price table costs must be positive");
            i += 1;
        }
        Self { costs }
    }

    /// Build a table from runtime-supplied costs, rejecting zero costs.
    pub fn try_from_costs(costs: [u32; 4]) -> Result<Self> {
        if let Some(pos) = costs.iter().position(|c| *c == 0) {
            return Err(MarketError::InvalidArgument(format!(
                "{} cost must be positive",
                Rarity::ALL[pos]
            )));
        }
        Ok(Self { costs })
    }

    /// Cost configured for a tier.
    pub fn get(&self, rarity: Rarity) -> u32 {
        self.costs[rarity.index()]
    }

    /// `(tier, cost)` pairs in ascending tier order.
    pub fn iter(&self) -> impl Iterator<Item = (Rarity, u32)> + '_ {
        Rarity::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

// ---------------------------------------------------------------------------
// CatalogKind — Which rotating market a snapshot belongs to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// The black market, selling blueprints.
    Blueprints,
    /// The parts market.
    Parts,
}

impl CatalogKind {
    pub fn price_table(&self) -> PriceTable {
        match self {
            CatalogKind::Blueprints => config::BLUEPRINT_PRICES,
            CatalogKind::Parts => config::PARTS_PRICES,
        }
    }

    /// Logical data file holding this catalog's current rotation.
    pub fn data_file(&self) -> &'static str {
        match self {
            CatalogKind::Blueprints => "blackmarket_rotation",
            CatalogKind::Parts => "market_parts_rotation",
        }
    }

    /// Data files a fresh rotation of this catalog draws from.
    pub fn pool_files(&self) -> &'static [&'static str] {
        match self {
            CatalogKind::Blueprints => &config::ROTATION_POOLS[..],
            CatalogKind::Parts => &[],
        }
    }

    /// Countdown label used when rendering this catalog.
    pub fn countdown_label(&self) -> &'static str {
        match self {
            CatalogKind::Blueprints => "Next rotation in",
            CatalogKind::Parts => "Market refreshes in",
        }
    }
}
