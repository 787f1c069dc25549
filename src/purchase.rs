//! Buying an offer from the current rotation with prestige.
//!
//! Purchases operate on an in-memory [`UserProfile`]; storing the updated
//! profile is left to the caller.

use tracing::info;

use crate::catalog::RotatingCatalog;
use crate::models::{CatalogSnapshot, Offer, Price, PriceTable, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error("{0} is not currently available in the market")]
    NotInRotation(String),

    #[error("{name} has no price for rarity {rarity}")]
    Unpriced { name: String, rarity: String },

    #[error("you need {cost} prestige to buy this item, you only have {balance}")]
    InsufficientPrestige { cost: u32, balance: i64 },
}

/// What a successful purchase did to the buyer's blueprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {
    /// The blueprint was added to the profile.
    Unlocked,
    /// The profile already had the blueprint; prestige was still spent.
    AlreadyOwned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub item: String,
    pub cost: u32,
    pub balance: i64,
    pub unlock: Unlock,
}

/// Find an offer by name, ignoring case.
pub fn find_offer<'a>(snapshot: &'a CatalogSnapshot, name: &str) -> Option<&'a Offer> {
    let wanted = name.trim().to_lowercase();
    RotatingCatalog::ordered_offers(snapshot)
        .iter()
        .find(|o| o.name.to_lowercase() == wanted)
}

/// Check whether `profile` could buy `item` right now, and at what cost.
pub fn quote(
    profile: &UserProfile,
    snapshot: &CatalogSnapshot,
    item: &str,
    table: &PriceTable,
) -> Result<(Offer, u32), PurchaseError> {
    let offer = find_offer(snapshot, item)
        .ok_or_else(|| PurchaseError::NotInRotation(item.to_string()))?;

    let cost = match RotatingCatalog::price_for(&offer.rarity, table) {
        Price::Cost(c) => c,
        Price::Unknown => {
            return Err(PurchaseError::Unpriced {
                name: offer.name.clone(),
                rarity: offer.rarity.clone(),
            })
        }
    };

    if profile.prestige < i64::from(cost) {
        return Err(PurchaseError::InsufficientPrestige {
            cost,
            balance: profile.prestige,
        });
    }

    Ok((offer.clone(), cost))
}

/// Buy `item`: deduct its cost and unlock the blueprint if it is new.
///
/// The profile is left untouched when the purchase is rejected.
pub fn purchase(
    profile: &mut UserProfile,
    snapshot: &CatalogSnapshot,
    item: &str,
    table: &PriceTable,
) -> Result<Receipt, PurchaseError> {
    let (offer, cost) = quote(profile, snapshot, item, table)?;

    profile.prestige -= i64::from(cost);
    let unlock = if profile.owns_blueprint(&offer.name) {
        Unlock::AlreadyOwned
    } else {
        profile.blueprints.push(offer.name.clone());
        Unlock::Unlocked
    };

    info!(item = %offer.name, cost, balance = profile.prestige, ?unlock, "purchase completed");

    Ok(Receipt {
        item: offer.name,
        cost,
        balance: profile.prestige,
        unlock,
    })
}
