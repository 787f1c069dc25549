//! Player profile and blueprint collection views.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::cache::CacheManager;
use crate::error::{MarketError, Result};
use crate::inventory::{self, BlueprintCard, BlueprintCatalog, Progress, UnlockedBlueprints};
use crate::models::{ProfileBook, UserProfile};

// ---------------------------------------------------------------------------
// ProfileQuery
// ---------------------------------------------------------------------------

/// Query interface for `user_profiles.json` and the master blueprint list.
///
/// Methods without an explicit user id act on the user the SDK was built for.
pub struct ProfileQuery<'a> {
    cache: &'a RefCell<CacheManager>,
    user_id: Option<&'a str>,
}

impl<'a> ProfileQuery<'a> {
    /// Create a new `ProfileQuery` bound to the given cache.
    pub fn new(cache: &'a RefCell<CacheManager>, user_id: Option<&'a str>) -> Self {
        Self { cache, user_id }
    }

    /// Every stored profile keyed by user id.
    pub fn all(&self) -> Result<ProfileBook> {
        let data = self.cache.borrow_mut().load_json("user_profiles")?;
        Ok(serde_json::from_value(data)?)
    }

    /// Profile for `user_id`, or `None` when the user has none yet.
    pub fn get(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.all()?.remove(user_id))
    }

    /// Profile of the configured user; an empty profile if they have none yet.
    pub fn current(&self) -> Result<UserProfile> {
        let user_id = self.user_id.ok_or_else(|| {
            MarketError::InvalidArgument("No user id configured for this SDK".into())
        })?;
        Ok(self.get(user_id)?.unwrap_or_default())
    }

    /// The configured user's inventory as `(item, quantity)` sorted by item name.
    pub fn inventory(&self) -> Result<Vec<(String, usize)>> {
        let profile = self.current()?;
        let counts: HashMap<String, usize> = inventory::item_counts(&profile.inventory)
            .into_iter()
            .collect();
        Ok(inventory::sorted_entries(&counts))
    }

    /// The master blueprint list in file order.
    pub fn blueprint_catalog(&self) -> Result<BlueprintCatalog> {
        let data = self
            .cache
            .borrow_mut()
            .load_json("blackmarket_items_master")?;
        inventory::blueprint_catalog(data)
    }

    /// Blueprints the configured user has unlocked out of the master list.
    pub fn progress(&self) -> Result<Progress> {
        let profile = self.current()?;
        let catalog = self.blueprint_catalog()?;
        Ok(inventory::blueprint_progress(&profile.blueprints, &catalog))
    }

    /// The configured user's unlocked blueprints against the unlock cap.
    pub fn unlocked_blueprints(&self) -> Result<UnlockedBlueprints> {
        let profile = self.current()?;
        Ok(inventory::unlocked_blueprints(&profile.blueprints))
    }

    /// One card per master blueprint, flagged owned or missing for the configured user.
    pub fn blueprint_cards(&self) -> Result<Vec<BlueprintCard>> {
        let profile = self.current()?;
        let catalog = self.blueprint_catalog()?;
        Ok(inventory::blueprint_cards(&catalog, &profile.blueprints))
    }
}
