use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::offer::Offer;

// ---------------------------------------------------------------------------
// UserProfile — A player's stash and currency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub blueprints: Vec<String>,
    #[serde(default)]
    pub prestige: i64,
}

impl UserProfile {
    pub fn owns_blueprint(&self, name: &str) -> bool {
        self.blueprints.iter().any(|b| b == name)
    }
}

/// All player profiles keyed by user id (`user_profiles.json`).
pub type ProfileBook = HashMap<String, UserProfile>;

// ---------------------------------------------------------------------------
// BlueprintEntry — Master blueprint list entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub rarity: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// PoolEntry — Recipe that a rotation can draw from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub produces: String,
    #[serde(default = "default_rarity")]
    pub rarity: String,
}

fn default_rarity() -> String {
    "Common".to_string()
}

impl PoolEntry {
    pub fn to_offer(&self) -> Offer {
        Offer::new(self.produces.clone(), self.rarity.clone())
    }
}
