//! Inventory and blueprint collection views.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::config;
use crate::error::Result;
use crate::models::BlueprintEntry;

/// Count repeated items, keeping the order in which each item first appears.
pub fn item_counts<S: AsRef<str>>(items: &[S]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for item in items {
        let item = item.as_ref();
        match index.get(item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item, counts.len());
                counts.push((item.to_string(), 1));
            }
        }
    }

    counts
}

/// Inventory entries sorted by item name.
pub fn sorted_entries<V: Clone>(inventory: &HashMap<String, V>) -> Vec<(String, V)> {
    let mut entries: Vec<(String, V)> = inventory
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

// ---------------------------------------------------------------------------
// Blueprint collection
// ---------------------------------------------------------------------------

/// Master blueprint list in file order.
pub type BlueprintCatalog = Vec<(String, BlueprintEntry)>;

/// Decode `blackmarket_items_master.json`, keeping key order.
pub fn blueprint_catalog(value: serde_json::Value) -> Result<BlueprintCatalog> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_value(value)?;
    map.into_iter()
        .map(|(name, entry)| -> Result<(String, BlueprintEntry)> {
            Ok((name, serde_json::from_value(entry)?))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub unlocked: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blueprints Unlocked: {} / {}", self.unlocked, self.total)
    }
}

/// How many blueprints a player owns out of the master list.
///
/// The owned count is taken as-is, including blueprints no longer in the
/// master list.
pub fn blueprint_progress(owned: &[String], catalog: &BlueprintCatalog) -> Progress {
    Progress {
        unlocked: owned.len(),
        total: catalog.len(),
    }
}

/// Blueprints a player has unlocked, measured against the unlock cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockedBlueprints {
    pub names: Vec<String>,
    pub cap: usize,
}

impl UnlockedBlueprints {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `Unlocked Blueprints (N/12)`, or a placeholder when nothing is unlocked.
impl fmt::Display for UnlockedBlueprints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("No blueprints unlocked yet.")
        } else {
            write!(f, "Unlocked Blueprints ({}/{})", self.names.len(), self.cap)
        }
    }
}

/// The player's unlocked blueprints against [`config::BLUEPRINT_CAP`].
pub fn unlocked_blueprints(owned: &[String]) -> UnlockedBlueprints {
    UnlockedBlueprints {
        names: owned.to_vec(),
        cap: config::BLUEPRINT_CAP,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintCard {
    pub name: String,
    pub kind: String,
    pub rarity: String,
    pub tags: Vec<String>,
    pub owned: bool,
}

impl BlueprintCard {
    /// `"owned"` or `"missing"`.
    pub fn status_class(&self) -> &'static str {
        if self.owned {
            "owned"
        } else {
            "missing"
        }
    }
}

/// One card per master blueprint, in master order, flagged by ownership.
pub fn blueprint_cards(catalog: &BlueprintCatalog, owned: &[String]) -> Vec<BlueprintCard> {
    catalog
        .iter()
        .map(|(name, entry)| BlueprintCard {
            name: name.clone(),
            kind: entry.kind.clone(),
            rarity: entry.rarity.clone(),
            tags: entry.tags.clone(),
            owned: owned.iter().any(|o| o == name),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Crafting requirements
// ---------------------------------------------------------------------------

/// True when `inventory` holds at least the required quantity of every part.
pub fn has_required_parts(inventory: &[String], requirements: &HashMap<String, usize>) -> bool {
    let counts: HashMap<&str, usize> = inventory.iter().fold(HashMap::new(), |mut acc, item| {
        *acc.entry(item.as_str()).or_insert(0) += 1;
        acc
    });
    requirements
        .iter()
        .all(|(item, qty)| counts.get(item.as_str()).copied().unwrap_or(0) >= *qty)
}

/// Remove the required parts from `inventory`.
///
/// Returns `false` and leaves the inventory untouched when any part is short.
pub fn remove_parts(inventory: &mut Vec<String>, requirements: &HashMap<String, usize>) -> bool {
    if !has_required_parts(inventory, requirements) {
        return false;
    }
    for (item, qty) in requirements {
        for _ in 0..*qty {
            if let Some(pos) = inventory.iter().position(|i| i == item) {
                inventory.remove(pos);
            }
        }
    }
    true
}
