use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::PriceTable;

/// Default location the web front end serves its data files from.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/data";

/// Number of offers drawn into each black market rotation.
pub const ROTATION_SIZE: usize = 5;

/// Lifetime of a rotation before new stock is drawn.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Maximum number of blueprints a player can unlock.
pub const BLUEPRINT_CAP: usize = 12;

/// Prestige costs for blueprints on the black market.
pub const BLUEPRINT_PRICES: PriceTable = PriceTable::from_costs([30, 75, 150, 300]);

/// Prestige costs for parts on the parts market.
pub const PARTS_PRICES: PriceTable = PriceTable::from_costs([15, 40, 90, 180]);

/// Logical data file names mapped to their file names under the base URL.
pub fn data_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Rotations
        ("blackmarket_rotation", "blackmarket_rotation.json"),
        ("market_parts_rotation", "market_parts_rotation.json"),
        // Players
        ("user_profiles", "user_profiles.json"),
        // Blueprint master list
        ("blackmarket_items_master", "blackmarket_items_master.json"),
        // Rotation pools
        ("item_recipes", "item_recipes.json"),
        ("armor_blueprints", "armor_blueprints.json"),
        ("explosive_blueprints", "explosive_blueprints.json"),
    ])
}

/// Data files holding the blueprint pools a black market rotation draws from.
pub static ROTATION_POOLS: [&str; 3] = ["item_recipes", "armor_blueprints", "explosive_blueprints"];

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("warlab-market")
    } else {
        PathBuf::from(".warlab-market-cache")
    }
}
