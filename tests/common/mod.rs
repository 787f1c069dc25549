//! Shared test fixtures for the market SDK integration tests.
//!
//! Provides `setup_offline_sdk()` which creates an offline `MarketSdk` whose
//! cache directory is seeded with small sample data files.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fs;
use std::path::Path;
use warlab_market::{CatalogSnapshot, MarketSdk, Offer};

pub const USER_ID: &str = "user_123";

/// Fixed reference instant so countdowns are deterministic.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Snapshot expiring `millis` after [`now()`].
pub fn snapshot_expiring_in(millis: i64, offers: Vec<Offer>) -> CatalogSnapshot {
    CatalogSnapshot::new(offers, now() + Duration::milliseconds(millis)).unwrap()
}

pub fn sample_offers() -> Vec<Offer> {
    vec![
        Offer::new("M4 Blueprint", "Rare"),
        Offer::new("Ghillie Suit Blueprint", "Legendary"),
        Offer::new("Claymore Blueprint", "Common"),
        Offer::new("Field Backpack Blueprint", "Uncommon"),
        Offer::new("Prototype Railgun Blueprint", "Epic"),
    ]
}

/// Create an offline SDK backed by a temporary cache directory with sample
/// data files.
///
/// Returns `(MarketSdk, tempfile::TempDir)`. The caller must keep the `TempDir`
/// alive for the duration of the test so the cache directory is not deleted
/// prematurely.
pub fn setup_offline_sdk() -> (MarketSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    seed_data(tmp_dir.path());
    let sdk = MarketSdk::builder()
        .cache_dir(tmp_dir.path())
        .offline(true)
        .user_id(USER_ID)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// Online SDK over the seeded cache whose base URL refuses connections.
pub fn setup_unreachable_sdk() -> (MarketSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    seed_data(tmp_dir.path());
    let sdk = MarketSdk::builder()
        .cache_dir(tmp_dir.path())
        .base_url("http://127.0.0.1:1")
        .timeout(std::time::Duration::from_secs(2))
        .offline(false)
        .user_id(USER_ID)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// Offline SDK over an empty cache directory.
pub fn setup_empty_sdk() -> (MarketSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = MarketSdk::builder()
        .cache_dir(tmp_dir.path())
        .offline(true)
        .user_id(USER_ID)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

pub fn write_json(dir: &Path, file: &str, value: &serde_json::Value) {
    fs::write(dir.join(file), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn seed_data(dir: &Path) {
    // Live rotations, expiring far in the future.
    write_json(
        dir,
        "blackmarket_rotation.json",
        &serde_json::json!({
            "offers": [
                {"name": "M4 Blueprint", "rarity": "Rare"},
                {"name": "Claymore Blueprint", "rarity": "Common"},
                {"name": "Prototype Railgun Blueprint", "rarity": "Epic"}
            ],
            "expires": "2999-01-01T00:00:00Z"
        }),
    );
    write_json(
        dir,
        "market_parts_rotation.json",
        &serde_json::json!({
            "offers": [
                {"name": "Trigger Assembly", "rarity": "Uncommon"},
                {"name": "Barrel", "rarity": "Legendary"}
            ],
            "expires": "2999-01-01T00:00:00"
        }),
    );

    write_json(
        dir,
        "user_profiles.json",
        &serde_json::json!({
            USER_ID: {
                "inventory": ["Scrap", "Duct Tape", "Scrap", "Bolt", "Scrap"],
                "blueprints": ["M4 Blueprint"],
                "prestige": 200
            },
            "user_456": {
                "prestige": 10
            }
        }),
    );

    write_json(
        dir,
        "blackmarket_items_master.json",
        &serde_json::json!({
            "M4 Blueprint": {"type": "Weapon", "rarity": "Rare", "tags": ["rifle", "auto"]},
            "Ghillie Suit Blueprint": {"type": "Armor", "rarity": "Legendary", "tags": ["stealth"]},
            "Claymore Blueprint": {"type": "Explosive", "rarity": "Common", "tags": []}
        }),
    );

    write_json(
        dir,
        "item_recipes.json",
        &serde_json::json!({
            "m4": {"produces": "M4 Blueprint", "rarity": "Rare"},
            "ak74": {"produces": "AK-74 Blueprint", "rarity": "Uncommon"}
        }),
    );
    write_json(
        dir,
        "armor_blueprints.json",
        &serde_json::json!({
            "ghillie": {"produces": "Ghillie Suit Blueprint", "rarity": "Legendary"},
            "vest": {"produces": "Improvised Vest Blueprint"}
        }),
    );
    write_json(
        dir,
        "explosive_blueprints.json",
        &serde_json::json!({
            "pox": {"produces": "Pox Explosive Blueprint", "rarity": "Rare"},
            "claymore": {"produces": "Claymore Blueprint", "rarity": "Common"},
            "pipe": {"produces": "Pipe Bomb Blueprint", "rarity": "Uncommon"}
        }),
    );
}
