//! Snapshot parsing and validation at the data boundary.

use chrono::{TimeZone, Utc};
use warlab_market::models::{parse_timestamp, PoolEntry, UserProfile};
use warlab_market::{CatalogSnapshot, MarketError, Offer, Rarity};

// ---------------------------------------------------------------------------
// parse_timestamp
// ---------------------------------------------------------------------------

#[test]
fn parses_rfc3339_with_offset() {
    let ts = parse_timestamp("2025-06-01T14:00:00+02:00").unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
}

#[test]
fn parses_naive_timestamp_as_utc() {
    let ts = parse_timestamp("2025-06-01T12:00:00.123456").unwrap();
    assert_eq!(ts.timestamp(), Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap().timestamp());
    assert_eq!(ts.timestamp_subsec_micros(), 123_456);
}

#[test]
fn rejects_malformed_timestamp() {
    let err = parse_timestamp("next tuesday").unwrap_err();
    assert!(matches!(err, MarketError::InvalidTimestamp(_)));
}

// ---------------------------------------------------------------------------
// CatalogSnapshot
// ---------------------------------------------------------------------------

#[test]
fn snapshot_from_json_keeps_offers_in_order() {
    let snapshot = CatalogSnapshot::from_json(
        r#"{
            "offers": [
                {"name": "Pox Explosive Blueprint", "rarity": "Rare"},
                {"name": "AK-74 Blueprint", "rarity": "Uncommon"}
            ],
            "expires": "2025-06-01T12:30:00Z"
        }"#,
    )
    .unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.offers()[0].name, "Pox Explosive Blueprint");
    assert_eq!(snapshot.offers()[1].name, "AK-74 Blueprint");
    assert_eq!(
        snapshot.expires_at(),
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap()
    );
}

#[test]
fn snapshot_accepts_unknown_rarity() {
    let snapshot = CatalogSnapshot::from_value(serde_json::json!({
        "offers": [{"name": "Railgun", "rarity": "Epic"}],
        "expires": "2025-06-01T12:30:00Z"
    }))
    .unwrap();
    assert_eq!(snapshot.offers()[0].tier(), None);
}

#[test]
fn snapshot_rejects_malformed_expiry() {
    let err = CatalogSnapshot::from_value(serde_json::json!({
        "offers": [],
        "expires": "not-a-date"
    }))
    .unwrap_err();
    assert!(matches!(err, MarketError::InvalidTimestamp(_)));
}

#[test]
fn snapshot_rejects_missing_expiry() {
    let err = CatalogSnapshot::from_value(serde_json::json!({ "offers": [] })).unwrap_err();
    assert!(matches!(err, MarketError::Json(_)));
}

#[test]
fn snapshot_rejects_blank_offer_name() {
    let err = CatalogSnapshot::from_value(serde_json::json!({
        "offers": [{"name": "  ", "rarity": "Common"}],
        "expires": "2025-06-01T12:30:00Z"
    }))
    .unwrap_err();
    assert!(matches!(err, MarketError::InvalidSnapshot(_)));
}

#[test]
fn snapshot_serializes_to_wire_shape() {
    let expires = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();
    let snapshot = CatalogSnapshot::new(vec![Offer::new("M4 Blueprint", "Rare")], expires).unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value["offers"][0]["name"], "M4 Blueprint");
    assert_eq!(value["expires"], "2025-06-01T12:30:00Z");
}

// ---------------------------------------------------------------------------
// Rarity and profile data
// ---------------------------------------------------------------------------

#[test]
fn rarity_tiers_are_ordered() {
    assert!(Rarity::Common < Rarity::Uncommon);
    assert!(Rarity::Rare < Rarity::Legendary);
    assert_eq!("Legendary".parse::<Rarity>().unwrap(), Rarity::Legendary);
    assert!("Mythic".parse::<Rarity>().is_err());
}

#[test]
fn profile_fields_default_when_absent() {
    let profile: UserProfile = serde_json::from_value(serde_json::json!({ "prestige": 5 })).unwrap();
    assert!(profile.inventory.is_empty());
    assert!(profile.blueprints.is_empty());
    assert_eq!(profile.prestige, 5);
}

#[test]
fn pool_entry_rarity_defaults_to_common() {
    let entry: PoolEntry =
        serde_json::from_value(serde_json::json!({ "produces": "Improvised Vest Blueprint" })).unwrap();
    assert_eq!(entry.to_offer(), Offer::new("Improvised Vest Blueprint", "Common"));
}
