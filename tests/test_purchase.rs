//! Buying offers from the current rotation.

mod common;

use warlab_market::config;
use warlab_market::purchase::{self, PurchaseError, Unlock};
use warlab_market::UserProfile;

fn buyer(prestige: i64) -> UserProfile {
    UserProfile {
        prestige,
        ..Default::default()
    }
}

#[test]
fn find_offer_ignores_case() {
    let snapshot = common::snapshot_expiring_in(60_000, common::sample_offers());
    let offer = purchase::find_offer(&snapshot, "ghillie suit blueprint").unwrap();
    assert_eq!(offer.name, "Ghillie Suit Blueprint");
    assert!(purchase::find_offer(&snapshot, "Nuke").is_none());
}

#[test]
fn purchase_deducts_cost_and_unlocks_blueprint() {
    let snapshot = common::snapshot_expiring_in(60_000, common::sample_offers());
    let mut profile = buyer(200);

    let receipt =
        purchase::purchase(&mut profile, &snapshot, "m4 blueprint", &config::BLUEPRINT_PRICES).unwrap();

    assert_eq!(receipt.item, "M4 Blueprint");
    assert_eq!(receipt.cost, 150);
    assert_eq!(receipt.balance, 50);
    assert_eq!(receipt.unlock, Unlock::Unlocked);
    assert_eq!(profile.prestige, 50);
    assert_eq!(profile.blueprints, vec!["M4 Blueprint".to_string()]);
}

#[test]
fn purchase_of_owned_blueprint_still_spends_prestige() {
    let snapshot = common::snapshot_expiring_in(60_000, common::sample_offers());
    let mut profile = buyer(100);
    profile.blueprints.push("Claymore Blueprint".into());

    let receipt =
        purchase::purchase(&mut profile, &snapshot, "Claymore Blueprint", &config::BLUEPRINT_PRICES)
            .unwrap();

    assert_eq!(receipt.unlock, Unlock::AlreadyOwned);
    assert_eq!(profile.prestige, 70);
    assert_eq!(profile.blueprints.len(), 1);
}

#[test]
fn purchase_rejects_insufficient_prestige() {
    let snapshot = common::snapshot_expiring_in(60_000, common::sample_offers());
    let mut profile = buyer(299);

    let err = purchase::purchase(
        &mut profile,
        &snapshot,
        "Ghillie Suit Blueprint",
        &config::BLUEPRINT_PRICES,
    )
    .unwrap_err();

    assert_eq!(
        err,
        PurchaseError::InsufficientPrestige {
            cost: 300,
            balance: 299
        }
    );
    assert_eq!(profile.prestige, 299);
    assert!(profile.blueprints.is_empty());
}

#[test]
fn purchase_rejects_items_outside_rotation() {
    let snapshot = common::snapshot_expiring_in(60_000, common::sample_offers());
    let mut profile = buyer(1_000);
    let err = purchase::purchase(&mut profile, &snapshot, "AK-74 Blueprint", &config::BLUEPRINT_PRICES)
        .unwrap_err();
    assert!(matches!(err, PurchaseError::NotInRotation(_)));
}

#[test]
fn purchase_rejects_unpriced_offers() {
    let snapshot = common::snapshot_expiring_in(60_000, common::sample_offers());
    let mut profile = buyer(1_000);
    let err = purchase::purchase(
        &mut profile,
        &snapshot,
        "Prototype Railgun Blueprint",
        &config::BLUEPRINT_PRICES,
    )
    .unwrap_err();
    assert!(matches!(err, PurchaseError::Unpriced { .. }));
    assert_eq!(profile.prestige, 1_000);
}
