//! Async wrapper tests (requires the `async` feature).

#![cfg(feature = "async")]

mod common;

use warlab_market::{AsyncMarketSdk, CatalogKind, Price};

#[tokio::test]
async fn async_sdk_serves_cached_cards() {
    let (_sync, tmp) = common::setup_offline_sdk();
    let sdk = AsyncMarketSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .user_id(common::USER_ID)
        .build()
        .await
        .unwrap();

    let cards = sdk.cards(CatalogKind::Blueprints).await.unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[1].cost, Price::Cost(30));

    let prestige = sdk
        .run(|s| Ok(s.profiles().current()?.prestige))
        .await
        .unwrap();
    assert_eq!(prestige, 200);

    assert!(sdk.refresh().await.unwrap().is_empty());
}
