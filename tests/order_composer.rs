//! Order composer: price seeding, validation, submission, and the
//! reconciliation reads that follow every submission.
//!
//! Run with: `cargo test --test order_composer`

mod support;

use predmarket_client::auth::SessionStore;
use predmarket_client::domain::order::{BannerKind, OrderClass, OrderType, OrderValidationError};
use predmarket_client::shared::{MarketId, Outcome};
use predmarket_client::views::{ComposerError, MarketDetail, OrderComposer};
use std::sync::Arc;
use support::{book, d, fills, market, session, FakeApi};
use tokio_test::{assert_pending, assert_ready_ok, task};

const MARKET: MarketId = MarketId::new(1);

/// Signed-in composer over market 1 (YES 0.42, book 0.40 / 0.44).
async fn composer(api: &Arc<FakeApi>) -> OrderComposer {
    api.with_market(market(1, "0.42"));
    api.with_book(book(1, Outcome::Yes, &[("0.40", 10)], &[("0.44", 5)]));
    api.signed_in(session("alice", "1000.00"));

    let store = Arc::new(SessionStore::new(api.clone()));
    store.initialize().await;
    let detail = Arc::new(MarketDetail::new(api.clone()));
    OrderComposer::new(api.clone(), detail, store)
}

#[tokio::test]
async fn test_open_seeds_price_from_book_mid() {
    let api = FakeApi::new();
    let composer = composer(&api).await;

    assert!(composer.open(MARKET).await);

    let state = composer.state();
    assert_eq!(state.market_id, Some(MARKET));
    assert_eq!(state.form.price, Some(d("0.42")));
    assert!(!state.form.price_touched());
    assert_eq!(composer.estimated_total(), Some(d("0.42")));
}

#[tokio::test]
async fn test_one_sided_book_falls_back_to_market_price() {
    let api = FakeApi::new();
    api.with_market(market(2, "0.37"));
    api.with_book(book(2, Outcome::Yes, &[("0.35", 4)], &[]));
    let composer = composer(&api).await;

    composer.open(MarketId::new(2)).await;
    assert_eq!(composer.state().form.price, Some(d("0.37")));

    // NO side has no book at all: the market's NO price is used.
    composer.select_outcome(Outcome::No).await;
    let state = composer.state();
    assert_eq!(state.form.outcome, Outcome::No);
    assert_eq!(state.form.price, Some(d("0.63")));
}

#[tokio::test]
async fn test_user_price_survives_reload() {
    let api = FakeApi::new();
    let composer = composer(&api).await;
    composer.open(MARKET).await;

    composer.set_price(Some(d("0.30")));
    composer.open(MARKET).await;

    assert_eq!(composer.state().form.price, Some(d("0.30")));
}

#[tokio::test]
async fn test_open_other_market_resets_form() {
    let api = FakeApi::new();
    api.with_market(market(2, "0.80"));
    let composer = composer(&api).await;
    composer.open(MARKET).await;
    composer.set_quantity(25);
    composer.set_order_type(OrderType::Sell);

    composer.open(MarketId::new(2)).await;

    let state = composer.state();
    assert_eq!(state.market_id, Some(MarketId::new(2)));
    assert_eq!(state.form.quantity, 1);
    assert_eq!(state.form.order_type, OrderType::Buy);
    assert_eq!(state.form.price, Some(d("0.80")));
}

#[tokio::test]
async fn test_invalid_form_never_reaches_backend() {
    let api = FakeApi::new();
    let composer = composer(&api).await;
    composer.open(MARKET).await;

    composer.set_quantity(0);
    let err = composer.submit().await.unwrap_err();
    assert_eq!(
        err,
        ComposerError::Validation(OrderValidationError::QuantityNotPositive(0))
    );
    let banner = composer.state().banner.expect("validation banner");
    assert!(banner.is_error());

    composer.set_quantity(5);
    composer.set_price(Some(d("1.5")));
    let err = composer.submit().await.unwrap_err();
    assert_eq!(
        err,
        ComposerError::Validation(OrderValidationError::PriceOutOfRange(d("1.5")))
    );

    assert_eq!(api.calls("place_order"), 0);
    assert!(api.placed_orders().is_empty());
}

#[tokio::test]
async fn test_submit_without_market() {
    let api = FakeApi::new();
    let composer = composer(&api).await;

    assert_eq!(composer.submit().await, Err(ComposerError::NoMarket));
    assert_eq!(api.calls("place_order"), 0);
}

#[tokio::test]
async fn test_fills_banner_and_single_reconciliation() {
    let api = FakeApi::new();
    api.accept_orders(fills(2));
    let composer = composer(&api).await;
    composer.open(MARKET).await;
    composer.set_quantity(10);

    let before = ["market", "portfolio", "order_book", "account"].map(|c| api.calls(c));
    let banner = composer.submit().await.expect("submission");
    let after = ["market", "portfolio", "order_book", "account"].map(|c| api.calls(c));

    assert_eq!(banner.kind, BannerKind::Success);
    assert_eq!(banner.text, "Order filled! 2 fills executed.");
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(a - b, 1);
    }

    let placed = api.placed_orders();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].market, MARKET);
    assert_eq!(placed[0].quantity, 10);
    assert_eq!(placed[0].price, Some(d("0.42")));

    // Form back to defaults, price re-seeded from the reloaded book.
    let state = composer.state();
    assert!(!state.submitting);
    assert_eq!(state.form.quantity, 1);
    assert_eq!(state.form.price, Some(d("0.42")));
    assert_eq!(state.banner, Some(banner));
}

#[tokio::test]
async fn test_market_order_carries_no_price() {
    let api = FakeApi::new();
    let composer = composer(&api).await;
    composer.open(MARKET).await;
    composer.set_order_class(OrderClass::Market);
    composer.set_price(Some(d("0.99")));

    let banner = composer.submit().await.expect("submission");
    assert_eq!(banner.text, "Order placed successfully!");

    let placed = api.placed_orders();
    assert_eq!(placed[0].order_class, OrderClass::Market);
    assert_eq!(placed[0].price, None);
    let body = serde_json::to_value(&placed[0]).expect("serialize request");
    assert!(body.get("price").is_none());
}

#[tokio::test]
async fn test_rejection_shows_server_message_and_still_reconciles() {
    let api = FakeApi::new();
    api.reject_orders(r#"{"error": "Insufficient balance. Required: $21.00, Available: $10.00"}"#);
    let composer = composer(&api).await;
    composer.open(MARKET).await;
    composer.set_quantity(50);

    let portfolio_reads = api.calls("portfolio");
    let account_reads = api.calls("account");
    let banner = composer.submit().await.expect("submission");

    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(
        banner.text,
        "Insufficient balance. Required: $21.00, Available: $10.00"
    );
    assert_eq!(composer.state().form.quantity, 50);
    assert_eq!(api.calls("portfolio"), portfolio_reads + 1);
    assert_eq!(api.calls("account"), account_reads + 1);
}

#[tokio::test]
async fn test_rejection_without_message_uses_generic_banner() {
    let api = FakeApi::new();
    api.reject_orders("<html>Bad Request</html>");
    let composer = composer(&api).await;
    composer.open(MARKET).await;

    let banner = composer.submit().await.expect("submission");
    assert_eq!(banner.text, "Error placing order");
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_refused() {
    let api = FakeApi::new();
    api.accept_orders(fills(1));
    let composer = composer(&api).await;
    composer.open(MARKET).await;

    let gate = api.gate("place_order");
    let mut first = task::spawn(composer.submit());
    assert_pending!(first.poll());
    assert!(composer.state().submitting);

    assert_eq!(composer.submit().await, Err(ComposerError::InFlight));
    assert_eq!(api.calls("place_order"), 1);

    gate.notify_one();
    assert!(first.is_woken());
    let banner = assert_ready_ok!(first.poll());
    assert_eq!(banner.text, "Order filled! 1 fills executed.");
    drop(first);

    assert!(!composer.state().submitting);
    composer.submit().await.expect("slot released");
    assert_eq!(api.calls("place_order"), 2);
}

#[tokio::test]
async fn test_cancelled_submit_releases_slot() {
    let api = FakeApi::new();
    let composer = composer(&api).await;
    composer.open(MARKET).await;

    let _gate = api.gate("place_order");
    let mut first = task::spawn(composer.submit());
    assert_pending!(first.poll());
    drop(first);

    assert!(!composer.state().submitting);
    composer.submit().await.expect("slot released");
}

#[tokio::test]
async fn test_result_for_previous_market_leaves_new_form_alone() {
    let api = FakeApi::new();
    api.with_market(market(2, "0.30"));
    api.accept_orders(fills(1));
    let composer = composer(&api).await;
    composer.open(MARKET).await;

    let gate = api.gate("place_order");
    let mut first = task::spawn(composer.submit());
    assert_pending!(first.poll());

    composer.open(MarketId::new(2)).await;
    composer.set_quantity(7);
    composer.set_price(Some(d("0.25")));
    let market_reads = api.calls("market");
    let account_reads = api.calls("account");

    gate.notify_one();
    let banner = assert_ready_ok!(first.poll());
    assert_eq!(banner.text, "Order filled! 1 fills executed.");
    drop(first);

    assert_eq!(api.placed_orders()[0].market, MARKET);
    let state = composer.state();
    assert_eq!(state.market_id, Some(MarketId::new(2)));
    assert_eq!(state.form.quantity, 7);
    assert_eq!(state.form.price, Some(d("0.25")));
    assert_eq!(state.banner, None);

    // Market 2's detail is not reloaded for market 1's order; the balance is.
    assert_eq!(api.calls("market"), market_reads);
    assert_eq!(api.calls("account"), account_reads + 1);
}

#[tokio::test]
async fn test_rejection_for_previous_market_shows_no_banner() {
    let api = FakeApi::new();
    api.with_market(market(2, "0.30"));
    api.reject_orders(r#"{"error": "Market is not active"}"#);
    let composer = composer(&api).await;
    composer.open(MARKET).await;

    let gate = api.gate("place_order");
    let mut first = task::spawn(composer.submit());
    assert_pending!(first.poll());

    composer.open(MarketId::new(2)).await;
    gate.notify_one();
    let banner = assert_ready_ok!(first.poll());
    assert!(banner.is_error());
    drop(first);

    assert_eq!(composer.state().banner, None);
}
