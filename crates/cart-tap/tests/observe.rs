use std::sync::Arc;

use posinfo_cart_tap::{CartObserved, CartTap, OutgoingRequest, RequestBody, TransportObserver};
use posinfo_event_bus::{EventBus, InMemoryBus};
use posinfo_product_cache::{ProductCache, SessionHints};

#[tokio::test]
async fn observation_publishes_a_cart_signal() {
    let cache = Arc::new(ProductCache::new());
    let hints = Arc::new(SessionHints::new());
    let bus = InMemoryBus::<CartObserved>::new(8);
    let mut rx = bus.subscribe();
    let tap = CartTap::new(Arc::clone(&cache), hints, Arc::clone(&bus));

    let request = OutgoingRequest {
        url: "/pos/cart/sync".into(),
        body: RequestBody::Multipart(vec![(
            "cart".into(),
            r#"{"items":[{"product":{"id":7,"name":"Cinta"}},{"product":{"id":8,"name":"Arpillera"}}]}"#.into(),
        )]),
    };

    tap.observe(&request).await;

    let signal = rx.recv().await.expect("signal");
    assert_eq!(signal.products, 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn empty_item_list_publishes_nothing() {
    let cache = Arc::new(ProductCache::new());
    let hints = Arc::new(SessionHints::new());
    let bus = InMemoryBus::<CartObserved>::new(8);
    let mut rx = bus.subscribe();
    let tap = CartTap::new(cache, hints, Arc::clone(&bus));

    let request = OutgoingRequest {
        url: "/pos/cart/sync".into(),
        body: RequestBody::Text(r#"{"cart":{"items":[]}}"#.into()),
    };

    tap.observe(&request).await;

    assert!(rx.try_recv().is_err());
}
